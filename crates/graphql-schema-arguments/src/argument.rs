use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    pipeline, BuildError, BuilderConfig, Completion, DirectivesConfig, ElementValue, Middleware, PipelineOutcome,
    RuntimeType, TypeLookup, TypeNodeResolver, TypeSyntaxNode,
};

/// A directive applied to an argument, with its arguments in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveNode {
    pub name: String,
    pub arguments: IndexMap<String, Value>,
}

impl DirectiveNode {
    pub fn new(name: impl Into<String>) -> Self {
        DirectiveNode {
            name: name.into(),
            arguments: IndexMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }
}

/// An argument definition as written in the schema, before its type is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentNode {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeSyntaxNode,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveNode>,
}

impl ArgumentNode {
    pub fn new(name: impl Into<String>, ty: TypeSyntaxNode) -> Self {
        ArgumentNode {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
            directives: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_directive(mut self, directive: DirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }
}

/// What argument middleware work on.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentPayload {
    pub name: String,
    pub description: Option<String>,
    pub default_value: Option<Value>,
    pub deprecation_reason: Option<String>,
    /// Free-form data attached by middleware, e.g. validation rules.
    pub extensions: IndexMap<String, Value>,
}

impl From<&ArgumentNode> for ArgumentPayload {
    fn from(node: &ArgumentNode) -> Self {
        ArgumentPayload {
            name: node.name.clone(),
            description: node.description.clone(),
            default_value: node.default_value.clone(),
            deprecation_reason: None,
            extensions: IndexMap::new(),
        }
    }
}

/// A built argument, ready to be added to its field.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: RuntimeType,
    pub description: Option<String>,
    pub default_value: Option<Value>,
    pub deprecation_reason: Option<String>,
    pub extensions: IndexMap<String, Value>,
    /// The middleware that processed the argument, in order.
    pub middleware: Vec<String>,
    pub short_circuited: bool,
}

impl From<PipelineOutcome<ArgumentPayload>> for Argument {
    fn from(outcome: PipelineOutcome<ArgumentPayload>) -> Self {
        let short_circuited = matches!(outcome.completion, Completion::ShortCircuited { .. });
        let (ty, middleware, payload) = outcome.value.into_parts();

        Argument {
            name: payload.name,
            ty,
            description: payload.description,
            default_value: payload.default_value,
            deprecation_reason: payload.deprecation_reason,
            extensions: payload.extensions,
            middleware,
            short_circuited,
        }
    }
}

pub type ArgumentMiddleware = Box<dyn Middleware<ArgumentPayload> + Send + Sync>;

/// Provides the middleware attached to an argument, bound to their directive arguments and in the
/// order they must run.
pub trait DirectiveRegistry {
    fn argument_middleware(
        &self,
        argument: &ArgumentNode,
        config: &DirectivesConfig,
    ) -> Result<Vec<ArgumentMiddleware>, BuildError>;
}

impl<T: DirectiveRegistry + ?Sized> DirectiveRegistry for &T {
    fn argument_middleware(
        &self,
        argument: &ArgumentNode,
        config: &DirectivesConfig,
    ) -> Result<Vec<ArgumentMiddleware>, BuildError> {
        (**self).argument_middleware(argument, config)
    }
}

/// Builds arguments: resolves the declared type, then runs the argument's middleware.
pub struct ArgumentFactory<'a, L: ?Sized, D: ?Sized> {
    resolver: TypeNodeResolver<'a, L>,
    directives: &'a D,
    directives_config: DirectivesConfig,
}

impl<'a, L, D> ArgumentFactory<'a, L, D>
where
    L: TypeLookup + ?Sized,
    D: DirectiveRegistry + ?Sized,
{
    pub fn new(lookup: &'a L, directives: &'a D) -> Self {
        Self::with_config(lookup, directives, &BuilderConfig::default())
    }

    pub fn with_config(lookup: &'a L, directives: &'a D, config: &BuilderConfig) -> Self {
        ArgumentFactory {
            resolver: TypeNodeResolver::with_config(lookup, &config.type_resolution),
            directives,
            directives_config: config.directives.clone(),
        }
    }

    #[tracing::instrument(skip_all, fields(argument = %node.name))]
    pub fn build(&self, node: &ArgumentNode) -> Result<Argument, BuildError> {
        let ty = self.resolver.resolve(&node.ty).map_err(|source| BuildError::Resolve {
            argument: node.name.clone(),
            source,
        })?;

        let value = ElementValue::new(ty, ArgumentPayload::from(node));
        let handlers = self.directives.argument_middleware(node, &self.directives_config)?;

        let outcome = pipeline::run(value, &handlers).map_err(|source| BuildError::Middleware {
            argument: node.name.clone(),
            source: Box::new(source),
        })?;

        tracing::debug!(middleware = ?outcome.value.middleware(), "argument built");

        Ok(Argument::from(outcome))
    }

    /// Builds every argument of a field, stopping at the first error.
    pub fn build_all<'n>(
        &self,
        nodes: impl IntoIterator<Item = &'n ArgumentNode>,
    ) -> Result<Vec<Argument>, BuildError> {
        nodes.into_iter().map(|node| self.build(node)).collect()
    }
}
