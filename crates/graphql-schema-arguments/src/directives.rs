use std::{fmt, ops::ControlFlow};

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    ArgumentMiddleware, ArgumentNode, ArgumentPayload, BoxError, BuildError, DirectiveNode, DirectiveRegistry,
    DirectivesConfig, ElementValue, Middleware, Step,
};

/// Directives defined by the GraphQL specification. They are never reported as unknown.
const BUILTIN_DIRECTIVES: &[&str] = &["deprecated", "specifiedBy"];

type Constructor = Box<dyn Fn(&DirectiveNode) -> Result<ArgumentMiddleware, String> + Send + Sync>;

/// A [DirectiveRegistry] keyed by directive name. Middleware are instantiated in the order the
/// directives are written on the argument.
#[derive(Default)]
pub struct MiddlewareRegistry {
    constructors: IndexMap<String, Constructor>,
}

impl MiddlewareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the middleware shipped with this crate: `@deprecated`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(DeprecatedMiddleware::NAME, |directive| {
            let middleware = DeprecatedMiddleware::from_directive(directive)?;
            Ok(Box::new(middleware) as ArgumentMiddleware)
        });
        registry
    }

    /// Registers the middleware constructor for `@name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn(&DirectiveNode) -> Result<ArgumentMiddleware, String> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }
}

impl fmt::Debug for MiddlewareRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareRegistry")
            .field("directives", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DirectiveRegistry for MiddlewareRegistry {
    fn argument_middleware(
        &self,
        argument: &ArgumentNode,
        config: &DirectivesConfig,
    ) -> Result<Vec<ArgumentMiddleware>, BuildError> {
        let mut handlers = Vec::with_capacity(argument.directives.len());

        for directive in &argument.directives {
            let Some(constructor) = self.constructors.get(&directive.name) else {
                if config.ignore_unknown || BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
                    tracing::trace!(directive = %directive.name, "no middleware for directive, skipping");
                    continue;
                }

                return Err(BuildError::UnknownDirective {
                    argument: argument.name.clone(),
                    directive: directive.name.clone(),
                });
            };

            let handler = constructor(directive).map_err(|message| BuildError::InvalidDirective {
                argument: argument.name.clone(),
                directive: directive.name.clone(),
                message,
            })?;

            handlers.push(handler);
        }

        Ok(handlers)
    }
}

/// `@deprecated(reason: String = "No longer supported")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecatedMiddleware {
    reason: String,
}

impl DeprecatedMiddleware {
    pub const NAME: &'static str = "deprecated";
    pub const DEFAULT_REASON: &'static str = "No longer supported";

    pub fn new(reason: impl Into<String>) -> Self {
        DeprecatedMiddleware { reason: reason.into() }
    }

    pub fn from_directive(directive: &DirectiveNode) -> Result<Self, String> {
        match directive.argument("reason") {
            None | Some(Value::Null) => Ok(Self::new(Self::DEFAULT_REASON)),
            Some(Value::String(reason)) => Ok(Self::new(reason.as_str())),
            Some(other) => Err(format!("expected a string for `reason`, found {other}")),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Middleware<ArgumentPayload> for DeprecatedMiddleware {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn apply(&self, value: ElementValue<ArgumentPayload>) -> Result<Step<ArgumentPayload>, BoxError> {
        Ok(ControlFlow::Continue(value.map_payload(|mut payload| {
            payload.deprecation_reason = Some(self.reason.clone());
            payload
        })))
    }
}
