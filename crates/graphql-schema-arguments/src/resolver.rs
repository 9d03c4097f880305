use crate::{
    MalformedReason, ResolveError, RuntimeType, ScalarKind, TypeLookup, TypeResolutionConfig, TypeSyntaxNode,
    WrapperKind,
};

/// Turns type references as written in the schema into [RuntimeType]s.
///
/// Built-in scalars are resolved directly, every other name goes through the [TypeLookup]. The
/// wrappers of the reference are preserved exactly: `[Int]!` resolves to a non-null list of
/// nullable `Int`, never to a list of non-null `Int`.
pub struct TypeNodeResolver<'a, L: ?Sized> {
    lookup: &'a L,
    max_wrapping_depth: Option<usize>,
}

impl<'a, L: TypeLookup + ?Sized> TypeNodeResolver<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self::with_config(lookup, &TypeResolutionConfig::default())
    }

    pub fn with_config(lookup: &'a L, config: &TypeResolutionConfig) -> Self {
        TypeNodeResolver {
            lookup,
            max_wrapping_depth: config.max_wrapping_depth,
        }
    }

    pub fn resolve(&self, node: &TypeSyntaxNode) -> Result<RuntimeType, ResolveError> {
        let mut wrappers = Vec::new();
        let mut current = node;

        // Outermost wrapper first.
        let name = loop {
            let inner = match current {
                TypeSyntaxNode::Named { name } => break name,
                TypeSyntaxNode::List { inner } => {
                    wrappers.push(WrapperKind::List);
                    inner
                }
                TypeSyntaxNode::NonNull { inner } => {
                    if matches!(**inner, TypeSyntaxNode::NonNull { .. }) {
                        return Err(malformed(node, MalformedReason::NestedNonNull));
                    }
                    wrappers.push(WrapperKind::NonNull);
                    inner
                }
            };

            if let Some(limit) = self.max_wrapping_depth.filter(|limit| wrappers.len() > *limit) {
                return Err(ResolveError::TooDeep {
                    node: node.to_string(),
                    limit,
                });
            }

            current = &**inner;
        };

        validate_name(name).map_err(|reason| malformed(node, reason))?;
        let named = self.resolve_named(name)?;

        // Innermost wrapper first, the outermost one ends up on top.
        Ok(wrappers.into_iter().rev().fold(named, RuntimeType::wrapped_by))
    }

    fn resolve_named(&self, name: &str) -> Result<RuntimeType, ResolveError> {
        if let Some(scalar) = ScalarKind::from_name(name) {
            return Ok(RuntimeType::Scalar(scalar));
        }

        self.lookup.lookup(name).ok_or_else(|| {
            tracing::debug!(name, "type reference to an unknown type");
            ResolveError::UnknownTypeName { name: name.to_owned() }
        })
    }
}

/// Resolves a single type reference with the default settings.
pub fn resolve<L: TypeLookup + ?Sized>(node: &TypeSyntaxNode, lookup: &L) -> Result<RuntimeType, ResolveError> {
    TypeNodeResolver::new(lookup).resolve(node)
}

fn malformed(node: &TypeSyntaxNode, reason: MalformedReason) -> ResolveError {
    ResolveError::MalformedTypeNode {
        node: node.to_string(),
        reason,
    }
}

fn validate_name(name: &str) -> Result<(), MalformedReason> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err(MalformedReason::EmptyName);
    };

    if (first == '_' || first.is_ascii_alphabetic()) && chars.all(|c| c == '_' || c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(MalformedReason::InvalidName)
    }
}
