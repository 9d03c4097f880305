use std::fmt;

/// A `List` or `NonNull` modifier on a type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    List,
    NonNull,
}

/// An unresolved type reference as written in the schema, e.g. `[String!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSyntaxNode {
    Named { name: String },
    List { inner: Box<TypeSyntaxNode> },
    NonNull { inner: Box<TypeSyntaxNode> },
}

impl TypeSyntaxNode {
    pub fn named(name: impl Into<String>) -> Self {
        TypeSyntaxNode::Named { name: name.into() }
    }

    /// Wraps `self` in a list.
    pub fn list(self) -> Self {
        TypeSyntaxNode::List { inner: Box::new(self) }
    }

    /// Wraps `self` in a non-null modifier.
    pub fn non_null(self) -> Self {
        TypeSyntaxNode::NonNull { inner: Box::new(self) }
    }

    pub fn wrapped_by(self, wrapper: WrapperKind) -> Self {
        match wrapper {
            WrapperKind::List => self.list(),
            WrapperKind::NonNull => self.non_null(),
        }
    }

    /// The node directly below this one, `None` for a named node.
    pub fn inner(&self) -> Option<&TypeSyntaxNode> {
        match self {
            TypeSyntaxNode::Named { .. } => None,
            TypeSyntaxNode::List { inner } | TypeSyntaxNode::NonNull { inner } => Some(inner),
        }
    }

    /// Wrapper kinds from outermost to innermost.
    pub fn wrappers(&self) -> impl Iterator<Item = WrapperKind> + '_ {
        std::iter::successors(Some(self), |node| node.inner()).filter_map(|node| match node {
            TypeSyntaxNode::Named { .. } => None,
            TypeSyntaxNode::List { .. } => Some(WrapperKind::List),
            TypeSyntaxNode::NonNull { .. } => Some(WrapperKind::NonNull),
        })
    }

    /// The name at the bottom of the wrappers.
    pub fn name(&self) -> &str {
        let mut node = self;
        loop {
            match node {
                TypeSyntaxNode::Named { name } => return name,
                TypeSyntaxNode::List { inner } | TypeSyntaxNode::NonNull { inner } => node = inner,
            }
        }
    }
}

impl fmt::Display for TypeSyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntaxNode::Named { name } => f.write_str(name),
            TypeSyntaxNode::List { inner } => write!(f, "[{inner}]"),
            TypeSyntaxNode::NonNull { inner } => write!(f, "{inner}!"),
        }
    }
}
