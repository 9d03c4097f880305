use std::{fmt, sync::Arc};

use crate::WrapperKind;

/// The scalars every GraphQL schema has without declaring them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
pub enum ScalarKind {
    #[strum(serialize = "ID")]
    Id,
    Int,
    Boolean,
    Float,
    String,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The built-in scalar with this exact name, if any.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedTypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

/// A type defined by the schema itself. Only the name and kind are carried, so a reference can be
/// handed out before the definition's body has been built.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct NamedType {
    name: String,
    kind: NamedTypeKind,
}

impl NamedType {
    pub fn new(name: impl Into<String>, kind: NamedTypeKind) -> Self {
        NamedType {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NamedTypeKind {
        self.kind
    }
}

/// A resolved type. Cloning is cheap and shares the underlying definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeType {
    Scalar(ScalarKind),
    NamedRef(Arc<NamedType>),
    ListOf(Arc<RuntimeType>),
    NonNullOf(Arc<RuntimeType>),
}

impl RuntimeType {
    pub fn named(name: impl Into<String>, kind: NamedTypeKind) -> Self {
        RuntimeType::NamedRef(Arc::new(NamedType::new(name, kind)))
    }

    pub fn list_of(self) -> Self {
        RuntimeType::ListOf(Arc::new(self))
    }

    pub fn non_null(self) -> Self {
        RuntimeType::NonNullOf(Arc::new(self))
    }

    pub fn wrapped_by(self, wrapper: WrapperKind) -> Self {
        match wrapper {
            WrapperKind::List => self.list_of(),
            WrapperKind::NonNull => self.non_null(),
        }
    }

    /// Removes the outermost wrapper. `None` for scalars and named references.
    pub fn of_type(&self) -> Option<&RuntimeType> {
        match self {
            RuntimeType::ListOf(inner) | RuntimeType::NonNullOf(inner) => Some(inner),
            RuntimeType::Scalar(_) | RuntimeType::NamedRef(_) => None,
        }
    }

    /// Wrapper kinds from outermost to innermost.
    pub fn wrappers(&self) -> impl Iterator<Item = WrapperKind> + '_ {
        std::iter::successors(Some(self), |ty| ty.of_type()).filter_map(|ty| match ty {
            RuntimeType::ListOf(_) => Some(WrapperKind::List),
            RuntimeType::NonNullOf(_) => Some(WrapperKind::NonNull),
            RuntimeType::Scalar(_) | RuntimeType::NamedRef(_) => None,
        })
    }

    pub fn wrapping_depth(&self) -> usize {
        self.wrappers().count()
    }

    /// The scalar or named reference below all wrappers.
    pub fn named_type(&self) -> &RuntimeType {
        let mut ty = self;
        while let Some(inner) = ty.of_type() {
            ty = inner;
        }
        ty
    }

    pub fn type_name(&self) -> &str {
        let mut ty = self;
        loop {
            match ty {
                RuntimeType::Scalar(scalar) => return scalar.as_str(),
                RuntimeType::NamedRef(named) => return named.name(),
                RuntimeType::ListOf(inner) | RuntimeType::NonNullOf(inner) => ty = inner,
            }
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, RuntimeType::NonNullOf(_))
    }

    pub fn is_list(&self) -> bool {
        match self {
            RuntimeType::ListOf(_) => true,
            RuntimeType::NonNullOf(inner) => matches!(**inner, RuntimeType::ListOf(_)),
            RuntimeType::Scalar(_) | RuntimeType::NamedRef(_) => false,
        }
    }
}

impl From<ScalarKind> for RuntimeType {
    fn from(scalar: ScalarKind) -> Self {
        RuntimeType::Scalar(scalar)
    }
}

impl fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeType::Scalar(scalar) => f.write_str(scalar.as_str()),
            RuntimeType::NamedRef(named) => f.write_str(named.name()),
            RuntimeType::ListOf(inner) => write!(f, "[{inner}]"),
            RuntimeType::NonNullOf(inner) => write!(f, "{inner}!"),
        }
    }
}
