use std::{error::Error as StdError, fmt};

use crate::{ArgumentPayload, ElementValue};

/// What a handler returns when it fails.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Malformed type reference `{node}`: {reason}")]
    MalformedTypeNode { node: String, reason: MalformedReason },
    #[error("Unknown type `{name}`")]
    UnknownTypeName { name: String },
    #[error("Type reference `{node}` has more than {limit} wrapping types")]
    TooDeep { node: String, limit: usize },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("a named type needs a name")]
    EmptyName,
    #[error("the name is not a valid GraphQL name")]
    InvalidName,
    #[error("a non-null type cannot be wrapped in another non-null")]
    NestedNonNull,
}

/// A middleware handler failed. The value is the one the handler received, so it carries the names
/// of every handler that ran before.
pub struct MiddlewareFailure<P> {
    pub(crate) handler: String,
    pub(crate) position: usize,
    pub(crate) snapshot: ElementValue<P>,
    pub(crate) source: BoxError,
}

impl<P> MiddlewareFailure<P> {
    /// Name of the failing handler.
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Position of the failing handler in the chain, starting at zero.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn snapshot(&self) -> &ElementValue<P> {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> ElementValue<P> {
        self.snapshot
    }
}

impl<P: fmt::Debug> fmt::Debug for MiddlewareFailure<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareFailure")
            .field("handler", &self.handler)
            .field("position", &self.position)
            .field("snapshot", &self.snapshot)
            .field("source", &self.source)
            .finish()
    }
}

impl<P> fmt::Display for MiddlewareFailure<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Middleware `{}` (position {}) failed: {}",
            self.handler, self.position, self.source
        )
    }
}

impl<P: fmt::Debug> StdError for MiddlewareFailure<P> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.source)
    }
}

/// Building an argument failed. Every variant names the argument so callers can point at the
/// schema location.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("Argument `{argument}`: {source}")]
    Resolve { argument: String, source: ResolveError },
    #[error("Argument `{argument}`: {source}")]
    Middleware {
        argument: String,
        source: Box<MiddlewareFailure<ArgumentPayload>>,
    },
    #[error("Argument `{argument}`: unknown directive `@{directive}`")]
    UnknownDirective { argument: String, directive: String },
    #[error("Argument `{argument}`: invalid `@{directive}` directive: {message}")]
    InvalidDirective {
        argument: String,
        directive: String,
        message: String,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid builder configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum SdlError {
    #[error("Could not parse the schema: {0}")]
    Parse(String),
}
