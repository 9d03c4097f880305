//! Building GraphQL field arguments from their schema definitions.
//!
//! Two steps happen for every argument:
//!
//! 1. its type reference (`[Int!]!`) is resolved into a [RuntimeType] by the [TypeNodeResolver],
//!    which knows the built-in scalars and asks a [TypeLookup] for everything else;
//! 2. the middleware bound to its directives run in declaration order through the
//!    [pipeline], each of them free to rewrite the argument before it is added to the schema.
//!
//! [ArgumentFactory] ties both together, [MiddlewareRegistry] maps directive names to middleware.
//!
//! ```
//! # #![allow(unused_crate_dependencies)]
//! use graphql_schema_arguments::*;
//!
//! let types = TypeRegistry::new();
//! let directives = MiddlewareRegistry::with_builtins();
//! let factory = ArgumentFactory::new(&types, &directives);
//!
//! let node = ArgumentNode::new("first", TypeSyntaxNode::named("Int").list().non_null())
//!     .with_directive(DirectiveNode::new("deprecated"));
//! let argument = factory.build(&node).unwrap();
//!
//! assert_eq!(argument.ty.to_string(), "[Int]!");
//! assert_eq!(argument.middleware, ["deprecated"]);
//! assert_eq!(argument.deprecation_reason.as_deref(), Some("No longer supported"));
//! ```

mod argument;
mod config;
mod directives;
mod error;
pub mod pipeline;
mod registry;
mod resolver;
mod runtime_type;
mod sdl;
mod syntax;

pub use argument::{
    Argument, ArgumentFactory, ArgumentMiddleware, ArgumentNode, ArgumentPayload, DirectiveNode, DirectiveRegistry,
};
pub use config::{BuilderConfig, DirectivesConfig, TypeResolutionConfig};
pub use directives::{DeprecatedMiddleware, MiddlewareRegistry};
pub use error::{BoxError, BuildError, ConfigError, MalformedReason, MiddlewareFailure, ResolveError, SdlError};
pub use pipeline::{middleware_fn, Completion, ElementValue, FnMiddleware, Middleware, PipelineOutcome, Step};
pub use registry::{TypeLookup, TypeRegistry};
pub use resolver::{resolve, TypeNodeResolver};
pub use runtime_type::{NamedType, NamedTypeKind, RuntimeType, ScalarKind};
pub use sdl::{const_value_to_json, parse_field_arguments, FieldArguments};
pub use syntax::{TypeSyntaxNode, WrapperKind};
