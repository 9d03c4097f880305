#![allow(unused_crate_dependencies)]

use std::ops::ControlFlow;

use graphql_schema_arguments::{
    parse_field_arguments, Argument, ArgumentFactory, ArgumentMiddleware, ArgumentPayload, BoxError, BuildError,
    BuilderConfig, DirectiveNode, ElementValue, Middleware, MiddlewareRegistry, NamedTypeKind, RuntimeType, ScalarKind,
    Step, TypeRegistry,
};
use indoc::indoc;
use insta::assert_snapshot;
use serde_json::{json, Value};

const SCHEMA: &str = indoc! {r#"
    type Query {
      users(
        role: Role = ADMIN @deprecated(reason: "Use `filter`")
        filter: [UserFilter!]! @rules(apply: ["min:1"]) @rules(apply: ["max:10"])
        search: String @lowercase @final @rules(apply: ["never"])
      ): [User!]!
      user(id: ID!): User
    }

    type User {
      friends(first: Int = 10 @rules(apply: ["min:0"])): [User!]!
    }

    enum Role {
      ADMIN
      MEMBER
    }

    input UserFilter {
      role: Role
      friendOf: UserFilter
    }
"#};

/// Appends validation rules to the `rules` extension.
struct Rules(Vec<Value>);

impl Middleware<ArgumentPayload> for Rules {
    fn name(&self) -> &str {
        "rules"
    }

    fn apply(&self, value: ElementValue<ArgumentPayload>) -> Result<Step<ArgumentPayload>, BoxError> {
        Ok(ControlFlow::Continue(value.map_payload(|mut payload| {
            let rules = payload.extensions.entry("rules".to_owned()).or_insert_with(|| json!([]));
            if let Value::Array(rules) = rules {
                rules.extend(self.0.iter().cloned());
            }
            payload
        })))
    }
}

/// Lowercases string default values, refusing anything that is not a `String` argument.
struct Lowercase;

impl Middleware<ArgumentPayload> for Lowercase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn apply(&self, value: ElementValue<ArgumentPayload>) -> Result<Step<ArgumentPayload>, BoxError> {
        if value.ty().named_type() != &RuntimeType::Scalar(ScalarKind::String) {
            return Err(format!("cannot lowercase a `{}`", value.ty()).into());
        }

        Ok(ControlFlow::Continue(value.map_payload(|mut payload| {
            if let Some(Value::String(default)) = &mut payload.default_value {
                *default = default.to_lowercase();
            }
            payload
        })))
    }
}

/// Stops the middleware chain.
struct Final;

impl Middleware<ArgumentPayload> for Final {
    fn name(&self) -> &str {
        "final"
    }

    fn apply(&self, value: ElementValue<ArgumentPayload>) -> Result<Step<ArgumentPayload>, BoxError> {
        Ok(ControlFlow::Break(value))
    }
}

fn types() -> TypeRegistry {
    let mut types = TypeRegistry::new();

    // Input objects can refer to themselves, the registry only hands out references.
    types.register("UserFilter", NamedTypeKind::InputObject);
    types.register("Role", NamedTypeKind::Enum);
    types.register("User", NamedTypeKind::Object);

    types
}

fn directives() -> MiddlewareRegistry {
    let mut directives = MiddlewareRegistry::with_builtins();

    directives
        .register("rules", |directive: &DirectiveNode| {
            let Some(Value::Array(rules)) = directive.argument("apply") else {
                return Err("`apply` must be a list of rules".to_owned());
            };
            Ok(Box::new(Rules(rules.clone())) as ArgumentMiddleware)
        })
        .register("lowercase", |_: &DirectiveNode| Ok(Box::new(Lowercase) as ArgumentMiddleware))
        .register("final", |_: &DirectiveNode| Ok(Box::new(Final) as ArgumentMiddleware));

    directives
}

fn build_schema(
    types: &TypeRegistry,
    directives: &MiddlewareRegistry,
) -> Result<Vec<(String, Vec<Argument>)>, BuildError> {
    let factory = ArgumentFactory::new(types, directives);

    parse_field_arguments(SCHEMA)
        .unwrap()
        .into_iter()
        .map(|field| Ok((field.coordinate, factory.build_all(&field.arguments)?)))
        .collect()
}

#[test]
fn builds_every_argument_of_the_schema() {
    let (types, directives) = (types(), directives());
    let fields = build_schema(&types, &directives).unwrap();

    let coordinates = fields.iter().map(|(coordinate, _)| coordinate.as_str()).collect::<Vec<_>>();
    assert_eq!(coordinates, ["Query.users", "Query.user", "User.friends"]);

    let [role, filter, search] = fields[0].1.as_slice() else {
        unreachable!("Query.users has three arguments");
    };

    assert_eq!(role.ty.to_string(), "Role");
    assert_eq!(role.default_value, Some(json!("ADMIN")));
    assert_eq!(role.deprecation_reason.as_deref(), Some("Use `filter`"));
    assert_eq!(role.middleware, ["deprecated"]);

    assert_eq!(filter.ty.to_string(), "[UserFilter!]!");
    assert_eq!(filter.middleware, ["rules", "rules"]);
    assert_eq!(filter.extensions["rules"], json!(["min:1", "max:10"]));
    assert!(!filter.short_circuited);

    assert_eq!(search.middleware, ["lowercase", "final"]);
    assert!(search.short_circuited);
    assert!(search.extensions.get("rules").is_none(), "rules after @final never run");

    let [id] = fields[1].1.as_slice() else {
        unreachable!("Query.user has one argument");
    };
    assert_eq!(id.ty, RuntimeType::from(ScalarKind::Id).non_null());
    assert!(id.middleware.is_empty());

    let [first] = fields[2].1.as_slice() else {
        unreachable!("User.friends has one argument");
    };
    assert_eq!(first.ty, RuntimeType::Scalar(ScalarKind::Int));
    assert_eq!(first.default_value, Some(json!(10)));
    assert_eq!(first.extensions["rules"], json!(["min:0"]));
}

#[test]
fn resolved_types_share_the_registered_definitions() {
    let (types, directives) = (types(), directives());
    let fields = build_schema(&types, &directives).unwrap();

    let filter = &fields[0].1[1];
    let RuntimeType::NamedRef(resolved) = filter.ty.named_type() else {
        unreachable!("UserFilter is a named type");
    };
    let Some(RuntimeType::NamedRef(registered)) = types.get("UserFilter") else {
        unreachable!("UserFilter is registered");
    };

    assert!(std::sync::Arc::ptr_eq(resolved, registered));
}

#[test]
fn unregistered_type_fails_the_build() {
    let mut types = TypeRegistry::new();
    types.register("User", NamedTypeKind::Object);

    let error = build_schema(&types, &directives()).unwrap_err();

    assert_snapshot!(error, @"Argument `role`: Unknown type `Role`");
}

#[test]
fn middleware_failure_fails_the_build() {
    let node = parse_field_arguments("type Query { count(limit: Int = 3 @rules(apply: []) @lowercase): Int }")
        .unwrap()
        .remove(0)
        .arguments
        .remove(0);
    let (types, directives) = (types(), directives());

    let error = ArgumentFactory::new(&types, &directives).build(&node).unwrap_err();

    assert_snapshot!(error, @"Argument `limit`: Middleware `lowercase` (position 1) failed: cannot lowercase a `Int`");

    let BuildError::Middleware { source, .. } = error else {
        unreachable!("expected a middleware failure");
    };
    assert_eq!(source.handler(), "lowercase");
    assert_eq!(source.snapshot().middleware(), ["rules"]);
    assert_eq!(source.snapshot().payload().extensions["rules"], json!([]));
}

#[test]
fn strict_directives() {
    let config = BuilderConfig::from_toml_str(indoc! {r#"
        [directives]
        ignore_unknown = false
    "#})
    .unwrap();
    let (types, directives) = (types(), directives());
    let factory = ArgumentFactory::with_config(&types, &directives, &config);

    let node = parse_field_arguments(r#"type Query { me(token: String @deprecated @sensitive): User }"#)
        .unwrap()
        .remove(0)
        .arguments
        .remove(0);

    let error = factory.build(&node).unwrap_err();

    assert_snapshot!(error, @"Argument `token`: unknown directive `@sensitive`");

    // The same registry stays lenient under the default config.
    let argument = ArgumentFactory::new(&types, &directives).build(&node).unwrap();
    assert_eq!(argument.middleware, ["deprecated"]);
}

#[test]
fn wrapping_depth_comes_from_the_config() {
    let config = BuilderConfig::from_toml_str(indoc! {r#"
        [type_resolution]
        max_wrapping_depth = 3
    "#})
    .unwrap();
    let (types, directives) = (types(), directives());
    let factory = ArgumentFactory::with_config(&types, &directives, &config);

    let node = parse_field_arguments(r#"type Query { matrix(cells: [[Int!]]!): Int }"#)
        .unwrap()
        .remove(0)
        .arguments
        .remove(0);

    let error = factory.build(&node).unwrap_err();

    assert_snapshot!(error, @"Argument `cells`: Type reference `[[Int!]]!` has more than 3 wrapping types");
}
