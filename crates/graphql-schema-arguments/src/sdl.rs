//! Conversion from the `cynic-parser` AST. Kept apart so the rest of the crate does not depend on
//! the parser's types.

use cynic_parser::{common::WrappingType, type_system as ast, ConstValue};
use serde_json::Value;

use crate::{ArgumentNode, DirectiveNode, SdlError, TypeSyntaxNode};

impl From<ast::Type<'_>> for TypeSyntaxNode {
    fn from(ty: ast::Type<'_>) -> Self {
        // The parser lists wrappers from the outermost to the innermost one.
        let wrappers = ty.wrappers().collect::<Vec<_>>();

        wrappers
            .into_iter()
            .rev()
            .fold(TypeSyntaxNode::named(ty.name()), |node, wrapper| match wrapper {
                WrappingType::NonNull => node.non_null(),
                WrappingType::List => node.list(),
            })
    }
}

impl From<ast::Directive<'_>> for DirectiveNode {
    fn from(directive: ast::Directive<'_>) -> Self {
        DirectiveNode {
            name: directive.name().to_owned(),
            arguments: directive
                .arguments()
                .map(|argument| (argument.name().to_owned(), const_value_to_json(argument.value())))
                .collect(),
        }
    }
}

impl ArgumentNode {
    pub fn from_ast(argument: ast::InputValueDefinition<'_>) -> Self {
        ArgumentNode {
            name: argument.name().to_owned(),
            description: argument
                .description()
                .map(|description| description.to_cow().into_owned()),
            ty: argument.ty().into(),
            default_value: argument.default_value().map(const_value_to_json),
            directives: argument.directives().map(DirectiveNode::from).collect(),
        }
    }
}

pub fn const_value_to_json(value: ConstValue<'_>) -> Value {
    match value {
        ConstValue::Null(_) => Value::Null,
        ConstValue::Int(n) => Value::from(n.as_i64()),
        ConstValue::Float(n) => Value::from(n.as_f64()),
        ConstValue::String(s) => Value::from(s.as_str()),
        ConstValue::Boolean(b) => Value::from(b.value()),
        ConstValue::Enum(e) => Value::from(e.name()),
        ConstValue::List(list) => Value::Array(list.items().map(const_value_to_json).collect()),
        ConstValue::Object(object) => Value::Object(
            object
                .fields()
                .map(|field| (field.name().to_owned(), const_value_to_json(field.value())))
                .collect(),
        ),
    }
}

/// The arguments of one field, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldArguments {
    /// `Type.field`
    pub coordinate: String,
    pub arguments: Vec<ArgumentNode>,
}

/// Collects the arguments of every object and interface field of a schema document. Fields without
/// arguments are left out.
pub fn parse_field_arguments(sdl: &str) -> Result<Vec<FieldArguments>, SdlError> {
    let document = cynic_parser::parse_type_system_document(sdl).map_err(|err| SdlError::Parse(err.to_string()))?;

    let mut fields = Vec::new();

    for definition in document.definitions() {
        let (ast::Definition::Type(type_definition) | ast::Definition::TypeExtension(type_definition)) = definition
        else {
            continue;
        };

        let type_name = type_definition.name();
        let type_fields: Vec<ast::FieldDefinition<'_>> = match type_definition {
            ast::TypeDefinition::Object(object) => object.fields().collect(),
            ast::TypeDefinition::Interface(interface) => interface.fields().collect(),
            _ => continue,
        };

        for field in type_fields {
            let arguments = field.arguments().map(ArgumentNode::from_ast).collect::<Vec<_>>();

            if arguments.is_empty() {
                continue;
            }

            fields.push(FieldArguments {
                coordinate: format!("{type_name}.{}", field.name()),
                arguments,
            });
        }
    }

    Ok(fields)
}
