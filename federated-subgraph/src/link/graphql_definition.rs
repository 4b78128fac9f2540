//! The execution directives of the GraphQL specification.
//!
//! apollo-compiler predefines these too; a federated subgraph registers its own copies so the
//! advertised SDL does not depend on the compiler version.
use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::Argument;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::Value;
use apollo_compiler::name;
use apollo_compiler::ty;

use crate::link::argument_definition;

pub const DEPRECATED_DIRECTIVE_NAME: Name = name!("deprecated");
pub const INCLUDE_DIRECTIVE_NAME: Name = name!("include");
pub const SKIP_DIRECTIVE_NAME: Name = name!("skip");

pub(crate) const DEPRECATED_REASON_ARGUMENT_NAME: Name = name!("reason");
const IF_ARGUMENT_NAME: Name = name!("if");
const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

pub fn execution_directive_definitions() -> Vec<Node<DirectiveDefinition>> {
    vec![
        deprecated_directive_definition(),
        include_directive_definition(),
        skip_directive_definition(),
    ]
}

pub fn deprecated_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some("Marks an element of a GraphQL schema as no longer supported.".into()),
        name: DEPRECATED_DIRECTIVE_NAME,
        arguments: vec![argument_definition(
            DEPRECATED_REASON_ARGUMENT_NAME,
            ty!(String),
            Some(Value::String(DEFAULT_DEPRECATION_REASON.to_owned())),
        )],
        repeatable: false,
        locations: vec![
            DirectiveLocation::FieldDefinition,
            DirectiveLocation::ArgumentDefinition,
            DirectiveLocation::InputFieldDefinition,
            DirectiveLocation::EnumValue,
        ],
    })
}

pub fn include_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Directs the executor to include this field or fragment only when the `if` argument is true."
                .into(),
        ),
        name: INCLUDE_DIRECTIVE_NAME,
        arguments: vec![argument_definition(IF_ARGUMENT_NAME, ty!(Boolean!), None)],
        repeatable: false,
        locations: vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ],
    })
}

pub fn skip_directive_definition() -> Node<DirectiveDefinition> {
    Node::new(DirectiveDefinition {
        description: Some(
            "Directs the executor to skip this field or fragment when the `if` argument is true."
                .into(),
        ),
        name: SKIP_DIRECTIVE_NAME,
        arguments: vec![argument_definition(IF_ARGUMENT_NAME, ty!(Boolean!), None)],
        repeatable: false,
        locations: vec![
            DirectiveLocation::Field,
            DirectiveLocation::FragmentSpread,
            DirectiveLocation::InlineFragment,
        ],
    })
}

/// `@deprecated(reason: "use X")`
pub fn deprecated(reason: &str) -> Directive {
    Directive {
        name: DEPRECATED_DIRECTIVE_NAME,
        arguments: vec![Node::new(Argument {
            name: DEPRECATED_REASON_ARGUMENT_NAME,
            value: Node::new(Value::String(reason.to_owned())),
        })],
    }
}
