//! The directives a federated subgraph declares: the federation v2 catalog, linked into the
//! schema through `@link`, and the execution directives every GraphQL schema knows.
use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::ast::Type;
use apollo_compiler::ast::Value;

pub mod federation_spec_definition;
pub mod graphql_definition;
pub mod spec;

/// An argument of a directive definition, without description or directives.
pub(crate) fn argument_definition(
    name: Name,
    ty: Type,
    default_value: Option<Value>,
) -> Node<InputValueDefinition> {
    Node::new(InputValueDefinition {
        description: None,
        name,
        ty: ty.into(),
        default_value: default_value.map(Node::new),
        directives: Default::default(),
    })
}
