use std::sync::Arc;

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::ast::Type;
use apollo_compiler::name;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::FieldDefinition;
use apollo_compiler::schema::ObjectType;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::ty;
use federated_subgraph::FederatedSchema;
use federated_subgraph::FederatedSchemaConfig;
use federated_subgraph::FederationError;
use federated_subgraph::SchemaConfig;
use federated_subgraph::build_federated_schema;
use federated_subgraph::link::federation_spec_definition::key;
use federated_subgraph::subgraph::BoxError;
use federated_subgraph::subgraph::EntityResolver;
use federated_subgraph::subgraph::Representation;
use pretty_assertions::assert_eq;
use serde_json_bytes::Value;

pub(crate) struct NoEntities;

impl EntityResolver for NoEntities {
    fn resolve_entities(&self, _: &[Representation]) -> Result<Vec<Value>, BoxError> {
        Ok(Vec::new())
    }

    fn resolve_entity_type(&self, _: &Value) -> Option<Name> {
        None
    }
}

pub(crate) fn field(name: Name, ty: Type) -> Component<FieldDefinition> {
    Component::new(FieldDefinition {
        description: None,
        name,
        arguments: Vec::new(),
        ty,
        directives: Default::default(),
    })
}

pub(crate) fn object_type(name: Name) -> ObjectType {
    ObjectType {
        description: None,
        name,
        implements_interfaces: Default::default(),
        directives: Default::default(),
        fields: Default::default(),
    }
}

/// `type Product @key(fields: "id", resolvable: true) { id: ID! description: String }`
pub(crate) fn product_type() -> ObjectType {
    let mut product = object_type(name!("Product"));
    product.directives.0.push(Component::new(key("id", true)));
    product.fields.insert(name!("id"), field(name!("id"), ty!(ID!)));
    product
        .fields
        .insert(name!("description"), field(name!("description"), ty!(String)));
    product
}

fn compose(config: SchemaConfig) -> Result<FederatedSchema, FederationError> {
    build_federated_schema(FederatedSchemaConfig {
        schema: config,
        resolver: Arc::new(NoEntities),
    })
}

#[test]
fn composes_product_subgraph() {
    let schema = compose(SchemaConfig::new().with_type(product_type())).unwrap();
    insta::assert_snapshot!(schema.sdl(), @r#"
schema @link(url: "https://specs.apollo.dev/federation/v2.1", import: ["@composeDirective", "@external", "@inaccessible", "@key", "@override", "@provides", "@requires", "@shareable", "@tag", "FieldSet"]) {
  query: Query
}

directive @composeDirective(name: String!) repeatable on SCHEMA

"Marks an element of a GraphQL schema as no longer supported."
directive @deprecated(reason: String) on FIELD_DEFINITION | ARGUMENT_DEFINITION | INPUT_FIELD_DEFINITION | ENUM_VALUE

"Marks target field as external meaning it will be resolved by federated schema"
directive @external on FIELD_DEFINITION

"Marks location within schema as inaccessible from the GraphQL Gateway"
directive @inaccessible on FIELD_DEFINITION | OBJECT | INTERFACE | UNION | ENUM | ENUM_VALUE | SCALAR | INPUT_OBJECT | INPUT_FIELD_DEFINITION | ARGUMENT_DEFINITION

"Directs the executor to include this field or fragment only when the `if` argument is true."
directive @include(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT

"Space separated list of primary keys needed to access federated object"
directive @key(fields: FieldSet!, resolvable: Boolean) repeatable on OBJECT | INTERFACE

directive @link(url: String!, import: [String]) repeatable on SCHEMA

"Overrides fields resolution logic from other subgraph. Used for migrating fields from one subgraph to another."
directive @override(from: String!) on FIELD_DEFINITION

"Specifies locally selectable fields on a given entity"
directive @provides(fields: FieldSet!) on FIELD_DEFINITION

"Specifies external federated fields required for computing this field value"
directive @requires(fields: FieldSet!) on FIELD_DEFINITION

"Indicates that given object and/or field can be resolved by multiple subgraphs"
directive @shareable on FIELD_DEFINITION | OBJECT

"Directs the executor to skip this field or fragment when the `if` argument is true."
directive @skip(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT

"Allows users to annotate fields and types with additional metadata information"
directive @tag(name: String!) repeatable on FIELD_DEFINITION | OBJECT | INTERFACE | UNION | ARGUMENT_DEFINITION | SCALAR | ENUM | ENUM_VALUE | INPUT_OBJECT | INPUT_FIELD_DEFINITION

type Product @key(fields: "id", resolvable: true) {
  description: String
  id: ID!
}

type Query {
  _entities(representations: [_Any!]!): [_Entity]!
  _service: _Service
}

type _Service {
  sdl: String!
}

union _Entity = Product

"String-serialized scalar represents a set of fields that's passed to a federated directive, such as @key, @requires, or @provides"
scalar FieldSet

"The `_Any` scalar is used to pass representations of entities from external services into the root _entities field for execution."
scalar _Any
"#);
}

#[test]
fn adds_federation_fields_to_caller_query() {
    let mut query = object_type(name!("Query"));
    let product_field = Component::new(FieldDefinition {
        description: None,
        name: name!("product"),
        arguments: vec![Node::new(InputValueDefinition {
            description: None,
            name: name!("id"),
            ty: ty!(ID!).into(),
            default_value: None,
            directives: Default::default(),
        })],
        ty: ty!(Product),
        directives: Default::default(),
    });
    query.fields.insert(name!("product"), product_field);

    let schema = compose(
        SchemaConfig::new()
            .with_query(query)
            .with_type(product_type()),
    )
    .unwrap();
    let printed = schema.sdl();
    assert!(printed.contains(
        "type Query {\n  \
           _entities(representations: [_Any!]!): [_Entity]!\n  \
           _service: _Service\n  \
           product(id: ID!): Product\n\
         }"
    ));
    assert_eq!(schema.entity_types(), [name!("Product")]);
}

#[test]
fn composing_printed_sdl_gives_back_the_same_subgraph() {
    let schema = compose(SchemaConfig::new().with_type(product_type())).unwrap();
    let parsed = Schema::parse(schema.sdl(), "subgraph.graphql").unwrap();
    let recomposed = compose(SchemaConfig::from_schema(&parsed).unwrap()).unwrap();
    assert_eq!(recomposed.sdl(), schema.sdl());
}

#[test]
fn placeholder_keeps_entity_union_non_empty() {
    let schema = compose(SchemaConfig::new()).unwrap();
    let printed = schema.sdl();
    assert!(printed.contains("type _ExtendHelper {\n  id: ID! @external\n}"));
    assert!(printed.contains("\nunion _Entity = _ExtendHelper\n"));
    assert_eq!(printed.matches("union ").count(), 1);
}

#[test]
fn ignores_built_in_scalars() {
    let string = ScalarType {
        description: Some("shadowing".into()),
        name: name!("String"),
        directives: Default::default(),
    };
    let schema = compose(
        SchemaConfig::new()
            .with_type(ExtendedType::Scalar(Node::new(string)))
            .with_type(product_type()),
    )
    .unwrap();
    for scalar in ["Boolean", "Float", "ID", "Int", "String"] {
        assert!(!schema.sdl().contains(&format!("scalar {scalar}\n")));
        assert!(!schema.sdl().ends_with(&format!("scalar {scalar}")));
    }
    assert!(!schema.sdl().contains("shadowing"));
}

#[test]
fn rejects_duplicate_types() {
    let error = compose(
        SchemaConfig::new()
            .with_type(product_type())
            .with_type(product_type()),
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        r#"Type "Product" is defined more than once"#
    );

    for reserved in [name!("_Entity"), name!("_ExtendHelper")] {
        let config = SchemaConfig::new().with_type(object_type(reserved.clone()));
        let error = compose(config).unwrap_err();
        assert!(matches!(
            error,
            FederationError::DuplicateTypeDefinition { name } if name == reserved
        ));
    }
}

#[test]
fn rejects_invalid_schemas() {
    let mut broken = object_type(name!("Broken"));
    broken
        .fields
        .insert(name!("missing"), field(name!("missing"), ty!(Missing)));
    let error = compose(SchemaConfig::new().with_type(broken)).unwrap_err();
    assert!(matches!(error, FederationError::InvalidSchema { .. }));
}
