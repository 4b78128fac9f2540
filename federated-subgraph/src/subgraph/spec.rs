//! The types and root fields federation adds to a subgraph schema.
use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::DirectiveList;
use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::collections::IndexMap;
use apollo_compiler::collections::IndexSet;
use apollo_compiler::name;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::ObjectType;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::schema::UnionType;
use apollo_compiler::ty;

use crate::link::federation_spec_definition::external;

pub const ANY_SCALAR_NAME: Name = name!("_Any");
pub const FIELDSET_SCALAR_NAME: Name = name!("FieldSet");
pub const SERVICE_TYPE: Name = name!("_Service");
pub const ENTITY_UNION_NAME: Name = name!("_Entity");
/// The stand-in member of `_Entity` when a subgraph defines no entity.
pub const EXTEND_HELPER_TYPE_NAME: Name = name!("_ExtendHelper");

pub const SERVICE_SDL_QUERY: Name = name!("_service");
pub const ENTITIES_QUERY: Name = name!("_entities");
pub(crate) const SDL_FIELD_NAME: Name = name!("sdl");
pub(crate) const REPRESENTATIONS_ARGUMENT_NAME: Name = name!("representations");
pub(crate) const ID_FIELD_NAME: Name = name!("id");

pub const DEFAULT_QUERY_TYPE_NAME: Name = name!("Query");
pub const DEFAULT_MUTATION_TYPE_NAME: Name = name!("Mutation");
pub const DEFAULT_SUBSCRIPTION_TYPE_NAME: Name = name!("Subscription");

/// Names of types the composer always defines. `_ExtendHelper` is only added without entities.
pub(crate) const RESERVED_TYPE_NAMES: [Name; 4] = [
    ANY_SCALAR_NAME,
    FIELDSET_SCALAR_NAME,
    SERVICE_TYPE,
    ENTITY_UNION_NAME,
];

/// `scalar _Any`
pub fn any_scalar_definition() -> ExtendedType {
    ExtendedType::Scalar(Node::new(ScalarType {
        description: Some(
            "The `_Any` scalar is used to pass representations of entities from external \
             services into the root _entities field for execution."
                .into(),
        ),
        name: ANY_SCALAR_NAME,
        directives: Default::default(),
    }))
}

/// `scalar FieldSet`
pub fn field_set_scalar_definition() -> ExtendedType {
    ExtendedType::Scalar(Node::new(ScalarType {
        description: Some(
            "String-serialized scalar represents a set of fields that's passed to a federated \
             directive, such as @key, @requires, or @provides"
                .into(),
        ),
        name: FIELDSET_SCALAR_NAME,
        directives: Default::default(),
    }))
}

/// `type _Service { sdl: String! }`
pub fn service_object_type_definition() -> ExtendedType {
    let mut fields = IndexMap::default();
    fields.insert(
        SDL_FIELD_NAME,
        Component::new(FieldDefinition {
            description: None,
            name: SDL_FIELD_NAME,
            arguments: Vec::new(),
            ty: ty!(String!),
            directives: Default::default(),
        }),
    );
    ExtendedType::Object(Node::new(ObjectType {
        description: None,
        name: SERVICE_TYPE,
        implements_interfaces: IndexSet::default(),
        directives: Default::default(),
        fields,
    }))
}

/// `union _Entity = A | B`
pub fn entity_union_definition(members: impl IntoIterator<Item = Name>) -> ExtendedType {
    ExtendedType::Union(Node::new(UnionType {
        description: None,
        name: ENTITY_UNION_NAME,
        directives: Default::default(),
        members: members.into_iter().map(ComponentName::from).collect(),
    }))
}

/// `type _ExtendHelper { id: ID! @external }`
pub fn extend_helper_type_definition() -> ExtendedType {
    let mut fields = IndexMap::default();
    fields.insert(
        ID_FIELD_NAME,
        Component::new(FieldDefinition {
            description: None,
            name: ID_FIELD_NAME,
            arguments: Vec::new(),
            ty: ty!(ID!),
            directives: DirectiveList(vec![Node::new(external())]),
        }),
    );
    ExtendedType::Object(Node::new(ObjectType {
        description: None,
        name: EXTEND_HELPER_TYPE_NAME,
        implements_interfaces: IndexSet::default(),
        directives: Default::default(),
        fields,
    }))
}

/// `_service: _Service`
pub fn service_sdl_query_field() -> Component<FieldDefinition> {
    Component::new(FieldDefinition {
        description: None,
        name: SERVICE_SDL_QUERY,
        arguments: Vec::new(),
        ty: ty!(_Service),
        directives: Default::default(),
    })
}

/// `_entities(representations: [_Any!]!): [_Entity]!`
pub fn entities_query_field() -> Component<FieldDefinition> {
    Component::new(FieldDefinition {
        description: None,
        name: ENTITIES_QUERY,
        arguments: vec![Node::new(InputValueDefinition {
            description: None,
            name: REPRESENTATIONS_ARGUMENT_NAME,
            ty: ty!([_Any!]!).into(),
            default_value: None,
            directives: Default::default(),
        })],
        ty: ty!([_Entity]!),
        directives: Default::default(),
    })
}

/// An empty object type, the root the composer creates when the caller has none.
pub(crate) fn empty_object_type(name: Name) -> ObjectType {
    ObjectType {
        description: None,
        name,
        implements_interfaces: IndexSet::default(),
        directives: Default::default(),
        fields: IndexMap::default(),
    }
}
