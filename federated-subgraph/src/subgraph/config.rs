use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::OperationType;
use apollo_compiler::ast::Value;
use apollo_compiler::collections::HashSet;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::ObjectType;
use apollo_compiler::validation::Valid;

use crate::error::FederationError;
use crate::link::federation_spec_definition::FEDERATION_LINK_DIRECTIVE_NAME;
use crate::link::federation_spec_definition::federation_directive_definitions;
use crate::link::federation_spec_definition::federation_link_directive;
use crate::link::graphql_definition::execution_directive_definitions;
use crate::link::spec::Identity;
use crate::schema_printer::is_built_in_directive_name;
use crate::schema_printer::is_built_in_type_name;
use crate::subgraph::spec::DEFAULT_QUERY_TYPE_NAME;
use crate::subgraph::spec::ENTITIES_QUERY;
use crate::subgraph::spec::ENTITY_UNION_NAME;
use crate::subgraph::spec::EXTEND_HELPER_TYPE_NAME;
use crate::subgraph::spec::RESERVED_TYPE_NAMES;
use crate::subgraph::spec::SERVICE_SDL_QUERY;
use crate::subgraph::spec::any_scalar_definition;
use crate::subgraph::spec::empty_object_type;
use crate::subgraph::spec::field_set_scalar_definition;
use crate::subgraph::spec::service_object_type_definition;
use crate::subgraph::spec::service_sdl_query_field;

/// The schema a subgraph owner starts from, before federation is added to it.
///
/// Root types are held by value: [`into_federated`](Self::into_federated) takes the
/// configuration by value too, so the `_service` field it adds to the query root never shows up
/// in an object the caller still holds.
#[derive(Clone, Debug, Default)]
pub struct SchemaConfig {
    pub query: Option<ObjectType>,
    pub mutation: Option<ObjectType>,
    pub subscription: Option<ObjectType>,
    /// Every other named type. Built-in scalars given here are ignored.
    pub types: Vec<ExtendedType>,
    pub directives: Vec<Node<DirectiveDefinition>>,
    /// Directives applied to the `schema` definition itself.
    pub schema_directives: Vec<Directive>,
}

impl SchemaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: ObjectType) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_mutation(mut self, mutation: ObjectType) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_subscription(mut self, subscription: ObjectType) -> Self {
        self.subscription = Some(subscription);
        self
    }

    pub fn with_type(mut self, ty: impl Into<ExtendedType>) -> Self {
        self.types.push(ty.into());
        self
    }

    pub fn with_directive(mut self, definition: Node<DirectiveDefinition>) -> Self {
        self.directives.push(definition);
        self
    }

    pub fn with_schema_directive(mut self, directive: Directive) -> Self {
        self.schema_directives.push(directive);
        self
    }

    /// Splits an apollo-compiler schema into a configuration.
    ///
    /// Built-in types and directives are left out, and so is everything a previous composition
    /// added (federation types and root fields, directive definitions and the `@link` to
    /// federation), so that composing the printed SDL of a federated subgraph gives back the
    /// same subgraph.
    pub fn from_schema(schema: &Schema) -> Result<Self, FederationError> {
        let mut config = Self::default();
        let roots = [
            (OperationType::Query, &schema.schema_definition.query),
            (OperationType::Mutation, &schema.schema_definition.mutation),
            (
                OperationType::Subscription,
                &schema.schema_definition.subscription,
            ),
        ];
        let placeholder_entity = has_placeholder_entity(schema);
        for (name, ty) in &schema.types {
            if is_built_in_type_name(name)
                || RESERVED_TYPE_NAMES.contains(name)
                || (*name == EXTEND_HELPER_TYPE_NAME && placeholder_entity)
            {
                continue;
            }
            let root = roots
                .iter()
                .find(|(_, root)| root.as_ref().is_some_and(|root| root.name == *name));
            let Some((operation_type, _)) = root else {
                config.types.push(ty.clone());
                continue;
            };
            let ExtendedType::Object(object) = ty else {
                return Err(FederationError::InvalidRootType {
                    name: name.clone(),
                    kind: operation_kind(*operation_type),
                });
            };
            let mut object = ObjectType::clone(object);
            match operation_type {
                OperationType::Query => {
                    object.fields.shift_remove(&SERVICE_SDL_QUERY);
                    object.fields.shift_remove(&ENTITIES_QUERY);
                    config.query = Some(object);
                }
                OperationType::Mutation => config.mutation = Some(object),
                OperationType::Subscription => config.subscription = Some(object),
            }
        }

        let registered = registered_directive_names();
        config.directives = schema
            .directive_definitions
            .values()
            .filter(|definition| {
                !is_built_in_directive_name(&definition.name)
                    && !registered.contains(&definition.name)
            })
            .cloned()
            .collect();
        config.schema_directives = schema
            .schema_definition
            .directives
            .iter()
            .filter(|directive| !is_federation_link(directive))
            .map(|directive| Directive::clone(directive))
            .collect();
        Ok(config)
    }

    /// Adds federation to the configuration.
    ///
    /// Registers the execution and federation directive definitions, links the schema to
    /// federation v2.1, adds the `_Any` and `FieldSet` scalars and the `_Service` type, and gives
    /// the query root (created when missing) a `_service` field.
    pub fn into_federated(mut self) -> Self {
        self.directives.extend(execution_directive_definitions());
        self.directives.extend(federation_directive_definitions());
        self.schema_directives.push(federation_link_directive());
        self.types.extend([
            any_scalar_definition(),
            field_set_scalar_definition(),
            service_object_type_definition(),
        ]);
        self.query
            .get_or_insert_with(|| empty_object_type(DEFAULT_QUERY_TYPE_NAME))
            .fields
            .insert(SERVICE_SDL_QUERY, service_sdl_query_field());
        self
    }

    /// Builds and validates the schema.
    pub(crate) fn build(self) -> Result<Valid<Schema>, FederationError> {
        let mut schema = Schema::new();

        let mut directive_names = HashSet::default();
        for definition in self.directives {
            if !directive_names.insert(definition.name.clone()) {
                return Err(FederationError::DuplicateDirectiveDefinition {
                    name: definition.name.clone(),
                });
            }
            schema
                .directive_definitions
                .insert(definition.name.clone(), definition);
        }
        for directive in self.schema_directives {
            schema
                .schema_definition
                .make_mut()
                .directives
                .0
                .push(Component::new(directive));
        }

        let mut type_names = HashSet::default();
        let mut register = |schema: &mut Schema, ty: ExtendedType| {
            let name = ty.name().clone();
            if name == ENTITY_UNION_NAME
                || name == EXTEND_HELPER_TYPE_NAME
                || !type_names.insert(name.clone())
            {
                return Err(FederationError::DuplicateTypeDefinition { name });
            }
            schema.types.insert(name, ty);
            Ok(())
        };
        let roots = [
            (OperationType::Query, self.query),
            (OperationType::Mutation, self.mutation),
            (OperationType::Subscription, self.subscription),
        ];
        for (operation_type, root) in roots {
            let Some(root) = root else {
                continue;
            };
            let name = root.name.clone();
            register(&mut schema, ExtendedType::Object(Node::new(root)))?;
            let definition = schema.schema_definition.make_mut();
            let slot = match operation_type {
                OperationType::Query => &mut definition.query,
                OperationType::Mutation => &mut definition.mutation,
                OperationType::Subscription => &mut definition.subscription,
            };
            *slot = Some(name.into());
        }
        for ty in self.types {
            if is_built_in_type_name(ty.name()) {
                continue;
            }
            register(&mut schema, ty)?;
        }

        Ok(schema.validate()?)
    }
}

/// Directives the composer defines itself.
fn registered_directive_names() -> HashSet<Name> {
    execution_directive_definitions()
        .into_iter()
        .chain(federation_directive_definitions())
        .map(|definition| definition.name.clone())
        .collect()
}

/// Whether `_Entity` only has the placeholder member a composition without entities adds.
fn has_placeholder_entity(schema: &Schema) -> bool {
    matches!(
        schema.types.get(&ENTITY_UNION_NAME),
        Some(ExtendedType::Union(union_))
            if union_.members.len() == 1
                && union_.members.contains(EXTEND_HELPER_TYPE_NAME.as_str())
    )
}

fn operation_kind(operation_type: OperationType) -> &'static str {
    match operation_type {
        OperationType::Query => "query",
        OperationType::Mutation => "mutation",
        OperationType::Subscription => "subscription",
    }
}

fn is_federation_link(directive: &Directive) -> bool {
    let federation = Identity::federation_identity().to_string();
    directive.name == FEDERATION_LINK_DIRECTIVE_NAME
        && directive.arguments.iter().any(|argument| {
            matches!(
                &*argument.value,
                Value::String(url) if url.starts_with(&federation)
            )
        })
}

#[cfg(test)]
mod tests {
    use apollo_compiler::name;
    use apollo_compiler::schema::ScalarType;

    use super::*;
    use crate::subgraph::spec::ANY_SCALAR_NAME;

    #[test]
    fn into_federated_moves_query_and_adds_service() {
        let query = empty_object_type(name!("Query"));
        let config = SchemaConfig::new().with_query(query.clone()).into_federated();

        assert!(query.fields.is_empty());
        let federated_query = config.query.as_ref().unwrap();
        assert_eq!(
            federated_query.fields.keys().collect::<Vec<_>>(),
            [&SERVICE_SDL_QUERY]
        );
        assert_eq!(config.directives.len(), 13);
        assert_eq!(config.schema_directives.len(), 1);
        assert!(config.types.iter().any(|ty| *ty.name() == ANY_SCALAR_NAME));
    }

    #[test]
    fn synthesizes_query_root() {
        let config = SchemaConfig::new().into_federated();
        assert_eq!(config.query.unwrap().name, DEFAULT_QUERY_TYPE_NAME);
    }

    #[test]
    fn from_schema_splits_roots_and_types() {
        let schema = Schema::parse(
            r#"
            schema @contact(name: "team") { query: RootQuery mutation: Mutation }
            directive @contact(name: String!) on SCHEMA
            directive @custom on OBJECT
            type RootQuery { a: Int }
            type Mutation { b: Int }
            type Other @custom { c: String }
            "#,
            "schema.graphql",
        )
        .unwrap();
        let config = SchemaConfig::from_schema(&schema).unwrap();

        assert_eq!(config.query.unwrap().name, "RootQuery");
        assert_eq!(config.mutation.unwrap().name, "Mutation");
        assert!(config.subscription.is_none());
        assert_eq!(
            config
                .types
                .iter()
                .map(|ty| ty.name().as_str())
                .collect::<Vec<_>>(),
            ["Other"]
        );
        let mut directives = config
            .directives
            .iter()
            .map(|definition| definition.name.as_str())
            .collect::<Vec<_>>();
        directives.sort();
        assert_eq!(directives, ["contact", "custom"]);
        assert_eq!(config.schema_directives.len(), 1);
    }

    #[test]
    fn keeps_caller_types_named_like_the_placeholder() {
        let schema = Schema::parse(
            r#"
            type Query { h: _ExtendHelper }
            type _ExtendHelper { id: ID! }
            "#,
            "schema.graphql",
        )
        .unwrap();
        let config = SchemaConfig::from_schema(&schema).unwrap();
        assert_eq!(
            config
                .types
                .iter()
                .map(|ty| ty.name().as_str())
                .collect::<Vec<_>>(),
            ["_ExtendHelper"]
        );
        let error = config.into_federated().build().unwrap_err();
        assert_eq!(
            error.to_string(),
            r#"Type "_ExtendHelper" is defined more than once"#
        );
    }

    #[test]
    fn drops_the_placeholder_entity_of_a_composed_schema() {
        let schema = Schema::parse(
            r#"
            type Query { hello: String }
            type _ExtendHelper { id: ID! }
            union _Entity = _ExtendHelper
            "#,
            "schema.graphql",
        )
        .unwrap();
        let config = SchemaConfig::from_schema(&schema).unwrap();
        assert!(config.types.is_empty());
    }

    #[test]
    fn rejects_non_object_root() {
        let mut schema = Schema::new();
        schema.types.insert(
            name!("Q"),
            ExtendedType::Scalar(Node::new(ScalarType {
                description: None,
                name: name!("Q"),
                directives: Default::default(),
            })),
        );
        schema.schema_definition.make_mut().query = Some(name!("Q").into());
        let error = SchemaConfig::from_schema(&schema).unwrap_err();
        assert_eq!(error.to_string(), r#"Root query type "Q" must be an object type"#);
    }
}
