//! Composition of a federated subgraph schema.
use std::fmt;
use std::sync::Arc;

use apollo_compiler::Name;
use apollo_compiler::Schema;
use apollo_compiler::schema::ComponentOrigin;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::ObjectType;
use apollo_compiler::validation::Valid;
use itertools::Itertools;

use crate::error::FederationError;
use crate::execution;
use crate::execution::Request;
use crate::execution::Response;
use crate::link::federation_spec_definition::FEDERATION_EXTENDS_DIRECTIVE_NAME;
use crate::link::federation_spec_definition::FEDERATION_KEY_DIRECTIVE_NAME;
use crate::schema_printer::PrintOptions;
use crate::schema_printer::print_schema;
use crate::subgraph::spec::ENTITIES_QUERY;
use crate::subgraph::spec::ENTITY_UNION_NAME;
use crate::subgraph::spec::EXTEND_HELPER_TYPE_NAME;
use crate::subgraph::spec::entities_query_field;
use crate::subgraph::spec::entity_union_definition;
use crate::subgraph::spec::extend_helper_type_definition;

mod config;
mod resolver;
pub mod spec;

pub use config::SchemaConfig;
pub use resolver::BoxError;
pub use resolver::EntityResolver;
pub use resolver::Representation;

/// What [`build_federated_schema`] needs: the subgraph owner's schema and the resolver backing
/// `_entities`.
#[derive(Clone)]
pub struct FederatedSchemaConfig {
    pub schema: SchemaConfig,
    pub resolver: Arc<dyn EntityResolver>,
}

/// A composed subgraph schema, with its SDL computed once at composition time.
#[derive(Clone)]
pub struct FederatedSchema {
    inner: Arc<FederatedSchemaInner>,
}

struct FederatedSchemaInner {
    schema: Valid<Schema>,
    sdl: String,
    entity_types: Vec<Name>,
    resolver: Arc<dyn EntityResolver>,
}

/// Composes a federated subgraph schema.
///
/// The schema in `config` is augmented with federation (see [`SchemaConfig::into_federated`])
/// and validated. Object types carrying `@key` become members of the `_Entity` union, which
/// the query root exposes through `_entities(representations: [_Any!]!): [_Entity]!`.
///
/// # Errors
///
/// Fails when the augmented schema is not a valid GraphQL schema, or defines a type or a
/// directive twice. There is no partial result.
pub fn build_federated_schema(
    config: FederatedSchemaConfig,
) -> Result<FederatedSchema, FederationError> {
    let FederatedSchemaConfig { schema, resolver } = config;
    let mut schema = schema.into_federated().build()?.into_inner();

    let mut entity_types = locate_entities(&schema);
    if entity_types.is_empty() {
        // `_Entity` may not be empty
        schema
            .types
            .insert(EXTEND_HELPER_TYPE_NAME, extend_helper_type_definition());
        entity_types.push(EXTEND_HELPER_TYPE_NAME);
    }
    schema.types.insert(
        ENTITY_UNION_NAME,
        entity_union_definition(entity_types.iter().cloned()),
    );

    let query_type_name = schema
        .schema_definition
        .query
        .as_ref()
        .map(|query| query.name.clone());
    if let Some(query_type_name) = &query_type_name
        && let Some(ExtendedType::Object(query_type)) = schema.types.get_mut(query_type_name)
    {
        query_type
            .make_mut()
            .fields
            .insert(ENTITIES_QUERY, entities_query_field());
    }
    let schema = Valid::assume_valid(schema);

    let sdl = print_schema(&schema, PrintOptions::default());
    tracing::debug!(
        query_type = ?query_type_name,
        entity_types = %entity_types.iter().join(", "),
        sdl_length = sdl.len(),
        "composed federated subgraph schema"
    );

    Ok(FederatedSchema {
        inner: Arc::new(FederatedSchemaInner {
            schema,
            sdl,
            entity_types,
            resolver,
        }),
    })
}

fn locate_entities(schema: &Schema) -> Vec<Name> {
    schema
        .types
        .values()
        .filter_map(|ty| match ty {
            ExtendedType::Object(object) if is_entity(object) => Some(object.name.clone()),
            _ => None,
        })
        .sorted()
        .collect()
}

fn is_entity(object: &ObjectType) -> bool {
    !is_extend_stub(object)
        && object
            .directives
            .iter()
            .any(|directive| directive.name == FEDERATION_KEY_DIRECTIVE_NAME)
}

/// Whether `object` only extends a type owned by another subgraph: it is marked `@extends`, or
/// everything in it comes from `extend type`.
fn is_extend_stub(object: &ObjectType) -> bool {
    if object
        .directives
        .iter()
        .any(|directive| directive.name == FEDERATION_EXTENDS_DIRECTIVE_NAME)
    {
        return true;
    }
    let mut origins = object
        .directives
        .iter()
        .map(|directive| &directive.origin)
        .chain(object.fields.values().map(|field| &field.origin))
        .peekable();
    origins.peek().is_some()
        && origins.all(|origin| matches!(origin, ComponentOrigin::Extension(_)))
}

impl FederatedSchema {
    pub fn schema(&self) -> &Valid<Schema> {
        &self.inner.schema
    }

    /// The SDL served by `_service { sdl }`.
    pub fn sdl(&self) -> &str {
        &self.inner.sdl
    }

    /// Members of the `_Entity` union, sorted by name.
    pub fn entity_types(&self) -> &[Name] {
        &self.inner.entity_types
    }

    /// Prints the composed schema with other options than the ones of [`sdl`](Self::sdl).
    pub fn print(&self, options: PrintOptions) -> String {
        print_schema(&self.inner.schema, options)
    }

    /// Executes a query against the federation fields of the schema.
    pub fn execute(&self, request: &Request) -> Response {
        execution::execute(self, request)
    }

    pub(crate) fn resolver(&self) -> &dyn EntityResolver {
        self.inner.resolver.as_ref()
    }
}

impl fmt::Debug for FederatedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederatedSchema")
            .field("entity_types", &self.inner.entity_types)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for FederatedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.sdl)
    }
}
