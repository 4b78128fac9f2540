//! ## Usage
//!
//! Turns a plain GraphQL schema into an [Apollo Federation] v2 subgraph schema and prints
//! schemas as canonical, deterministic SDL.
//!
//! ```
//! use std::sync::Arc;
//!
//! use apollo_compiler::Name;
//! use apollo_compiler::Schema;
//! use federated_subgraph::FederatedSchemaConfig;
//! use federated_subgraph::SchemaConfig;
//! use federated_subgraph::build_federated_schema;
//! use federated_subgraph::subgraph::BoxError;
//! use federated_subgraph::subgraph::EntityResolver;
//! use federated_subgraph::subgraph::Representation;
//! use serde_json_bytes::Value;
//!
//! struct NoEntities;
//!
//! impl EntityResolver for NoEntities {
//!     fn resolve_entities(&self, _: &[Representation]) -> Result<Vec<Value>, BoxError> {
//!         Ok(Vec::new())
//!     }
//!
//!     fn resolve_entity_type(&self, _: &Value) -> Option<Name> {
//!         None
//!     }
//! }
//!
//! let schema = Schema::parse(
//!     r#"
//!     type Query { me: User }
//!     type User @key(fields: "id") { id: ID! }
//!     "#,
//!     "schema.graphql",
//! )
//! .unwrap();
//! let config = FederatedSchemaConfig {
//!     schema: SchemaConfig::from_schema(&schema).unwrap(),
//!     resolver: Arc::new(NoEntities),
//! };
//! let federated = build_federated_schema(config).unwrap();
//! assert!(federated.sdl().contains("union _Entity = User"));
//! ```
//!
//! [Apollo Federation]: https://www.apollographql.com/docs/federation/

#![warn(
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
    unreachable_patterns,
    unused,
    unused_qualifications,
    dead_code,
    while_true,
    unconditional_panic,
    clippy::all
)]

mod display_helpers;
pub mod error;
pub mod execution;
pub mod link;
pub mod schema_printer;
pub mod subgraph;

pub use crate::error::FederationError;
pub use crate::execution::Request;
pub use crate::execution::Response;
pub use crate::schema_printer::PrintOptions;
pub use crate::schema_printer::print_schema;
pub use crate::subgraph::FederatedSchema;
pub use crate::subgraph::FederatedSchemaConfig;
pub use crate::subgraph::SchemaConfig;
pub use crate::subgraph::build_federated_schema;

const _: () = {
    const fn assert_thread_safe<T: Sync + Send>() {}

    assert_thread_safe::<FederatedSchema>();
};
