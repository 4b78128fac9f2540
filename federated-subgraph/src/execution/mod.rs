//! Execution of the federation entry points of a composed subgraph schema.
//!
//! `_service` and `_entities` are resolved here, on top of apollo-compiler's executor. Other root
//! fields belong to the subgraph owner and are reported as field errors.
use std::cell::RefCell;

use apollo_compiler::ExecutableDocument;
use apollo_compiler::ast::OperationType;
use apollo_compiler::resolvers::Execution;
use apollo_compiler::response::GraphQLError;
use apollo_compiler::response::JsonValue;

use crate::subgraph::FederatedSchema;

mod resolvers;
mod response;

pub use response::Error;
pub use response::JsonMap;
pub use response::Location;
pub use response::PathElement;
pub use response::Request;
pub use response::Response;

pub(crate) fn execute(schema: &FederatedSchema, request: &Request) -> Response {
    let document =
        match ExecutableDocument::parse_and_validate(schema.schema(), &request.query, "query") {
            Ok(document) => document,
            Err(with_errors) => {
                return Response::from_request_errors(
                    with_errors.errors.iter().map(|error| error.to_json()),
                );
            }
        };
    let operation = match document.operations.get(request.operation_name.as_deref()) {
        Ok(operation) => operation,
        Err(error) => {
            return Response::from_request_errors([error.to_graphql_error(&document.sources)]);
        }
    };
    if operation.operation_type != OperationType::Query {
        tracing::debug!(
            operation_name = ?request.operation_name,
            "rejected a non-query operation"
        );
        return Response::from_request_errors([GraphQLError::new(
            "only query operations can be executed by the federation layer",
            None,
            &document.sources,
        )]);
    }
    let Some(query_type) = &schema.schema().schema_definition.query else {
        return Response::from_request_errors([GraphQLError::new(
            "the schema has no query type",
            None,
            &document.sources,
        )]);
    };

    let item_errors = RefCell::new(Vec::new());
    let root = resolvers::FederationRoot {
        schema,
        type_name: query_type.name.as_str(),
        item_errors: &item_errors,
    };
    let result = Execution::new(schema.schema(), &document)
        .operation(operation)
        .raw_variable_values(&request.variables)
        .execute_sync(&root);
    match result {
        Ok(response) => Response {
            data: Some(JsonValue::from(response.data)),
            errors: response
                .errors
                .into_iter()
                .chain(item_errors.into_inner())
                .map(Into::into)
                .collect(),
        },
        Err(request_error) => {
            Response::from_request_errors([request_error.to_graphql_error(&document.sources)])
        }
    }
}
