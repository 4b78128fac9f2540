//! Errors raised while composing a federated subgraph schema.
use apollo_compiler::Name;
use apollo_compiler::validation::DiagnosticList;
use apollo_compiler::validation::WithErrors;
use thiserror::Error;

/// A composition failure.
///
/// Every variant is raised before a [`FederatedSchema`](crate::subgraph::FederatedSchema) exists.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FederationError {
    #[error("Invalid GraphQL schema:\n{diagnostics}")]
    InvalidSchema { diagnostics: DiagnosticList },

    #[error(r#"Directive "@{name}" is defined more than once"#)]
    DuplicateDirectiveDefinition { name: Name },

    #[error(r#"Type "{name}" is defined more than once"#)]
    DuplicateTypeDefinition { name: Name },

    #[error(r#"Root {kind} type "{name}" must be an object type"#)]
    InvalidRootType { name: Name, kind: &'static str },
}

impl<T> From<WithErrors<T>> for FederationError {
    fn from(value: WithErrors<T>) -> Self {
        FederationError::InvalidSchema {
            diagnostics: value.errors,
        }
    }
}

impl FederationError {
    /// Individual messages, one per underlying problem.
    pub fn messages(&self) -> Vec<String> {
        match self {
            FederationError::InvalidSchema { diagnostics } => {
                diagnostics.iter().map(|d| d.to_string()).collect()
            }
            other => vec![other.to_string()],
        }
    }
}
