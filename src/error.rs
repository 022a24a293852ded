use thiserror::Error;

use crate::core::shape::Violation;
use crate::llm::error::ProviderError;

/// The two ways an invocation can fail.
///
/// Every call to [`crate::invoker::Invoker::invoke`] either returns a record
/// that satisfies the flow's output shape, or exactly one of these. Nothing is
/// swallowed, and nothing partially valid is ever returned.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// An input or output record did not satisfy its declared shape.
    ///
    /// For inputs this signals a caller bug and is raised before any network
    /// call is made. For outputs it signals the service broke the declared
    /// contract.
    #[error("schema validation failed: {}", format_violations(.0))]
    SchemaValidation(Vec<Violation>),

    /// The external generation service could not be reached or returned no
    /// usable response. The only user-visible failure path; never retried
    /// here.
    #[error("generation service unavailable: {0}")]
    ServiceUnavailable(#[from] ProviderError),
}

impl InvocationError {
    /// All shape violations carried by this error, if it is a validation
    /// failure.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            InvocationError::SchemaValidation(v) => Some(v),
            InvocationError::ServiceUnavailable(_) => None,
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
