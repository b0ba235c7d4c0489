use thiserror::Error;

/// A violated field constraint, carrying the message surfaced to the client.
///
/// Validation is first-failure-wins: only the first broken rule is reported,
/// never an aggregate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}
