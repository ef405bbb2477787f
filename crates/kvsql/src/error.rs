//! Error types for kvsql

use thiserror::Error;

/// Result type alias for kvsql build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types returned while building SQL.
///
/// A builder never returns partial SQL together with an error: when a
/// `BuildError` is returned there is no statement to execute.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// ORDER BY direction is neither ASC nor DESC
    #[error("Invalid ORDER BY direction: '{direction}' (expected ASC or DESC)")]
    InvalidOrderDirection { direction: String },

    /// Empty input, or rows whose field sets diverge
    #[error("Empty or inconsistent input: {0}")]
    EmptyOrInconsistentInput(String),

    /// IN / NOT IN condition with no values for a field
    #[error("Empty value list for field '{field}'")]
    EmptyValueList { field: String },

    /// Value that cannot be bound as a scalar parameter
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),
}

impl BuildError {
    /// Create an invalid ORDER BY direction error
    pub fn invalid_direction(direction: impl Into<String>) -> Self {
        Self::InvalidOrderDirection {
            direction: direction.into(),
        }
    }

    /// Create an empty/inconsistent input error
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::EmptyOrInconsistentInput(message.into())
    }

    /// Create an empty value list error for a specific field
    pub fn empty_list(field: impl Into<String>) -> Self {
        Self::EmptyValueList {
            field: field.into(),
        }
    }

    /// Check if this is an invalid ORDER BY direction error
    pub fn is_invalid_direction(&self) -> bool {
        matches!(self, Self::InvalidOrderDirection { .. })
    }

    /// Check if this is an empty/inconsistent input error
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, Self::EmptyOrInconsistentInput(_))
    }

    /// Check if this is an empty value list error
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Self::EmptyValueList { .. })
    }
}
