use thiserror::Error;

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, DynasyncError>;

/// Errors that can occur while building tables or synthesizing a schema.
///
/// Every variant is fatal for the current synthesis pass. Nothing is retried
/// and no partial schema is produced once one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DynasyncError {
    /// A table or type declaration is malformed.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Two declarations claim the same name, or incompatible parameters were combined.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The external config document is missing, of the wrong type, or unparsable.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DynasyncError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = DynasyncError::validation("Partition Key dogId must be present in attributes {}");
        assert_eq!(
            error.to_string(),
            "Validation error: Partition Key dogId must be present in attributes {}"
        );
    }

    #[test]
    fn test_conflict_error_display() {
        let error = DynasyncError::conflict("Table Dog is already registered");
        assert_eq!(error.to_string(), "Conflict: Table Dog is already registered");
    }

    #[test]
    fn test_configuration_error_display() {
        let error = DynasyncError::configuration("Config file dynasync.json does not exist");
        assert_eq!(
            error.to_string(),
            "Configuration error: Config file dynasync.json does not exist"
        );
    }
}
