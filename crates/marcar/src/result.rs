//! Result and error types for Marcar.

use thiserror::Error;

/// Result type for Marcar operations
pub type MarcarResult<T> = Result<T, MarcarError>;

/// Errors that can occur in Marcar
///
/// Both variants signal programmer misuse at the call site; the runtime has
/// no I/O and nothing to retry.
#[derive(Debug, Error)]
pub enum MarcarError {
    /// Structural edit attempted on a frozen locator tree
    #[error("locator tree is frozen: cannot {operation} at `{path}`")]
    MutationRejected {
        /// Operation that was rejected
        operation: String,
        /// Path of the locator the edit targeted
        path: String,
    },

    /// A parameter value failed to produce its attribute string
    #[error("parameter `{key}` could not be converted to an attribute value: {message}")]
    ValueConversion {
        /// Parameter key whose value failed
        key: String,
        /// Underlying conversion failure
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_rejected_display() {
        let error = MarcarError::MutationRejected {
            operation: "seal".to_owned(),
            path: "root-header".to_owned(),
        };
        let text = error.to_string();
        assert!(text.contains("frozen"));
        assert!(text.contains("seal"));
        assert!(text.contains("root-header"));
    }

    #[test]
    fn test_value_conversion_display() {
        let error = MarcarError::ValueConversion {
            key: "qux".to_owned(),
            message: "no string form".to_owned(),
        };
        let text = error.to_string();
        assert!(text.contains("qux"));
        assert!(text.contains("no string form"));
    }
}
