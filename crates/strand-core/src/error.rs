//! Framework errors

/// Framework error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Plain message-carrying failure
    #[error("{0}")]
    Message(String),

    /// An argument had the wrong shape or type
    #[error("type mismatch: expected {expected}, got {actual}")]
    Type { expected: String, actual: String },
}

impl Error {
    /// Create a message-carrying error
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Create a type-mismatch error
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Type {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_display() {
        let err = Error::message("selection is empty");
        assert_eq!(err.to_string(), "selection is empty");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = Error::type_mismatch("absolute path", "app/");
        assert_eq!(err.to_string(), "type mismatch: expected absolute path, got app/");
    }
}
