//! Dispatch error types

use thiserror::Error;

/// Result type for dispatch operations
pub type ClpResult<T> = std::result::Result<T, ClpError>;

#[derive(Error, Debug)]
pub enum ClpError {
    /// No registered entry has this name and parameter-type signature
    #[error("Unsupported dispatch: {name}({})", .parameter_types.join(", "))]
    UnsupportedDispatch {
        name: String,
        parameter_types: Vec<String>,
    },

    /// The entry matched but the argument count differs from its signature
    #[error("Arity mismatch for {name}: expected {expected} arguments, got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// An argument could not be coerced to the declared parameter type
    #[error("Argument {index} of {name} must be {expected}, got {found}")]
    ArgumentType {
        name: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Two entries were registered under the same name and signature
    #[error("Duplicate registration: {name}({})", .parameter_types.join(", "))]
    DuplicateRegistration {
        name: String,
        parameter_types: Vec<String>,
    },

    /// Error raised by the backing service, passed through untouched
    #[error(transparent)]
    Backing(#[from] jukebox_common::Error),
}

impl ClpError {
    /// The backing service's error, if this is one
    pub fn backing(&self) -> Option<&jukebox_common::Error> {
        match self {
            ClpError::Backing(err) => Some(err),
            _ => None,
        }
    }

    /// Consume this error, yielding the backing service's error if it is one
    pub fn into_backing(self) -> Result<jukebox_common::Error, ClpError> {
        match self {
            ClpError::Backing(err) => Ok(err),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_lists_signature() {
        let err = ClpError::UnsupportedDispatch {
            name: "getAlbums".to_string(),
            parameter_types: vec!["long".to_string(), "int".to_string()],
        };
        assert_eq!(err.to_string(), "Unsupported dispatch: getAlbums(long, int)");
    }

    #[test]
    fn test_backing_error_is_transparent() {
        let err = ClpError::from(jukebox_common::Error::no_such_entity("Album", 9));
        assert_eq!(err.to_string(), "Not found: No Album exists with the primary key 9");
        assert!(matches!(
            err.backing(),
            Some(jukebox_common::Error::NotFound(_))
        ));
        assert!(err.into_backing().is_ok());
    }
}
