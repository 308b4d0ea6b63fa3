//! Error types shared across the schedule, ratings and storage clients.

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Errors that can occur while searching, enriching or saving courses.
#[derive(Debug, Error, Clone)]
pub enum ClassFinderError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The local address/port the HTTP client wanted was already taken
    #[error("Address already in use: {message}")]
    AddrInUse { message: String },

    /// The token is not subscribed to one or more required upstream APIs
    #[error("Please make sure you are subscribed to {} and try again", .apis.join(" and "))]
    MissingSubscription { apis: Vec<String> },

    /// Server returned an unexpected response
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// Failed to parse a response body
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    Url { message: String },

    /// Saved-course storage could not be reached
    #[error("Could not reach saved-course storage after {attempts} attempts: {message}")]
    StorageUnavailable { attempts: u32, message: String },

    /// Any other storage failure
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Reading from or writing to the terminal failed
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl ClassFinderError {
    /// Returns true if this is the address-in-use condition.
    pub fn is_addr_in_use(&self) -> bool {
        matches!(self, ClassFinderError::AddrInUse { .. })
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        self.is_addr_in_use()
    }
}

/// Walks an error's source chain looking for an `AddrInUse` I/O error.
fn chain_has_addr_in_use(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::AddrInUse {
                return true;
            }
        }
        let text = e.to_string();
        if text.contains("EADDRINUSE") || text.contains("Address already in use") {
            return true;
        }
        current = e.source();
    }
    false
}

impl From<reqwest::Error> for ClassFinderError {
    fn from(err: reqwest::Error) -> Self {
        if chain_has_addr_in_use(&err) {
            return ClassFinderError::AddrInUse {
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return ClassFinderError::Parse {
                message: err.to_string(),
            };
        }
        ClassFinderError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for ClassFinderError {
    fn from(err: url::ParseError) -> Self {
        ClassFinderError::Url {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClassFinderError {
    fn from(err: serde_json::Error) -> Self {
        ClassFinderError::Parse {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for ClassFinderError {
    fn from(err: rusqlite::Error) -> Self {
        ClassFinderError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<io::Error> for ClassFinderError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::AddrInUse {
            return ClassFinderError::AddrInUse {
                message: err.to_string(),
            };
        }
        ClassFinderError::Io {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_in_use_is_the_only_retryable_error() {
        let addr = ClassFinderError::from(io::Error::new(io::ErrorKind::AddrInUse, "port 443"));
        assert!(addr.is_addr_in_use());
        assert!(addr.is_retryable());

        let net = ClassFinderError::Network {
            message: "connection reset".to_string(),
        };
        assert!(!net.is_retryable());
    }

    #[test]
    fn test_addr_in_use_found_in_wrapped_source() {
        #[derive(Debug)]
        struct Wrapper(io::Error);
        impl std::fmt::Display for Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "connect failed")
            }
        }
        impl StdError for Wrapper {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let wrapped = Wrapper(io::Error::new(io::ErrorKind::AddrInUse, "bind"));
        assert!(chain_has_addr_in_use(&wrapped));

        let other = Wrapper(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert!(!chain_has_addr_in_use(&other));
    }

    #[test]
    fn test_missing_subscription_message_names_apis() {
        let err = ClassFinderError::MissingSubscription {
            apis: vec![
                "the AcademicClassScheduleClassSchedule - v1 API".to_string(),
                "the Persons - v3 API".to_string(),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Please make sure you are subscribed to the AcademicClassScheduleClassSchedule - v1 API and the Persons - v3 API and try again"
        );
    }
}
