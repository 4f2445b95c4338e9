//! Error types for Canopy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanopyError {
    // Page errors
    #[error("Page element not found: {id}")]
    ElementMissing { id: &'static str },

    // User input errors
    #[error("Neither image file nor selected area provided")]
    NothingSelected,

    #[error("Invalid coordinates '{input}': {reason}")]
    InvalidCoordinates { input: String, reason: String },

    #[error("Invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    // Map errors
    #[error("Map initialization failed: {reason}")]
    MapInit { reason: String },

    // Backend errors
    #[error("Network response was not ok: {status} {status_text}\n{body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Failed to decode analysis response: {0}")]
    ResponseDecode(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

impl CanopyError {
    /// Whether the error came from talking to the analysis backend
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            CanopyError::Http { .. } | CanopyError::Transport { .. } | CanopyError::ResponseDecode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CanopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_includes_status_and_body() {
        let err = CanopyError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "server error".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal Server Error"));
        assert!(message.ends_with("\nserver error"));
        assert!(err.is_backend());
    }

    #[test]
    fn test_user_errors_are_not_backend_errors() {
        assert!(!CanopyError::NothingSelected.is_backend());
        assert!(!CanopyError::ElementMissing { id: "map" }.is_backend());
    }
}
