use thiserror::Error;

/// Failures surfaced by the chat session and the layers beneath it.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The model server could not be reached.
    #[error("Cannot connect to model server: {0}")]
    Connection(String),

    /// The server answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Http { status: u16, body: String },

    /// A success response carried no usable completion.
    #[error("Empty response from API")]
    EmptyResponse,

    /// User input was rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// A persisted value could not be decoded.
    #[error("Stored value '{key}' is corrupt: {reason}")]
    StorageParse { key: String, reason: String },

    /// A persisted value could not be written.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Conversation not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChatError::EmptyResponse
        } else {
            ChatError::Connection(err.to_string())
        }
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        ChatError::Storage(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_mention_status_and_body() {
        let err = ChatError::Http {
            status: 500,
            body: "server overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - server overloaded");
    }

    #[test]
    fn validation_errors_display_the_bare_message() {
        let err = ChatError::Validation("Please select a model first".to_string());
        assert_eq!(err.to_string(), "Please select a model first");
    }
}
