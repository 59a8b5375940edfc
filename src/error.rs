//! Error types for markup processing.
//!
//! Parsing itself is total; these errors only surface from the fallible
//! entry points, from configuration loading and from I/O in the binaries.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    /// Input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8: {source}")]
    InvalidUtf8 {
        #[from]
        source: std::str::Utf8Error,
    },

    /// Lexing or parsing hit an unexpected fault.
    #[error("markup could not be structured: {message}")]
    Internal { message: String },

    /// Renderer configuration could not be read.
    #[error("invalid renderer configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, MarkupError>;

impl MarkupError {
    pub fn internal(message: impl Into<String>) -> Self {
        MarkupError::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = MarkupError::internal("boom");
        assert_eq!("markup could not be structured: boom", err.to_string());

        let utf8 = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().utf8_error();
        let err: MarkupError = utf8.into();
        assert!(err.to_string().starts_with("input is not valid UTF-8"));
    }
}
