//! Error types.
//!
//! Load and config failures end the operation that hit them and are
//! surfaced to the user as a message. Sequence errors are routine and
//! recovered at the call site (fallback text, "out of prompts" state).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reading or writing a topic file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid topic file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode topics: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Short message for the status line of the terminal UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::File { .. } => "File not found, create one",
            StoreError::Parse { .. } => "Invalid file",
            StoreError::Write { .. } | StoreError::Encode(_) => "Could not save file",
        }
    }
}

/// Failures querying the working prompt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("invalid field '{0}', must be 'prompt' or 'answer'")]
    InvalidField(String),

    #[error("index {index} out of range for {len} prompts")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no prompts loaded")]
    NotLoaded,

    #[error("no topics selected")]
    NoSelection,
}

/// Failures loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_distinguish_missing_from_malformed() {
        let missing = StoreError::File {
            path: PathBuf::from("nope.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let malformed = StoreError::Parse {
            path: PathBuf::from("bad.json"),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert_eq!(missing.user_message(), "File not found, create one");
        assert_eq!(malformed.user_message(), "Invalid file");
    }

    #[test]
    fn display_includes_path() {
        let err = StoreError::File {
            path: PathBuf::from("/tmp/topics.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/topics.json"));
    }

    #[test]
    fn index_error_reports_bounds() {
        let err = SequenceError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "index 5 out of range for 3 prompts");
    }
}
