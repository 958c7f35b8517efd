//! Error types
//!
//! Only selection and configuration problems reach the caller. Generator and
//! persistence failures are recovered inside the engine and the storage layer.

use thiserror::Error;

/// Errors surfaced by the game session and its configuration.
#[derive(Debug, Error)]
pub enum CraftError {
    #[error("unknown item: \"{0}\"")]
    UnknownItem(String),

    #[error("invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from the key/value substrate and record (de)serialization.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read record '{key}'")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write record '{key}'")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("record '{key}' is not valid JSON")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode record '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type CraftResult<T> = std::result::Result<T, CraftError>;
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_converts_into_craft_error() {
        let err: CraftError = StorageError::Read {
            key: "drug_craft_elements".into(),
            source: std::io::Error::other("disk gone"),
        }
        .into();
        assert!(matches!(err, CraftError::Storage(_)));
        assert_eq!(err.to_string(), "failed to read record 'drug_craft_elements'");
    }

    #[test]
    fn test_unknown_item_message() {
        let err = CraftError::UnknownItem("unicorn".into());
        assert_eq!(err.to_string(), "unknown item: \"unicorn\"");
    }
}
