use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use snapprune_library::{Snapshot, Volume};

use crate::library::error::PruneError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

/// Failure reported by the storage provider, one or more code/message pairs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub errors: Vec<ApiErrorDetail>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            errors: vec![ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            }],
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>();

        write!(f, "{}", pairs.join("; "))
    }
}

impl std::error::Error for ApiError {}

/// The storage provider operations the pruner relies on.
///
/// Provider-reported failures surface as [`PruneError::Api`]. Data that
/// arrives but can't be read surfaces as [`PruneError::Unexpected`].
#[async_trait]
pub trait StorageApi: Send + Sync {
    async fn list_volumes(&self) -> Result<Vec<Volume>, PruneError>;

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, PruneError>;

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), PruneError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_pairs() {
        let error = ApiError {
            errors: vec![
                ApiErrorDetail {
                    code: "Throttling".to_string(),
                    message: "Rate exceeded".to_string(),
                },
                ApiErrorDetail {
                    code: "InvalidSnapshot.NotFound".to_string(),
                    message: "snap-1 does not exist".to_string(),
                },
            ],
        };

        assert_eq!(
            error.to_string(),
            "Throttling: Rate exceeded; InvalidSnapshot.NotFound: snap-1 does not exist"
        );
    }
}
