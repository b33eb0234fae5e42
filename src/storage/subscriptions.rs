use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors from reading or writing the subscription file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access subscription file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Subscription file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk shape: a single `feeds` key holding the URL list.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSubscriptions {
    #[serde(default)]
    feeds: Vec<String>,
}

/// File-backed key-value store holding the subscribed feed URLs.
///
/// Order is preserved exactly as written. The store does not enforce
/// uniqueness; callers check for duplicates before calling [`set`](Self::set).
#[derive(Debug, Clone)]
pub struct SubscriptionStore {
    path: PathBuf,
}

impl SubscriptionStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored URLs in insertion order; a missing file is an empty list.
    pub async fn get(&self) -> Result<Vec<String>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No subscription file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stored: StoredSubscriptions = serde_json::from_str(&content)?;
        Ok(stored.feeds)
    }

    /// Replaces the stored list.
    ///
    /// Writes to a temporary file in the same directory, syncs it, then
    /// renames it over the old file so readers never see a partial list.
    pub async fn set(&self, feeds: &[String]) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(&StoredSubscriptions {
            feeds: feeds.to_vec(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // SEC-009: Randomized temp filename to prevent TOCTOU race conditions
        let random_suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let temp_path = self
            .path
            .with_extension(format!("tmp.{:016x}", random_suffix));

        let written = async {
            let mut file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)
                .await?;
            file.write_all(&content).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&temp_path, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), feeds = feeds.len(), "Saved subscriptions");
        Ok(())
    }
}
