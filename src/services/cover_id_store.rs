use crate::types::CoverId;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CoverStoreError {
    #[error("Unable to access the cover id file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cover id file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable album → cover id mapping: a flat JSON object, loaded once at
/// startup and rewritten in full on every insertion via a temp-file rename.
pub(crate) struct CoverIdStore {
    path: PathBuf,
    entries: HashMap<String, CoverId>,
}

impl CoverIdStore {
    pub(crate) async fn open(path: impl Into<PathBuf>) -> Result<Self, CoverStoreError> {
        let path = path.into();

        let entries: HashMap<String, CoverId> = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(error) if matches!(error.kind(), std::io::ErrorKind::NotFound) => HashMap::new(),
            Err(error) => return Err(error.into()),
        };

        debug!(entries = entries.len(), "Loaded cover id store");

        Ok(Self { path, entries })
    }

    pub(crate) fn get(&self, album: &str) -> Option<CoverId> {
        self.entries.get(album).cloned()
    }

    pub(crate) async fn insert(
        &mut self,
        album: String,
        cover_id: CoverId,
    ) -> Result<(), CoverStoreError> {
        self.entries.insert(album, cover_id);
        self.persist().await
    }

    async fn persist(&self) -> Result<(), CoverStoreError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp_path = self.path.with_extension("tmp");

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .await?;

        file.write_all(content.as_bytes()).await?;
        file.flush().await?;

        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!(entries = self.entries.len(), "Saved cover id store");

        Ok(())
    }
}
