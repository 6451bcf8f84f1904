use super::types::PresenceUpdate;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub(crate) enum PresenceClientError {
    #[error("Presence transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub(crate) trait PresenceClient {
    async fn update(&self, update: &PresenceUpdate) -> Result<(), PresenceClientError>;
    async fn clear(&self) -> Result<(), PresenceClientError>;
}
