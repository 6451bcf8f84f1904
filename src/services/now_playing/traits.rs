use super::types::NowPlayingSession;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SessionSourceError {
    #[error("Unable to reach the media server: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("Artwork request returned status {0}")]
    ArtworkStatus(u16),
}

#[async_trait]
pub(crate) trait SessionSource {
    async fn now_playing(&self) -> Result<Option<NowPlayingSession>, SessionSourceError>;

    async fn fetch_artwork(&self, art_url: &str) -> Result<Vec<u8>, SessionSourceError>;
}
