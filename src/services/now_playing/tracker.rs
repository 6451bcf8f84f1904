use super::traits::SessionSource;
use super::types::{NowPlayingSession, PlaybackSnapshot};
use crate::services::cover_art;
use crate::services::cover_cache::CoverCache;
use crate::services::cover_id_store::CoverIdStore;
use crate::types::CoverId;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives one poll tick. A cover id lookup happens only when the title or
/// the album changed since the previous tick; known albums keep their stored
/// id across restarts, unknown ones get a freshly minted id that is
/// persisted before the tick proceeds.
pub(crate) struct NowPlayingTracker {
    source: Arc<dyn SessionSource>,
    id_store: CoverIdStore,
    cover_cache: Arc<CoverCache>,
    cover_size: u32,
    cover_id_length: usize,
    last_track: Option<(String, String)>,
    current_cover_id: Option<CoverId>,
}

impl NowPlayingTracker {
    pub(crate) fn new(
        source: Arc<dyn SessionSource>,
        id_store: CoverIdStore,
        cover_cache: Arc<CoverCache>,
        cover_size: u32,
        cover_id_length: usize,
    ) -> Self {
        Self {
            source,
            id_store,
            cover_cache,
            cover_size,
            cover_id_length,
            last_track: None,
            current_cover_id: None,
        }
    }

    pub(crate) async fn poll(&mut self) -> Option<PlaybackSnapshot> {
        let session = match self.source.now_playing().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!("No active playback session");
                return None;
            }
            Err(error) => {
                warn!(?error, "Unable to query the media server");
                return None;
            }
        };

        debug!(
            title = %session.title,
            artist = %session.artist,
            album = %session.album,
            platform = %session.platform,
            "Currently playing"
        );

        let track_changed = self
            .last_track
            .as_ref()
            .map(|(title, album)| *title != session.title || *album != session.album)
            .unwrap_or(true);

        if track_changed {
            let cover_id = self.resolve_cover_id(&session.album).await;
            self.refresh_artwork(&cover_id, &session).await;
            self.last_track = Some((session.title.clone(), session.album.clone()));
            self.current_cover_id = Some(cover_id);
        } else if let Some(cover_id) = self.current_cover_id.clone() {
            // A transient artwork failure leaves the id without bytes; keep
            // retrying while the track plays instead of serving a 404 until
            // the next track change.
            if self.cover_cache.get(&cover_id).is_none() {
                self.refresh_artwork(&cover_id, &session).await;
            }
        }

        let cover_id = self.current_cover_id.clone()?;

        Some(PlaybackSnapshot {
            title: session.title,
            artist: session.artist,
            album: session.album,
            cover_id,
            state: session.state,
            position_ms: session.position_ms,
            duration_ms: session.duration_ms,
            platform: session.platform,
        })
    }

    async fn resolve_cover_id(&mut self, album: &str) -> CoverId {
        if let Some(cover_id) = self.id_store.get(album) {
            debug!(%cover_id, album, "Reusing stored cover id");
            return cover_id;
        }

        let cover_id = CoverId::random(self.cover_id_length);
        info!(%cover_id, album, "Minted a new cover id");

        // The id stays usable in memory even if persisting fails; a later
        // insertion rewrites the whole file and picks it up.
        if let Err(error) = self
            .id_store
            .insert(album.to_string(), cover_id.clone())
            .await
        {
            warn!(?error, "Unable to persist the cover id store");
        }

        cover_id
    }

    async fn refresh_artwork(&self, cover_id: &CoverId, session: &NowPlayingSession) {
        let bytes = match self.source.fetch_artwork(&session.art_url).await {
            Ok(bytes) => bytes,
            Err(error) => {
                warn!(?error, "Skipping the artwork update for this tick");
                return;
            }
        };

        match cover_art::resize_cover(&bytes, self.cover_size) {
            Ok(image) => {
                self.cover_cache.store(cover_id.clone(), image);
                debug!(%cover_id, album = %session.album, "Stored the refreshed cover image");
            }
            Err(error) => {
                warn!(?error, "Unable to transform the cover image");
            }
        }
    }
}
