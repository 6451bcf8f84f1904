use super::traits::PresenceClient;
use super::types::PresenceUpdate;
use crate::services::now_playing::{PlaybackSnapshot, PlayerState};
use crate::translations::Translations;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info};

/// Decides whether the displayed presence changed. The cover id and the play
/// position are excluded: a failed artwork refresh or the advancing position
/// must not re-dispatch an otherwise identical presence.
#[derive(Eq, PartialEq, Clone, Debug)]
struct Fingerprint {
    title: String,
    artist: String,
    album: String,
    state: PlayerState,
    platform: String,
}

impl Fingerprint {
    fn of(snapshot: &PlaybackSnapshot) -> Self {
        Self {
            title: snapshot.title.clone(),
            artist: snapshot.artist.clone(),
            album: snapshot.album.clone(),
            state: snapshot.state,
            platform: snapshot.platform.clone(),
        }
    }
}

pub(crate) struct PresenceReconciler {
    client: Arc<dyn PresenceClient>,
    translations: Translations,
    cover_base_url: String,
    last_dispatched: Option<Fingerprint>,
}

impl PresenceReconciler {
    pub(crate) fn new(
        client: Arc<dyn PresenceClient>,
        translations: Translations,
        cover_base_url: String,
    ) -> Self {
        Self {
            client,
            translations,
            cover_base_url: cover_base_url.trim_end_matches('/').to_string(),
            last_dispatched: None,
        }
    }

    pub(crate) async fn tick(&mut self, snapshot: Option<PlaybackSnapshot>) {
        let fingerprint = snapshot.as_ref().map(Fingerprint::of);

        if fingerprint == self.last_dispatched {
            return;
        }

        let result = match snapshot.as_ref() {
            Some(snapshot) if snapshot.state == PlayerState::Playing => {
                info!(
                    title = %snapshot.title,
                    artist = %snapshot.artist,
                    platform = %snapshot.platform,
                    "Updating presence with the current track"
                );
                self.client.update(&self.build_update(snapshot)).await
            }
            _ => {
                info!("Clearing presence, no active playing session");
                self.client.clear().await
            }
        };

        match result {
            // Only a successful dispatch moves the tracked state, so a
            // failure is retried on the next tick.
            Ok(()) => self.last_dispatched = fingerprint,
            Err(error) => error!(?error, "Failed to dispatch the presence change"),
        }
    }

    // Best-effort clear before the process exits.
    pub(crate) async fn shutdown(&mut self) {
        if let Err(error) = self.client.clear().await {
            error!(?error, "Failed to clear presence on shutdown");
        }
        self.last_dispatched = None;
    }

    fn build_update(&self, snapshot: &PlaybackSnapshot) -> PresenceUpdate {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        let remaining_secs =
            (snapshot.duration_ms.saturating_sub(snapshot.position_ms) / 1000) as i64;

        let small_image = if snapshot.platform == "Plexamp" {
            "plexamp"
        } else {
            "plexweb"
        };

        PresenceUpdate {
            details: snapshot.title.clone(),
            state: format!("{} {}", self.translations.by, snapshot.artist),
            large_image: format!("{}/{}", self.cover_base_url, snapshot.cover_id),
            large_text: format!("{}: {}", self.translations.album, snapshot.album),
            small_image: small_image.to_string(),
            small_text: format!(
                "{} {} on {}",
                self.translations.listening_to, snapshot.title, snapshot.platform
            ),
            end_timestamp: now + remaining_secs,
        }
    }
}
