use crate::services::now_playing::{
    NowPlayingSession, PlayerState, SessionSource, SessionSourceError,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

pub(crate) struct PlexClient {
    endpoint: String,
    token: String,
    username: String,
    platform_priority: Vec<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SessionsResponse {
    #[serde(rename = "MediaContainer")]
    media_container: MediaContainer,
}

#[derive(Debug, Deserialize)]
struct MediaContainer {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<SessionMetadata>,
}

#[derive(Debug, Deserialize)]
struct SessionMetadata {
    #[serde(default)]
    title: String,
    #[serde(rename = "grandparentTitle", default)]
    grandparent_title: String,
    #[serde(rename = "parentTitle", default)]
    parent_title: String,
    #[serde(rename = "type", default)]
    session_type: String,
    #[serde(default)]
    thumb: String,
    #[serde(rename = "viewOffset", default)]
    view_offset: u64,
    #[serde(default)]
    duration: u64,
    #[serde(rename = "User")]
    user: Option<SessionUser>,
    #[serde(rename = "Player")]
    player: Option<SessionPlayer>,
}

#[derive(Debug, Deserialize)]
struct SessionUser {
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct SessionPlayer {
    #[serde(default)]
    product: String,
    #[serde(default)]
    state: String,
}

impl PlexClient {
    pub(crate) fn create(
        endpoint: &str,
        token: &str,
        username: &str,
        platform_priority: Vec<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
            username: username.into(),
            platform_priority,
            client: reqwest::Client::new(),
        }
    }

    fn select_session(&self, sessions: Vec<SessionMetadata>) -> Option<SessionMetadata> {
        let mut candidates = sessions
            .into_iter()
            .filter(|session| session.session_type == "track")
            .filter(|session| {
                session
                    .user
                    .as_ref()
                    .map(|user| user.title == self.username)
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();

        // Stable sort keeps the original order between equally ranked
        // platforms; platforms absent from the priority list sort last.
        candidates.sort_by_key(|session| {
            let product = session
                .player
                .as_ref()
                .map(|player| player.product.as_str())
                .unwrap_or_default();
            platform_rank(&self.platform_priority, product)
        });

        candidates.into_iter().next()
    }
}

fn platform_rank(priority: &[String], product: &str) -> usize {
    priority
        .iter()
        .position(|platform| platform == product)
        .unwrap_or(priority.len())
}

#[async_trait]
impl SessionSource for PlexClient {
    async fn now_playing(&self) -> Result<Option<NowPlayingSession>, SessionSourceError> {
        let response = self
            .client
            .get(format!("{}/status/sessions", self.endpoint))
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| SessionSourceError::Transport(Box::new(error)))?;

        let sessions = response
            .json::<SessionsResponse>()
            .await
            .map_err(|error| SessionSourceError::Transport(Box::new(error)))?;

        let session = match self.select_session(sessions.media_container.metadata) {
            Some(session) => session,
            None => {
                debug!(username = %self.username, "No valid audio session found");
                return Ok(None);
            }
        };

        let player = session.player.unwrap_or_default();

        Ok(Some(NowPlayingSession {
            title: session.title,
            artist: session.grandparent_title,
            album: session.parent_title,
            state: PlayerState::from_report(&player.state),
            position_ms: session.view_offset,
            duration_ms: session.duration,
            platform: player.product,
            art_url: format!("{}{}", self.endpoint, session.thumb),
        }))
    }

    async fn fetch_artwork(&self, art_url: &str) -> Result<Vec<u8>, SessionSourceError> {
        let response = self
            .client
            .get(art_url)
            .header("X-Plex-Token", &self.token)
            .send()
            .await
            .map_err(|error| SessionSourceError::Transport(Box::new(error)))?;

        if !response.status().is_success() {
            return Err(SessionSourceError::ArtworkStatus(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| SessionSourceError::Transport(Box::new(error)))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::{platform_rank, PlexClient, SessionMetadata, SessionPlayer, SessionUser};

    fn session(title: &str, session_type: &str, user: &str, product: &str) -> SessionMetadata {
        SessionMetadata {
            title: title.into(),
            grandparent_title: "Artist".into(),
            parent_title: "Album".into(),
            session_type: session_type.into(),
            thumb: "/library/metadata/1/thumb/2".into(),
            view_offset: 1000,
            duration: 180000,
            user: Some(SessionUser { title: user.into() }),
            player: Some(SessionPlayer {
                product: product.into(),
                state: "playing".into(),
            }),
        }
    }

    fn client() -> PlexClient {
        PlexClient::create(
            "http://localhost:32400/",
            "token",
            "alice",
            vec!["Plexamp".into(), "Plex Web".into()],
        )
    }

    #[test]
    fn non_track_and_foreign_sessions_are_filtered_out() {
        let selected = client().select_session(vec![
            session("A movie", "movie", "alice", "Plex Web"),
            session("Song", "track", "bob", "Plexamp"),
        ]);

        assert!(selected.is_none());
    }

    #[test]
    fn highest_priority_platform_wins() {
        let selected = client()
            .select_session(vec![
                session("Song1", "track", "alice", "Plex Web"),
                session("Song2", "track", "alice", "Plexamp"),
            ])
            .unwrap();

        assert_eq!(selected.title, "Song2");
    }

    #[test]
    fn unknown_platforms_sort_last_keeping_original_order() {
        let selected = client()
            .select_session(vec![
                session("Song1", "track", "alice", "Sonos"),
                session("Song2", "track", "alice", "Roku"),
            ])
            .unwrap();

        assert_eq!(selected.title, "Song1");
    }

    #[test]
    fn platform_rank_is_the_priority_index() {
        let priority = vec!["Plexamp".to_string(), "Plex Web".to_string()];

        assert_eq!(platform_rank(&priority, "Plexamp"), 0);
        assert_eq!(platform_rank(&priority, "Plex Web"), 1);
        assert_eq!(platform_rank(&priority, "Sonos"), 2);
    }
}
