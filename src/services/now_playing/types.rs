use crate::types::CoverId;

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
    Other,
}

impl PlayerState {
    pub(crate) fn from_report(value: &str) -> Self {
        match value {
            "playing" => PlayerState::Playing,
            "paused" => PlayerState::Paused,
            "stopped" => PlayerState::Stopped,
            _ => PlayerState::Other,
        }
    }
}

// `art_url` is an addressable locator for the artwork, not the bytes.
#[derive(Eq, PartialEq, Clone, Debug)]
pub(crate) struct NowPlayingSession {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) state: PlayerState,
    pub(crate) position_ms: u64,
    pub(crate) duration_ms: u64,
    pub(crate) platform: String,
    pub(crate) art_url: String,
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub(crate) struct PlaybackSnapshot {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) cover_id: CoverId,
    pub(crate) state: PlayerState,
    pub(crate) position_ms: u64,
    pub(crate) duration_ms: u64,
    pub(crate) platform: String,
}
