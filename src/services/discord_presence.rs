use crate::services::presence::{PresenceClient, PresenceClientError, PresenceUpdate};
use async_trait::async_trait;
use discord_rich_presence::activity::{Activity, Assets, Timestamps};
use discord_rich_presence::{DiscordIpc, DiscordIpcClient};
use std::sync::Mutex;
use tracing::debug;

// The underlying IPC client is synchronous; calls are short writes to a
// local socket guarded by a mutex.
pub(crate) struct DiscordPresenceClient {
    client: Mutex<DiscordIpcClient>,
}

impl DiscordPresenceClient {
    pub(crate) fn connect(client_id: &str) -> Result<Self, PresenceClientError> {
        let mut client = DiscordIpcClient::new(client_id)
            .map_err(|error| PresenceClientError::Transport(error.to_string()))?;

        client
            .connect()
            .map_err(|error| PresenceClientError::Transport(error.to_string()))?;

        debug!("Connected to Discord");

        Ok(Self {
            client: Mutex::new(client),
        })
    }
}

#[async_trait]
impl PresenceClient for DiscordPresenceClient {
    async fn update(&self, update: &PresenceUpdate) -> Result<(), PresenceClientError> {
        let activity = Activity::new()
            .details(&update.details)
            .state(&update.state)
            .assets(
                Assets::new()
                    .large_image(&update.large_image)
                    .large_text(&update.large_text)
                    .small_image(&update.small_image)
                    .small_text(&update.small_text),
            )
            .timestamps(Timestamps::new().end(update.end_timestamp));

        let mut client = self.client.lock().unwrap();

        client
            .set_activity(activity)
            .map_err(|error| PresenceClientError::Transport(error.to_string()))
    }

    async fn clear(&self) -> Result<(), PresenceClientError> {
        let mut client = self.client.lock().unwrap();

        client
            .clear_activity()
            .map_err(|error| PresenceClientError::Transport(error.to_string()))
    }
}
