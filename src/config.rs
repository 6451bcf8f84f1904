use serde::Deserialize;

fn default_bind_address() -> String {
    "0.0.0.0:8081".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_cover_size() -> u32 {
    512
}

fn default_cover_id_length() -> usize {
    6
}

fn default_poll_interval() -> u64 {
    1
}

fn default_language() -> String {
    "en".to_string()
}

fn default_cover_id_file() -> String {
    "album_cover_ids.json".to_string()
}

fn default_platform_priority() -> Vec<String> {
    vec!["Plexamp".to_string(), "Plex Web".to_string()]
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    pub(crate) plex_url: String,
    pub(crate) plex_token: String,
    pub(crate) plex_username: String,
    pub(crate) discord_client_id: String,
    // e.g. http://192.168.1.10:8081/album_cover
    pub(crate) public_cover_url: String,
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    #[serde(default = "default_cover_size")]
    pub(crate) cover_size: u32,
    #[serde(default = "default_cover_id_length")]
    pub(crate) cover_id_length: usize,
    #[serde(default = "default_poll_interval")]
    pub(crate) poll_interval: u64,
    #[serde(default = "default_language")]
    pub(crate) language: String,
    #[serde(default = "default_cover_id_file")]
    pub(crate) cover_id_file: String,
    #[serde(default = "default_platform_priority")]
    pub(crate) platform_priority: Vec<String>,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }
}
