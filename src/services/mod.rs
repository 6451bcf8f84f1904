mod cover_art;
pub(crate) use cover_art::*;

mod cover_cache;
pub(crate) use cover_cache::*;

mod cover_id_store;
pub(crate) use cover_id_store::*;

mod discord_presence;
pub(crate) use discord_presence::*;

mod plex_client;
pub(crate) use plex_client::*;

pub(crate) mod now_playing;
pub(crate) mod presence;
