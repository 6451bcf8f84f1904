#[derive(Eq, PartialEq, Clone, Debug)]
pub(crate) struct PresenceUpdate {
    pub(crate) details: String,
    pub(crate) state: String,
    pub(crate) large_image: String,
    pub(crate) large_text: String,
    pub(crate) small_image: String,
    pub(crate) small_text: String,
    // Unix timestamp at which the track ends; drives the remote countdown.
    pub(crate) end_timestamp: i64,
}
