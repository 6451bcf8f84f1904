mod covers;

pub(crate) use covers::{album_cover, latest_album_cover};
