mod tracker;
mod traits;
mod types;

pub(crate) use tracker::*;
pub(crate) use traits::*;
pub(crate) use types::*;
