mod reconciler;
mod traits;
mod types;

pub(crate) use reconciler::*;
pub(crate) use traits::*;
pub(crate) use types::*;
