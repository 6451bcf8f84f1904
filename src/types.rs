use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub(crate) struct CoverId(pub(crate) String);

impl CoverId {
    // Collisions are accepted as negligible for the configured lengths.
    pub(crate) fn random(length: usize) -> Self {
        let hex = uuid::Uuid::new_v4().simple().to_string();
        Self(hex[..length.min(hex.len())].to_string())
    }
}

impl std::fmt::Display for CoverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoverId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CoverId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
