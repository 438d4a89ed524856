use serde::{Deserialize, Serialize};

use crate::domain::{SortKey, SortOrder};

/// Server-side narrowing accepted by `GET /api/pitchers`.
///
/// Every field is optional; an empty query asks for the backend defaults
/// (all pitchers, highest fatigue first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_fatigue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fatigue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl RosterQuery {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body of a successful `POST /api/upload`. No field is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}
