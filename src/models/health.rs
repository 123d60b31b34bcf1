use serde::{Deserialize, Serialize};

/// GET /api/health — response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub analyzer_version: String,
    #[serde(default)]
    pub ai_enabled: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
