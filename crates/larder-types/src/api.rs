//! JSON bodies and paths shared by the Larder server and client.

use serde::{Deserialize, Serialize};

/// HTTP endpoint paths, relative to the configured base path.
pub mod endpoints {
    pub const LEFTOVERS: &str = "/leftovers";
    pub const LEFTOVER: &str = "/leftovers/:id";
    pub const HEALTH: &str = "/health";

    /// Concrete path of one leftover record.
    pub fn leftover(id: &str) -> String {
        format!("{LEFTOVERS}/{id}")
    }
}

/// Health check response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

/// Body of every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body returned by `DELETE /leftovers/:id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub const OK: Self = Self { success: true };
}
