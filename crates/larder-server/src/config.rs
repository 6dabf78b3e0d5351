use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 8787;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Prefix every API route is nested under, e.g. `/functions/v1/larder`.
    /// Empty serves at the root.
    pub base_path: String,
    /// JSON file backing the key-value table. In-memory when unset.
    pub data_file: Option<PathBuf>,
    /// Bearer token required on API routes. Open when unset.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            base_path: String::new(),
            data_file: None,
            api_key: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))
    }

    pub fn validate(&self) -> ServerResult<()> {
        let base = self.base_path.trim();
        if !base.is_empty() && !base.starts_with('/') {
            return Err(ServerError::Config(format!(
                "base_path must start with '/': {base}"
            )));
        }
        if matches!(self.api_key.as_deref(), Some(k) if k.trim().is_empty()) {
            return Err(ServerError::Config("api_key must not be empty".into()));
        }
        Ok(())
    }

    /// `base_path` without trailing slashes; `""` for the root.
    pub fn normalized_base_path(&self) -> &str {
        self.base_path.trim().trim_end_matches('/')
    }
}
