use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where and how the client reaches the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL including any path prefix, e.g.
    /// `https://example.supabase.co/functions/v1/larder`.
    pub base_url: String,
    /// Public key sent as `Authorization: Bearer <anon_key>` on every request.
    pub anon_key: String,
    /// Per-request timeout. No timeout when unset.
    #[serde(default)]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8787".into(),
            anon_key: "anon".into(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let c = ClientConfig::default();
        assert_eq!(c.base_url, "http://127.0.0.1:8787");
        assert!(c.timeout.is_none());
    }

    #[test]
    fn builder() {
        let c = ClientConfig::new("http://h/api", "k").with_timeout(Duration::from_secs(5));
        assert_eq!(c.anon_key, "k");
        assert_eq!(c.timeout, Some(Duration::from_secs(5)));
    }
}
