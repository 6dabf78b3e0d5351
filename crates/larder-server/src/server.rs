use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use larder_store::{InMemoryKvStore, JsonFileKvStore, KvStore};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Larder API server.
pub struct LarderServer {
    config: ServerConfig,
    kv: Arc<dyn KvStore>,
}

impl LarderServer {
    /// Open the table named by `config.data_file`, or an in-memory one.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let kv: Arc<dyn KvStore> = match &config.data_file {
            Some(path) => Arc::new(JsonFileKvStore::open(path)?),
            None => Arc::new(InMemoryKvStore::new()),
        };
        Ok(Self { config, kv })
    }

    /// Serve over an existing table.
    pub fn with_store(config: ServerConfig, kv: Arc<dyn KvStore>) -> Self {
        Self { config, kv }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(Arc::clone(&self.kv), self.config.api_key.clone());
        build_router(state, self.config.normalized_base_path())
    }

    /// Bind `config.bind_addr` and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve_with_shutdown(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> ServerResult<()> {
        let app = self.router();
        let addr = listener.local_addr()?;
        tracing::info!(
            %addr,
            base_path = self.config.normalized_base_path(),
            persistent = self.config.data_file.is_some(),
            auth = self.config.api_key.is_some(),
            "Larder server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
