//! HTTP client for the Larder API.
//!
//! [`ApiClient`] wraps the four leftover endpoints; [`RemoteLeftoverStore`]
//! adapts it to the [`ListStore`](larder_list::ListStore) contract so the
//! leftover view can be driven through a [`ListView`](larder_list::ListView)
//! like the local lists.
//!
//! The initial list fetch fails open to an empty list. Create, update and
//! delete return [`RequestError`] for callers to surface.

pub mod client;
pub mod config;
pub mod error;
pub mod remote;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientResult, RequestError};
pub use remote::{LeftoverView, RemoteLeftoverStore};

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use larder_list::ListStore;
    use larder_server::{LarderServer, ServerConfig};
    use larder_store::{InMemoryKvStore, KvStore};
    use larder_types::{LeftoverPatch, NewLeftover, RecordId};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    struct TestServer {
        addr: SocketAddr,
        kv: Arc<InMemoryKvStore>,
        _shutdown: oneshot::Sender<()>,
    }

    impl TestServer {
        async fn start(config: ServerConfig) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let kv = Arc::new(InMemoryKvStore::new());
            let server = LarderServer::with_store(config, kv.clone() as Arc<dyn KvStore>);
            let (tx, rx) = oneshot::channel::<()>();
            tokio::spawn(server.serve_with_shutdown(listener, async {
                let _ = rx.await;
            }));
            Self {
                addr,
                kv,
                _shutdown: tx,
            }
        }

        fn client(&self, base_path: &str, key: &str) -> ApiClient {
            let url = format!("http://{}{}", self.addr, base_path);
            ApiClient::new(ClientConfig::new(url, key).with_timeout(Duration::from_secs(5))).unwrap()
        }
    }

    /// An address nothing is listening on.
    async fn dead_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    #[tokio::test]
    async fn full_crud_round_trip() {
        let server = TestServer::start(ServerConfig::default()).await;
        let client = server.client("", "anon-key");

        assert_eq!(client.health().await.unwrap().status, "ok");
        assert!(client.get_leftover_foods().await.is_empty());

        let milk = client
            .create_leftover_food(&NewLeftover::new("Milk").with_level(50).with_description("half gallon"))
            .await
            .unwrap();
        assert_eq!(milk.fields.name, "Milk");
        assert_eq!(milk.created_at, milk.updated_at);

        let listed = client.get_leftover_foods().await;
        assert_eq!(listed, vec![milk.clone()]);

        let updated = client
            .update_leftover_food(&milk.id, &LeftoverPatch::level(10))
            .await
            .unwrap();
        assert_eq!(updated.fields.level, 10);
        assert_eq!(updated.fields.description, "half gallon");

        client.delete_leftover_food(&milk.id).await.unwrap();
        client.delete_leftover_food(&milk.id).await.unwrap();
        assert!(server.kv.is_empty());
    }

    #[tokio::test]
    async fn update_unknown_id_surfaces_404() {
        let server = TestServer::start(ServerConfig::default()).await;
        let client = server.client("", "anon-key");
        let err = client
            .update_leftover_food(&RecordId::from("unknown-id"), &LeftoverPatch::level(10))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.body().unwrap().contains("unknown-id"));
    }

    #[tokio::test]
    async fn create_without_name_surfaces_400() {
        let server = TestServer::start(ServerConfig::default()).await;
        let client = server.client("", "anon-key");
        let err = client
            .create_leftover_food(&NewLeftover::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(server.kv.is_empty());
    }

    #[tokio::test]
    async fn bearer_token_is_sent_on_every_request() {
        let server = TestServer::start(ServerConfig {
            api_key: Some("anon-key".into()),
            ..Default::default()
        })
        .await;

        let good = server.client("", "anon-key");
        let rec = good.create_leftover_food(&NewLeftover::new("Rice")).await.unwrap();
        good.delete_leftover_food(&rec.id).await.unwrap();

        let bad = server.client("", "wrong-key");
        let err = bad.create_leftover_food(&NewLeftover::new("Rice")).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        // The initial fetch fails open even when unauthorized.
        assert!(bad.get_leftover_foods().await.is_empty());
        assert!(bad.try_get_leftover_foods().await.is_err());
    }

    #[tokio::test]
    async fn base_path_is_honoured() {
        let server = TestServer::start(ServerConfig {
            base_path: "/functions/v1/larder".into(),
            ..Default::default()
        })
        .await;
        let client = server.client("/functions/v1/larder", "anon-key");
        client.create_leftover_food(&NewLeftover::new("Soup")).await.unwrap();
        assert_eq!(client.get_leftover_foods().await.len(), 1);
    }

    #[tokio::test]
    async fn dead_server_fails_open_on_list_only() {
        let addr = dead_addr().await;
        let client = ApiClient::new(ClientConfig::new(format!("http://{addr}"), "k")).unwrap();

        assert!(client.get_leftover_foods().await.is_empty());

        let err = client.create_leftover_food(&NewLeftover::new("Milk")).await.unwrap_err();
        assert!(matches!(err, RequestError::Transport(_)));
        assert_eq!(err.status(), None);

        let id = RecordId::from("x");
        assert!(client.update_leftover_food(&id, &LeftoverPatch::level(1)).await.is_err());
        assert!(client.delete_leftover_food(&id).await.is_err());
    }

    #[tokio::test]
    async fn remote_store_satisfies_list_contract() {
        let server = TestServer::start(ServerConfig::default()).await;
        let store = RemoteLeftoverStore::new(server.client("", "anon-key"));

        let a = store.add(NewLeftover::new("Milk")).await.unwrap();
        let b = store.add(NewLeftover::new("Kimchi").with_level(20)).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.contains(&a) && listed.contains(&b));

        let same = store
            .update(&a.id, LeftoverPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(same.fields, a.fields);
        assert!(same.updated_at >= a.updated_at);

        let missing = store.update(&RecordId::from("nope"), LeftoverPatch::level(3)).await;
        assert!(missing.unwrap_err().is_not_found());
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn leftover_view_rolls_back_failed_level_change() {
        let server = TestServer::start(ServerConfig::default()).await;
        let mut view = RemoteLeftoverStore::new(server.client("", "anon-key")).into_view();
        view.refresh().await.unwrap();

        let rec = view.add(NewLeftover::new("Soup").with_level(40)).await.unwrap();
        assert_eq!(view.items().len(), 1);

        // Someone else deletes it; our optimistic update must be undone.
        server.kv.del(&rec.storage_key()).unwrap();
        let err = view.update(&rec.id, LeftoverPatch::level(5)).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(view.items().is_empty());
    }
}
