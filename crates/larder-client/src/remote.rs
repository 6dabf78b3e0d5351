use async_trait::async_trait;

use larder_list::{ListStore, ListView};
use larder_types::{Leftover, LeftoverFood, LeftoverPatch, NewLeftover, RecordId};

use crate::client::ApiClient;
use crate::error::RequestError;

/// Leftover list backed by the HTTP API.
///
/// `list` never fails: a failed fetch yields an empty list. All other
/// operations propagate [`RequestError`]s.
#[derive(Clone, Debug)]
pub struct RemoteLeftoverStore {
    client: ApiClient,
}

/// View-state holder for the leftover-food list.
pub type LeftoverView = ListView<Leftover, RemoteLeftoverStore>;

impl RemoteLeftoverStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn into_view(self) -> LeftoverView {
        ListView::new(self)
    }
}

#[async_trait]
impl ListStore<Leftover> for RemoteLeftoverStore {
    type Error = RequestError;

    async fn list(&self) -> Result<Vec<LeftoverFood>, RequestError> {
        Ok(self.client.get_leftover_foods().await)
    }

    async fn add(&self, draft: NewLeftover) -> Result<LeftoverFood, RequestError> {
        self.client.create_leftover_food(&draft).await
    }

    async fn update(
        &self,
        id: &RecordId,
        patch: LeftoverPatch,
    ) -> Result<Option<LeftoverFood>, RequestError> {
        self.client.update_leftover_food(id, &patch).await.map(Some)
    }

    async fn remove(&self, id: &RecordId) -> Result<(), RequestError> {
        self.client.delete_leftover_food(id).await
    }
}
