use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use larder_types::{
    DeleteResponse, HealthResponse, LeftoverFood, LeftoverPatch, NewLeftover, RecordId,
};

use crate::config::ClientConfig;
use crate::error::{ClientResult, RequestError};

/// Thin wrapper over the Larder HTTP API.
///
/// Every request carries the configured bearer token and
/// `Content-Type: application/json`. Non-2xx responses become
/// [`RequestError::Status`] with the raw body attached.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| RequestError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::InvalidUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| RequestError::InvalidHeader(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RequestError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request<T, B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(%method, %url, status = status.as_u16(), body = %text, "API error");
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|e| RequestError::Decode {
            status: status.as_u16(),
            body: text,
            reason: e.to_string(),
        })
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.request::<_, ()>(Method::GET, &["health"], None).await
    }

    /// Load every leftover, or an empty list if the request fails for any
    /// reason. Used for the initial load of the view.
    pub async fn get_leftover_foods(&self) -> Vec<LeftoverFood> {
        match self.try_get_leftover_foods().await {
            Ok(foods) => foods,
            Err(e) => {
                tracing::error!(error = %e, "error fetching leftover foods");
                Vec::new()
            }
        }
    }

    /// Load every leftover, propagating failures.
    pub async fn try_get_leftover_foods(&self) -> ClientResult<Vec<LeftoverFood>> {
        self.request::<_, ()>(Method::GET, &["leftovers"], None).await
    }

    pub async fn create_leftover_food(&self, food: &NewLeftover) -> ClientResult<LeftoverFood> {
        self.request(Method::POST, &["leftovers"], Some(food)).await
    }

    pub async fn update_leftover_food(
        &self,
        id: &RecordId,
        updates: &LeftoverPatch,
    ) -> ClientResult<LeftoverFood> {
        self.request(Method::PUT, &["leftovers", id.as_str()], Some(updates))
            .await
    }

    pub async fn delete_leftover_food(&self, id: &RecordId) -> ClientResult<()> {
        let _: DeleteResponse = self
            .request::<_, ()>(Method::DELETE, &["leftovers", id.as_str()], None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ClientConfig::new(base, "anon-key")).unwrap()
    }

    #[test]
    fn endpoint_joins_segments() {
        let c = client("http://127.0.0.1:8787");
        assert_eq!(
            c.endpoint(&["leftovers"]).unwrap().as_str(),
            "http://127.0.0.1:8787/leftovers"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let c = client("https://x.supabase.co/functions/v1/larder/");
        assert_eq!(
            c.endpoint(&["leftovers", "abc"]).unwrap().as_str(),
            "https://x.supabase.co/functions/v1/larder/leftovers/abc"
        );
    }

    #[test]
    fn endpoint_escapes_ids() {
        let c = client("http://h");
        assert_eq!(
            c.endpoint(&["leftovers", "a/b c"]).unwrap().as_str(),
            "http://h/leftovers/a%2Fb%20c"
        );
    }

    #[test]
    fn invalid_base_url() {
        let err = ApiClient::new(ClientConfig::new("not a url", "k")).unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
        let err = ApiClient::new(ClientConfig::new("mailto:someone@example.com", "k")).unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[test]
    fn invalid_key_header() {
        let err = ApiClient::new(ClientConfig::new("http://h", "bad\nkey")).unwrap_err();
        assert!(matches!(err, RequestError::InvalidHeader(_)));
    }
}
