use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use snapprune_library::{Snapshot, VERSION, Volume};
use tracing::{debug, warn};

use crate::library::{
    api::{ApiError, StorageApi},
    config::{Credentials, Settings},
    constant::{AUTH_FAILURE, HTTP_ERROR, INVALID_ENDPOINT, REQUEST_FAILED},
    error::PruneError,
};

/// [`StorageApi`] over the provider's JSON HTTP interface.
///
/// Requests carry the credentials as basic auth. There is no timeout, a
/// stalled call stalls the run.
pub struct HttpStorageApi {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl HttpStorageApi {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let credentials = settings.credentials.clone().ok_or_else(|| {
            ApiError::new(
                AUTH_FAILURE,
                "Access key id and secret access key must both be set",
            )
        })?;

        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|e| ApiError::new(INVALID_ENDPOINT, format!("{}: {}", settings.endpoint, e)))?;

        if endpoint.cannot_be_a_base() {
            return Err(ApiError::new(
                INVALID_ENDPOINT,
                format!("{} cannot carry a path", settings.endpoint),
            ));
        }

        let client = Client::builder()
            .user_agent(format!("snapprune/{}", *VERSION))
            .build()
            .map_err(|e| ApiError::new(REQUEST_FAILED, e.to_string()))?;

        Ok(HttpStorageApi {
            client,
            endpoint,
            credentials,
        })
    }

    /// Appends `segments` to the endpoint path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();

        // Checked in `new`, the endpoint is always a base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .basic_auth(
                &self.credentials.access_key_id,
                Some(&self.credentials.secret_access_key),
            )
            .send()
            .await
            .map_err(|e| ApiError::new(REQUEST_FAILED, e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .inspect_err(|e| warn!(%status, error = %e, "Failed to read error response body"))
            .unwrap_or_default();
        let error = decode_error(status, &body);

        warn!(%status, %error, "Storage API request failed");

        Err(error)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, PruneError> {
        let url = self.url(segments);
        debug!(%url, "GET");

        let body = self
            .send(self.client.get(url.clone()))
            .await?
            .bytes()
            .await
            .map_err(|e| ApiError::new(REQUEST_FAILED, e.to_string()))?;

        decode_body(url.as_str(), &body)
    }
}

/// Reads a successful response body. A body that arrived but doesn't match
/// the expected shape is unexpected data, not a provider failure.
pub fn decode_body<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, PruneError> {
    let value = serde_json::from_slice(body)
        .with_context(|| format!("Failed to parse response from {}", url))?;

    Ok(value)
}

/// Turns an error response into an [`ApiError`], falling back to the raw
/// status and body when the provider's error document can't be read.
pub fn decode_error(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ApiError>(body) {
        Ok(error) if !error.errors.is_empty() => error,
        _ => ApiError::new(HTTP_ERROR, format!("{}: {}", status, body.trim())),
    }
}

#[async_trait]
impl StorageApi for HttpStorageApi {
    async fn list_volumes(&self) -> Result<Vec<Volume>, PruneError> {
        self.get(&["volumes"]).await
    }

    async fn list_snapshots(&self) -> Result<Vec<Snapshot>, PruneError> {
        self.get(&["snapshots"]).await
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<(), PruneError> {
        let url = self.url(&["snapshots", snapshot_id]);
        debug!(%url, "DELETE");

        self.send(self.client.delete(url)).await?;

        Ok(())
    }
}
