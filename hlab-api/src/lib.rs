use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

mod entity;
mod error;
mod types;

pub use entity::{
    default_script_type, Document, DocumentPayload, MediaRequest, MediaRequestPayload,
    Recommendation, Resource, Script, ScriptPayload,
};
pub use error::{ApiError, FAILED_TO_CONNECT};
pub use types::{ClusterResource, Container, ContainerAction, Node, SshTest, StorageMount, Zpool};

use entity::RecommendationList;
use types::{Ack, ZpoolList};

/// Thin client for the homelab backend. Cloning is cheap and shares the
/// underlying connection pool, so every task owns its own handle.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }

    pub async fn nodes(&self) -> Result<Vec<Node>, ApiError> {
        self.fetch(Method::GET, "/api/proxmox/nodes").await
    }

    pub async fn resources(&self) -> Result<Vec<ClusterResource>, ApiError> {
        self.fetch(Method::GET, "/api/proxmox/resources").await
    }

    pub async fn containers(&self) -> Result<Vec<Container>, ApiError> {
        self.fetch(Method::GET, "/api/docker/containers").await
    }

    pub async fn container_action(
        &self,
        id: &str,
        action: ContainerAction,
    ) -> Result<(), ApiError> {
        let path = format!("/api/docker/container/{}/{}", id, action.as_str());
        let ack: Ack = self.fetch(Method::POST, &path).await?;

        check_ack(ack).map(|_| ())
    }

    pub async fn storage_info(&self) -> Result<Vec<StorageMount>, ApiError> {
        self.fetch(Method::GET, "/api/storage/info").await
    }

    pub async fn zpools(&self) -> Result<Vec<Zpool>, ApiError> {
        let list: ZpoolList = self.fetch(Method::GET, "/api/storage/zpool/list").await?;
        if list.success {
            Ok(list.pools)
        } else {
            Err(ApiError::Rejected(list.message))
        }
    }

    pub async fn delete_zpool(&self, name: &str) -> Result<String, ApiError> {
        let path = format!("/api/storage/zpool/delete/{}", name);
        let ack: Ack = self.fetch(Method::POST, &path).await?;

        check_ack(ack).map(|ack| ack.message.unwrap_or_default())
    }

    pub async fn test_ssh(&self) -> Result<SshTest, ApiError> {
        self.fetch(Method::GET, "/api/storage/zpool/test-ssh").await
    }

    pub async fn list<E: Resource>(&self) -> Result<Vec<E>, ApiError> {
        self.fetch(Method::GET, &format!("/api/{}", E::PATH)).await
    }

    pub async fn get<E: Resource>(&self, id: u64) -> Result<E, ApiError> {
        self.fetch(Method::GET, &format!("/api/{}/{}", E::PATH, id))
            .await
    }

    /// Creates the entity and returns the id assigned by the backend.
    pub async fn create<E: Resource>(&self, payload: &E::Payload) -> Result<u64, ApiError> {
        let path = format!("/api/{}", E::PATH);
        let request = self.request(Method::POST, &path).json(payload);
        let ack: Ack = self.send(request).await?;

        check_ack(ack)?
            .id
            .ok_or(ApiError::Rejected(None))
    }

    pub async fn update<E: Resource>(&self, id: u64, payload: &E::Payload) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}", E::PATH, id);
        let request = self.request(Method::PUT, &path).json(payload);
        let ack: Ack = self.send(request).await?;

        check_ack(ack).map(|_| ())
    }

    pub async fn delete<E: Resource>(&self, id: u64) -> Result<(), ApiError> {
        let path = format!("/api/{}/{}", E::PATH, id);
        let ack: Ack = self.fetch(Method::DELETE, &path).await?;

        check_ack(ack).map(|_| ())
    }

    pub async fn recommendations(&self) -> Result<Vec<Recommendation>, ApiError> {
        let list: RecommendationList = self.fetch(Method::GET, "/api/recommendations").await?;
        match list.error {
            Some(error) => Err(ApiError::Rejected(Some(error))),
            None => Ok(list.recommendations),
        }
    }

    pub async fn recommendation(&self, id: u64) -> Result<Recommendation, ApiError> {
        let path = format!("/api/recommendations/{}", id);
        let value: serde_json::Value = self.fetch(Method::GET, &path).await?;
        if let Some(error) = value.get("error").and_then(|err| err.as_str()) {
            return Err(ApiError::Rejected(Some(error.to_owned())));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub async fn implement_recommendation(&self, id: u64) -> Result<(), ApiError> {
        let path = format!("/api/recommendations/{}/implement", id);
        let ack: Ack = self.fetch(Method::POST, &path).await?;

        check_ack(ack).map(|_| ())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ApiError> {
        self.send(self.request(method, path)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_owned();
        let body = response.text().await?;

        tracing::debug!("{} responded with {}", url, status);

        if !status.is_success() {
            return Err(error::from_status(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn check_ack(ack: Ack) -> Result<Ack, ApiError> {
    if let Some(error) = ack.error.as_ref().filter(|err| !err.is_empty()) {
        return Err(ApiError::Rejected(Some(error.to_owned())));
    }

    if ack.success == Some(false) {
        return Err(ApiError::Rejected(ack.message.filter(|msg| !msg.is_empty())));
    }

    Ok(ack)
}
