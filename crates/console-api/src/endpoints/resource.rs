//! CRUD shape shared by the system management endpoints

use console_shared::EntityId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::response::Page;

/// `{base}/list`, `{base}/{id}`, `POST {base}`, `PUT {base}`,
/// `DELETE {base}/{ids}`
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    client: &'a ApiClient,
    base: &'static str,
}

impl<'a> Resource<'a> {
    pub fn new(client: &'a ApiClient, base: &'static str) -> Self {
        Self { client, base }
    }

    pub fn client(&self) -> &'a ApiClient {
        self.client
    }

    pub fn path(&self, suffix: &str) -> String {
        format!("{}/{}", self.base, suffix.trim_start_matches('/'))
    }

    pub async fn list<Q, T>(&self, query: &Q) -> Result<Page<T>, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.client.get_page(&self.path("list"), query).await
    }

    pub async fn get<T: DeserializeOwned>(&self, id: EntityId) -> Result<T, ApiError> {
        self.client.get(&self.path(&id.to_string())).await
    }

    /// Validates `form` locally before anything is sent.
    pub async fn add<F>(&self, form: &F) -> Result<(), ApiError>
    where
        F: Serialize + Validate,
    {
        form.validate()?;
        self.client.post(self.base, form).await
    }

    pub async fn update<F>(&self, form: &F) -> Result<(), ApiError>
    where
        F: Serialize + Validate,
    {
        form.validate()?;
        self.client.put(self.base, form).await
    }

    pub async fn delete(&self, ids: &[EntityId]) -> Result<(), ApiError> {
        let segment = ids_segment(ids).ok_or(ApiError::EmptyIds(self.base))?;
        debug!(resource = self.base, ids = %segment, "deleting");
        self.client.delete(&self.path(&segment)).await
    }
}

/// `1,2,3` path segment for batch endpoints; `None` when `ids` is empty.
pub fn ids_segment(ids: &[EntityId]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(","))
}
