use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};

/// An item as returned by the server: `id` plus arbitrary fields.
pub type Item = Map<String, Value>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct ItemClient {
    client: Client,
    base_url: String,
}

impl ItemClient {
    /// Client for the default `/api/items` layout.
    pub fn new(base_url: &str) -> Self {
        Self::with_path(base_url, "/api/items")
    }

    /// Client for a custom collection path, e.g. `/v1/widgets`.
    pub fn with_path(base_url: &str, collection_path: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}{}", base_url.trim_end_matches('/'), collection_path),
        }
    }

    /// List every stored item.
    pub async fn list(&self) -> Result<Vec<Item>, BoxError> {
        let resp = self.client.get(&self.base_url).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Fetch one item; `None` when the server answers 404.
    pub async fn get(&self, id: &str) -> Result<Option<Item>, BoxError> {
        let resp = self.client.get(self.member(id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect_success(resp).await?.json().await?))
    }

    /// Create an item and return it with its assigned id.
    pub async fn create(&self, fields: &Value) -> Result<Item, BoxError> {
        let resp = self.client.post(&self.base_url).json(fields).send().await?;
        Ok(expect_success(resp).await?.json().await?)
    }

    /// Replace an item's fields; `None` when the id is unknown.
    pub async fn update(&self, id: &str, fields: &Value) -> Result<Option<Item>, BoxError> {
        let resp = self.client.put(self.member(id)).json(fields).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect_success(resp).await?.json().await?))
    }

    /// Delete an item; `false` when the id is unknown.
    pub async fn delete(&self, id: &str) -> Result<bool, BoxError> {
        let resp = self.client.delete(self.member(id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        expect_success(resp).await?;
        Ok(true)
    }

    fn member(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

async fn expect_success(resp: Response) -> Result<Response, BoxError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await?;
    Err(format!("Server returned error status {}: {}", status, text).into())
}
