//! HTTP client for the alert server.
//!
//! One method per API endpoint, returning wire types. The internal helpers
//! map any non-2xx response to [`ApiError::Status`], extracting the
//! `{detail}` body the server uses for structured errors.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::error::ApiError;
use super::wire::{ErrorDetail, NewAlert, Side, StateSnapshot, TokenAlert, TokenInfo};

/// Client for the alert server's JSON API.
///
/// Requests carry no explicit timeout and are never retried; slow or dead
/// servers are bounded by the transport's own defaults and surface as a
/// single [`ApiError`] per call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Fetch the full settings/history snapshot.
    pub async fn state(&self) -> Result<StateSnapshot, ApiError> {
        self.get(&self.url("/api/state")).await
    }

    /// Fetch the token alert list.
    pub async fn alerts(&self) -> Result<Vec<TokenAlert>, ApiError> {
        self.get(&self.url("/api/alerts")).await
    }

    /// Look up ticker and quote pairs for a contract address.
    pub async fn token_info(&self, contract: &str) -> Result<TokenInfo, ApiError> {
        let url = format!("{}?contract={}", self.url("/api/token-info"), contract);
        self.get(&url).await
    }

    /// Create a token alert. The server rejects duplicates with a 400.
    pub async fn create_alert(&self, alert: &NewAlert) -> Result<(), ApiError> {
        self.post(&self.url("/api/alerts"), alert).await
    }

    /// Delete a token alert by id.
    pub async fn delete_alert(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.url("/api/alerts"), id);
        let resp = self.client.delete(&url).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Set the simulated USD amount. The server clears its price history
    /// as a side effect, so callers should drop theirs too.
    pub async fn set_usd_amount(&self, value: f64) -> Result<(), ApiError> {
        self.post(&self.url("/api/usd"), &json!({ "value": value })).await
    }

    /// Set the cooldown applied after a trigger fires.
    pub async fn set_reset_minutes(&self, minutes: i64) -> Result<(), ApiError> {
        self.post(&self.url("/api/reset-minutes"), &json!({ "minutes": minutes }))
            .await
    }

    /// Add a trigger price on one side.
    pub async fn add_trigger(&self, side: Side, price: f64) -> Result<(), ApiError> {
        self.post(&self.side_url(side), &json!({ "values": [price] })).await
    }

    /// Remove a trigger price from one side.
    pub async fn remove_trigger(&self, side: Side, price: f64) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(&self.side_url(side))
            .json(&json!({ "value": price }))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Clear the cooldown of one trigger so it can fire again.
    pub async fn reset_trigger(&self, side: Side, price: f64) -> Result<(), ApiError> {
        self.post(
            &self.url("/api/reset-alert"),
            &json!({ "side": side, "price": price }),
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn side_url(&self, side: Side) -> String {
        format!("{}/api/{}", self.base_url, side.as_str())
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.client.get(url).send().await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json::<T>().await?)
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<(), ApiError> {
        let resp = self.client.post(url).json(body).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    /// Pass a successful response through, or turn it into a status error
    /// with the server's detail extracted.
    async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorDetail>(&body).ok().map(|e| e.detail);
        Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.url("/api/state"), "http://127.0.0.1:8000/api/state");
    }

    #[test]
    fn test_side_urls() {
        let client = ApiClient::new("http://127.0.0.1:8000");
        assert_eq!(client.side_url(Side::Buy), "http://127.0.0.1:8000/api/buy");
        assert_eq!(client.side_url(Side::Sell), "http://127.0.0.1:8000/api/sell");
    }
}
