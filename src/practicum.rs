use crate::errors::{Error, Result};
use log::{debug, error};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde_json::Value;

pub struct PracticumClient {
    client: Client,
    url: String,
    token: String,
}

impl PracticumClient {
    pub fn new(url: String, token: String) -> Self {
        PracticumClient {
            client: Client::new(),
            url,
            token,
        }
    }

    /// Fetches homework statuses changed since `from_date` (unix seconds).
    pub async fn get_api_answer(&self, from_date: i64) -> Result<Value> {
        debug!("requesting homework statuses from {}", from_date);
        let response = self
            .client
            .get(&self.url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;
        let status = response.status();
        if status != StatusCode::OK {
            error!("homework endpoint {} answered {}", self.url, status);
            return Err(Error::EndpointUnavailable(status));
        }
        Ok(response.json::<Value>().await?)
    }
}
