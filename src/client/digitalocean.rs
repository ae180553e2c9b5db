//! DigitalOcean API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, StatusCode};

use super::models::{Droplet, DropletsResponse};
use super::DropletApi;
use crate::error::{ApiError, Result};

/// DigitalOcean API base URL
const API_BASE_URL: &str = "https://api.digitalocean.com/v2";

/// Inventory is fetched as a single page of at most this many droplets
const PAGE_SIZE: u32 = 1000;

/// Upper bound on a single inventory request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// DigitalOcean API client
pub struct DigitalOceanClient {
    http: HttpClient,
    base_url: String,
}

impl DigitalOceanClient {
    /// Create a client against the public DigitalOcean API
    #[cfg(test)]
    pub fn new() -> Result<Self> {
        Self::with_host(None)
    }

    /// Create a client, optionally against a custom API host (e.g. a local mock server)
    pub fn with_host(api_host: Option<&str>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = match api_host {
            Some(host) => format!("{}/v2", host.trim_end_matches('/')),
            None => API_BASE_URL.to_string(),
        };

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl DropletApi for DigitalOceanClient {
    async fn list_droplets(&self, auth_token: &str) -> Result<Vec<Droplet>> {
        let url = format!("{}/droplets?page=1&per_page={}", self.base_url, PAGE_SIZE);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(auth_token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<DropletsResponse>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                log::debug!("Fetched {} droplets", data.droplets.len());
                Ok(data.droplets)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            other => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Status {
                    status: other.as_u16(),
                    body,
                }
                .into())
            }
        }
    }
}
