//! Mock DigitalOcean API client for testing
//!
//! Provides a mock implementation of [`DropletApi`] for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::DropletApi;
use super::models::Droplet;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockDropletClient::new().with_droplets(vec![DropletBuilder::new(1, "web-1").build()]);
/// let droplets = mock.list_droplets("token").await?;
/// assert_eq!(droplets.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockDropletClient {
    /// Droplets to return from list_droplets
    droplets: Arc<Mutex<Vec<Droplet>>>,
    /// When set, every call fails with a network error carrying this message
    failure: Arc<Mutex<Option<String>>>,
    /// Number of list_droplets calls
    calls: Arc<Mutex<usize>>,
    /// Tokens passed to list_droplets, in call order
    tokens: Arc<Mutex<Vec<String>>>,
}

impl MockDropletClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the droplets returned by subsequent calls
    pub fn with_droplets(self, droplets: Vec<Droplet>) -> Self {
        *self.droplets.try_lock().expect("mock not shared yet") = droplets;
        self
    }

    /// Make subsequent calls fail
    pub fn failing(self, message: &str) -> Self {
        *self.failure.try_lock().expect("mock not shared yet") = Some(message.to_string());
        self
    }

    /// Replace the droplets returned by subsequent calls
    pub async fn set_droplets(&self, droplets: Vec<Droplet>) {
        *self.droplets.lock().await = droplets;
    }

    /// Toggle failure mode
    pub async fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock().await = message.map(str::to_string);
    }

    /// Number of list_droplets calls made so far
    pub async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }

    /// Tokens received so far
    pub async fn tokens(&self) -> Vec<String> {
        self.tokens.lock().await.clone()
    }
}

#[async_trait]
impl DropletApi for MockDropletClient {
    async fn list_droplets(&self, auth_token: &str) -> Result<Vec<Droplet>> {
        *self.calls.lock().await += 1;
        self.tokens.lock().await.push(auth_token.to_string());

        if let Some(message) = self.failure.lock().await.clone() {
            return Err(ApiError::Network(message).into());
        }

        Ok(self.droplets.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::DropletBuilder;

    #[tokio::test]
    async fn test_mock_returns_droplets_and_counts_calls() {
        let mock = MockDropletClient::new().with_droplets(vec![DropletBuilder::new(1, "a").build()]);

        let droplets = mock.list_droplets("tok").await.unwrap();
        assert_eq!(droplets.len(), 1);
        assert_eq!(mock.call_count().await, 1);
        assert_eq!(mock.tokens().await, vec!["tok".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_failure_toggle() {
        let mock = MockDropletClient::new().failing("boom");
        assert!(mock.list_droplets("tok").await.is_err());

        mock.set_failure(None).await;
        assert!(mock.list_droplets("tok").await.is_ok());
    }
}
