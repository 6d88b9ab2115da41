use crate::domain::{RatingRecord, UserName};
use crate::error::FetchError;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Somewhere a user's contest history can be fetched from.
pub trait HistorySource {
    fn fetch_history(
        &self,
        user: &UserName,
    ) -> impl Future<Output = Result<Vec<RatingRecord>, FetchError>>;
}

/// Fetches histories from an AtCoder-compatible JSON endpoint.
#[derive(Clone, Debug)]
pub struct HistoryClient {
    http_client: Client,
    base_url: String,
}

impl HistoryClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn history_url(&self, user: &UserName) -> String {
        format!(
            "{}/users/{}/history/json",
            self.base_url.trim_end_matches('/'),
            user.as_ref()
        )
    }
}

impl HistorySource for HistoryClient {
    #[tracing::instrument(name = "Fetching rating history", skip_all, fields(user = %user))]
    async fn fetch_history(&self, user: &UserName) -> Result<Vec<RatingRecord>, FetchError> {
        let response = self.http_client.get(self.history_url(user)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let history: Vec<RatingRecord> = response.json().await?;
        tracing::debug!(entries = history.len(), "Received rating history");
        Ok(history)
    }
}
