//! Remote push of queue entries.

use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::entry::{SyncAction, SyncQueueEntry};
use crate::config::SyncConfig;
use crate::error::GearError;

/// Delivers one queue entry to the remote side.
#[cfg_attr(test, mockall::automock)]
pub trait SyncTransport {
    /// Push an entry.
    ///
    /// # Errors
    ///
    /// Returns an error when the entry was not accepted.
    fn push(&self, entry: &SyncQueueEntry) -> Result<(), GearError>;
}

/// Request body posted to `{endpoint}/sync`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncRequest<'a> {
    action: SyncAction,
    data: &'a serde_json::Value,
    timestamp: i64,
    retry_count: u32,
}

/// Posts entries as JSON over HTTP.
///
/// Any 2xx status counts as delivered. The response body is ignored.
pub struct HttpTransport {
    endpoint: Option<String>,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for a base URL. `None` leaves it unconfigured.
    #[must_use]
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.filter(|e| !e.trim().is_empty()),
            client: Client::new(),
        }
    }

    /// Create a transport from settings.
    #[must_use]
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// Full URL entries are posted to.
    #[must_use]
    pub fn sync_url(&self) -> Option<String> {
        self.endpoint
            .as_deref()
            .map(|base| format!("{}/sync", base.trim_end_matches('/')))
    }
}

impl SyncTransport for HttpTransport {
    fn push(&self, entry: &SyncQueueEntry) -> Result<(), GearError> {
        let Some(url) = self.sync_url() else {
            warn!("sync endpoint not configured");
            return Err(GearError::Sync("Sync endpoint not configured".to_string()));
        };

        let body = SyncRequest {
            action: entry.action,
            data: &entry.payload,
            timestamp: entry.timestamp_millis(),
            retry_count: entry.retry_count,
        };

        debug!(url = %url, id = ?entry.id, "pushing sync entry");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| GearError::Sync(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GearError::Sync(format!("{url} responded with {status}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sample_entry() -> SyncQueueEntry {
        let mut entry = SyncQueueEntry::new(
            SyncAction::Update,
            json!({"userId": "u1", "gearList": []}),
        );
        entry.id = Some(7);
        entry.retry_count = 1;
        entry
    }

    /// Push from a blocking thread; the blocking client must not run on the runtime.
    async fn push_to(base: String, entry: SyncQueueEntry) -> Result<(), GearError> {
        tokio::task::spawn_blocking(move || HttpTransport::new(Some(base)).push(&entry))
            .await
            .unwrap()
    }

    #[test]
    fn test_unconfigured_endpoint_fails() {
        let transport = HttpTransport::new(None);
        assert!(transport.sync_url().is_none());
        assert!(matches!(
            transport.push(&sample_entry()),
            Err(GearError::Sync(_))
        ));

        let blank = HttpTransport::new(Some("  ".to_string()));
        assert!(blank.sync_url().is_none());
    }

    #[test]
    fn test_sync_url_trims_trailing_slash() {
        let transport = HttpTransport::new(Some("http://localhost:9000/".to_string()));
        assert_eq!(
            transport.sync_url().as_deref(),
            Some("http://localhost:9000/sync")
        );
    }

    #[tokio::test]
    async fn test_push_posts_entry() {
        let server = MockServer::start().await;
        let entry = sample_entry();

        Mock::given(method("POST"))
            .and(path("/sync"))
            .and(body_partial_json(json!({
                "action": "update",
                "data": {"userId": "u1"},
                "retryCount": 1
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        push_to(server.uri(), entry.clone()).await.unwrap();

        let request = &server.received_requests().await.unwrap()[0];
        let body: serde_json::Value = request.body_json().unwrap();
        assert_eq!(body["timestamp"], entry.timestamp_millis());
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/sync"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let result = push_to(server.uri(), sample_entry()).await;

        assert!(matches!(result, Err(GearError::Sync(msg)) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_other_paths_are_not_used() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sync"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        push_to(format!("{}/api/", server.uri()), sample_entry())
            .await
            .unwrap();

        // An unmatched request gets wiremock's 404 and counts as a failure
        let result = push_to(server.uri(), sample_entry()).await;
        assert!(matches!(result, Err(GearError::Sync(_))));
    }
}
