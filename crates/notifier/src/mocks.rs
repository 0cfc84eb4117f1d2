//! In-memory webhook transport for tests.
//!
//! Enabled with the `test-support` feature:
//!
//! ```toml
//! [dev-dependencies]
//! herald-notifier = { workspace = true, features = ["test-support"] }
//! ```

use std::sync::{Arc, Mutex};

use reqwest::Url;

use herald_common::error::NotifyError;

use crate::webhook::{WebhookResponse, WebhookTransport};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

/// Records every POST and answers with a fixed response (204 by default).
#[derive(Debug, Clone)]
pub struct MockTransport {
    response: WebhookResponse,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::responding(204, "No Content", "")
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responding(status: u16, status_text: &str, body: &str) -> Self {
        Self {
            response: WebhookResponse {
                status,
                status_text: status_text.to_string(),
                body: body.to_string(),
            },
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl WebhookTransport for MockTransport {
    async fn post_json(&self, url: &Url, body: String) -> Result<WebhookResponse, NotifyError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body,
        });
        Ok(self.response.clone())
    }
}
