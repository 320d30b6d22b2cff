//! Webhook dispatch
//!
//! Builds and executes the HTTP request for a fired shortcut, synchronously,
//! and classifies the outcome. No request body is sent and the response body
//! is ignored; only the status code is consulted. A failed dispatch is never
//! retried.

use tracing::debug;

use crate::registry::{HttpMethod, Shortcut};

/// Result of one dispatch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// HTTP status code received, 0 if none was available.
    pub status: u16,
    /// Human-readable transport failure, if the request never completed.
    pub transport_error: Option<String>,
}

impl DispatchOutcome {
    /// Transport succeeded and returned the given status.
    pub fn received(status: u16) -> Self {
        Self {
            status,
            transport_error: None,
        }
    }

    /// Transport failed before any status was received.
    pub fn transport_failed(error: impl Into<String>) -> Self {
        Self {
            status: 0,
            transport_error: Some(error.into()),
        }
    }

    /// Dispatch succeeded iff the transport succeeded and the status is
    /// either 200 or 0 (no status available).
    pub fn is_success(&self) -> bool {
        self.transport_error.is_none() && (self.status == 200 || self.status == 0)
    }

    /// Compose the failure into a single human-readable message.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.status != 200 && self.status != 0 {
            parts.push(format!("HTTP status {}", self.status));
        }
        if let Some(error) = &self.transport_error {
            parts.push(format!("transport error: {error}"));
        }
        if parts.is_empty() {
            "ok".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Seam between the worker loop and the HTTP transport
pub trait Dispatcher {
    fn dispatch(&self, shortcut: &Shortcut) -> DispatchOutcome;
}

/// Dispatcher backed by a shared synchronous [`ureq::Agent`]
pub struct WebhookDispatcher {
    agent: ureq::Agent,
}

impl WebhookDispatcher {
    pub fn new() -> Self {
        // Non-2xx statuses are data for classification, not transport errors.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for WebhookDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher for WebhookDispatcher {
    fn dispatch(&self, shortcut: &Shortcut) -> DispatchOutcome {
        debug!(
            method = %shortcut.method,
            url = %shortcut.url,
            "dispatching webhook"
        );

        let response = match shortcut.method {
            HttpMethod::Get | HttpMethod::Head | HttpMethod::Delete => {
                let mut request = match shortcut.method {
                    HttpMethod::Get => self.agent.get(&shortcut.url),
                    HttpMethod::Head => self.agent.head(&shortcut.url),
                    _ => self.agent.delete(&shortcut.url),
                };
                for (name, value) in &shortcut.headers {
                    request = request.header(name.as_str(), value.as_str());
                }
                request.call()
            }
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
                let mut request = match shortcut.method {
                    HttpMethod::Post => self.agent.post(&shortcut.url),
                    HttpMethod::Put => self.agent.put(&shortcut.url),
                    _ => self.agent.patch(&shortcut.url),
                };
                for (name, value) in &shortcut.headers {
                    request = request.header(name.as_str(), value.as_str());
                }
                request.send_empty()
            }
        };

        match response {
            Ok(resp) => DispatchOutcome::received(resp.status().as_u16()),
            Err(err) => DispatchOutcome::transport_failed(err.to_string()),
        }
    }
}
