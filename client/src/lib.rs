//! HTTP client for the contact submission endpoint.
//!
//! # Wire contract
//!
//! A single `POST` to the configured endpoint with `Content-Type: application/json`
//! and the serialized [`FormState`] as body. The response body is never read:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | [`SubmitOutcome::Accepted`] | 2xx status |
//! | [`SubmitOutcome::Rejected`] | any other status |
//! | [`SubmitError`] | the request did not complete (connect, timeout, IO) |
//!
//! There are no retries. Redirects are followed like a browser `fetch` would.

use std::error::Error as _;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;
use url::Url;

pub use reel_types::FormState;

/// Canonical contact submission endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://vernanbackend.ezlab.in/api/contact-us/";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const TCP_KEEPALIVE_SECS: u64 = 60;
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unsupported endpoint scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Transport-level failure: the endpoint never produced a response.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("{}", describe(.0))]
    Transport(#[source] reqwest::Error),
}

impl SubmitError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Transport(err)
        }
    }

    /// Human-readable failure description, if one is available.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        let reason = self.to_string();
        if reason.trim().is_empty() {
            None
        } else {
            Some(reason)
        }
    }
}

/// Render a reqwest error with its innermost cause, e.g.
/// `error sending request for url (...): Connection refused (os error 111)`.
fn describe(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    let mut root = None;
    while let Some(cause) = source {
        root = Some(cause);
        source = cause.source();
    }
    if let Some(root) = root {
        let root = root.to_string();
        if !root.is_empty() && !text.contains(&root) {
            text.push_str(": ");
            text.push_str(&root);
        }
    }
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(StatusCode),
    Rejected(StatusCode),
}

impl SubmitOutcome {
    fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            Self::Accepted(status)
        } else {
            Self::Rejected(status)
        }
    }

    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::Accepted(status) | Self::Rejected(status) => status,
        }
    }

    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ContactClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ClientError> {
        match endpoint.scheme() {
            "http" | "https" => {}
            other => return Err(ClientError::UnsupportedScheme(other.to_string())),
        }
        let http = client_builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { http, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post `form` to the endpoint. Non-2xx statuses are an `Ok` outcome;
    /// only transport failures are errors.
    pub async fn submit(&self, form: &FormState) -> Result<SubmitOutcome, SubmitError> {
        tracing::info!(endpoint = %self.endpoint, "Submitting contact form");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await
            .map_err(|err| {
                let err = SubmitError::from_reqwest(err);
                tracing::warn!(error = %err, "Contact submission failed in transport");
                err
            })?;

        let outcome = SubmitOutcome::from_status(response.status());
        match outcome {
            SubmitOutcome::Accepted(status) => {
                tracing::info!(status = status.as_u16(), "Contact submission accepted");
            }
            SubmitOutcome::Rejected(status) => {
                tracing::warn!(status = status.as_u16(), "Contact submission rejected");
            }
        }
        Ok(outcome)
    }
}

fn client_builder() -> reqwest::ClientBuilder {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("reel/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .default_headers(default_headers)
}
