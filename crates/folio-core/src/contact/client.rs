//! HTTP delivery of contact submissions.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use super::ValidContact;
use crate::config::ContactConfig;

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// No endpoint is configured.
    NoEndpoint,
    /// The endpoint answered with a non-success status.
    Status { code: u16, body: String },
    /// The request never got a response.
    Transport(String),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactError::NoEndpoint => write!(
                f,
                "no contact endpoint configured (set [contact].endpoint or pass --endpoint)"
            ),
            ContactError::Status { code, body } if body.is_empty() => {
                write!(f, "contact endpoint returned HTTP {code}")
            }
            ContactError::Status { code, body } => {
                write!(f, "contact endpoint returned HTTP {code}: {body}")
            }
            ContactError::Transport(msg) => write!(f, "failed to reach contact endpoint: {msg}"),
        }
    }
}

impl std::error::Error for ContactError {}

/// JSON body posted to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Local submit time, e.g. `3/14/2025, 9:26:53 AM`.
    pub date: String,
}

impl Submission {
    pub fn new<Tz>(contact: &ValidContact, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            name: contact.name().to_string(),
            email: contact.email().to_string(),
            subject: contact.subject().to_string(),
            message: contact.message().to_string(),
            date: at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        }
    }
}

/// Posts submissions to a form-collection endpoint.
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ContactError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ContactError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Builds a client from config, with `endpoint` overriding the configured one.
    ///
    /// # Errors
    /// Returns `NoEndpoint` if neither names an endpoint.
    pub fn from_config(config: &ContactConfig, endpoint: Option<&str>) -> Result<Self, ContactError> {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .or_else(|| config.effective_endpoint())
            .ok_or(ContactError::NoEndpoint)?;
        Self::new(endpoint, config.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `contact` as JSON, stamped with the current local time.
    ///
    /// # Errors
    /// Returns `Status` for non-2xx responses and `Transport` when the
    /// request fails outright.
    pub async fn submit(&self, contact: &ValidContact) -> Result<(), ContactError> {
        self.send(&Submission::new(contact, &Local::now())).await
    }

    /// Posts a prepared submission.
    ///
    /// # Errors
    /// See [`ContactClient::submit`].
    pub async fn send(&self, submission: &Submission) -> Result<(), ContactError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting contact submission");
        let response = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(submission)
            .send()
            .await
            .map_err(|e| ContactError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Contact endpoint rejected submission");
            return Err(ContactError::Status {
                code: status.as_u16(),
                body: body.trim().chars().take(200).collect(),
            });
        }

        tracing::info!(endpoint = %self.endpoint, "Contact submission delivered");
        Ok(())
    }
}
