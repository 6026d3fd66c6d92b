use std::future::Future;

use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl Submission {
    /// `application/x-www-form-urlencoded` body.
    pub fn encoded_body(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub errors: Option<Vec<ServerError>>,
}

#[derive(Debug, Deserialize)]
pub struct ServerError {
    #[serde(default)]
    pub message: Option<String>,
}

/// What a non-2xx response body tells the guest.
#[derive(Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Server messages joined with ", ".
    Detailed(String),
    /// JSON without usable messages.
    Generic,
    /// Not the JSON error shape at all.
    Unreadable(String),
}

pub fn read_rejection(body: &str) -> Rejection {
    let parsed: ErrorBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return Rejection::Unreadable(e.to_string()),
    };
    let Some(errors) = parsed.errors else {
        return Rejection::Generic;
    };
    let joined = errors
        .into_iter()
        .map(|error| error.message.unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        Rejection::Generic
    } else {
        Rejection::Detailed(joined)
    }
}

/// Builds the response, reading the body only when the status is not 2xx.
async fn settle<F, Fut>(status: u16, read_body: F) -> Result<SubmitResponse, TransportError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, TransportError>>,
{
    let mut response = SubmitResponse { status, body: String::new() };
    if !response.ok() {
        response.body = read_body().await?;
    }
    Ok(response)
}

pub trait Transport {
    fn send(&self, submission: Submission) -> LocalBoxFuture<'_, Result<SubmitResponse, TransportError>>;
}

/// Posts through the browser's fetch.
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn send(&self, submission: Submission) -> LocalBoxFuture<'_, Result<SubmitResponse, TransportError>> {
        Box::pin(async move {
            let response = Request::post(&submission.action)
                .header("Accept", "application/json")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(submission.encoded_body())
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            settle(response.status(), || async move {
                response.text().await.map_err(|e| TransportError::Body(e.to_string()))
            })
            .await
        })
    }
}
