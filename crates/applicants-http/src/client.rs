//! JSON-over-HTTP client for the applicants REST API.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use applicants_core::error::{Error, RejectedError, TransportError};
use applicants_core::{ApplicantId, Result, StoreUrl};

/// Error body sent by the server: either `{"error", "message"}` or a bare string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Structured {
        error: Option<String>,
        message: Option<String>,
    },
    Text(String),
}

fn transport(err: reqwest::Error) -> Error {
    if err.is_decode() {
        return Error::malformed(err.to_string());
    }

    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::StoreUnavailable(transport)
}

/// HTTP client bound to one store base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base: StoreUrl,
}

impl RestClient {
    /// Create a client for `base`, with an optional per-request timeout.
    pub fn new(base: StoreUrl, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("applicants/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport)?;

        Ok(Self { client, base })
    }

    /// Returns the base URL this client talks to.
    pub fn base(&self) -> &StoreUrl {
        &self.base
    }

    /// GET a JSON document.
    ///
    /// `target` is the record a 404 should be reported against, if any.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<R>(&self, url: &str, target: Option<ApplicantId>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(transport)?;
        self.handle_response(response, target).await
    }

    /// GET a document that may legitimately be empty or `null`.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get_optional<R>(&self, url: &str) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        debug!(%url, "GET (optional)");
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(self.parse_error_response(response, None).await);
        }

        let body = response.text().await.map_err(transport)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a JSON body with `method` and decode the JSON response.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn send<B, R>(
        &self,
        method: Method,
        url: &str,
        body: &B,
        target: Option<ApplicantId>,
    ) -> Result<R>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        debug!(%method, %url, "request with body");
        trace!(?body, "request body");

        let response = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response, target).await
    }

    /// DELETE a resource and decode the JSON response.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete<R>(&self, url: &str, target: Option<ApplicantId>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(%url, "DELETE");
        let response = self.client.delete(url).send().await.map_err(transport)?;
        self.handle_response(response, target).await
    }

    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        target: Option<ApplicantId>,
    ) -> Result<R> {
        let status = response.status();
        trace!(%status, "response");

        if status.is_success() {
            let body = response.bytes().await.map_err(transport)?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            Err(self.parse_error_response(response, target).await)
        }
    }

    async fn parse_error_response(
        &self,
        response: reqwest::Response,
        target: Option<ApplicantId>,
    ) -> Error {
        let status = response.status();

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, target) {
            return Error::not_found(id);
        }

        let rejected = match response.json::<ErrorBody>().await {
            Ok(ErrorBody::Structured { error, message }) => {
                RejectedError::new(status.as_u16(), error, message)
            }
            Ok(ErrorBody::Text(message)) => {
                RejectedError::new(status.as_u16(), None, Some(message))
            }
            Err(_) => RejectedError::new(status.as_u16(), None, None),
        };
        Error::StoreRejected(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = StoreUrl::new("http://localhost:8000").unwrap();
        let client = RestClient::new(base.clone(), Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.base(), &base);
    }

    #[test]
    fn error_body_accepts_both_shapes() {
        let structured: ErrorBody =
            serde_json::from_str(r#"{"error":"NotFound","message":"gone"}"#).unwrap();
        assert!(matches!(
            structured,
            ErrorBody::Structured { error: Some(_), message: Some(_) }
        ));

        let text: ErrorBody = serde_json::from_str(r#""Applicant not found""#).unwrap();
        assert!(matches!(text, ErrorBody::Text(ref m) if m == "Applicant not found"));
    }
}
