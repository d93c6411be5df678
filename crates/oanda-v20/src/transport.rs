//! HTTP transport session for the v20 API.
//!
//! One [`Transport`] per [`Context`](crate::Context): a reqwest client
//! carrying the bearer token and datetime-format headers, the environment's
//! REST and streaming base URLs, and the status-checking logic shared by
//! every endpoint binding. Retry, backoff and rate limiting are
//! deliberately absent; failures surface to the caller at the point of the
//! failing operation.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{Error, redact_account_id};
use crate::response::Response;

/// The v20 API prefixes every endpoint path with its version.
const API_PREFIX: &str = "/v3";

/// The HTTP session owned by a [`Context`](crate::Context).
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    rest_base: String,
    stream_base: String,
    timeout: Duration,
}

impl Transport {
    /// Build the session from config.
    ///
    /// Fails with a configuration error when the token is missing or not a
    /// valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        if config.token.is_empty() {
            return Err(Error::Configuration {
                message: "API token must not be empty".to_string(),
            });
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            Error::Configuration {
                message: "API token is not a valid header value".to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            "Accept-Datetime-Format",
            HeaderValue::from_static(config.datetime_format.header_value()),
        );

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Transport {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            rest_base: config.resolved_rest_url(),
            stream_base: config.resolved_stream_url(),
            timeout: config.timeout,
        })
    }

    /// GET against the REST API.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, Error> {
        self.request(Method::GET, path, query, None::<&()>).await
    }

    /// POST against the REST API with a JSON body.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, Error> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// PUT against the REST API, with or without a JSON body.
    pub async fn put<B: Serialize>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, Error> {
        self.request(Method::PUT, path, &[], body).await
    }

    /// PATCH against the REST API with a JSON body.
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, Error> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    /// Single-shot request implementation.
    ///
    /// The v20 API answers 200 for reads and 201 for writes; anything else
    /// is an API error carrying the body's `errorMessage` when present.
    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Response, Error> {
        let url = format!("{}{API_PREFIX}{path}", self.rest_base);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .timeout(self.timeout);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::from)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(Error::from)?;

        if status == StatusCode::OK || status == StatusCode::CREATED {
            tracing::debug!(method = %method, path, status = status.as_u16(), "Request ok");
            if bytes.is_empty() {
                return Ok(Response::from_value(Value::Null));
            }
            return Response::from_slice(&bytes);
        }

        let err = api_error(&method, path, status, &bytes);
        tracing::warn!(error = %err, "API request failed");
        Err(err)
    }

    /// Open a streaming GET against the streaming host.
    ///
    /// The per-request timeout is not applied: a streaming response stays
    /// open indefinitely. The returned response body is handed to the
    /// streaming reader, which owns the connection from then on.
    pub async fn open_stream(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response, Error> {
        let url = format!("{}{API_PREFIX}{path}", self.stream_base);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(Error::from)?;
        let status = response.status();
        if status != StatusCode::OK {
            let bytes = response.bytes().await.unwrap_or_default();
            let err = api_error(&Method::GET, path, status, &bytes);
            tracing::warn!(error = %err, "Stream request failed");
            return Err(err);
        }

        tracing::debug!(path, "Stream opened");
        Ok(response)
    }
}

/// Build an API error from a non-success response body.
fn api_error(method: &Method, path: &str, status: StatusCode, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("errorMessage")
                .and_then(Value::as_str)
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned());

    Error::Api {
        method: method.to_string(),
        path: redact_account_id(path),
        status: status.as_u16(),
        message,
    }
}
