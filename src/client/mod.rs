// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the PulseConnect backend API.
//!
//! Every outbound call goes through [`BackendClient::send`], which resolves
//! the endpoint against the configured base URL, attaches the caller's
//! bearer token, and drives the request through the [`RetryPolicy`].
//! Request bodies are rebuilt for each attempt, so multipart forms survive
//! retries.

pub mod error;
pub mod retry;

use reqwest::{multipart::Form, Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

pub use error::ClientError;
pub use retry::{RetryError, RetryPolicy};

const USER_AGENT: &str = concat!("pulseconnect-web/", env!("CARGO_PKG_VERSION"));

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(Value),
    /// Multipart text fields, in order.
    Form(Vec<(String, String)>),
}

/// One logical backend call, independent of how many attempts it takes.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    bearer: Option<String>,
    body: Body,
}

impl ApiRequest {
    /// `segments` are path segments below the base URL. Each one is
    /// percent-encoded, so caller-supplied ids cannot escape their segment.
    pub fn new<I>(method: Method, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            method,
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            query: Vec::new(),
            bearer: None,
            body: Body::Empty,
        }
    }

    pub fn get<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn put<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(Method::PUT, segments)
    }

    pub fn delete<I>(segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self::new(Method::DELETE, segments)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Body::Form(fields);
        self
    }
}

/// Retrying client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    http: Client,
    retry: RetryPolicy,
}

impl BackendClient {
    pub fn new(base_url: &str, retry: RetryPolicy) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            base_url,
            http,
            retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for `request`, including its query string.
    pub fn endpoint(&self, request: &ApiRequest) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: "URL cannot be used as a base".to_string(),
                })?;
            path.pop_if_empty();
            path.extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    /// Send `request`, retrying transport failures and 5xx responses.
    ///
    /// Any non-retryable response (success or 4xx) is returned for the
    /// caller to interpret.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        let url = self.endpoint(&request)?;
        debug!(method = %request.method, url = %url, "Calling backend");

        let response = self
            .retry
            .execute(|_| self.build(&request, url.clone()).send())
            .await?;

        debug!(
            method = %request.method,
            url = %url,
            status = %response.status(),
            "Backend responded"
        );
        Ok(response)
    }

    fn build(&self, request: &ApiRequest, url: Url) -> RequestBuilder {
        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Form(fields) => {
                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (name, value)| {
                        form.text(name.clone(), value.clone())
                    });
                builder.multipart(form)
            }
        }
    }
}
