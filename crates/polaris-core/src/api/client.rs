//! Authenticated HTTP client shared by the management and catalog APIs.
//!
//! Every request carries the bearer token and, when configured, the realm
//! header. Nothing is retried: a failed request is returned to the caller.

use std::fmt;
use std::time::Duration;

use reqwest::{header, Client, Method, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::REALM_HEADER;
use crate::config::Config;
use crate::error::{Error, Result};

/// HTTP request timeout in seconds, applied to the whole request.
const REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

/// Parse the configured host into a base URL.
pub(crate) fn parse_host(host: &str) -> Result<Url> {
    let url = Url::parse(host.trim())
        .map_err(|e| Error::Config(format!("invalid host URL '{}': {}", host, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("invalid host URL '{}'", host)));
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn endpoint_url<'a, I>(base: &Url, segments: I) -> Result<Url>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("invalid host URL '{}'", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Body of a failed response. A body that cannot be read is reported as
/// empty; the status alone still identifies the failure.
fn error_body<E: fmt::Display>(status: StatusCode, body: std::result::Result<String, E>) -> String {
    body.unwrap_or_else(|e| {
        debug!(status = status.as_u16(), error = %e, "Failed to read error response body");
        String::new()
    })
}

/// API client for Polaris REST endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    host: Url,
    token: String,
    realm: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            host: parse_host(&config.host)?,
            token: token.into(),
            realm: config.realm().map(str::to_string),
        })
    }

    /// Build a URL under the configured host.
    pub fn url<'a, I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        endpoint_url(&self.host, segments)
    }

    fn headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        let bearer = header::HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| Error::Config("stored access token is not a valid header value".to_string()))?;
        headers.insert(header::AUTHORIZATION, bearer);
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        if let Some(ref realm) = self.realm {
            let invalid = || Error::Config(format!("invalid realm '{}'", realm));
            let name = header::HeaderName::from_bytes(REALM_HEADER.as_bytes()).map_err(|_| invalid())?;
            let value = header::HeaderValue::from_str(realm).map_err(|_| invalid())?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = error_body(status, response.text().await);
        Err(Error::from_status(status, &body))
    }

    async fn send<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        debug!(method = %method, url = %url, "Sending request");
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        debug!(method = %method, url = %url, status = response.status().as_u16(), "Received response");
        Self::check_response(response).await
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().clone();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            Error::InvalidServerResponse(format!("failed to parse response from {}: {}", url, e))
        })
    }

    /// Send a request and decode the JSON response body.
    pub async fn fetch<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, url, body).await?;
        Self::parse_json(response).await
    }

    /// Send a request whose response body is not needed.
    pub async fn execute<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, url, body).await?;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.fetch::<(), T>(Method::GET, url, None).await
    }

    pub async fn post<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(Method::POST, url, Some(body)).await
    }

    pub async fn put<B, T>(&self, url: Url, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(Method::PUT, url, Some(body)).await
    }

    pub async fn delete(&self, url: Url) -> Result<()> {
        self.execute::<()>(Method::DELETE, url, None).await
    }
}
