use std::{sync::Arc, time::Duration};

use reqwest::{
    header::{HeaderValue, ACCEPT},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    errors::{ApiError, Error, Result, TransportError, TransportErrorKind},
    types::ModelDescriptor,
    validate::ModelClient,
    DEFAULT_BASE_URL, DEFAULT_CLIENT_HEADER, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    ENDPOINT_ENV,
};

/// Client configuration. Unset fields fall back to the crate defaults.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub base_url: Option<String>,
    /// Pre-supplied credential, sent as a bearer token when present.
    pub api_key: Option<String>,
    pub client_header: Option<String>,
    pub http_client: Option<reqwest::Client>,
    /// Override the connect timeout (defaults to 5s).
    pub connect_timeout: Option<Duration>,
    /// Override the request timeout (defaults to 60s).
    pub timeout: Option<Duration>,
}

impl Config {
    /// Configuration seeded from `MODELBROWSE_ENDPOINT` when set.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(ENDPOINT_ENV).ok().filter(|v| !v.is_empty()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    base_url: reqwest::Url,
    api_key: Option<String>,
    client_header: Option<String>,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl Client {
    pub fn new(cfg: Config) -> Result<Self> {
        let base_source = cfg
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base = base_source.trim_end_matches('/').to_string();
        let base_url = reqwest::Url::parse(&base)
            .map_err(|err| Error::Config(format!("invalid base url: {err}")))?;

        let connect_timeout = cfg.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT);
        let request_timeout = cfg.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let http = match cfg.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .build()
                .map_err(|err| TransportError {
                    kind: TransportErrorKind::Connect,
                    message: "failed to build http client".to_string(),
                    source: Some(err),
                })?,
        };

        let client_header = cfg
            .client_header
            .filter(|s| !s.trim().is_empty())
            .or_else(|| Some(DEFAULT_CLIENT_HEADER.to_string()));

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                api_key: cfg.api_key.filter(|s| !s.trim().is_empty()),
                client_header,
                http,
                request_timeout,
            }),
        })
    }

    pub fn models(&self) -> ModelsClient {
        ModelsClient {
            inner: self.inner.clone(),
        }
    }

    /// Base URL this client resolves paths against.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }
}

/// Client for model catalog operations.
#[derive(Clone)]
pub struct ModelsClient {
    inner: Arc<ClientInner>,
}

impl ModelsClient {
    /// List the endpoint's model catalog with a single `GET /v1/models`.
    ///
    /// Exactly one request per call; failures surface with a classified
    /// transport kind so callers can distinguish unreachable from timed out.
    pub async fn list(&self) -> Result<Vec<ModelDescriptor>> {
        let resp: ModelsListResponse = self.inner.get_json("/v1/models").await?;
        Ok(resp.data)
    }
}

impl ModelClient for ModelsClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        self.list().await
    }
}

impl ClientInner {
    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| Error::Config(format!("invalid path: {err}")))?;
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .timeout(self.request_timeout);
        if let Some(client_header) = self.client_header.as_deref() {
            builder = builder.header("X-Modelbrowse-Client", client_header);
        }
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.trim());
        }
        Ok(builder)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path)?;
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("modelbrowse.http", method = "GET", path);
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        let resp = builder.send().await.map_err(to_transport_error)?;
        let status = resp.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = %status, "request failed");
            let body = resp.text().await.unwrap_or_default();
            return Err(parse_api_error(status, body));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(status = %status, "request completed");
        let bytes = resp.bytes().await.map_err(to_transport_error)?;
        let parsed = serde_json::from_slice::<T>(&bytes).map_err(Error::Serialization)?;
        Ok(parsed)
    }
}

fn to_transport_error(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_request() {
        TransportErrorKind::Request
    } else {
        TransportErrorKind::Other
    };

    TransportError {
        kind,
        message: err.to_string(),
        source: Some(err),
    }
    .into()
}

fn parse_api_error(status: StatusCode, body: String) -> Error {
    let status_code = status.as_u16();
    let status_text = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();

    if body.is_empty() {
        return ApiError::new(status_code, status_text).into();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        let message = value
            .get("error")
            .and_then(|v| v.get("message"))
            .or_else(|| value.get("message"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or(status_text);
        return ApiError {
            status: status_code,
            message,
            raw_body: Some(body),
        }
        .into();
    }

    ApiError {
        status: status_code,
        message: body.clone(),
        raw_body: Some(body),
    }
    .into()
}

#[derive(Deserialize)]
struct ModelsListResponse {
    data: Vec<ModelDescriptor>,
}
