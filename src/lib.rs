//! Client-side validation and browsing of model-serving endpoints.
//!
//! The crate is split along the seam a dashboard UI needs: [`validate`]
//! classifies whether a user-supplied URL points at a real model-serving
//! endpoint, and [`BrowserState`] keeps the per-session view of the last
//! refresh (status, model list, error message). The HTTP transport lives
//! behind the [`ModelClient`] trait so hosts can inject their own client
//! or the in-memory mock.

/// Default endpoint URL when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8321";

/// Environment variable consulted by [`Config::from_env`].
pub const ENDPOINT_ENV: &str = "MODELBROWSE_ENDPOINT";

/// Default client identification header value.
pub(crate) const DEFAULT_CLIENT_HEADER: &str =
    concat!("modelbrowse-rust/", env!("CARGO_PKG_VERSION"));

/// Default connection timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Default request timeout (60 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

mod browser;
mod client;
mod errors;
#[cfg(feature = "mock")]
mod mock;
mod types;
mod validate;

pub use browser::{BrowserState, BrowserStatus};
pub use client::{Client, Config, ModelsClient};
pub use errors::{ApiError, Error, Result, TransportError, TransportErrorKind};
#[cfg(feature = "mock")]
pub use mock::{fixtures, MockConfig, MockModelClient};
pub use types::{ModelDescriptor, ModelType};
pub use validate::{
    validate, ErrorKind, ModelClient, ValidationOutcome, CONNECTION_ERROR_MESSAGE,
    INVALID_FORMAT_MESSAGE, NOT_AN_ENDPOINT_MESSAGE, TIMEOUT_MESSAGE,
};
