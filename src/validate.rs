//! Endpoint validation: one network probe, a closed set of outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Error, Result},
    types::ModelDescriptor,
};

/// Message for URLs that fail the scheme check.
pub const INVALID_FORMAT_MESSAGE: &str = "URL must start with http:// or https://";

/// Message for unreachable endpoints.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Cannot connect to URL. Please check the URL and network connectivity.";

/// Message for probes that exceeded the request timeout.
pub const TIMEOUT_MESSAGE: &str = "Connection timed out. Please try again.";

/// Message for reachable servers that do not speak the model-serving API.
pub const NOT_AN_ENDPOINT_MESSAGE: &str = "URL must be a valid model-serving endpoint";

/// Closed taxonomy of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidFormat,
    ConnectionError,
    Timeout,
    NotAnEndpoint,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::InvalidFormat => "invalid_format",
            ErrorKind::ConnectionError => "connection_error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::NotAnEndpoint => "not_an_endpoint",
        };
        write!(f, "{label}")
    }
}

/// Classified result of one validation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The endpoint answered with a non-empty model catalog, in server order.
    Success(Vec<ModelDescriptor>),
    Failure { kind: ErrorKind, message: String },
}

impl ValidationOutcome {
    pub(crate) fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        ValidationOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationOutcome::Success(_))
    }
}

/// Capability consumed by [`validate`]: anything that can list models.
///
/// [`crate::ModelsClient`] implements this over HTTP; the `mock` feature
/// provides an in-memory implementation for offline tests.
pub trait ModelClient {
    fn list_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ModelDescriptor>>> + Send;
}

/// Validate that `raw_url` points at a model-serving endpoint.
///
/// Trailing slashes are stripped and the scheme is checked before any
/// network traffic; a URL failing the scheme check never reaches the
/// factory. Otherwise the client built by `client_factory` performs exactly
/// one `list_models` call and the result is classified:
///
/// - connect-class transport failures map to [`ErrorKind::ConnectionError`],
/// - timeouts map to [`ErrorKind::Timeout`],
/// - every other error, and a reachable server returning zero models, maps
///   to [`ErrorKind::NotAnEndpoint`]. The catch-all is deliberate: the
///   validator cannot tell "wrong API" from "wrong server" and does not try.
///
/// No retries, no side effects beyond the single call.
pub async fn validate<C, F>(raw_url: &str, client_factory: F) -> ValidationOutcome
where
    C: ModelClient,
    F: FnOnce(&str) -> Result<C>,
{
    let url = raw_url.trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return ValidationOutcome::failure(ErrorKind::InvalidFormat, INVALID_FORMAT_MESSAGE);
    }

    let client = match client_factory(url) {
        Ok(client) => client,
        Err(err) => return classify(err),
    };

    match client.list_models().await {
        Ok(models) if models.is_empty() => {
            // A reachable server with zero models is not treated as a real
            // endpoint; see the catalog policy note in DESIGN.md.
            ValidationOutcome::failure(ErrorKind::NotAnEndpoint, NOT_AN_ENDPOINT_MESSAGE)
        }
        Ok(models) => ValidationOutcome::Success(models),
        Err(err) => classify(err),
    }
}

fn classify(err: Error) -> ValidationOutcome {
    use crate::errors::TransportErrorKind;

    match &err {
        Error::Transport(transport) => match transport.kind {
            TransportErrorKind::Connect => {
                ValidationOutcome::failure(ErrorKind::ConnectionError, CONNECTION_ERROR_MESSAGE)
            }
            TransportErrorKind::Timeout => {
                ValidationOutcome::failure(ErrorKind::Timeout, TIMEOUT_MESSAGE)
            }
            _ => ValidationOutcome::failure(ErrorKind::NotAnEndpoint, NOT_AN_ENDPOINT_MESSAGE),
        },
        _ => ValidationOutcome::failure(ErrorKind::NotAnEndpoint, NOT_AN_ENDPOINT_MESSAGE),
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        errors::{TransportError, TransportErrorKind},
        mock::{fixtures, MockConfig, MockModelClient},
    };

    fn transport(kind: TransportErrorKind) -> Error {
        TransportError {
            kind,
            message: "probe failed".into(),
            source: None,
        }
        .into()
    }

    #[tokio::test]
    async fn rejects_bad_scheme_without_building_a_client() {
        let factory_called = Cell::new(false);
        let outcome = validate("localhost:8321", |_url| {
            factory_called.set(true);
            Ok(MockModelClient::new(MockConfig::default()))
        })
        .await;

        assert!(!factory_called.get());
        assert_eq!(
            outcome,
            ValidationOutcome::failure(ErrorKind::InvalidFormat, INVALID_FORMAT_MESSAGE)
        );
    }

    #[tokio::test]
    async fn trailing_slashes_are_stripped_before_use() {
        let seen = Cell::new("");
        let models = vec![fixtures::llm_model("acme/chat-1")];
        let outcome = validate("http://localhost:8321///", |url| {
            seen.set(if url == "http://localhost:8321" {
                "clean"
            } else {
                "dirty"
            });
            Ok(MockModelClient::new(
                MockConfig::default().with_models(models.clone()),
            ))
        })
        .await;

        assert_eq!(seen.get(), "clean");
        assert_eq!(outcome, ValidationOutcome::Success(models));
    }

    #[tokio::test]
    async fn connection_failures_classify_as_connection_error() {
        let outcome = validate("http://localhost:1", |_url| {
            Ok(MockModelClient::new(
                MockConfig::default().with_error(transport(TransportErrorKind::Connect)),
            ))
        })
        .await;

        assert_eq!(
            outcome,
            ValidationOutcome::failure(ErrorKind::ConnectionError, CONNECTION_ERROR_MESSAGE)
        );
    }

    #[tokio::test]
    async fn timeouts_classify_as_timeout() {
        let outcome = validate("http://localhost:8321", |_url| {
            Ok(MockModelClient::new(
                MockConfig::default().with_error(transport(TransportErrorKind::Timeout)),
            ))
        })
        .await;

        assert_eq!(
            outcome,
            ValidationOutcome::failure(ErrorKind::Timeout, TIMEOUT_MESSAGE)
        );
    }

    #[tokio::test]
    async fn other_errors_fall_into_the_not_an_endpoint_catch_all() {
        for err in [
            transport(TransportErrorKind::Request),
            Error::Config("bad client".into()),
            crate::errors::ApiError::new(500, "boom").into(),
        ] {
            let outcome = validate("http://localhost:8321", move |_url| {
                Ok(MockModelClient::new(MockConfig::default().with_error(err)))
            })
            .await;

            assert_eq!(
                outcome,
                ValidationOutcome::failure(ErrorKind::NotAnEndpoint, NOT_AN_ENDPOINT_MESSAGE)
            );
        }
    }

    #[tokio::test]
    async fn factory_failure_classifies_like_a_call_failure() {
        let outcome = validate("http://localhost:8321", |_url| {
            Err::<MockModelClient, _>(transport(TransportErrorKind::Connect))
        })
        .await;

        assert_eq!(
            outcome,
            ValidationOutcome::failure(ErrorKind::ConnectionError, CONNECTION_ERROR_MESSAGE)
        );
    }

    #[tokio::test]
    async fn empty_catalog_is_not_an_endpoint() {
        let outcome = validate("http://localhost:8321", |_url| {
            Ok(MockModelClient::new(
                MockConfig::default().with_models(Vec::new()),
            ))
        })
        .await;

        assert_eq!(
            outcome,
            ValidationOutcome::failure(ErrorKind::NotAnEndpoint, NOT_AN_ENDPOINT_MESSAGE)
        );
    }

    #[tokio::test]
    async fn success_preserves_catalog_order() {
        let models = vec![
            fixtures::llm_model("acme/chat-1"),
            fixtures::embedding_model("acme/embed-1"),
        ];
        let outcome = validate("http://localhost:8321", |_url| {
            Ok(MockModelClient::new(
                MockConfig::default().with_models(models.clone()),
            ))
        })
        .await;

        assert_eq!(outcome, ValidationOutcome::Success(models));
    }
}
