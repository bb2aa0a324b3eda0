use http::StatusCode;
use thiserror::Error;

/// Failures a provider call can report. The gateway maps these onto its
/// client-facing error taxonomy; upstream bodies are carried for logging
/// only and never forwarded.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} credential is not configured")]
    MissingCredential { provider: &'static str },

    #[error("network error calling {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned {status}")]
    Upstream {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {provider} response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} does not support this operation")]
    Unsupported { provider: &'static str },
}
