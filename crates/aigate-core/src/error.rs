use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use aigate_provider_core::ProviderError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Client-facing service label used in error envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Chat,
    Image,
    Search,
}

impl Service {
    fn label(self) -> &'static str {
        match self {
            Service::Chat => "Chat",
            Service::Image => "Image",
            Service::Search => "Search",
        }
    }
}

/// The gateway's error taxonomy. Every variant renders as a JSON envelope
/// with `error` and `message` fields plus a machine-readable `code`; raw
/// upstream bodies are logged, never forwarded.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{} service not configured", .service.label())]
    MissingApiKey {
        service: Service,
        env_key: &'static str,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{} service error", .service.label())]
    Upstream {
        service: Service,
        status: Option<StatusCode>,
    },

    #[error("no search results")]
    NoResults,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("not found")]
    NotFound,

    #[error("internal error")]
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingApiKey { .. } => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::NoResults => StatusCode::NOT_FOUND,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> Option<&'static str> {
        match self {
            GatewayError::MissingApiKey { .. } => Some("MISSING_API_KEY"),
            GatewayError::InvalidInput(_) => Some("INVALID_INPUT"),
            GatewayError::Upstream { .. } => Some("API_ERROR"),
            GatewayError::NoResults => Some("NO_RESULTS"),
            GatewayError::RateLimited => Some("RATE_LIMITED"),
            GatewayError::NotFound => Some("NOT_FOUND"),
            GatewayError::Internal => Some("INTERNAL_ERROR"),
        }
    }

    fn body(&self) -> ErrorBody {
        let (error, message) = match self {
            GatewayError::MissingApiKey { service, env_key } => (
                format!("{} service not configured", service.label()),
                format!(
                    "{env_key} is missing. Please configure {env_key} in environment variables."
                ),
            ),
            GatewayError::InvalidInput(message) => ("Invalid input".to_string(), message.clone()),
            GatewayError::Upstream { service, status } => (
                format!("{} service error", service.label()),
                match status {
                    Some(status) => format!(
                        "{} API returned {}. Please check your API key and try again.",
                        service.label(),
                        status.as_u16()
                    ),
                    None => format!(
                        "{} API is unreachable. Please try again.",
                        service.label()
                    ),
                },
            ),
            GatewayError::NoResults => (
                "No search results".to_string(),
                "No results found for your search query. Please try a different query."
                    .to_string(),
            ),
            GatewayError::RateLimited => (
                "Rate limit exceeded".to_string(),
                "Too many requests. Please wait before trying again.".to_string(),
            ),
            GatewayError::NotFound => (
                "Not found".to_string(),
                "The requested endpoint does not exist.".to_string(),
            ),
            GatewayError::Internal => (
                "Request processing failed".to_string(),
                "An unexpected error occurred. Please try again.".to_string(),
            ),
        };
        ErrorBody {
            error,
            message,
            code: self.code(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

fn credential_env_key(provider: &str) -> &'static str {
    match provider {
        "luma" => "LUMA_API_KEY",
        "serper" => "SERPER_API_KEY",
        _ => "AIML_API_KEY",
    }
}

/// Folds a provider failure into the client-facing taxonomy, logging the
/// details that must not reach the caller.
pub fn map_provider_error(service: Service, err: ProviderError) -> GatewayError {
    match err {
        ProviderError::MissingCredential { provider } => GatewayError::MissingApiKey {
            service,
            env_key: credential_env_key(provider),
        },
        ProviderError::Upstream {
            provider,
            status,
            body,
        } => {
            error!(provider, %status, body = %body, "upstream error");
            GatewayError::Upstream {
                service,
                status: Some(status),
            }
        }
        ProviderError::Network { provider, message } => {
            error!(provider, message = %message, "network error");
            GatewayError::Upstream {
                service,
                status: None,
            }
        }
        ProviderError::Decode { provider, message } => {
            error!(provider, message = %message, "undecodable upstream response");
            GatewayError::Upstream {
                service,
                status: None,
            }
        }
        ProviderError::Unsupported { provider } => {
            error!(provider, "operation routed to wrong provider");
            GatewayError::Internal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            GatewayError::MissingApiKey {
                service: Service::Chat,
                env_key: "AIML_API_KEY"
            }
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(GatewayError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(GatewayError::NoResults.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn envelope_carries_error_message_and_code() {
        let body = GatewayError::MissingApiKey {
            service: Service::Search,
            env_key: "AIML_API_KEY",
        }
        .body();
        assert_eq!(body.error, "Search service not configured");
        assert!(body.message.contains("AIML_API_KEY"));
        assert_eq!(body.code, Some("MISSING_API_KEY"));
    }

    #[test]
    fn missing_credential_maps_to_provider_env_key() {
        let err = map_provider_error(
            Service::Image,
            ProviderError::MissingCredential { provider: "luma" },
        );
        assert!(matches!(
            err,
            GatewayError::MissingApiKey {
                env_key: "LUMA_API_KEY",
                ..
            }
        ));
    }
}
