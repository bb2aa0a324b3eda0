use std::io;
use std::time::Duration;

use aigate_provider_core::{ProviderError, ProviderResponse, StreamBody};
use futures_util::StreamExt;

/// Deadline for buffered upstream calls. Streaming calls only get the
/// connect timeout so long completions are not cut off mid-body.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client() -> wreq::Client {
    wreq::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_else(|_| wreq::Client::new())
}

pub fn network_error(provider: &'static str, err: wreq::Error) -> ProviderError {
    ProviderError::Network {
        provider,
        message: err.to_string(),
    }
}

/// Buffers a JSON response. Non-2xx statuses become [`ProviderError::Upstream`]
/// with the body captured so the caller can log it without forwarding it.
pub async fn read_json(
    provider: &'static str,
    response: wreq::Response,
) -> Result<ProviderResponse, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Upstream {
            provider,
            status,
            body,
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|err| network_error(provider, err))?;
    Ok(ProviderResponse::json(status, body))
}

/// Pipes an SSE response body through unmodified.
pub async fn read_stream(
    provider: &'static str,
    response: wreq::Response,
) -> Result<ProviderResponse, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Upstream {
            provider,
            status,
            body,
        });
    }
    let stream = response
        .bytes_stream()
        .map(|item| item.map_err(|err| io::Error::other(err.to_string())));
    Ok(ProviderResponse::Stream {
        status,
        body: StreamBody::new("text/event-stream", stream),
    })
}
