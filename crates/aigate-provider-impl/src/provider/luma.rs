use aigate_protocol::luma::generation::GenerationRequest;
use aigate_provider_core::{
    CallContext, Provider, ProviderError, ProviderRequest, ProviderResponse,
};
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use tracing::debug;

use crate::provider::require_key;
use crate::upstream::{network_error, read_json, UPSTREAM_TIMEOUT};

pub const PROVIDER_NAME: &str = "luma";

const GENERATIONS_URL: &str = "https://api.lumalabs.ai/dream-machine/v1/generations";

/// Luma Dream Machine: photon image generation only.
pub struct LumaProvider {
    api_key: Option<String>,
    client: wreq::Client,
}

impl LumaProvider {
    pub fn new(api_key: Option<String>, client: wreq::Client) -> Self {
        Self { api_key, client }
    }
}

#[async_trait]
impl Provider for LumaProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn configured(&self) -> bool {
        require_key(PROVIDER_NAME, &self.api_key).is_ok()
    }

    async fn call(
        &self,
        req: ProviderRequest,
        ctx: CallContext,
    ) -> Result<ProviderResponse, ProviderError> {
        let key = require_key(PROVIDER_NAME, &self.api_key)?;
        match req {
            ProviderRequest::ImageGeneration {
                model,
                prompt,
                aspect_ratio,
            } => {
                debug!(request_id = ?ctx.request_id, model = %model, "luma generation");
                let body = GenerationRequest {
                    prompt,
                    aspect_ratio,
                    model,
                };
                let response = self
                    .client
                    .post(GENERATIONS_URL)
                    .header(AUTHORIZATION, format!("Bearer {key}"))
                    .json(&body)
                    .timeout(UPSTREAM_TIMEOUT)
                    .send()
                    .await
                    .map_err(|err| network_error(PROVIDER_NAME, err))?;
                read_json(PROVIDER_NAME, response).await
            }
            _ => Err(ProviderError::Unsupported { provider: PROVIDER_NAME }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn chat_is_unsupported() {
        let provider = LumaProvider::new(Some("k".to_string()), crate::upstream::build_client());
        let err = provider
            .call(
                ProviderRequest::WebSearch {
                    query: "q".to_string(),
                    num: 5,
                },
                CallContext::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }
}
