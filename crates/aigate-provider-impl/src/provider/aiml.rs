use aigate_protocol::aiml::image_generation::ImageGenerationRequest;
use aigate_provider_core::{
    CallContext, Provider, ProviderError, ProviderRequest, ProviderResponse,
};
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use tracing::debug;

use crate::provider::require_key;
use crate::upstream::{network_error, read_json, read_stream, UPSTREAM_TIMEOUT};

pub const PROVIDER_NAME: &str = "aiml";

const BASE_URL: &str = "https://api.aimlapi.com";

/// AIML API: OpenAI-compatible chat completions, plus image generation for
/// the flux/seedream model family. Search synthesis rides the chat endpoint.
pub struct AimlProvider {
    api_key: Option<String>,
    client: wreq::Client,
}

impl AimlProvider {
    pub fn new(api_key: Option<String>, client: wreq::Client) -> Self {
        Self { api_key, client }
    }

    fn post(&self, key: &str, path: &str) -> wreq::RequestBuilder {
        self.client
            .post(format!("{BASE_URL}{path}"))
            .header(AUTHORIZATION, format!("Bearer {key}"))
    }
}

#[async_trait]
impl Provider for AimlProvider {
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
            ProviderRequest::ChatCompletions(body) => {
                debug!(request_id = ?ctx.request_id, model = %body.model, "aiml chat completion");
                let response = self
                    .post(key, "/v1/chat/completions")
                    .json(&body)
                    .timeout(UPSTREAM_TIMEOUT)
                    .send()
                    .await
                    .map_err(|err| network_error(PROVIDER_NAME, err))?;
                read_json(PROVIDER_NAME, response).await
            }
            ProviderRequest::ChatCompletionsStream(body) => {
                debug!(request_id = ?ctx.request_id, model = %body.model, "aiml chat stream");
                let response = self
                    .post(key, "/v1/chat/completions")
                    .json(&body)
                    .send()
                    .await
                    .map_err(|err| network_error(PROVIDER_NAME, err))?;
                read_stream(PROVIDER_NAME, response).await
            }
            ProviderRequest::ImageGeneration {
                model,
                prompt,
                aspect_ratio,
            } => {
                let body = ImageGenerationRequest {
                    model,
                    prompt,
                    n: 1,
                    size: size_for_aspect(&aspect_ratio).to_string(),
                };
                let response = self
                    .post(key, "/v1/images/generations")
                    .json(&body)
                    .timeout(UPSTREAM_TIMEOUT)
                    .send()
                    .await
                    .map_err(|err| network_error(PROVIDER_NAME, err))?;
                read_json(PROVIDER_NAME, response).await
            }
            ProviderRequest::WebSearch { .. } => {
                Err(ProviderError::Unsupported { provider: PROVIDER_NAME })
            }
        }
    }
}

/// Aspect ratios the AIML image endpoint understands, as pixel dimensions.
/// Unknown ratios fall back to square.
pub fn size_for_aspect(aspect_ratio: &str) -> &'static str {
    match aspect_ratio {
        "1:1" => "1024x1024",
        "16:9" => "1344x768",
        _ => "1024x1024",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_table_matches_endpoint_sizes() {
        assert_eq!(size_for_aspect("1:1"), "1024x1024");
        assert_eq!(size_for_aspect("16:9"), "1344x768");
        assert_eq!(size_for_aspect("4:3"), "1024x1024");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_call() {
        let provider = AimlProvider::new(None, crate::upstream::build_client());
        let err = provider
            .call(
                ProviderRequest::ImageGeneration {
                    model: "flux/kontext-pro/text-to-image".to_string(),
                    prompt: "a cat".to_string(),
                    aspect_ratio: "1:1".to_string(),
                },
                CallContext::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential { provider: "aiml" }));
    }
}
