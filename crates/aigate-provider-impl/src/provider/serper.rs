use aigate_protocol::serper::search::SearchRequest;
use aigate_provider_core::{
    CallContext, Provider, ProviderError, ProviderRequest, ProviderResponse,
};
use async_trait::async_trait;
use tracing::debug;

use crate::provider::require_key;
use crate::upstream::{network_error, read_json, UPSTREAM_TIMEOUT};

pub const PROVIDER_NAME: &str = "serper";

const SEARCH_URL: &str = "https://google.serper.dev/search";

/// Serper web search: snippet fetch feeding the search synthesis step.
pub struct SerperProvider {
    api_key: Option<String>,
    client: wreq::Client,
}

impl SerperProvider {
    pub fn new(api_key: Option<String>, client: wreq::Client) -> Self {
        Self { api_key, client }
    }
}

#[async_trait]
impl Provider for SerperProvider {
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
            ProviderRequest::WebSearch { query, num } => {
                debug!(request_id = ?ctx.request_id, "serper search");
                let body = SearchRequest { q: query, num };
                let response = self
                    .client
                    .post(SEARCH_URL)
                    .header("X-API-KEY", key)
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
