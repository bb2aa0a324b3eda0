use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::request::ProviderRequest;
use crate::response::ProviderResponse;

#[derive(Debug, Clone, Default)]
pub struct CallContext {
    pub request_id: Option<String>,
    pub client_addr: Option<String>,
}

/// An upstream AI service. Implementations own their credential and wire
/// format; callers pick the provider by name through a [`ProviderLookup`].
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the credential for this provider is present. Callers use this
    /// to fail fast before building a request.
    fn configured(&self) -> bool;

    async fn call(
        &self,
        req: ProviderRequest,
        ctx: CallContext,
    ) -> Result<ProviderResponse, ProviderError>;
}

pub type ProviderLookup = Arc<dyn Fn(&str) -> Option<Arc<dyn Provider>> + Send + Sync>;
