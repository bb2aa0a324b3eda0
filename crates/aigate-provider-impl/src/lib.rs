pub mod provider;
pub mod upstream;

use std::sync::Arc;

use aigate_provider_core::{Provider, ProviderLookup};
use dashmap::DashMap;

use crate::provider::aiml::AimlProvider;
use crate::provider::luma::LumaProvider;
use crate::provider::serper::SerperProvider;

/// Credentials for each provider family, usually read from the environment.
/// An absent key keeps the provider registered but unconfigured, so requests
/// against it fail fast with a missing-credential error.
#[derive(Debug, Clone, Default)]
pub struct ProviderCredentials {
    pub aiml_api_key: Option<String>,
    pub luma_api_key: Option<String>,
    pub serper_api_key: Option<String>,
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: DashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, provider: Arc<dyn Provider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).map(|entry| entry.value().clone())
    }

    pub fn lookup(self: &Arc<Self>) -> ProviderLookup {
        let registry = self.clone();
        Arc::new(move |name| registry.get(name))
    }
}

pub fn build_registry(credentials: ProviderCredentials) -> ProviderRegistry {
    let client = upstream::build_client();
    let registry = ProviderRegistry::new();
    registry.insert(Arc::new(AimlProvider::new(
        credentials.aiml_api_key,
        client.clone(),
    )));
    registry.insert(Arc::new(LumaProvider::new(
        credentials.luma_api_key,
        client.clone(),
    )));
    registry.insert(Arc::new(SerperProvider::new(credentials.serper_api_key, client)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_holds_all_families() {
        let registry = build_registry(ProviderCredentials::default());
        for name in ["aiml", "luma", "serper"] {
            let provider = registry.get(name).unwrap();
            assert_eq!(provider.name(), name);
            assert!(!provider.configured());
        }
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn credentials_mark_providers_configured() {
        let registry = build_registry(ProviderCredentials {
            aiml_api_key: Some("k".to_string()),
            ..Default::default()
        });
        assert!(registry.get("aiml").unwrap().configured());
        assert!(!registry.get("luma").unwrap().configured());
    }
}
