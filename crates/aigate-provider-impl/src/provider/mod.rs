pub mod aiml;
pub mod luma;
pub mod serper;

use aigate_provider_core::ProviderError;

pub(crate) fn require_key<'a>(
    provider: &'static str,
    api_key: &'a Option<String>,
) -> Result<&'a str, ProviderError> {
    api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(ProviderError::MissingCredential { provider })
}
