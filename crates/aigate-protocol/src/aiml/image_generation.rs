use serde::{Deserialize, Serialize};

/// `POST /v1/images/generations` request body. `size` comes from the
/// aspect-ratio table, `n` is pinned to one image per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
}
