use serde::{Deserialize, Serialize};

/// `POST /dream-machine/v1/generations` request body. Luma takes the aspect
/// ratio verbatim instead of pixel dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub aspect_ratio: String,
    pub model: String,
}
