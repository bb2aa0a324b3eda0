use serde::{Deserialize, Serialize};

/// Body of `POST /api/images`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    #[serde(rename = "aspectRatio", default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_model() -> String {
    "photon-flash".to_string()
}

/// Success envelope for image generation. Both provider families are decoded
/// into this enum and re-emitted as-is: the AIML family answers with a
/// `data` batch, the Luma family with a single generation object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageEnvelope {
    Batch { data: Vec<ImageAsset> },
    Single(LumaGeneration),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
}

/// Luma returns the generation record itself; `url` is absent until the
/// asset is rendered, so it stays optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LumaGeneration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
