use serde::Deserialize;

/// Body of `POST /api/voice`. The endpoint is a stub (501) until a speech
/// provider lands; the shape is kept so clients can code against it.
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceRequest {
    pub action: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}
