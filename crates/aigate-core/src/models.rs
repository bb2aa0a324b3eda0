//! Static alias tables mapping client-facing model names onto provider
//! model identifiers. Unknown chat aliases degrade to the default tier;
//! unknown image models are rejected by the handler.

/// Fallback chat model for unmapped aliases.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Model used for the search synthesis step.
pub const SYNTHESIS_MODEL: &str = "gpt-4o";

pub fn resolve_chat_model(alias: &str) -> &'static str {
    match alias {
        "fast" | "gpt-4o-mini" => "gpt-4o-mini",
        "smart" | "creative" | "gpt-4o" => "gpt-4o",
        "gpt-4" => "gpt-4",
        "gpt-3.5-turbo" => "gpt-3.5-turbo",
        _ => DEFAULT_CHAT_MODEL,
    }
}

/// Which provider family serves an image model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFamily {
    Aiml,
    Luma,
}

impl ImageFamily {
    pub fn provider_name(self) -> &'static str {
        match self {
            ImageFamily::Aiml => "aiml",
            ImageFamily::Luma => "luma",
        }
    }
}

/// Resolves a client image model to its family and provider identifier.
/// `None` means the model is not one of the four supported identifiers.
pub fn resolve_image_model(model: &str) -> Option<(ImageFamily, &'static str)> {
    match model {
        "flux-1-kontext-pro" => Some((ImageFamily::Aiml, "flux/kontext-pro/text-to-image")),
        "seedream-3-0" => Some((ImageFamily::Aiml, "bytedance/seedream-3.0")),
        "photon-flash" => Some((ImageFamily::Luma, "ray-flash-2")),
        "photon-2" => Some((ImageFamily::Luma, "ray-2")),
        _ => None,
    }
}
