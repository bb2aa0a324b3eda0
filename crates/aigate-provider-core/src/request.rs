use aigate_protocol::aiml::chat_completions::ChatCompletionsRequest;

/// The operations a provider can be asked to perform. Model identifiers are
/// already resolved to provider-owned ids by the time a request is built.
#[derive(Debug, Clone)]
pub enum ProviderRequest {
    /// Chat completion, body returned as JSON.
    ChatCompletions(ChatCompletionsRequest),
    /// Chat completion with the upstream SSE body piped through.
    ChatCompletionsStream(ChatCompletionsRequest),
    /// Text-to-image generation; each provider family serializes its own
    /// wire body from these fields.
    ImageGeneration {
        model: String,
        prompt: String,
        aspect_ratio: String,
    },
    /// Web-search snippet fetch.
    WebSearch { query: String, num: u8 },
}
