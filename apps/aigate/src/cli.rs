use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "aigate", about = "Multi-provider AI API gateway", version)]
pub struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8787)]
    pub port: u16,

    /// Chat, image-synthesis, and search-synthesis provider key.
    #[arg(long, env = "AIML_API_KEY", hide_env_values = true)]
    pub aiml_api_key: Option<String>,

    /// Photon image-generation provider key.
    #[arg(long, env = "LUMA_API_KEY", hide_env_values = true)]
    pub luma_api_key: Option<String>,

    /// Web-search provider key.
    #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
    pub serper_api_key: Option<String>,

    /// Legacy alias for the web-search key; used when SERPER_API_KEY is
    /// unset.
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub perplexity_api_key: Option<String>,

    /// Backing store for the fixed-window rate limiter. "none" disables
    /// limiting entirely (every request allowed).
    #[arg(long, env = "RATE_LIMIT_STORE", value_enum, default_value = "memory")]
    pub rate_limit_store: RateLimitStoreKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RateLimitStoreKind {
    Memory,
    None,
}

impl Cli {
    /// Serper key with the legacy fallback applied.
    pub fn search_api_key(&self) -> Option<String> {
        self.serper_api_key
            .clone()
            .or_else(|| self.perplexity_api_key.clone())
    }
}
