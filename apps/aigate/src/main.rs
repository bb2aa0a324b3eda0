use std::error::Error;
use std::sync::Arc;

use clap::Parser;
mod cli;
use aigate_core::{AppState, Core, DemoAuth, RateLimiter};
use aigate_provider_impl::{build_registry, ProviderCredentials};
use aigate_storage::{KvStore, MemoryConversations, MemoryKv};
use tracing::info;

use crate::cli::{Cli, RateLimitStoreKind};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("aigate failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let credentials = ProviderCredentials {
        aiml_api_key: cli.aiml_api_key.clone(),
        luma_api_key: cli.luma_api_key.clone(),
        serper_api_key: cli.search_api_key(),
    };
    info!(
        aiml = credentials.aiml_api_key.is_some(),
        luma = credentials.luma_api_key.is_some(),
        serper = credentials.serper_api_key.is_some(),
        "credentials loaded"
    );

    let registry = Arc::new(build_registry(credentials));
    let store: Option<Arc<dyn KvStore>> = match cli.rate_limit_store {
        RateLimitStoreKind::Memory => Some(Arc::new(MemoryKv::new())),
        RateLimitStoreKind::None => None,
    };
    if store.is_none() {
        info!("rate limiting disabled");
    }

    let state = AppState::new(
        registry.lookup(),
        Arc::new(RateLimiter::new(store)),
        Arc::new(DemoAuth::new()),
        Arc::new(MemoryConversations::new()),
    );
    let core = Core::new(state);
    let app = core.router();

    let bind = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %bind, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("aigate=info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
