use std::sync::Arc;

use aigate_provider_core::{Provider, ProviderLookup};
use aigate_storage::ConversationStore;
use axum::http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthBackend;
use crate::error::GatewayError;
use crate::handler;
use crate::middleware;
use crate::ratelimit::RateLimiter;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub lookup: ProviderLookup,
    pub limiter: Arc<RateLimiter>,
    pub auth: Arc<dyn AuthBackend>,
    pub conversations: Arc<dyn ConversationStore>,
}

impl AppState {
    pub fn new(
        lookup: ProviderLookup,
        limiter: Arc<RateLimiter>,
        auth: Arc<dyn AuthBackend>,
        conversations: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            lookup,
            limiter,
            auth,
            conversations,
        }
    }

    pub fn provider(&self, name: &str) -> Result<Arc<dyn Provider>, GatewayError> {
        (self.lookup)(name).ok_or(GatewayError::Internal)
    }
}

pub struct Core {
    state: AppState,
}

impl Core {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// The full `/api` surface. Layer order, outermost first: CORS response
    /// headers on everything (errors included), preflight short-circuit,
    /// rate limiting, body size cap, then the routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/chat", post(handler::chat))
            .route("/api/images", post(handler::images))
            .route("/api/search", post(handler::search))
            .route("/api/voice", post(handler::voice))
            .route("/api/health", get(handler::health))
            .route("/api/auth/{action}", post(handler::auth))
            .route(
                "/api/conversations",
                get(handler::list_conversations).post(handler::create_conversation),
            )
            .route(
                "/api/conversations/{id}",
                get(handler::get_conversation).delete(handler::delete_conversation),
            )
            .route(
                "/api/conversations/{id}/messages",
                post(handler::append_message),
            )
            .fallback(handler::not_found)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(axum::middleware::from_fn_with_state(
                self.state.clone(),
                middleware::rate_limit,
            ))
            .layer(axum::middleware::from_fn(middleware::preflight))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type, Authorization"),
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
