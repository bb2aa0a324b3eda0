#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use aigate_core::{AppState, Core, DemoAuth, RateLimiter};
use aigate_provider_core::{
    CallContext, Provider, ProviderError, ProviderLookup, ProviderRequest, ProviderResponse,
    StreamBody,
};
use aigate_storage::MemoryConversations;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub enum StubResponse {
    Json(Value),
    Stream(Vec<&'static str>),
}

/// Canned provider: counts calls so tests can assert that short-circuit
/// paths issue no upstream request.
pub struct StubProvider {
    pub name: &'static str,
    pub configured: bool,
    pub response: StubResponse,
    pub calls: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn json(name: &'static str, body: Value) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(Self {
            name,
            configured: true,
            response: StubResponse::Json(body),
            calls: calls.clone(),
        });
        (provider, calls)
    }

    pub fn unconfigured(name: &'static str) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(Self {
            name,
            configured: false,
            response: StubResponse::Json(Value::Null),
            calls: calls.clone(),
        });
        (provider, calls)
    }
}

#[async_trait]
impl Provider for StubProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn configured(&self) -> bool {
        self.configured
    }

    async fn call(
        &self,
        _req: ProviderRequest,
        _ctx: CallContext,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.configured {
            return Err(ProviderError::MissingCredential {
                provider: self.name,
            });
        }
        match &self.response {
            StubResponse::Json(body) => Ok(ProviderResponse::json(
                StatusCode::OK,
                Bytes::from(body.to_string()),
            )),
            StubResponse::Stream(chunks) => {
                let chunks: Vec<Result<Bytes, io::Error>> = chunks
                    .iter()
                    .map(|chunk| Ok(Bytes::from_static(chunk.as_bytes())))
                    .collect();
                Ok(ProviderResponse::Stream {
                    status: StatusCode::OK,
                    body: StreamBody::new(
                        "text/event-stream",
                        futures_util::stream::iter(chunks),
                    ),
                })
            }
        }
    }
}

/// A provider that always fails with an upstream error.
pub struct FailingProvider {
    pub name: &'static str,
}

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn configured(&self) -> bool {
        true
    }

    async fn call(
        &self,
        _req: ProviderRequest,
        _ctx: CallContext,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Upstream {
            provider: self.name,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "secret upstream detail".to_string(),
        })
    }
}

pub fn lookup_for(providers: Vec<Arc<dyn Provider>>) -> ProviderLookup {
    let map: HashMap<String, Arc<dyn Provider>> = providers
        .into_iter()
        .map(|provider| (provider.name().to_string(), provider))
        .collect();
    Arc::new(move |name| map.get(name).cloned())
}

pub fn router_with(providers: Vec<Arc<dyn Provider>>) -> Router {
    router_with_limiter(providers, RateLimiter::disabled())
}

pub fn router_with_limiter(providers: Vec<Arc<dyn Provider>>, limiter: RateLimiter) -> Router {
    let state = AppState::new(
        lookup_for(providers),
        Arc::new(limiter),
        Arc::new(DemoAuth::new()),
        Arc::new(MemoryConversations::new()),
    );
    Core::new(state).router()
}

pub async fn send(
    app: Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Bytes) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes)
}

pub fn json_body(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap()
}
