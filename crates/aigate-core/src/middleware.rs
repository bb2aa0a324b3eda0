use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::core::AppState;
use crate::error::GatewayError;
use crate::ratelimit::Category;

/// Client address for rate-limit keys: the edge-supplied header when
/// present, else the first `x-forwarded-for` hop, else `"unknown"`.
pub fn client_addr(headers: &HeaderMap) -> String {
    headers
        .get("cf-connecting-ip")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .or_else(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(|value| value.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// CORS preflight short-circuit; runs before rate limiting so OPTIONS never
/// consumes a bucket slot. The CORS headers themselves come from the
/// response-header layers wrapping the router.
pub async fn preflight(request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}

/// Fixed-window rate limiting on the categorized paths; everything else
/// passes through untouched.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(category) = Category::from_path(request.uri().path()) else {
        return next.run(request).await;
    };
    let addr = client_addr(request.headers());
    if state.limiter.check(&addr, category).await {
        next.run(request).await
    } else {
        GatewayError::RateLimited.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn prefers_edge_header_over_forwarded_chain() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", HeaderValue::from_static("9.9.9.9"));
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.1.1.1, 2.2.2.2"),
        );
        assert_eq!(client_addr(&headers), "9.9.9.9");
    }

    #[test]
    fn falls_back_to_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("1.1.1.1, 2.2.2.2"),
        );
        assert_eq!(client_addr(&headers), "1.1.1.1");
    }

    #[test]
    fn unknown_without_headers() {
        assert_eq!(client_addr(&HeaderMap::new()), "unknown");
    }
}
