pub mod auth;
pub mod core;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod models;
pub mod ratelimit;
pub mod sanitize;

pub use auth::{AuthBackend, DemoAuth};
pub use core::{AppState, Core};
pub use error::GatewayError;
pub use ratelimit::{Category, RateLimitPolicy, RateLimiter};
