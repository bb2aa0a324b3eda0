//! Client-facing request and response envelopes, one module per category.
//!
//! Field names use the casing the front end sends (`aspectRatio`,
//! `synthesizedResponse`); everything else is snake_case on the Rust side.

pub mod auth;
pub mod chat;
pub mod conversations;
pub mod health;
pub mod images;
pub mod search;
pub mod voice;
