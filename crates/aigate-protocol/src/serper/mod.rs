//! Wire types for the Serper web-search API.

pub mod search;
