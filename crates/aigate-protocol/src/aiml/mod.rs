//! Wire types for the AIML API family (OpenAI-compatible chat completions
//! plus image generations on the same host).

pub mod chat_completions;
pub mod image_generation;
