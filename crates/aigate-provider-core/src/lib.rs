pub mod error;
pub mod provider;
pub mod request;
pub mod response;

pub use error::ProviderError;
pub use provider::{CallContext, Provider, ProviderLookup};
pub use request::ProviderRequest;
pub use response::{ProviderResponse, StreamBody};
