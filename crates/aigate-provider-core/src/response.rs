use std::io;
use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;
use http::StatusCode;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send>>;

pub struct StreamBody {
    pub content_type: &'static str,
    pub stream: ByteStream,
}

impl StreamBody {
    pub fn new<S>(content_type: &'static str, stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, io::Error>> + Send + 'static,
    {
        Self {
            content_type,
            stream: Box::pin(stream),
        }
    }
}

impl std::fmt::Debug for StreamBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamBody")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Successful upstream result: either a buffered JSON body or a byte stream
/// to pipe through unmodified.
#[derive(Debug)]
pub enum ProviderResponse {
    Json { status: StatusCode, body: Bytes },
    Stream { status: StatusCode, body: StreamBody },
}

impl ProviderResponse {
    pub fn json(status: StatusCode, body: Bytes) -> Self {
        ProviderResponse::Json { status, body }
    }
}
