pub mod connection;
pub mod endpoints;

use std::future::Future;

pub use connection::ApiConnectionError;
pub use endpoints::{ChatMessage, Provider};

/// A chat model that turns prompt messages into a raw text reply.
pub trait MenuLlm: Send + Sync {
    fn complete(
        &self,
        messages: Vec<ChatMessage>,
    ) -> impl Future<Output = Result<String, ApiConnectionError>> + Send;
}
