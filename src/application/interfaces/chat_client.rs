use async_trait::async_trait;

use crate::domain::{ChatRequest, ChatResponse, DomainError, ServiceEndpoint};

/// Sends one chat completion request to a hosted model deployment.
///
/// Implementors own transport and wire format. The connection is passed per
/// call so that callers can validate configuration before any request is
/// attempted while still reusing one client for the whole process.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        connection: &ServiceEndpoint,
        request: &ChatRequest,
    ) -> Result<ChatResponse, DomainError>;
}
