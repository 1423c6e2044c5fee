use async_trait::async_trait;

use super::error::DialogError;
use super::types::{DialogRequest, DialogResponse};

/// Dialog backend interface
#[async_trait]
pub trait DialogApi: Send + Sync {
    /// Build a request for `query` carrying this client's credentials
    fn create_request(&self, query: &str) -> DialogRequest;

    /// Send a request and wait for the decoded reply
    ///
    /// Resolves once the backend has answered or the call has failed; there is
    /// no retry.
    async fn send(&self, request: DialogRequest) -> Result<DialogResponse, DialogError>;
}
