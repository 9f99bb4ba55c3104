pub mod http;
pub mod routes;

use async_trait::async_trait;

use crate::app::Result;

/// A raw API response. Non-2xx statuses are returned here rather than as
/// errors; only transport-level failures (connection, TLS, timeout) surface
/// as `Err`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Request-signing hook applied before dispatch. The engine treats signing
/// as opaque middleware: the signer returns extra headers for the request.
pub trait RequestSigner: Send + Sync {
    fn sign(&self, method: &str, url: &str) -> Vec<(String, String)>;
}

/// No-op signer for unauthenticated use and tests.
pub struct NoSigner;

impl RequestSigner for NoSigner {
    fn sign(&self, _method: &str, _url: &str) -> Vec<(String, String)> {
        Vec::new()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<ApiResponse>;

    async fn post_form(&self, url: &str, fields: &[(String, String)]) -> Result<ApiResponse>;

    /// Multipart POST, used by the touch-marking side channel.
    async fn post_multipart(&self, url: &str, fields: &[(String, String)]) -> Result<ApiResponse>;
}
