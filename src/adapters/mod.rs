//! Adapter interfaces for the verification service.
//!
//! The controller only talks to the service through [`Backend`], so the
//! transport can be swapped (HTTP in production, scripted fakes in tests).

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::VerificationResult;

// Re-export the HTTP adapter
pub use http::HttpBackend;

/// Ways a submission can fail once it has left the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No response was received (connection refused, DNS, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// A response arrived but its status is not a success
    #[error("API returned {status}")]
    Protocol { status: u16 },

    /// A success response whose body is not a verification object
    #[error("Failed to parse verification response: {0}")]
    Malformed(String),
}

/// Trait for verification service backends
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Ask the service to answer and verify `query`
    async fn ask(&self, query: &str) -> Result<VerificationResult, BackendError>;

    /// Check that the service is reachable; returns its greeting
    async fn health_check(&self) -> Result<String, BackendError>;
}
