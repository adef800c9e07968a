//! Domain types for the verification client.
//!
//! This module contains the core data structures:
//! - Query: eligibility and the request body
//! - Verification: the backend's response payload
//! - State: the request lifecycle state

pub mod query;
pub mod state;
pub mod verification;

// Re-export commonly used types
pub use query::{is_submittable, AskRequest};
pub use state::RequestState;
pub use verification::{StatusCode, VerificationResult, VerificationVerdict};
