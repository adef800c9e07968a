//! halldetect - Client for an AI hallucination verification service
//!
//! Sends a natural-language question to a remote verification service and
//! presents its judgement of whether the AI-generated answer can be trusted.
//!
//! # Architecture
//!
//! - A single controller owns the request state and is its only writer
//! - At most one request is in flight; re-entrant submissions are refused
//! - Display values are derived from the state on every render, never stored
//!
//! # Modules
//!
//! - `adapters`: Backend trait and the HTTP implementation
//! - `core`: Request lifecycle controller
//! - `domain`: Data structures (RequestState, VerificationResult)
//! - `interpret`: Status classification and metric normalization
//! - `samples`: Example questions
//! - `config`: Backend address and timeout resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Verify a question
//! halldetect ask "What is the capital of France?"
//!
//! # Use a different backend
//! HALLDETECT_API_BASE=http://10.0.0.5:5000 halldetect ask --example 3
//!
//! # Interactive session
//! halldetect interactive
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod interpret;
pub mod samples;

// Re-export main types at crate root for convenience
pub use crate::adapters::{Backend, BackendError, HttpBackend};
pub use crate::core::{Controller, Rejected, Ticket};
pub use crate::domain::{RequestState, StatusCode, VerificationResult, VerificationVerdict};
pub use crate::interpret::{classify, normalize_percent, Interpretation, StatusPresentation};
