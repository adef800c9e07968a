//! Core client logic.
//!
//! This module contains:
//! - Controller: the request lifecycle state machine

pub mod controller;

// Re-export commonly used types
pub use controller::{Controller, Rejected, Ticket, CANCELLED};
