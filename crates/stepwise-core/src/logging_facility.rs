//! Structured logging facility for stepwise
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   that take the run context explicitly
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use stepwise_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(ctx, op, ...)` - Log operation start
//! - `log_op_end!(ctx, op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(ctx, op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
