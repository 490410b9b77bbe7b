//! Structured logging facility for ctxdrift
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use ctxdrift_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Every engine endpoint brackets its work with `log_op_start!` and either
//! `log_op_end!` or `log_op_error!`, so one request yields exactly one
//! start/end pair in the log stream.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
