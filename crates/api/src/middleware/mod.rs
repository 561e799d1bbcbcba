//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing spans)
//! 2. Request audit (request id + method/path/status/duration log line)

pub mod request_audit;

pub use request_audit::{REQUEST_ID_HEADER, request_audit_middleware};
