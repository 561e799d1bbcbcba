//! Invoice Registry API - HTTP service over the fiscal records database.
//!
//! Exposes a fixed `PostgreSQL` schema of tax-invoice records (taxpayers,
//! addresses, invoices) through a JSON query/mutation API. Every operation
//! translates a structured request into a parameterized SQL statement,
//! executes it against a shared connection pool, maps rows to typed records,
//! and logs statement text, bound parameters, and execution duration.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`db`] - Connection pool, repositories, and statement building
//! - [`error`] - Unified application error type
//! - [`logging`] - Tracing setup including the rolling SQL audit log
//! - [`middleware`] - Request audit middleware
//! - [`models`] - Domain records and row mapping
//! - [`routes`] - HTTP route handlers
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
