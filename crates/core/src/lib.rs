//! Invoice Registry Core - Shared types library.
//!
//! This crate provides common types used across the Invoice Registry
//! components:
//! - `api` - HTTP service exposing the fiscal records database
//! - `integration-tests` - end-to-end tests against a live database
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and taxpayer codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
