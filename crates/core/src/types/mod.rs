//! Core types for Invoice Registry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod taxpayer_code;

pub use id::*;
pub use taxpayer_code::{TaxpayerCode, TaxpayerCodeError};
