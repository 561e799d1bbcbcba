//! Domain models for the fiscal records database.
//!
//! Each model maps one row of its table; nullable columns land in `Option`
//! fields. Row mapping is pure type coercion - values from storage pass
//! through unvalidated.

pub mod address;
pub mod invoice;
pub mod taxpayer;

pub use address::Address;
pub use invoice::{Invoice, InvoiceFilter, InvoicePage};
pub use taxpayer::{Taxpayer, TaxpayerProfile};
