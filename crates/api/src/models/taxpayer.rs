//! Taxpayer records and the taxpayer aggregate.

use serde::Serialize;

use invoice_registry_core::TaxpayerCode;

use super::{Address, Invoice};

/// A registered taxpayer.
///
/// Keyed by its natural registration code; `tax_id` is the national
/// tax-registration number and is stored as given, not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Taxpayer {
    pub taxpayer_code: TaxpayerCode,
    pub trade_name: Option<String>,
    pub tax_id: String,
}

/// A taxpayer together with its owned addresses and invoices.
///
/// Assembled by the aggregate-composition queries; the children are fetched
/// with two additional lookups keyed on `taxpayer_code`, never joined.
#[derive(Debug, Clone, Serialize)]
pub struct TaxpayerProfile {
    #[serde(flatten)]
    pub taxpayer: Taxpayer,
    pub addresses: Vec<Address>,
    pub invoices: Vec<Invoice>,
}
