//! Invoice records, search filters, and result pages.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use invoice_registry_core::{InvoiceId, TaxpayerCode};

/// A billing document tied to a taxpayer.
///
/// `invoice_id` and `issue_date` are assigned by the database at insertion;
/// callers always see the generated values, never client-guessed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Invoice {
    pub invoice_id: InvoiceId,
    pub taxpayer_code: TaxpayerCode,
    pub number: String,
    pub total_value: Decimal,
    pub issue_date: DateTime<Utc>,
}

/// Filter fields for the invoice search.
///
/// Each field is tri-state through `Option`: absent means "no constraint",
/// never "empty constraint". The statement builder appends one clause per
/// present field, in the declared order of the fields below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFilter {
    /// Exact invoice number match.
    pub number: Option<String>,
    /// Minimum total value (inclusive).
    pub min_total: Option<Decimal>,
    /// Maximum total value (inclusive).
    pub max_total: Option<Decimal>,
    /// Minimum issue date (inclusive).
    pub issued_from: Option<DateTime<Utc>>,
    /// Maximum issue date (inclusive).
    pub issued_to: Option<DateTime<Utc>>,
    /// Exact owning-taxpayer match.
    pub taxpayer_code: Option<TaxpayerCode>,
}

impl InvoiceFilter {
    /// Returns true if no filter field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.min_total.is_none()
            && self.max_total.is_none()
            && self.issued_from.is_none()
            && self.issued_to.is_none()
            && self.taxpayer_code.is_none()
    }
}

/// One page of an invoice search result.
#[derive(Debug, Clone, Serialize)]
pub struct InvoicePage {
    /// Total row count across the whole invoice table.
    ///
    /// Deliberately not the filtered count - the count statement ignores the
    /// active filter, matching the established client contract.
    pub total_records: i64,
    /// Cursor for the next page: the last row's `invoice_id`, or `None` when
    /// the page is empty.
    pub next_cursor: Option<InvoiceId>,
    /// The page rows, ordered strictly ascending by `invoice_id`.
    pub invoices: Vec<Invoice>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_invoice() -> Invoice {
        Invoice {
            invoice_id: InvoiceId::new(2),
            taxpayer_code: TaxpayerCode::parse("270000011").unwrap(),
            number: "NF-0002".to_string(),
            total_value: Decimal::new(25050, 2),
            issue_date: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_total_value_serializes_as_string() {
        let json = serde_json::to_value(sample_invoice()).unwrap();
        assert_eq!(json["total_value"], "250.50");
    }

    #[test]
    fn test_empty_filter() {
        assert!(InvoiceFilter::default().is_empty());
        let filter = InvoiceFilter {
            min_total: Some(Decimal::new(200, 0)),
            ..InvoiceFilter::default()
        };
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_page_cursor_serialization() {
        let page = InvoicePage {
            total_records: 10,
            next_cursor: Some(InvoiceId::new(2)),
            invoices: vec![sample_invoice()],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["total_records"], 10);
        assert_eq!(json["next_cursor"], 2);
        assert_eq!(json["invoices"].as_array().unwrap().len(), 1);
    }
}
