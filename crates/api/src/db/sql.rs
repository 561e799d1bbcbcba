//! Statement building for the filtered, cursor-paginated invoice search.
//!
//! The fixed statements of the CRUD operations are plain SQL literals next
//! to the repository methods that run them; only the invoice search composes
//! its statement dynamically. The composition is rendered as a plain
//! [`SqlStatement`] value (text plus ordered bind list) so it can be tested
//! without a database.
//!
//! Clause order is fixed and depends only on which filter fields are
//! present, never on their content: exact number match, minimum total,
//! maximum total, minimum issue date, maximum issue date, exact taxpayer
//! code, then the cursor bound. Caller-supplied values never appear in the
//! statement text; everything is bound, including the page size.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use invoice_registry_core::InvoiceId;

use crate::models::InvoiceFilter;

/// Column list shared by every invoice `SELECT`.
pub(crate) const INVOICE_COLUMNS: &str =
    "invoice_id, taxpayer_code, number, total_value, issue_date";

/// A value bound to one `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
    Int(i32),
    BigInt(i64),
}

/// A SQL statement with positional placeholders and its bind values.
///
/// `binds[i]` is the value for placeholder `$(i + 1)`.
#[derive(Debug, Clone)]
pub struct SqlStatement {
    sql: String,
    binds: Vec<BindValue>,
}

impl SqlStatement {
    /// Start a statement from a fixed base fragment.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            sql: base.into(),
            binds: Vec::new(),
        }
    }

    /// Append a fixed SQL fragment.
    ///
    /// Fragments must be string literals from this module; caller-supplied
    /// values go through [`SqlStatement::push_bind`].
    pub fn push(&mut self, fragment: &str) {
        self.sql.push_str(fragment);
    }

    /// Append the next positional placeholder and record its bind value.
    pub fn push_bind(&mut self, value: BindValue) {
        self.binds.push(value);
        self.sql.push('$');
        self.sql.push_str(&self.binds.len().to_string());
    }

    /// The statement text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bind values, in placeholder order.
    #[must_use]
    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}

/// Build the filtered, paginated invoice search statement.
///
/// The base predicate is unconditionally true; each present filter field
/// appends exactly one `AND` clause in the fixed order documented on the
/// module. The cursor, when present, is an exclusive lower bound on
/// `invoice_id`; rows come back strictly ascending by `invoice_id` and
/// capped at `page_size` (bound, not inlined).
#[must_use]
pub fn invoice_search(
    filter: &InvoiceFilter,
    cursor: Option<InvoiceId>,
    page_size: i64,
) -> SqlStatement {
    let mut stmt = SqlStatement::new(format!(
        "SELECT {INVOICE_COLUMNS} FROM invoice WHERE TRUE"
    ));

    // Declared filter order; presence alone decides whether a clause is
    // appended, value content never does.
    if let Some(number) = &filter.number {
        stmt.push(" AND number = ");
        stmt.push_bind(BindValue::Text(number.clone()));
    }
    if let Some(min_total) = filter.min_total {
        stmt.push(" AND total_value >= ");
        stmt.push_bind(BindValue::Decimal(min_total));
    }
    if let Some(max_total) = filter.max_total {
        stmt.push(" AND total_value <= ");
        stmt.push_bind(BindValue::Decimal(max_total));
    }
    if let Some(issued_from) = filter.issued_from {
        stmt.push(" AND issue_date >= ");
        stmt.push_bind(BindValue::Timestamp(issued_from));
    }
    if let Some(issued_to) = filter.issued_to {
        stmt.push(" AND issue_date <= ");
        stmt.push_bind(BindValue::Timestamp(issued_to));
    }
    if let Some(taxpayer_code) = &filter.taxpayer_code {
        stmt.push(" AND taxpayer_code = ");
        stmt.push_bind(BindValue::Text(taxpayer_code.as_str().to_owned()));
    }

    if let Some(cursor) = cursor {
        stmt.push(" AND invoice_id > ");
        stmt.push_bind(BindValue::Int(cursor.as_i32()));
    }

    stmt.push(" ORDER BY invoice_id ASC LIMIT ");
    stmt.push_bind(BindValue::BigInt(page_size));

    stmt
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use invoice_registry_core::TaxpayerCode;

    fn base_sql() -> String {
        format!("SELECT {INVOICE_COLUMNS} FROM invoice WHERE TRUE")
    }

    #[test]
    fn test_empty_filter_builds_base_statement() {
        let stmt = invoice_search(&InvoiceFilter::default(), None, 50);
        assert_eq!(
            stmt.sql(),
            format!("{} ORDER BY invoice_id ASC LIMIT $1", base_sql())
        );
        assert_eq!(stmt.binds(), &[BindValue::BigInt(50)]);
    }

    #[test]
    fn test_full_filter_clause_order() {
        let filter = InvoiceFilter {
            number: Some("NF-0001".to_string()),
            min_total: Some(Decimal::new(100, 0)),
            max_total: Some(Decimal::new(500, 0)),
            issued_from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            issued_to: Some(Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()),
            taxpayer_code: Some(TaxpayerCode::parse("270000011").unwrap()),
        };
        let stmt = invoice_search(&filter, Some(InvoiceId::new(10)), 25);

        assert_eq!(
            stmt.sql(),
            format!(
                "{} AND number = $1 AND total_value >= $2 AND total_value <= $3 \
                 AND issue_date >= $4 AND issue_date <= $5 AND taxpayer_code = $6 \
                 AND invoice_id > $7 ORDER BY invoice_id ASC LIMIT $8",
                base_sql()
            )
        );
        assert_eq!(stmt.binds().len(), 8);
        assert_eq!(stmt.binds()[0], BindValue::Text("NF-0001".to_string()));
        assert_eq!(stmt.binds()[6], BindValue::Int(10));
        assert_eq!(stmt.binds()[7], BindValue::BigInt(25));
    }

    #[test]
    fn test_partial_filter_keeps_declared_order() {
        // Only max-total and taxpayer-code present; clause order must still
        // follow the declared field order, with placeholders renumbered.
        let filter = InvoiceFilter {
            max_total: Some(Decimal::new(500, 0)),
            taxpayer_code: Some(TaxpayerCode::parse("270000011").unwrap()),
            ..InvoiceFilter::default()
        };
        let stmt = invoice_search(&filter, None, 50);
        assert_eq!(
            stmt.sql(),
            format!(
                "{} AND total_value <= $1 AND taxpayer_code = $2 \
                 ORDER BY invoice_id ASC LIMIT $3",
                base_sql()
            )
        );
    }

    #[test]
    fn test_cursor_without_filter() {
        let stmt = invoice_search(&InvoiceFilter::default(), Some(InvoiceId::new(42)), 10);
        assert_eq!(
            stmt.sql(),
            format!(
                "{} AND invoice_id > $1 ORDER BY invoice_id ASC LIMIT $2",
                base_sql()
            )
        );
        assert_eq!(
            stmt.binds(),
            &[BindValue::Int(42), BindValue::BigInt(10)]
        );
    }

    #[test]
    fn test_values_never_inlined_into_sql() {
        let filter = InvoiceFilter {
            number: Some("'; DROP TABLE invoice; --".to_string()),
            min_total: Some(Decimal::new(20000, 2)),
            taxpayer_code: Some(TaxpayerCode::parse("270000011").unwrap()),
            ..InvoiceFilter::default()
        };
        let stmt = invoice_search(&filter, Some(InvoiceId::new(999)), 77);
        assert!(!stmt.sql().contains("DROP"));
        assert!(!stmt.sql().contains("270000011"));
        assert!(!stmt.sql().contains("200"));
        assert!(!stmt.sql().contains("999"));
        assert!(!stmt.sql().contains("77"));
    }

    #[test]
    fn test_zero_page_size_is_bound_not_special_cased() {
        let stmt = invoice_search(&InvoiceFilter::default(), None, 0);
        assert_eq!(stmt.binds(), &[BindValue::BigInt(0)]);
    }
}
