//! Taxpayer code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TaxpayerCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum TaxpayerCodeError {
    /// The input string is empty.
    #[error("taxpayer code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("taxpayer code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace.
    #[error("taxpayer code cannot contain whitespace")]
    ContainsWhitespace,
}

/// A taxpayer registration code.
///
/// The natural key of a taxpayer record. The registry treats the code as an
/// opaque identifier assigned by the state registration authority; it is not
/// interpreted beyond the structural checks below.
///
/// ## Constraints
///
/// - Length: 1-32 characters
/// - No whitespace
///
/// ## Examples
///
/// ```
/// use invoice_registry_core::TaxpayerCode;
///
/// assert!(TaxpayerCode::parse("270000011").is_ok());
///
/// assert!(TaxpayerCode::parse("").is_err());          // empty
/// assert!(TaxpayerCode::parse("27 000").is_err());    // whitespace
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaxpayerCode(String);

impl TaxpayerCode {
    /// Maximum length of a taxpayer code.
    pub const MAX_LENGTH: usize = 32;

    /// Parse a `TaxpayerCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 32 characters
    /// - Contains whitespace
    pub fn parse(s: &str) -> Result<Self, TaxpayerCodeError> {
        if s.is_empty() {
            return Err(TaxpayerCodeError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(TaxpayerCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(TaxpayerCodeError::ContainsWhitespace);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `TaxpayerCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaxpayerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaxpayerCode {
    type Err = TaxpayerCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TaxpayerCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for TaxpayerCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TaxpayerCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for TaxpayerCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert!(TaxpayerCode::parse("270000011").is_ok());
        assert!(TaxpayerCode::parse("270000099").is_ok());
        assert!(TaxpayerCode::parse("ISENTO").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            TaxpayerCode::parse(""),
            Err(TaxpayerCodeError::Empty)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "2".repeat(33);
        assert!(matches!(
            TaxpayerCode::parse(&long),
            Err(TaxpayerCodeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_whitespace() {
        assert!(matches!(
            TaxpayerCode::parse("27 0000"),
            Err(TaxpayerCodeError::ContainsWhitespace)
        ));
        assert!(matches!(
            TaxpayerCode::parse("270000\t"),
            Err(TaxpayerCodeError::ContainsWhitespace)
        ));
    }

    #[test]
    fn test_display() {
        let code = TaxpayerCode::parse("270000011").unwrap();
        assert_eq!(format!("{code}"), "270000011");
    }

    #[test]
    fn test_serde_roundtrip() {
        let code = TaxpayerCode::parse("270000011").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"270000011\"");

        let parsed: TaxpayerCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_from_str() {
        let code: TaxpayerCode = "270000011".parse().unwrap();
        assert_eq!(code.as_str(), "270000011");
    }
}
