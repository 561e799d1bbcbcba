//! Address records.

use serde::Serialize;

use invoice_registry_core::{AddressId, TaxpayerCode};

/// An address owned by a taxpayer.
///
/// `address_id` is assigned by the database at insertion and never changes.
/// The descriptive fields are all optional in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Address {
    pub address_id: AddressId,
    pub taxpayer_code: TaxpayerCode,
    pub street: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_numeric_id() {
        let address = Address {
            address_id: AddressId::new(12),
            taxpayer_code: TaxpayerCode::parse("270000011").unwrap(),
            street: Some("Rua das Flores, 100".to_string()),
            municipality: Some("Maceio".to_string()),
            state: Some("AL".to_string()),
        };
        let json = serde_json::to_value(address).unwrap();
        assert_eq!(json["address_id"], 12);
        assert_eq!(json["street"], "Rua das Flores, 100");
    }
}
