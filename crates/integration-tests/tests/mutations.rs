//! Mutation-outcome tests: not-found reporting and the non-cascading delete.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use invoice_registry_api::db::{AddressRepository, InvoiceRepository, TaxpayerRepository};
use invoice_registry_core::{AddressId, TaxpayerCode};
use invoice_registry_integration_tests::TestContext;
use rust_decimal::Decimal;

#[tokio::test]
#[ignore = "requires a live PostgreSQL database (REGISTRY_TEST_DATABASE_URL)"]
async fn test_updating_missing_address_reports_not_found_and_changes_nothing() {
    let ctx = TestContext::connect().await;
    ctx.purge_taxpayer("270000096").await;

    let addresses = AddressRepository::new(&ctx.pool);
    let code = TaxpayerCode::parse("270000096").unwrap();
    TaxpayerRepository::new(&ctx.pool)
        .create(&code, None, "33333333000133")
        .await
        .unwrap();
    addresses
        .create(&code, Some("Rua A, 1"), Some("Maceio"), Some("AL"))
        .await
        .unwrap();

    let before = ctx.count_rows_for("address", "270000096").await;

    let updated = addresses
        .update(
            AddressId::new(999_999),
            Some("Rua B, 2"),
            Some("Arapiraca"),
            Some("AL"),
        )
        .await
        .unwrap();
    assert!(!updated, "no row should match id 999999");

    let after = ctx.count_rows_for("address", "270000096").await;
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database (REGISTRY_TEST_DATABASE_URL)"]
async fn test_deleting_taxpayer_leaves_children_in_place() {
    // Known gap, asserted deliberately: ownership is a foreign-key
    // convention only, and deleting a taxpayer orphans its children.
    let ctx = TestContext::connect().await;
    ctx.purge_taxpayer("270000095").await;

    let taxpayers = TaxpayerRepository::new(&ctx.pool);
    let code = TaxpayerCode::parse("270000095").unwrap();
    taxpayers.create(&code, None, "44444444000144").await.unwrap();
    AddressRepository::new(&ctx.pool)
        .create(&code, Some("Rua C, 3"), None, None)
        .await
        .unwrap();
    InvoiceRepository::new(&ctx.pool)
        .create(&code, "NF-0100", Decimal::new(10000, 2))
        .await
        .unwrap();

    let deleted = taxpayers.delete(&code).await.unwrap();
    assert!(deleted);

    assert_eq!(ctx.count_rows_for("address", "270000095").await, 1);
    assert_eq!(ctx.count_rows_for("invoice", "270000095").await, 1);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database (REGISTRY_TEST_DATABASE_URL)"]
async fn test_insert_returns_generated_identity_and_timestamp() {
    let ctx = TestContext::connect().await;
    ctx.purge_taxpayer("270000094").await;

    let code = TaxpayerCode::parse("270000094").unwrap();
    TaxpayerRepository::new(&ctx.pool)
        .create(&code, None, "55555555000155")
        .await
        .unwrap();

    let invoice = InvoiceRepository::new(&ctx.pool)
        .create(&code, "NF-0200", Decimal::new(4999, 2))
        .await
        .unwrap();
    assert!(invoice.invoice_id.as_i32() > 0, "id assigned by the database");

    let address = AddressRepository::new(&ctx.pool)
        .create(&code, None, None, None)
        .await
        .unwrap();
    assert!(address.address_id.as_i32() > 0);
    assert!(address.street.is_none());
}
