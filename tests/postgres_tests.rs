//! Integration tests for the PostgreSQL invoice service
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! # Test isolation
//!
//! All tests share a single PostgreSQL container (via `OnceLock`). Each test
//! creates a fresh `PgPool` and truncates the table before running.

#![cfg(feature = "postgres")]

mod harness;

use dashboard::prelude::*;
use dashboard::storage::postgres::{connect, ensure_schema};
use harness::*;
use sqlx::PgPool;
use std::sync::OnceLock;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

/// Holds the container handle (keeps it alive) and the connection URL.
struct PgTestEnv {
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

/// Initialized once per test binary; outlives the per-test tokio runtimes.
static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = connect(&url, 1).await.expect("connect for schema setup");
    ensure_schema(&pool).await.expect("create invoices table");
    pool.close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

async fn fresh_pool() -> PgPool {
    let env = init_pg_env().await;
    let pool = connect(&env.connection_url, 2).await.unwrap();
    sqlx::query("TRUNCATE invoices").execute(&pool).await.unwrap();
    pool
}

async fn setup() -> (PostgresInvoiceService, InvoiceActions, Arc<RecordingRevalidator>) {
    let service = PostgresInvoiceService::new(fresh_pool().await);
    let revalidator = Arc::new(RecordingRevalidator::new());
    let actions = InvoiceActions::new(Arc::new(service.clone()), revalidator.clone())
        .with_clock(Arc::new(FixedClock(date(2024, 3, 15))));
    (service, actions, revalidator)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let pool = fresh_pool().await;
    ensure_schema(&pool).await.unwrap();
    ensure_schema(&pool).await.unwrap();
}

#[tokio::test]
async fn test_create_persists_cents_and_today() {
    let (service, actions, revalidator) = setup().await;

    let outcome = actions
        .create(&invoice_form(CUSTOMER_ID, "9.99", "pending"))
        .await
        .unwrap();
    assert_eq!(outcome.redirect().map(Redirect::location), Some(INVOICES_ROUTE));

    let rows = service.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].customer_id, CUSTOMER_ID);
    assert_eq!(rows[0].amount, 999);
    assert_eq!(rows[0].status, InvoiceStatus::Pending);
    assert_eq!(rows[0].date, date(2024, 3, 15));
    assert!(uuid::Uuid::parse_str(rows[0].id.as_str()).is_ok());
    assert_eq!(revalidator.paths(), vec![INVOICES_ROUTE.to_string()]);
}

#[tokio::test]
async fn test_update_overwrites_only_mutable_columns() {
    let (service, actions, _) = setup().await;

    actions
        .create(&invoice_form(CUSTOMER_ID, "10", "pending"))
        .await
        .unwrap();
    let created = service.list().await.unwrap().remove(0);

    let other_customer = "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa";
    actions
        .update(&created.id, &invoice_form(other_customer, "50", "paid"))
        .await
        .unwrap();

    let stored = service.get(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.id, created.id);
    assert_eq!(stored.date, created.date);
    assert_eq!(stored.customer_id, other_customer);
    assert_eq!(stored.amount, 5000);
    assert_eq!(stored.status, InvoiceStatus::Paid);
}

#[tokio::test]
async fn test_update_of_unknown_id_affects_no_rows() {
    let (service, _, _) = setup().await;

    let affected = service
        .update(
            &InvoiceId::generate(),
            InvoiceChanges {
                customer_id: CUSTOMER_ID.to_string(),
                amount_in_cents: 100,
                status: InvoiceStatus::Paid,
            },
        )
        .await
        .unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn test_malformed_customer_id_fails_create_with_message() {
    let (service, actions, revalidator) = setup().await;

    let outcome = actions
        .create(&invoice_form("not-a-uuid", "10", "paid"))
        .await
        .unwrap();

    assert_eq!(outcome, CreateOutcome::Failed(ActionMessage::new(DB_ERROR_MESSAGE)));
    assert!(service.list().await.unwrap().is_empty());
    assert!(revalidator.paths().is_empty());
}

#[tokio::test]
async fn test_malformed_id_fails_update_with_storage_error() {
    let (_, actions, _) = setup().await;

    let err = actions
        .update(&InvoiceId::new("42"), &invoice_form(CUSTOMER_ID, "50", "paid"))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Storage(StorageError::QueryError { .. })));
}

#[tokio::test]
async fn test_values_are_bound_not_spliced() {
    let (service, actions, _) = setup().await;

    actions
        .create(&invoice_form(CUSTOMER_ID, "1", "pending"))
        .await
        .unwrap();

    // A quote in the status would break a spliced statement; it is rejected by
    // validation before reaching the store, and the row count stays intact.
    let err = actions
        .create(&invoice_form(CUSTOMER_ID, "1", "paid'; DROP TABLE invoices; --"))
        .await
        .unwrap_err();
    assert!(err.has_field("status"));
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_with_malformed_id_is_none() {
    let (service, _, _) = setup().await;
    assert!(service.get(&InvoiceId::new("42")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let pool = fresh_pool().await;
    let service = PostgresInvoiceService::new(pool);

    for (day, amount) in [(1, 100), (3, 300), (2, 200)] {
        service
            .insert(NewInvoice {
                customer_id: CUSTOMER_ID.to_string(),
                amount_in_cents: amount,
                status: InvoiceStatus::Pending,
                date: date(2024, 1, day),
            })
            .await
            .unwrap();
    }

    let amounts: Vec<i64> = service.list().await.unwrap().iter().map(|i| i.amount).collect();
    assert_eq!(amounts, vec![300, 200, 100]);
}
