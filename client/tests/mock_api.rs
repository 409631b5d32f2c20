//! End-to-end exercise of the client in mock mode: login, listing,
//! creation, lookups, and the daily balance report, all served from an
//! in-memory store with no network involved.

use cashflow_client::{ApiClient, ApiError, ClientConfig, MockTransactionStore};
use shared::{LoginCredentials, TransactionInput, TransactionType};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

fn mock_client() -> ApiClient {
    init_tracing();
    ApiClient::new(ClientConfig::new("http://unused.invalid", true))
}

#[tokio::test]
async fn full_mock_session() {
    let client = mock_client();

    let login = client
        .login(&LoginCredentials {
            username: "demo".to_string(),
            password: "demo".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(login.token_type, "Bearer");

    let transactions = client.get_transactions().await.unwrap();
    assert_eq!(transactions.len(), 5);

    let created = client
        .create_transaction(TransactionInput {
            description: Some("Cinema".to_string()),
            amount: 45.0,
            transaction_type: TransactionType::Debit,
            origin: Some("Downtown mall".to_string()),
            transaction_date: Some("2025-05-16T20:00:00".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 6);

    let fetched = client.get_transaction(6).await.unwrap();
    assert_eq!(fetched.description.as_deref(), Some("Cinema"));

    let transactions = client.get_transactions().await.unwrap();
    assert_eq!(transactions.len(), 6);
}

#[tokio::test]
async fn lookup_failure_is_a_domain_error() {
    let client = mock_client();
    match client.get_transaction(404).await {
        Err(ApiError::TransactionNotFound(404)) => {}
        other => panic!("expected TransactionNotFound, got {:?}", other.map(|t| t.id)),
    }
}

#[tokio::test]
async fn daily_balance_report_over_the_fixture() {
    let client = mock_client();

    let report = client
        .get_daily_balance_period("2025-05-05", "2025-05-15")
        .await
        .unwrap();
    assert_eq!(report.len(), 11);

    // The balance threads forward through days with and without movement
    for window in report.windows(2) {
        assert_eq!(window[1].previous_balance, window[0].final_balance);
    }

    let single = client.get_daily_balance("2025-05-10").await.unwrap();
    assert_eq!(single.total_credits, 5000.0);

    // Inverted ranges are permissive: an empty report, not an error
    let inverted = client
        .get_daily_balance_period("2025-05-15", "2025-05-05")
        .await
        .unwrap();
    assert!(inverted.is_empty());
}

#[tokio::test]
async fn paginated_listing_in_mock_mode() {
    let client = mock_client();

    let page = client.get_transactions_page(1, 2).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 3);

    let last = client.get_transactions_page(3, 2).await.unwrap();
    assert_eq!(last.items.len(), 1);

    let balances = client.get_daily_balances_page(1, 4).await.unwrap();
    assert_eq!(balances.items.len(), 4);
}

#[tokio::test]
async fn independent_clients_do_not_share_mock_state() {
    let first = mock_client();
    let second = ApiClient::with_mock_store(MockTransactionStore::seeded());

    first
        .create_transaction(TransactionInput {
            description: None,
            amount: 1.0,
            transaction_type: TransactionType::Credit,
            origin: None,
            transaction_date: None,
        })
        .await
        .unwrap();

    assert_eq!(first.get_transactions().await.unwrap().len(), 6);
    assert_eq!(second.get_transactions().await.unwrap().len(), 5);
}
