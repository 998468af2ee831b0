use localpay::domain::amount::Amount;
use localpay::domain::ports::{
    PaymentGateway, PaymentGatewayBox, PaymentRequest, PaymentResponse, TransactionLedger,
    TransactionLedgerBox,
};
use localpay::domain::purchase::PurchaseParameters;
use localpay::domain::transaction::{NewGatewayTransaction, TransactionStatus};
use localpay::infrastructure::driver::Driver;
use localpay::infrastructure::in_memory::InMemoryTransactionLedger;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_gateway_and_ledger_as_trait_objects() {
    let gateway: PaymentGatewayBox = Driver::LocalDummy.create();
    let ledger: TransactionLedgerBox = Box::new(InMemoryTransactionLedger::new());

    // Verify Send + Sync by spawning tasks
    let gateway_handle = tokio::spawn(async move {
        let request = gateway.purchase(
            PurchaseParameters::new()
                .with_amount(Amount::new(dec!(100.0)).unwrap())
                .with_transaction_id("TXN-1"),
        );
        let response = request.send().await.unwrap();
        (
            response.is_successful(),
            response.transaction_reference().map(str::to_string),
        )
    });

    let ledger_handle = tokio::spawn(async move {
        let id = ledger
            .create_pending(NewGatewayTransaction {
                order_id: "1".to_string(),
                gateway_slug: "local".to_string(),
                driver: "LocalDummy".to_string(),
                provider_reference: Some("TXN-1".to_string()),
                request_payload: serde_json::json!({}),
                response_payload: serde_json::json!({}),
                metadata: serde_json::json!({}),
            })
            .await
            .unwrap();
        ledger.get(id).await.unwrap().unwrap()
    });

    let (successful, reference) = gateway_handle.await.unwrap();
    assert!(successful);
    assert_eq!(reference.as_deref(), Some("TXN-1"));

    let stored = ledger_handle.await.unwrap();
    assert_eq!(stored.status, TransactionStatus::Pending);
}

#[tokio::test]
async fn test_configure_boxed_gateway_by_name() {
    let mut gateway = Driver::LocalDummy.create();
    assert!(gateway.set_parameter("token", "abc"));
    assert!(gateway.set_parameter("currency", "USD"));
    assert!(!gateway.set_parameter("secret_key", "s"));

    assert_eq!(gateway.token(), "abc");
    assert_eq!(gateway.currency(), "USD");
}
