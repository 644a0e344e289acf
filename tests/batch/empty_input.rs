use crate::common;
use stock_info::BatchBuilder;

// An empty argument to the binary splits into a single empty symbol; it must
// produce an error entry under the empty key, not a crash or a request.

#[tokio::test]
async fn empty_symbol_is_rejected_without_a_request() {
    let server = common::setup_server();
    // No mocks registered: any request would fail the hit assertions below.
    let client = common::client_for(&server);

    let results = BatchBuilder::new(&client, [""]).fetch().await;

    assert_eq!(results.len(), 1);
    let entry = results[""].as_object().unwrap();
    let message = entry["error"].as_str().unwrap();
    assert!(!message.is_empty());
    assert!(message.contains("invalid symbol"));
}

#[tokio::test]
async fn whitespace_symbol_is_rejected_without_a_request() {
    let server = common::setup_server();
    let client = common::client_for(&server);

    let results = BatchBuilder::new(&client, ["   "]).fetch().await;

    let entry = results["   "].as_object().unwrap();
    assert!(entry["error"].as_str().unwrap().contains("invalid symbol"));
}
