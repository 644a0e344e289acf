use crate::common;
use stock_info::BatchBuilder;

#[tokio::test]
async fn batch_fetches_all_symbols_in_input_order() {
    let server = common::setup_server();
    let (_cookie, _crumb) = common::mock_cookie_crumb(&server);

    let msft_qs = common::mock_quote_summary(&server, "MSFT", common::quote_summary_body("MSFT"));
    let aapl_qs = common::mock_quote_summary(&server, "AAPL", common::quote_summary_body("AAPL"));
    let msft_div = common::mock_chart(
        &server,
        "MSFT",
        common::chart_body_with_dividends(&[(1709164800, 0.75)]),
    );
    let aapl_div = common::mock_chart(
        &server,
        "AAPL",
        common::chart_body_with_dividends(&[(1707350400, 0.24)]),
    );

    let client = common::client_for(&server);
    let results = BatchBuilder::new(&client, ["MSFT", "AAPL"]).fetch().await;

    msft_qs.assert();
    aapl_qs.assert();
    msft_div.assert();
    aapl_div.assert();

    let keys: Vec<_> = results.keys().cloned().collect();
    assert_eq!(keys, ["MSFT", "AAPL"], "output keys follow input order");

    let msft = results["MSFT"].as_object().unwrap();
    assert!(msft.get("error").is_none(), "successful entries carry no error field");
    assert_eq!(msft["symbol"], "MSFT");
    assert_eq!(msft["regularMarketPrice"], 190.5);
    assert_eq!(msft["last_4_dividends"]["2024-02-29"], 0.75);

    let aapl = results["AAPL"].as_object().unwrap();
    assert_eq!(aapl["last_4_dividends"]["2024-02-08"], 0.24);
}

#[tokio::test]
async fn dividends_can_be_disabled() {
    let server = common::setup_server();
    let (_cookie, _crumb) = common::mock_cookie_crumb(&server);
    let qs = common::mock_quote_summary(&server, "AAPL", common::quote_summary_body("AAPL"));

    let client = common::client_for(&server);
    let results = BatchBuilder::new(&client, ["AAPL"])
        .dividends(false)
        .fetch()
        .await;

    qs.assert();
    let aapl = results["AAPL"].as_object().unwrap();
    assert!(aapl.get("last_4_dividends").is_none());
    assert_eq!(aapl["symbol"], "AAPL");
}
