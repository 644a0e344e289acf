use crate::common;
use httpmock::Method::GET;
use stock_info::dividends;

fn looks_like_date(s: &str) -> bool {
    s.len() == 10
        && s.chars()
            .enumerate()
            .all(|(i, c)| if matches!(i, 4 | 7) { c == '-' } else { c.is_ascii_digit() })
}

#[tokio::test]
async fn keeps_only_the_most_recent_payments() {
    let server = common::setup_server();
    let body = common::chart_body_with_dividends(&[
        (1646870400, 0.22), // 2022-03-10
        (1654732800, 0.23),
        (1662595200, 0.23),
        (1670457600, 0.23),
        (1678406400, 0.24),
        (1686182400, 0.24),
    ]);
    let chart = common::mock_chart(&server, "AAPL", body);

    let client = common::client_for(&server);
    let payments = dividends::fetch_last_dividends(&client, "AAPL", 4)
        .await
        .unwrap();

    chart.assert();
    assert_eq!(payments.len(), 4);
    assert!(payments.keys().all(|d| looks_like_date(d)));
    assert!(
        !payments.contains_key("2022-03-10"),
        "oldest payments are dropped"
    );
    let amounts: Vec<f64> = payments.values().map(|v| v.as_f64().unwrap()).collect();
    assert_eq!(amounts, [0.23, 0.23, 0.24, 0.24], "chronological order");
}

#[tokio::test]
async fn short_history_returns_what_exists() {
    let server = common::setup_server();
    let body = common::chart_body_with_dividends(&[(1678406400, 0.24), (1686182400, 0.24)]);
    let chart = common::mock_chart(&server, "NEWCO", body);

    let client = common::client_for(&server);
    let payments = dividends::fetch_last_dividends(&client, "NEWCO", 4)
        .await
        .unwrap();

    chart.assert();
    assert_eq!(payments.len(), 2, "no padding for short histories");
}

#[tokio::test]
async fn missing_events_yield_an_empty_map() {
    let server = common::setup_server();
    let chart = common::mock_chart(
        &server,
        "NODIV",
        r#"{"chart":{"result":[{"meta":{}}],"error":null}}"#.into(),
    );

    let client = common::client_for(&server);
    let payments = dividends::fetch_last_dividends(&client, "NODIV", 4)
        .await
        .unwrap();

    chart.assert();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn chart_error_envelope_maps_to_data_error() {
    let server = common::setup_server();
    let chart = server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/GONE");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#);
    });

    let client = common::client_for(&server);
    let err = dividends::fetch_last_dividends(&client, "GONE", 4)
        .await
        .unwrap_err();

    chart.assert();
    assert!(!err.is_transport());
    assert!(err.to_string().contains("No data found"));
}

#[tokio::test]
async fn http_status_error_is_transport() {
    let server = common::setup_server();
    let chart = server.mock(|when, then| {
        when.method(GET).path("/v8/finance/chart/FAIL");
        then.status(500).body("oops");
    });

    let client = common::client_for(&server);
    let err = dividends::fetch_last_dividends(&client, "FAIL", 4)
        .await
        .unwrap_err();

    chart.assert();
    match err {
        stock_info::FetchError::Status { status, url } => {
            assert_eq!(status, 500);
            assert!(url.contains("/v8/finance/chart/FAIL"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}
