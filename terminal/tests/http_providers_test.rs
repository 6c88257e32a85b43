//! HTTP client tests against a local mock server

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use riskterm_terminal::{
    providers::{FmpClient, HttpRiskBackend, IdentifierResolver, MarketDataProvider, OpenFigiResolver, RiskBackend},
    BackendConfig, MarketDataConfig, PortfolioRequest, ResolverConfig, Symbol, TerminalError, VarResponse,
};

fn fmp_client(server: &MockServer) -> FmpClient {
    FmpClient::new(MarketDataConfig {
        base_url: server.uri(),
        api_key: Some("test-key".to_string()),
        ..Default::default()
    })
    .unwrap()
}

fn backend(server: &MockServer) -> HttpRiskBackend {
    HttpRiskBackend::new(BackendConfig {
        base_url: server.uri(),
        ..Default::default()
    })
    .unwrap()
}

fn portfolio_request() -> PortfolioRequest {
    PortfolioRequest {
        symbols: vec![Symbol::new("AAPL"), Symbol::new("MSFT")],
        weights: vec![60.0, 40.0],
    }
}

#[tokio::test]
async fn test_fmp_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/profile/AAPL"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"symbol": "AAPL", "companyName": "Apple Inc.", "price": 189.5, "mktCap": 2.95e12}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/profile/ZZZZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = fmp_client(&server);

    let profile = client.profile(&Symbol::new("AAPL")).await.unwrap().unwrap();
    assert_eq!(profile.company_name, "Apple Inc.");
    assert_eq!(profile.price, 189.5);

    assert!(client.profile(&Symbol::new("ZZZZ")).await.unwrap().is_none());
}

#[tokio::test]
async fn test_fmp_historical_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/historical-price-full/AAPL"))
        .and(query_param("serietype", "line"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "symbol": "AAPL",
            "historical": [
                {"date": "2024-01-04", "close": 181.91},
                {"date": "2024-01-03", "close": 184.25},
                {"date": "2024-01-02", "close": 185.64}
            ]
        })))
        .mount(&server)
        .await;

    let series = fmp_client(&server)
        .historical_prices(&Symbol::new("AAPL"))
        .await
        .unwrap();

    assert_eq!(series.closes(), vec![185.64, 184.25, 181.91]);
    assert_eq!(series.latest().unwrap().close, 181.91);
}

#[tokio::test]
async fn test_fmp_unknown_symbol_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/historical-price-full/ZZZZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = fmp_client(&server).historical_prices(&Symbol::new("ZZZZ")).await;
    assert!(matches!(result, Err(TerminalError::SymbolNotFound(s)) if s == "ZZZZ"));
}

#[tokio::test]
async fn test_fmp_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Limit Reach"))
        .mount(&server)
        .await;

    let err = fmp_client(&server).profile(&Symbol::new("AAPL")).await.unwrap_err();
    match &err {
        TerminalError::ServiceError { status, message, .. } => {
            assert_eq!(*status, Some(429));
            assert_eq!(message, "Limit Reach");
        }
        other => panic!("Expected service error, got {:?}", other),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_backend_var_by_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calculate_var"))
        .and(body_json(json!({"symbols": ["AAPL", "MSFT"], "weights": [60.0, 40.0]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AAPL": {"VaR_1d_95": 0.021, "VaR_1d_99": 0.031},
            "MSFT": {"VaR_1d_95": 0.018, "VaR_1d_99": 0.027},
            "Portfolio": {"VaR_1d_95": 0.016, "VaR_1d_99": 0.024}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = backend(&server).calculate_var(&portfolio_request()).await.unwrap();

    assert_eq!(response.securities().count(), 2);
    assert_eq!(response.security(&Symbol::new("MSFT")).unwrap()["VaR_1d_99"], 0.027);
    assert_eq!(response.portfolio().unwrap()["VaR_1d_95"], 0.016);
}

#[tokio::test]
async fn test_backend_var_table() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calculate_var"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "VaR_Table": [{"horizon": "1 day(s)", "confidence_level": "95%", "VaR": 1.8}]
        })))
        .mount(&server)
        .await;

    let response = backend(&server).calculate_var(&portfolio_request()).await.unwrap();
    assert!(matches!(response, VarResponse::Table { ref var_table } if var_table.len() == 1));
}

#[tokio::test]
async fn test_backend_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/calculate_var"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "No valid price data"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/optimize_portfolio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Optimization failed"})))
        .mount(&server)
        .await;

    let backend = backend(&server);

    let err = backend.calculate_var(&portfolio_request()).await.unwrap_err();
    assert!(matches!(
        err,
        TerminalError::ServiceError { ref message, status: None, .. } if message == "No valid price data"
    ));
    assert!(!err.is_retryable());

    let err = backend.optimize_portfolio(&portfolio_request()).await.unwrap_err();
    assert!(matches!(err, TerminalError::ServiceError { ref message, .. } if message == "Optimization failed"));
}

#[tokio::test]
async fn test_backend_optimize_portfolio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/optimize_portfolio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weights": {"AAPL": 0.55, "MSFT": 0.45},
            "sharpe_ratio": 1.4
        })))
        .mount(&server)
        .await;

    let result = backend(&server).optimize_portfolio(&portfolio_request()).await.unwrap();
    assert_eq!(result["sharpe_ratio"], json!(1.4));
    assert_eq!(result["weights"]["AAPL"], json!(0.55));
}

#[tokio::test]
async fn test_backend_fetch_prices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fetch_prices"))
        .and(body_json(json!({"symbols": ["AAPL"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prices": {"AAPL": {"2024-01-02": 185.64, "2024-01-03": 184.25}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/fetch_prices"))
        .and(body_json(json!({"symbols": ["ZZZZ"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prices": {}})))
        .mount(&server)
        .await;

    let backend = backend(&server);

    let table = backend.fetch_prices(&[Symbol::new("AAPL")]).await.unwrap();
    let rows = table.recent_rows(&[Symbol::new("AAPL")], 100);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].closes, vec![Some(184.25)]);

    let result = backend.fetch_prices(&[Symbol::new("ZZZZ")]).await;
    assert!(matches!(result, Err(TerminalError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_backend_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = backend(&server).calculate_var(&portfolio_request()).await.unwrap_err();
    assert!(matches!(err, TerminalError::ServiceError { status: Some(502), .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_openfigi_resolves_isin() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mapping"))
        .and(header("X-OPENFIGI-APIKEY", "figi-key"))
        .and(body_json(json!([{"idType": "ID_ISIN", "idValue": "US0378331005"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"data": [
                {"figi": "BBG000B9XRY4", "ticker": "AAPL", "exchCode": "US"},
                {"figi": "BBG000B9Y5X2", "ticker": "AAPL", "exchCode": "UW"}
            ]}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/mapping"))
        .and(body_json(json!([{"idType": "ID_ISIN", "idValue": "DE0000000009"}])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"warning": "No identifier found."}
        ])))
        .mount(&server)
        .await;

    let resolver = OpenFigiResolver::new(ResolverConfig {
        base_url: server.uri(),
        api_key: Some("figi-key".to_string()),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        resolver.resolve_isin("US0378331005").await.unwrap(),
        Some(Symbol::new("AAPL"))
    );
    assert_eq!(resolver.resolve_isin("DE0000000009").await.unwrap(), None);
}
