//! Integration tests for price sources

use chrono::NaiveDate;
use hist_vol::feed::{ChartApiConfig, ChartApiSource, PriceRequest, PriceSource};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned HTTP response on a local port
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{}", addr)
}

fn source(base_url: String) -> ChartApiSource {
    ChartApiSource::with_config(ChartApiConfig {
        base_url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn request() -> PriceRequest {
    PriceRequest::new(
        "ETH-USD",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
}

#[tokio::test]
async fn test_chart_api_fetch() {
    let body = r#"{"chart":{"result":[{"timestamp":[1704067200,1704153600,1704240000,1704326400],"indicators":{"quote":[{"close":[2352.0,2355.3,2210.1,2268.9]}]}}],"error":null}}"#;
    let base_url = serve_once("200 OK", body).await;

    let series = source(base_url).fetch(&request()).await.unwrap();
    assert_eq!(series.symbol(), "ETH-USD");
    assert_eq!(series.closes(), vec![2268.9, 2210.1, 2355.3, 2352.0]);
}

#[tokio::test]
async fn test_chart_api_http_error() {
    let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#;
    let base_url = serve_once("404 Not Found", body).await;

    let err = source(base_url).fetch(&request()).await.unwrap_err();
    assert!(err.to_string().contains("404"));
}
