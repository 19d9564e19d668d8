//! `SendGridClient` against a loopback HTTP stub.

mod common;

use common::{closed_port, stub};
use sendgrid_mcp_client::{DeliveryClient, DeliveryError, SendGridClient};
use sendgrid_mcp_core::{Config, EmailRequest, validate_email_request};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

fn client(base_url: &str) -> SendGridClient {
    let config = Config::builder()
        .api_key("SG.test-key")
        .from_email("noreply@example.com")
        .api_base_url(base_url)
        .build()
        .unwrap();
    SendGridClient::new(&config).unwrap()
}

fn request() -> EmailRequest {
    validate_email_request(&json!({
        "to": "user@example.com",
        "subject": "Test",
        "text": "Plain",
        "html": "<p>Rich</p>",
    }))
    .unwrap()
}

#[tokio::test]
async fn test_accepted_message_returns_receipt() {
    let (base_url, server) =
        stub("202 Accepted", "X-Message-Id: test-message-id-123\r\n", "").await;

    let receipt = client(&base_url).send(&request()).await.unwrap();
    assert_eq!(receipt.status_code, 202);
    assert_eq!(receipt.message_id, "test-message-id-123");

    let captured = server.await.unwrap();
    assert!(captured.head.starts_with("POST /v3/mail/send HTTP/1.1"));
    assert_eq!(captured.header("authorization"), Some("Bearer SG.test-key"));
    assert!(
        captured
            .header("content-type")
            .is_some_and(|v| v.starts_with("application/json"))
    );
    assert_eq!(
        captured.body,
        json!({
            "personalizations": [{ "to": [{ "email": "user@example.com" }] }],
            "from": { "email": "noreply@example.com" },
            "subject": "Test",
            "content": [
                { "type": "text/plain", "value": "Plain" },
                { "type": "text/html", "value": "<p>Rich</p>" },
            ],
        })
    );
}

#[tokio::test]
async fn test_missing_message_id_header_is_unknown() {
    let (base_url, server) = stub("202 Accepted", "", "").await;

    let receipt = client(&base_url).send(&request()).await.unwrap();
    assert_eq!(receipt.status_code, 202);
    assert_eq!(receipt.message_id, "unknown");

    server.await.unwrap();
}

#[tokio::test]
async fn test_rejection_carries_status_and_first_message() {
    let (base_url, server) = stub(
        "400 Bad Request",
        "Content-Type: application/json\r\n",
        r#"{"errors":[{"message":"Invalid recipient","field":"personalizations.0.to"},{"message":"second"}]}"#,
    )
    .await;

    let err = client(&base_url).send(&request()).await.unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Provider {
            status: 400,
            message: Some("Invalid recipient".to_string()),
        }
    );

    server.await.unwrap();
}

#[tokio::test]
async fn test_rejection_with_unparseable_body() {
    let (base_url, server) = stub(
        "500 Internal Server Error",
        "Content-Type: text/html\r\n",
        "<html>oops</html>",
    )
    .await;

    let err = client(&base_url).send(&request()).await.unwrap_err();
    assert_eq!(
        err,
        DeliveryError::Provider {
            status: 500,
            message: None,
        }
    );

    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let base_url = closed_port().await;

    let err = client(&base_url).send(&request()).await.unwrap_err();
    assert!(err.is_transport_error(), "unexpected error: {err:?}");
    assert_eq!(err.status(), None);
    assert!(!err.to_string().contains("SG.test-key"));
}

#[tokio::test]
async fn test_slow_provider_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let _captured = common::read_request(&mut stream).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let config = Config::builder()
        .api_key("SG.test-key")
        .from_email("noreply@example.com")
        .api_base_url(base_url)
        .request_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    let client = SendGridClient::new(&config).unwrap();

    let err = client.send(&request()).await.unwrap_err();
    assert_eq!(err, DeliveryError::Timeout { duration_secs: 1 });

    server.abort();
}

#[tokio::test]
async fn test_unusable_api_key_is_unexpected_error() {
    let config = Config::builder()
        .api_key("SG.bad\nkey")
        .from_email("noreply@example.com")
        .api_base_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    let client = SendGridClient::new(&config).unwrap();

    let err = client.send(&request()).await.unwrap_err();
    assert!(
        matches!(err, DeliveryError::Unexpected { .. }),
        "unexpected error: {err:?}"
    );
    assert!(!err.to_string().contains("SG.bad"));
}
