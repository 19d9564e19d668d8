//! `send_email` pipeline tests: dispatcher, real HTTP client, loopback
//! `SendGrid` stub.

mod common;

use common::{closed_port, stub};
use rmcp::model::CallToolResult;
use sendgrid_mcp_client::{DeliveryClient, SendGridClient};
use sendgrid_mcp_core::Config;
use sendgrid_mcp_server::Dispatcher;
use serde_json::json;
use std::sync::Arc;

fn dispatcher(base_url: &str) -> Dispatcher {
    let config = Config::builder()
        .api_key("SG.pipeline")
        .from_email("noreply@example.com")
        .api_base_url(base_url)
        .build()
        .unwrap();
    let client: Arc<dyn DeliveryClient> = Arc::new(SendGridClient::new(&config).unwrap());
    Dispatcher::new(client)
}

fn text(result: &CallToolResult) -> &str {
    &result.content[0].as_text().unwrap().text
}

#[tokio::test]
async fn test_sanitized_html_reaches_sendgrid() {
    let (base_url, server) =
        stub("202 Accepted", "X-Message-Id: test-message-id-123\r\n", "").await;

    let result = dispatcher(&base_url)
        .dispatch(json!({
            "to": "user@example.com",
            "subject": "Newsletter",
            "text": "Plain <b>text</b> stays",
            "html": "<h1>News</h1><script>steal()</script><a href=\"javascript:alert(1)\">x</a>",
        }))
        .await;

    assert_ne!(result.is_error, Some(true));
    assert_eq!(
        text(&result),
        "Email sent successfully! Status: 202, Message ID: test-message-id-123"
    );

    let body = server.await.unwrap().body;
    assert_eq!(body["from"]["email"], "noreply@example.com");
    assert_eq!(body["personalizations"][0]["to"][0]["email"], "user@example.com");
    assert_eq!(body["content"][0]["value"], "Plain <b>text</b> stays");
    assert_eq!(body["content"][1]["value"], "<h1>News</h1><a>x</a>");
}

#[tokio::test]
async fn test_provider_rejection_is_reported() {
    let (base_url, server) = stub(
        "400 Bad Request",
        "Content-Type: application/json\r\n",
        r#"{"errors":[{"message":"Invalid recipient","field":"personalizations.0.to.0.email"}]}"#,
    )
    .await;

    let result = dispatcher(&base_url)
        .dispatch(json!({
            "to": "user@example.com",
            "subject": "Hi",
            "text": "Hello",
        }))
        .await;

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text(&result),
        "SendGrid error (status: 400): Invalid recipient"
    );

    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_provider_is_reported() {
    let base_url = closed_port().await;

    let result = dispatcher(&base_url)
        .dispatch(json!({
            "to": "user@example.com",
            "subject": "Hi",
            "html": "<p>Hello</p>",
        }))
        .await;

    assert_eq!(result.is_error, Some(true));
    let message = text(&result);
    assert!(
        message.starts_with("SendGrid error (status: unknown)"),
        "unexpected message: {message}"
    );
    assert!(!message.contains("SG.pipeline"));
}
