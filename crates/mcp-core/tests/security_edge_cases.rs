//! Security edge case tests for validation and sanitization.
//!
//! These tests verify that unicode bypass vectors, encoding tricks, and
//! known XSS payloads are handled by the public API.

use sendgrid_mcp_core::{sanitize_html, validate_email_request};
use serde_json::json;

fn assert_no_script(output: &str) {
    let lower = output.to_ascii_lowercase();
    assert!(!lower.contains("<script"), "script tag survived: {output}");
    assert!(!lower.contains("javascript:"), "javascript URL survived: {output}");
}

/// Test that zero-width and bidi characters are rejected in recipients.
#[test]
fn test_unicode_spoofing_recipients_rejected() {
    for to in [
        "user\u{200B}@example.com",
        "user@exa\u{200D}mple.com",
        "admin\u{202E}@example.com",
        "user@example.com\u{0000}",
        "user@example.com\nBcc: victim@example.com",
    ] {
        let result = validate_email_request(&json!({
            "to": to,
            "subject": "Hi",
            "text": "hello",
        }));
        assert!(result.is_err(), "{to:?} should be rejected");
    }
}

/// Test that the sender can never be supplied by the caller.
#[test]
fn test_sender_spoofing_rejected() {
    let err = validate_email_request(&json!({
        "to": "user@example.com",
        "subject": "Hi",
        "text": "hello",
        "from": "ceo@example.com",
    }))
    .unwrap_err();

    assert!(err.has_violation_for("from"));
}

/// Common XSS payloads from filter evasion cheat sheets.
#[test]
fn test_xss_payloads_neutralized() {
    for payload in [
        "<script>alert('XSS')</script>",
        "<SCRIPT SRC=http://xss.example/xss.js></SCRIPT>",
        "<IMG SRC=\"javascript:alert('XSS');\">",
        "<IMG SRC=JaVaScRiPt:alert('XSS')>",
        "<IMG SRC=\"jav&#x09;ascript:alert('XSS');\">",
        "<IMG SRC=&#106;&#97;&#118;&#97;&#115;&#99;&#114;&#105;&#112;&#116;&#58;alert('XSS')>",
        "<a href=\"&#x6A;avascript:alert(1)\">x</a>",
        "<BODY ONLOAD=alert('XSS')>",
        "<iframe src=\"javascript:alert('XSS');\"></iframe>",
        "<svg/onload=alert('XSS')>",
        "<<SCRIPT>alert(\"XSS\");//<</SCRIPT>",
        "<scr<script>ipt>alert(1)</scr</script>ipt>",
        "<a href=\"https://x.example\"onclick=\"alert(1)\">x</a>",
        "<img src=\"cat.png\"onerror=\"alert(1)\">",
        "<a title=\"t\"href=\"javascript:alert(1)\">x</a>",
        "<a title='t'onmouseover='alert(1)'>x</a>",
    ] {
        let output = sanitize_html(payload);
        assert_no_script(&output);
        let lower = output.to_ascii_lowercase();
        for handler in ["onload", "onclick", "onerror", "onmouseover"] {
            assert!(!lower.contains(handler), "handler survived: {output}");
        }
        assert!(!output.to_ascii_lowercase().contains("<iframe"));
        assert_eq!(sanitize_html(&output), output, "not idempotent for {payload}");
    }
}

/// Test that elements survive handler removal with their text.
#[test]
fn test_elements_survive_with_text() {
    let output = sanitize_html(
        r#"<a href="javascript:void(0)" onclick="steal()">Read more</a>"#,
    );
    assert_eq!(output, "<a>Read more</a>");
}
