//! HTML sanitization for email bodies.
//!
//! Removes constructs that can execute code or navigate to unsafe
//! destinations and leaves every other byte of the input untouched:
//!
//! - `<script>` elements and their contents
//! - `<iframe>` / `<object>` elements and `<embed>` tags
//! - event-handler attributes (`on*`)
//! - URL attributes using the `javascript:`, `vbscript:` or `data:text/html`
//!   schemes (the attribute is dropped, the element stays)
//!
//! Every rewrite only deletes bytes, and [`sanitize_html`] repeats the pass
//! until nothing changes, so the result is a fixed point:
//! `sanitize_html(&sanitize_html(x)) == sanitize_html(x)`.
//!
//! # Examples
//!
//! ```
//! use sendgrid_mcp_core::sanitize_html;
//!
//! assert_eq!(
//!     sanitize_html(r#"<p onclick="steal()">Hi</p><script>alert(1)</script>"#),
//!     "<p>Hi</p>"
//! );
//! assert_eq!(
//!     sanitize_html("<p><strong>Bold</strong> and <em>italic</em></p>"),
//!     "<p><strong>Bold</strong> and <em>italic</em></p>"
//! );
//! ```

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Script element with its content; an unterminated one runs to the end.
static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?(?:</script\s*>|\z)").expect("valid regex")
});
static IFRAME_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<iframe\b[^>]*>.*?(?:</iframe\s*>|\z)").expect("valid regex")
});
static OBJECT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<object\b[^>]*>.*?(?:</object\s*>|\z)").expect("valid regex")
});
static EMBED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<embed\b[^>]*>").expect("valid regex"));
static STRAY_CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:script|iframe|object|embed)\s*>").expect("valid regex")
});

/// Opening tag: name, then an attribute region in which quoted strings are
/// consumed whole so a `>` inside a value does not end the tag.
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([A-Za-z][^\s/>]*)((?:"[^"]*"|'[^']*'|[^>])*)>"#).expect("valid regex")
});

/// One attribute inside a tag's attribute region, with its separator.
///
/// The separator may be empty: browsers start a new attribute right after
/// a closing quote (`href="x"onclick=..`).
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s/]*([^\s"'>/=]+)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s>]*))?"#)
        .expect("valid regex")
});

static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&#(?:x([0-9a-f]+)|([0-9]+));?").expect("valid regex")
});

/// Attributes whose value is fetched or navigated to.
const URL_ATTRIBUTES: [&str; 8] = [
    "href",
    "src",
    "action",
    "formaction",
    "xlink:href",
    "data",
    "poster",
    "background",
];

const DANGEROUS_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:text/html"];

/// Sanitizes an HTML email body.
///
/// Pure and idempotent. Text content, benign elements and benign attributes
/// are preserved byte-for-byte.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let mut current = sanitize_pass(html);
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Runs every removal once.
fn sanitize_pass(html: &str) -> String {
    let html = SCRIPT_ELEMENT.replace_all(html, "");
    let html = IFRAME_ELEMENT.replace_all(&html, "");
    let html = OBJECT_ELEMENT.replace_all(&html, "");
    let html = EMBED_TAG.replace_all(&html, "");
    let html = STRAY_CLOSING_TAG.replace_all(&html, "");
    OPEN_TAG
        .replace_all(&html, |caps: &Captures<'_>| strip_unsafe_attributes(caps))
        .into_owned()
}

/// Rebuilds an opening tag without its unsafe attributes.
///
/// Returns the original tag text when nothing is removed.
fn strip_unsafe_attributes(caps: &Captures<'_>) -> String {
    let whole = &caps[0];
    let name = &caps[1];
    let region = caps.get(2).map_or("", |m| m.as_str());

    let mut kept = String::with_capacity(region.len());
    let mut last = 0;
    let mut removed = false;

    for attr in ATTRIBUTE.captures_iter(region) {
        let span = attr.get(0).map_or(0..0, |m| m.range());
        let attr_name = &attr[1];
        let value = attr.get(2).map(|m| unquote(m.as_str()));

        if is_unsafe_attribute(attr_name, value) {
            kept.push_str(&region[last..span.start]);
            last = span.end;
            removed = true;
        }
    }

    if !removed {
        return whole.to_string();
    }

    kept.push_str(&region[last..]);
    format!("<{name}{kept}>")
}

fn is_unsafe_attribute(name: &str, value: Option<&str>) -> bool {
    let name = name.to_ascii_lowercase();
    if name.starts_with("on") {
        return true;
    }

    URL_ATTRIBUTES.contains(&name.as_str()) && value.is_some_and(has_dangerous_scheme)
}

/// Checks a URL value the way a browser would read it: character references
/// decoded, whitespace and control characters ignored, scheme
/// case-insensitive.
fn has_dangerous_scheme(value: &str) -> bool {
    let decoded = decode_entities(value);
    let normalized: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| normalized.starts_with(scheme))
}

fn decode_entities(value: &str) -> Cow<'_, str> {
    let decoded = NUMERIC_ENTITY.replace_all(value, |caps: &Captures<'_>| {
        let code = caps
            .get(1)
            .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
            .or_else(|| caps.get(2).and_then(|dec| dec.as_str().parse::<u32>().ok()));
        code.and_then(char::from_u32)
            .map_or_else(String::new, String::from)
    });

    if !decoded.contains('&') {
        return decoded;
    }

    Cow::Owned(
        decoded
            .replace("&colon;", ":")
            .replace("&Tab;", "")
            .replace("&NewLine;", ""),
    )
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
