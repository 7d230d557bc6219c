//! Description text cleanup.
//!
//! Item descriptions arrive either as plain text or as seller HTML that still
//! carries tracking residue injected by the storefront editor. Everything here
//! is a pure string transform.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));
static ADMIN_ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.adminAccountId=\d+;").expect("valid admin account regex")
});
static INLINE_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)with\(document\).*?src="[^"]+"\s*>?"#).expect("valid inline script regex")
});

/// Picks the description source and cleans it.
///
/// Plain `text` wins when it is non-blank; otherwise tags are stripped from
/// `html`.
#[must_use]
pub fn description_text(text: Option<&str>, html: Option<&str>) -> String {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        clean_description(&strip_tags(html.unwrap_or_default()))
    } else {
        clean_description(text)
    }
}

/// Removes every `<...>` tag, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").trim().to_string()
}

/// Removes editor residue, collapses whitespace and decodes entities.
///
/// Residue stripped unconditionally: the `window.adminAccountId=<n>;`
/// telemetry assignment, the `with(document)...src="...">` loader snippet
/// (which may span lines) and the `&bull;` list marker. Whitespace is
/// collapsed before decoding, so encoded spaces and line breaks survive.
#[must_use]
pub fn clean_description(text: &str) -> String {
    let text = ADMIN_ACCOUNT_RE.replace_all(text, "");
    let text = INLINE_SCRIPT_RE.replace_all(&text, "");
    let text = text.replace("&bull;", "");
    decode_html_entities(&collapse_whitespace(&text)).into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
