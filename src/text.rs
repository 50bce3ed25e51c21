//! Text cleanup for provider-supplied markup.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Removes HTML tags and decodes the common entities.
///
/// Recipe summaries arrive as HTML fragments; this produces the plain text
/// a reader would see. Runs of whitespace collapse to a single space.
pub fn strip_html(html: &str) -> String {
    let without_tags = tag_pattern().replace_all(html, "");
    let decoded = decode_entities(&without_tags);
    whitespace_pattern()
        .replace_all(decoded.trim(), " ")
        .into_owned()
}

fn decode_entities(text: &str) -> String {
    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
