// src/ingest/extract.rs
//! Best-effort headline extraction from arbitrary news pages.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// Structural patterns commonly used for headline/title elements.
pub const HEADLINE_SELECTORS: &str =
    "article h2, article h3, .headline, .title, h3.title, .article__headline";

/// Max headlines taken from a single page.
pub const MAX_PER_SOURCE: usize = 5;

const MAX_HEADLINE_CHARS: usize = 300;

static HEADLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(HEADLINE_SELECTORS).expect("headline selector"));

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Matching elements in document order, cleaned, empties skipped, capped at `limit`.
pub fn extract_headlines(html: &str, limit: usize) -> Vec<String> {
    let doc = Html::parse_document(html);
    doc.select(&HEADLINE_SELECTOR)
        .map(|el| clean_headline(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .take(limit)
        .collect()
}

/// Collapse whitespace, trim, normalize typographic quotes.
/// Punctuation is kept: the polarity engine is sensitive to it.
pub fn clean_headline(s: &str) -> String {
    let out = s
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");
    let out = RE_WS.replace_all(&out, " ");
    let out = out.trim();

    if out.chars().count() > MAX_HEADLINE_CHARS {
        out.chars().take(MAX_HEADLINE_CHARS).collect()
    } else {
        out.to_string()
    }
}
