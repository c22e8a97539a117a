//! Content text shaping: paragraph formatting and excerpts

use once_cell::sync::Lazy;
use regex::Regex;

/// Words kept by an automatic excerpt
pub const EXCERPT_WORDS: usize = 55;

/// Suffix appended when an automatic excerpt is cut short
pub const EXCERPT_MORE: &str = " [&hellip;]";

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br[^>]*>").expect("valid regex"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static BLOCK_MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(p|div|ul|ol|h[1-6]|blockquote|figure|table|pre)[\s>]").expect("valid regex")
});

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Format plain-text content into paragraphs
///
/// Blank lines separate `<p>` blocks and single newlines become `<br />`.
/// Content that already carries block-level markup is returned unchanged.
pub fn autop(content: &str) -> String {
    let content = content.replace("\r\n", "\n");
    if content.trim().is_empty() {
        return String::new();
    }
    if BLOCK_MARKUP.is_match(&content) {
        return content;
    }

    PARAGRAPH_BREAK
        .split(content.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>\n", p.replace('\n', "<br />\n")))
        .collect()
}

/// Remove markup and collapse whitespace
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stored excerpt, or the first [`EXCERPT_WORDS`] words of the content
pub fn auto_excerpt(excerpt: &str, content: &str) -> String {
    let excerpt = excerpt.trim();
    if !excerpt.is_empty() {
        return excerpt.to_string();
    }

    let text = strip_tags(content);
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > EXCERPT_WORDS {
        format!("{}{}", words[..EXCERPT_WORDS].join(" "), EXCERPT_MORE)
    } else {
        words.join(" ")
    }
}

/// First `lines` lines of the formatted content, split on `<br>` markers
pub fn excerpt_by_lines(content: &str, lines: usize) -> String {
    let formatted = autop(content);
    LINE_BREAK
        .split(&formatted)
        .take(lines)
        .collect::<Vec<_>>()
        .join("<br>")
}
