use once_cell::sync::Lazy;
use regex::Regex;

// Neither group crosses a line terminator (LF, CR, U+2028, U+2029) and both are
// lazy, so the shortest title from the leftmost `[` wins and the scan resumes
// after the closing parenthesis.
static INLINE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\n\r\x{2028}\x{2029}]*?)\]\((https?://[^\n\r\x{2028}\x{2029}]*?)\)")
        .expect("inline link pattern")
});

/// One inline markdown link found in an insight document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
}

/// Collects every `[title](http...)` occurrence of `markdown` in source order.
///
/// Titles and URLs are the matched substrings as written: nothing is
/// normalized or deduplicated, and reference-style links are not recognized.
pub fn extract_links(markdown: &str) -> Vec<ResourceLink> {
    INLINE_LINK
        .captures_iter(markdown)
        .map(|caps| ResourceLink {
            title: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect()
}
