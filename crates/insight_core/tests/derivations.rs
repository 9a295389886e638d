use insight_core::{extract_links, split_sections, ResourceLink, APPROACH_MARKER};
use pretty_assertions::assert_eq;

#[test]
fn links_are_returned_in_source_order_without_dedupe() {
    let markdown = "\
# Two Sum
Read [LeetCode](https://leetcode.com/problems/two-sum) first.

- [Hash maps](http://example.com/maps) and again [LeetCode](https://leetcode.com/problems/two-sum)

## Efficient Approach Overview
See [CP Algorithms](https://cp-algorithms.com).";

    let links = extract_links(markdown);

    let expected = [
        ("LeetCode", "https://leetcode.com/problems/two-sum"),
        ("Hash maps", "http://example.com/maps"),
        ("LeetCode", "https://leetcode.com/problems/two-sum"),
        ("CP Algorithms", "https://cp-algorithms.com"),
    ]
    .into_iter()
    .map(|(title, url)| ResourceLink {
        title: title.to_string(),
        url: url.to_string(),
    })
    .collect::<Vec<_>>();
    assert_eq!(links, expected);
}

#[test]
fn links_in_both_sections_are_counted_once_each() {
    let markdown = format!(
        "[A](https://a.example)\n{APPROACH_MARKER}\n[B](https://b.example)"
    );
    let sections = split_sections(&markdown);
    let from_document = extract_links(&markdown);

    let mut from_parts = extract_links(&sections.primary);
    from_parts.extend(extract_links(sections.secondary.as_deref().unwrap_or("")));

    assert_eq!(from_document.len(), 2);
    assert_eq!(from_document, from_parts);
}

#[test]
fn reference_style_links_are_not_recognized() {
    let markdown = "See [the docs][docs].\n\n[docs]: https://docs.example";
    assert!(extract_links(markdown).is_empty());
}

#[test]
fn derivations_are_deterministic() {
    let markdown = format!("x [t](https://t.example) {APPROACH_MARKER} y");

    assert_eq!(extract_links(&markdown), extract_links(&markdown));
    assert_eq!(split_sections(&markdown), split_sections(&markdown));
}
