//! First-link extraction
//!
//! Finds the link a walk follows off a page: the first direct-child anchor
//! of a direct-child paragraph of the content container that points at
//! another article. Parenthesized text is suppressed before anchors are
//! considered, so a link inside a parenthetical is never a candidate.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::page::ArticlePath;

/// Errors from extracting the next link out of a page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("page has no recognizable content container")]
    MissingContent,

    #[error("no qualifying link in any body paragraph")]
    NoLink,
}

fn content_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("div.mw-content-ltr").expect("valid selector"))
}

fn paragraph_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("p").expect("valid selector"))
}

/// One parenthetical bounded by tag delimiters: a text run after `>`, an
/// opening paren, the parenthesized span, a closing paren, a text run
/// before `<`
fn paren_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(>[^<]*?)\((.*?)\)([^>]*?<)").expect("valid pattern"))
}

/// Finds the first qualifying article link in a page body
///
/// Only direct-child paragraphs of the content container are scanned, in
/// document order, and within a paragraph only its direct-child anchors.
/// Anchors nested deeper (italics, superscript citations) and anchors whose
/// href is not an article path are skipped.
///
/// # Arguments
///
/// * `html` - The raw page markup
///
/// # Returns
///
/// * `Ok(ArticlePath)` - The first qualifying link
/// * `Err(ExtractError)` - The container is missing, or no paragraph
///   yielded a link
///
/// # Example
///
/// ```
/// use wikiwalk::walker::first_link;
///
/// let html = r#"<html><body><div class="mw-content-ltr">
///     <p>It began with <a href="/wiki/Philosophy">philosophy</a>.</p>
/// </div></body></html>"#;
///
/// let link = first_link(html).unwrap();
/// assert_eq!(link.as_str(), "/wiki/Philosophy");
/// ```
pub fn first_link(html: &str) -> Result<ArticlePath, ExtractError> {
    let document = Html::parse_document(html);

    let container = document
        .select(content_selector())
        .next()
        .ok_or(ExtractError::MissingContent)?;

    for paragraph in direct_children(container, "p") {
        let cleaned = suppress_parentheticals(&paragraph.html());
        let fragment = Html::parse_fragment(&cleaned);

        let reparsed = match fragment.select(paragraph_selector()).next() {
            Some(p) => p,
            None => continue,
        };

        for anchor in direct_children(reparsed, "a") {
            let href = match anchor.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            if let Ok(path) = href.parse::<ArticlePath>() {
                return Ok(path);
            }
        }
    }

    Err(ExtractError::NoLink)
}

/// Direct element children of `parent` with the given tag name
fn direct_children<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |element| element.value().name() == name)
}

/// Removes parenthesized text between tags
///
/// Each round replaces the leftmost match of [`paren_pattern`] with its two
/// text runs plus any parens found inside the parenthesized span, and rounds
/// repeat until nothing matches. Every round drops one paren pair, so nested
/// parentheticals disappear over successive rounds and the loop terminates.
/// Parens inside tags (attribute values) never match.
pub fn suppress_parentheticals(html: &str) -> String {
    let pattern = paren_pattern();
    let mut cleaned = html.to_string();

    loop {
        let replaced = match pattern.replace(&cleaned, |captures: &Captures| {
            let kept: String = captures[2]
                .chars()
                .filter(|c| matches!(c, '(' | ')'))
                .collect();
            format!("{}{}{}", &captures[1], kept, &captures[3])
        }) {
            Cow::Owned(replaced) => replaced,
            Cow::Borrowed(_) => break,
        };
        cleaned = replaced;
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(content: &str) -> String {
        format!(
            r#"<html><body><div class="mw-body-content mw-content-ltr">{}</div></body></html>"#,
            content
        )
    }

    #[test]
    fn test_first_link_simple() {
        let html = page(r#"<p><a href="/wiki/Philosophy">Philosophy</a></p>"#);
        assert_eq!(
            first_link(&html).unwrap().as_str(),
            "/wiki/Philosophy"
        );
    }

    #[test]
    fn test_first_of_multiple_links() {
        let html = page(r#"<p><a href="/wiki/First">1</a> and <a href="/wiki/Second">2</a></p>"#);
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/First");
    }

    #[test]
    fn test_missing_container() {
        let html = r#"<html><body><p><a href="/wiki/Foo">link</a></p></body></html>"#;
        assert_eq!(first_link(html), Err(ExtractError::MissingContent));
    }

    #[test]
    fn test_no_link_in_any_paragraph() {
        let html = page("<p>Just text.</p><p>More text.</p>");
        assert_eq!(first_link(&html), Err(ExtractError::NoLink));
    }

    #[test]
    fn test_skips_external_link() {
        let html = page(
            r#"<p><a href="https://example.com/wiki/Out">out</a> <a href="/wiki/In">in</a></p>"#,
        );
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/In");
    }

    #[test]
    fn test_skips_anchor_without_href() {
        let html = page(r#"<p><a name="top">anchor</a> <a href="/wiki/Real">real</a></p>"#);
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/Real");
    }

    #[test]
    fn test_skips_empty_href() {
        let html = page(r#"<p><a href="">empty</a> <a href="/wiki/Real">real</a></p>"#);
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/Real");
    }

    #[test]
    fn test_nested_anchor_is_not_direct_child() {
        let html = page(
            r#"<p><i><a href="/wiki/Italic">italic</a></i> then <a href="/wiki/Plain">plain</a></p>"#,
        );
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/Plain");
    }

    #[test]
    fn test_citation_in_sup_is_not_direct_child() {
        let html = page(
            r#"<p>Claim<sup><a href="/wiki/Source">[1]</a></sup> then <a href="/wiki/Next">next</a></p>"#,
        );
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/Next");
    }

    #[test]
    fn test_paragraph_inside_table_ignored() {
        let html = page(
            r#"<table><tr><td><p><a href="/wiki/Infobox">info</a></p></td></tr></table>"#,
        );
        assert_eq!(first_link(&html), Err(ExtractError::NoLink));
    }

    #[test]
    fn test_second_paragraph_scanned() {
        let html = page(r#"<p>No links here.</p><p><a href="/wiki/Found">found</a></p>"#);
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/Found");
    }

    #[test]
    fn test_link_in_parenthetical_not_followed() {
        let html = page(
            r#"<p>(<a href="/wiki/Aside">aside</a>) <a href="/wiki/After">after</a></p>"#,
        );
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/After");
    }

    #[test]
    fn test_parenthetical_with_markup_before_link() {
        let html = page(
            r#"<p>Foo (see <i>bar</i>) baz <a href="/wiki/Target">link</a></p>"#,
        );
        assert_eq!(first_link(&html).unwrap().as_str(), "/wiki/Target");
    }

    #[test]
    fn test_suppress_basic() {
        assert_eq!(suppress_parentheticals("<p>a (b) c</p>"), "<p>a  c</p>");
    }

    #[test]
    fn test_suppress_no_parens_unchanged() {
        assert_eq!(suppress_parentheticals("<p>plain text</p>"), "<p>plain text</p>");
    }

    #[test]
    fn test_suppress_nested_parens() {
        assert_eq!(
            suppress_parentheticals("<p>a (b (c) d) e</p>"),
            "<p>a  e</p>"
        );
    }

    #[test]
    fn test_suppress_removes_tags_inside_parens() {
        assert_eq!(
            suppress_parentheticals("<p>Foo (see <i>bar</i>) baz</p>"),
            "<p>Foo  baz</p>"
        );
    }

    #[test]
    fn test_suppress_leaves_attribute_parens() {
        assert_eq!(
            suppress_parentheticals(r#"<p><a href="/wiki/Foo_(bar)">x</a> (y)</p>"#),
            r#"<p><a href="/wiki/Foo_(bar)">x</a> </p>"#
        );
    }

    #[test]
    fn test_suppress_is_idempotent() {
        let once = suppress_parentheticals("<p>a (b (c) d) e (f)</p>");
        assert_eq!(suppress_parentheticals(&once), once);
    }

    #[test]
    fn test_suppress_unbalanced_paren_unchanged() {
        assert_eq!(
            suppress_parentheticals("<p>a (b c</p>"),
            "<p>a (b c</p>"
        );
    }

    #[test]
    fn test_suppress_stops_at_newline() {
        assert_eq!(
            suppress_parentheticals("<p>a (b\nc) d</p>"),
            "<p>a (b\nc) d</p>"
        );
    }

    #[test]
    fn test_article_with_paren_title_followed() {
        let html = page(r#"<p><a href="/wiki/Rust_(programming_language)">Rust</a></p>"#);
        assert_eq!(
            first_link(&html).unwrap().as_str(),
            "/wiki/Rust_(programming_language)"
        );
    }
}
