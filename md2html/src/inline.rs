//! Inline tokenizer.
//!
//! Turns a flat string into an ordered list of [`TextSpan`]s. Five stages run
//! in a fixed order (code, bold, italic, images, links) and each stage only
//! rewrites spans that are still plain, so text inside a code span keeps its
//! literal `*` characters.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ParseError;
use crate::html::{Attributes, HtmlNode, LeafNode};
use crate::types::{SpanKind, TextSpan};

/// Tokenize `text` into inline spans.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>, ParseError> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "*", SpanKind::Italic)?;
    let spans = split_images(spans);
    let spans = split_links(spans);
    Ok(spans)
}

/// Tokenize `text` and map every span to a leaf node.
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, ParseError> {
    Ok(tokenize(text)?.iter().map(span_to_node).collect())
}

/// Split every plain span on `delimiter`, tagging the enclosed parts as `kind`.
///
/// Parts alternate plain / `kind` starting with plain, so a well-formed span
/// always splits into an odd number of parts. Empty parts are dropped.
///
/// `kind` must be one of the delimiter kinds (plain, bold, italic, code);
/// links and images have their own extractors.
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>, ParseError> {
    let mut output = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain { text } = &span else {
            output.push(span);
            continue;
        };

        let parts: Vec<&str> = text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(ParseError::MismatchedDelimiter {
                delimiter: delimiter.to_string(),
                text: text.clone(),
            });
        }

        for (index, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            let part_kind = if index % 2 == 0 { SpanKind::Plain } else { kind };
            let typed = TextSpan::from_kind(part_kind, part)
                .ok_or_else(|| ParseError::UnknownSpanKind(part_kind.to_string()))?;
            output.push(typed);
        }
    }

    Ok(output)
}

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("Invalid image regex"))
}

// Matches links and images alike; callers drop matches that begin with `!`.
fn link_regex() -> &'static Regex {
    static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
    LINK_REGEX.get_or_init(|| Regex::new(r"!?\[(.*?)\]\((.*?)\)").expect("Invalid link regex"))
}

/// A syntax match: byte range in the source plus the two captures.
struct Match<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    url: &'a str,
}

fn image_matches(text: &str) -> Vec<Match<'_>> {
    image_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Match {
                start: whole.start(),
                end: whole.end(),
                text: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

fn link_matches(text: &str) -> Vec<Match<'_>> {
    link_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if whole.as_str().starts_with('!') {
                return None;
            }
            Some(Match {
                start: whole.start(),
                end: whole.end(),
                text: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Every `![alt](url)` in `text`, as `(alt, url)` pairs.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    image_matches(text)
        .into_iter()
        .map(|m| (m.text.to_string(), m.url.to_string()))
        .collect()
}

/// Every `[text](url)` in `text` that is not an image, as `(text, url)` pairs.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    link_matches(text)
        .into_iter()
        .map(|m| (m.text.to_string(), m.url.to_string()))
        .collect()
}

/// Pull image syntax out of every plain span.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, image_matches, |alt, url| TextSpan::image(alt, url))
}

/// Pull link syntax out of every plain span.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, link_matches, |text, url| TextSpan::link(text, url))
}

fn split_matches(
    spans: Vec<TextSpan>,
    find: fn(&str) -> Vec<Match<'_>>,
    build: fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    let mut output = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain { text } = &span else {
            output.push(span);
            continue;
        };

        let matches = find(text);
        if matches.is_empty() {
            output.push(span);
            continue;
        }

        let mut cursor = 0;
        for m in matches {
            let preceding = &text[cursor..m.start];
            if !preceding.is_empty() {
                output.push(TextSpan::plain(preceding));
            }
            output.push(build(m.text, m.url));
            cursor = m.end;
        }
        let trailing = &text[cursor..];
        if !trailing.is_empty() {
            output.push(TextSpan::plain(trailing));
        }
    }

    output
}

/// Map one span to its leaf node.
pub fn span_to_node(span: &TextSpan) -> HtmlNode {
    let (tag, value, attributes) = match span {
        TextSpan::Plain { text } => (None, text.clone(), Attributes::new()),
        TextSpan::Bold { text } => (Some("b"), text.clone(), Attributes::new()),
        TextSpan::Italic { text } => (Some("i"), text.clone(), Attributes::new()),
        TextSpan::Code { text } => (Some("code"), text.clone(), Attributes::new()),
        TextSpan::Link { text, url } => {
            (Some("a"), text.clone(), Attributes::new().with("href", url.as_str()))
        }
        TextSpan::Image { alt, url } => (
            Some("img"),
            String::new(),
            Attributes::new()
                .with("src", url.as_str())
                .with("alt", alt.as_str()),
        ),
    };
    HtmlNode::Leaf(LeafNode {
        tag: tag.map(str::to_string),
        value,
        attributes,
    })
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
