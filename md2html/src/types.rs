use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ParseError;

/// A run of inline text tagged with its kind.
///
/// Only links and images carry a destination URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TextSpan {
    Plain { text: String },
    Bold { text: String },
    Italic { text: String },
    Code { text: String },
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        TextSpan::Plain { text: text.into() }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        TextSpan::Bold { text: text.into() }
    }

    pub fn italic(text: impl Into<String>) -> Self {
        TextSpan::Italic { text: text.into() }
    }

    pub fn code(text: impl Into<String>) -> Self {
        TextSpan::Code { text: text.into() }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        TextSpan::Link {
            text: text.into(),
            url: url.into(),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        TextSpan::Image {
            alt: alt.into(),
            url: url.into(),
        }
    }

    /// Build a span of `kind` around `text`.
    ///
    /// Returns `None` for links and images, which also need a URL.
    pub fn from_kind(kind: SpanKind, text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        match kind {
            SpanKind::Plain => Some(TextSpan::Plain { text }),
            SpanKind::Bold => Some(TextSpan::Bold { text }),
            SpanKind::Italic => Some(TextSpan::Italic { text }),
            SpanKind::Code => Some(TextSpan::Code { text }),
            SpanKind::Link | SpanKind::Image => None,
        }
    }

    /// The span's text: anchor text for links, alt text for images.
    pub fn text(&self) -> &str {
        match self {
            TextSpan::Plain { text }
            | TextSpan::Bold { text }
            | TextSpan::Italic { text }
            | TextSpan::Code { text }
            | TextSpan::Link { text, .. } => text,
            TextSpan::Image { alt, .. } => alt,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            TextSpan::Link { url, .. } | TextSpan::Image { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn kind(&self) -> SpanKind {
        match self {
            TextSpan::Plain { .. } => SpanKind::Plain,
            TextSpan::Bold { .. } => SpanKind::Bold,
            TextSpan::Italic { .. } => SpanKind::Italic,
            TextSpan::Code { .. } => SpanKind::Code,
            TextSpan::Link { .. } => SpanKind::Link,
            TextSpan::Image { .. } => SpanKind::Image,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, TextSpan::Plain { .. })
    }
}

/// The six inline span kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl SpanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SpanKind::Plain => "text",
            SpanKind::Bold => "bold",
            SpanKind::Italic => "italic",
            SpanKind::Code => "code",
            SpanKind::Link => "link",
            SpanKind::Image => "image",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpanKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "plain" => Ok(SpanKind::Plain),
            "bold" => Ok(SpanKind::Bold),
            "italic" => Ok(SpanKind::Italic),
            "code" => Ok(SpanKind::Code),
            "link" => Ok(SpanKind::Link),
            "image" => Ok(SpanKind::Image),
            other => Err(ParseError::UnknownSpanKind(other.to_string())),
        }
    }
}

/// Structural type of a block, decided by [`crate::blocks::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl BlockType {
    pub const ALL: [BlockType; 6] = [
        BlockType::Heading,
        BlockType::Code,
        BlockType::Quote,
        BlockType::UnorderedList,
        BlockType::OrderedList,
        BlockType::Paragraph,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Code => "code",
            BlockType::Quote => "quote",
            BlockType::UnorderedList => "unordered_list",
            BlockType::OrderedList => "ordered_list",
            BlockType::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseError::UnknownBlockType(s.to_string()))
    }
}
