//! `md2html`: converts a small markdown dialect into HTML.
//!
//! Parsing runs in two stages. The document is split into blocks (heading,
//! code, quote, unordered list, ordered list, paragraph) and each block's text
//! is tokenized into inline spans (plain, bold, italic, code, link, image).
//! The result is a tree of [`HtmlNode`]s that serialises with
//! [`HtmlNode::render`].
//!
//! # Quick start
//!
//! ```
//! let node = md2html::markdown_to_html_node("# Hello\n\nSome **bold** text").unwrap();
//! assert_eq!(
//!     node.render().unwrap(),
//!     "<div><h1>Hello</h1><p>Some <b>bold</b> text</p></div>"
//! );
//! assert_eq!(md2html::extract_title("# Hello\n\nbody").unwrap(), "Hello");
//! ```

pub mod blocks;
pub mod error;
pub mod html;
pub mod inline;
pub mod render;
pub mod types;

pub use blocks::{classify, extract_title, split_blocks};
pub use error::*;
pub use html::{Attributes, HtmlNode, LeafNode, ParentNode};
pub use inline::{span_to_node, tokenize};
pub use render::{block_to_node, markdown_to_html, markdown_to_html_node};
pub use types::*;
