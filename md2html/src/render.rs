//! Block renderer: one classified block → one parent [`HtmlNode`].

use crate::blocks::{FENCE, classify, heading_level, split_blocks};
use crate::error::{Error, ParseError};
use crate::html::HtmlNode;
use crate::inline::text_to_children;
use crate::types::BlockType;

/// Render one block of the given type.
pub fn block_to_node(block: &str, block_type: BlockType) -> Result<HtmlNode, ParseError> {
    match block_type {
        BlockType::Heading => heading(block),
        BlockType::Code => code(block),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => list(block, block_type, "ul"),
        BlockType::OrderedList => list(block, block_type, "ol"),
        BlockType::Paragraph => paragraph(block),
    }
}

/// Parse a whole document into a `div` holding one node per block.
pub fn markdown_to_html_node(document: &str) -> Result<HtmlNode, ParseError> {
    let children = split_blocks(document)
        .iter()
        .map(|block| {
            let block_type = classify(block);
            log::debug!("classified block as {block_type}: {block:?}");
            block_to_node(block, block_type)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Parse and serialise a document in one step.
pub fn markdown_to_html(document: &str) -> Result<String, Error> {
    Ok(markdown_to_html_node(document)?.render()?)
}

fn paragraph(block: &str) -> Result<HtmlNode, ParseError> {
    Ok(HtmlNode::parent("p", text_to_children(block)?))
}

fn heading(block: &str) -> Result<HtmlNode, ParseError> {
    let level = heading_level(block).ok_or_else(|| invalid(BlockType::Heading, block))?;
    let text = &block[level + 1..];
    Ok(HtmlNode::parent(format!("h{level}"), text_to_children(text)?))
}

fn code(block: &str) -> Result<HtmlNode, ParseError> {
    let inner = block
        .strip_prefix(FENCE)
        .and_then(|rest| rest.strip_suffix(FENCE))
        .ok_or_else(|| invalid(BlockType::Code, block))?
        .trim();
    let code = HtmlNode::parent("code", text_to_children(inner)?);
    Ok(HtmlNode::parent("pre", vec![code]))
}

// Strips every `>` in the block, not only the line markers.
fn quote(block: &str) -> Result<HtmlNode, ParseError> {
    let text = block.replace('>', "");
    Ok(HtmlNode::parent("blockquote", text_to_children(&text)?))
}

fn list(block: &str, block_type: BlockType, tag: &str) -> Result<HtmlNode, ParseError> {
    let items = block
        .split('\n')
        .map(|line| -> Result<HtmlNode, ParseError> {
            let (_, item) = line
                .split_once(' ')
                .ok_or_else(|| invalid(block_type, block))?;
            Ok(HtmlNode::parent("li", text_to_children(item)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent(tag, items))
}

fn invalid(block_type: BlockType, block: &str) -> ParseError {
    ParseError::InvalidBlock {
        block_type: block_type.to_string(),
        block: block.to_string(),
    }
}
