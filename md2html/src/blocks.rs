//! Block splitting and classification.
//!
//! A document is cut into blocks on blank lines, then each block is assigned
//! exactly one [`BlockType`] by an ordered decision list.

use crate::error::ParseError;
use crate::types::BlockType;

/// Split a document into trimmed, non-empty blocks.
pub fn split_blocks(document: &str) -> Vec<String> {
    let normalised = document.replace("\r\n", "\n");
    normalised
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a single block. First match wins; anything else is a paragraph.
pub fn classify(block: &str) -> BlockType {
    if is_heading(block) {
        BlockType::Heading
    } else if is_code(block) {
        BlockType::Code
    } else if is_quote(block) {
        BlockType::Quote
    } else if is_unordered_list(block) {
        BlockType::UnorderedList
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Number of leading `#` if `block` opens with 1–6 of them and a space.
pub(crate) fn heading_level(block: &str) -> Option<usize> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&level) && block[level..].starts_with(' ') {
        Some(level)
    } else {
        None
    }
}

fn is_heading(block: &str) -> bool {
    heading_level(block).is_some()
}

pub(crate) const FENCE: &str = "```";

// Opening and closing fences must not overlap.
fn is_code(block: &str) -> bool {
    block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE)
}

fn is_quote(block: &str) -> bool {
    every_line_starts_with(block, ">")
}

fn is_unordered_list(block: &str) -> bool {
    every_line_starts_with(block, "* ") || every_line_starts_with(block, "- ")
}

fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(index, line)| line.starts_with(&format!("{}. ", index + 1)))
}

fn every_line_starts_with(block: &str, prefix: &str) -> bool {
    block.split('\n').all(|line| line.starts_with(prefix))
}

/// Text of the first `# ` line in `document`.
pub fn extract_title(document: &str) -> Result<String, ParseError> {
    document
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::to_string)
        .ok_or(ParseError::NoTitle)
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
