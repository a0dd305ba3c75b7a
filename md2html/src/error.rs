/// Errors raised while turning markdown into an HTML node tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Mismatched delimiter '{delimiter}' in: {text}")]
    MismatchedDelimiter { delimiter: String, text: String },

    #[error("No title found: document has no '# ' heading line")]
    NoTitle,

    #[error("Block is not a valid {block_type}: {block}")]
    InvalidBlock { block_type: String, block: String },

    #[error("Unknown block type '{0}'")]
    UnknownBlockType(String),

    #[error("Unknown text span kind '{0}'")]
    UnknownSpanKind(String),
}

/// Errors raised while serialising an HTML node tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("A parent node requires a tag")]
    MissingTag,
}

/// Any failure of the one-shot markdown → HTML conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
