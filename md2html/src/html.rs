//! Generic HTML element tree.
//!
//! Nodes are built bottom-up by the block renderer and serialised once with
//! [`HtmlNode::render`]. Attribute values and leaf text are emitted verbatim;
//! nothing is escaped.

use serde::Serialize;

use crate::error::RenderError;

/// Ordered `name="value"` attribute list. Output order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Append an attribute, or overwrite the value in place if `name` is
    /// already present (keeping its original position).
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `key="value"` pairs joined by single spaces.
    pub fn to_html(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A childless node carrying a direct value.
///
/// With no tag, the value is emitted as-is with no surrounding markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl LeafNode {
    pub fn render(&self) -> Result<String, RenderError> {
        let Some(tag) = &self.tag else {
            return Ok(self.value.clone());
        };
        Ok(format!(
            "{}{}</{tag}>",
            open_tag(tag, &self.attributes),
            self.value
        ))
    }
}

/// A node owning an ordered sequence of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentNode {
    pub tag: String,
    pub children: Vec<HtmlNode>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl ParentNode {
    pub fn render(&self) -> Result<String, RenderError> {
        if self.tag.is_empty() {
            return Err(RenderError::MissingTag);
        }
        let mut output = open_tag(&self.tag, &self.attributes);
        for child in &self.children {
            output.push_str(&child.render()?);
        }
        output.push_str(&format!("</{}>", self.tag));
        Ok(output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

impl HtmlNode {
    /// Untagged leaf: raw text.
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf(LeafNode {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        })
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        })
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent(ParentNode {
            tag: tag.into(),
            children,
            attributes: Attributes::new(),
        })
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes_mut().insert(name, value);
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag.as_deref(),
            HtmlNode::Parent(parent) => Some(parent.tag.as_str()),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            HtmlNode::Leaf(leaf) => &leaf.attributes,
            HtmlNode::Parent(parent) => &parent.attributes,
        }
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            HtmlNode::Leaf(leaf) => &mut leaf.attributes,
            HtmlNode::Parent(parent) => &mut parent.attributes,
        }
    }

    /// Children of a parent node; empty for leaves.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf(_) => &[],
            HtmlNode::Parent(parent) => &parent.children,
        }
    }

    /// Serialise this node and all descendants.
    ///
    /// Fails on the first invalid node; there is no partial output.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.render(),
            HtmlNode::Parent(parent) => parent.render(),
        }
    }
}

fn open_tag(tag: &str, attributes: &Attributes) -> String {
    if attributes.is_empty() {
        format!("<{tag}>")
    } else {
        format!("<{tag} {}>", attributes.to_html())
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attributes_render_in_insertion_order() {
        let attrs = Attributes::new()
            .with("href", "https://www.google.com")
            .with("target", "_blank");
        assert_eq!(
            attrs.to_html(),
            r#"href="https://www.google.com" target="_blank""#
        );
    }

    #[test]
    fn attributes_insert_overwrites_in_place() {
        let mut attrs = Attributes::new().with("a", "1").with("b", "2");
        attrs.insert("a", "3");
        assert_eq!(attrs.to_html(), r#"a="3" b="2""#);
        assert_eq!(attrs.get("a"), Some("3"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn empty_attributes_render_empty() {
        assert_eq!(Attributes::new().to_html(), "");
    }

    #[test]
    fn untagged_leaf_is_raw_value() {
        let node = HtmlNode::text("Just < raw & text");
        assert_eq!(node.render().unwrap(), "Just < raw & text");
    }

    #[test]
    fn tagged_leaf_without_attributes() {
        let node = HtmlNode::leaf("p", "This is a paragraph of text.");
        assert_eq!(node.render().unwrap(), "<p>This is a paragraph of text.</p>");
    }

    #[test]
    fn tagged_leaf_with_attributes() {
        let node = HtmlNode::leaf("a", "Click me!").with_attribute("href", "https://www.google.com");
        assert_eq!(
            node.render().unwrap(),
            r#"<a href="https://www.google.com">Click me!</a>"#
        );
    }

    #[test]
    fn image_leaf_with_empty_value() {
        let node = HtmlNode::leaf("img", "")
            .with_attribute("src", "cat.png")
            .with_attribute("alt", "a cat");
        assert_eq!(node.render().unwrap(), r#"<img src="cat.png" alt="a cat"></img>"#);
    }

    #[test]
    fn parent_concatenates_children_without_whitespace() {
        let node = HtmlNode::parent(
            "p",
            vec![
                HtmlNode::leaf("b", "Bold text"),
                HtmlNode::text("Normal text"),
                HtmlNode::leaf("i", "italic text"),
                HtmlNode::text("Normal text"),
            ],
        );
        assert_eq!(
            node.render().unwrap(),
            "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
        );
    }

    #[test]
    fn nested_parents() {
        let node = HtmlNode::parent(
            "div",
            vec![HtmlNode::parent(
                "p",
                vec![HtmlNode::parent("span", vec![HtmlNode::text("deep")])],
            )],
        )
        .with_attribute("class", "wrapper");
        assert_eq!(
            node.render().unwrap(),
            r#"<div class="wrapper"><p><span>deep</span></p></div>"#
        );
    }

    #[test]
    fn parent_with_no_children_renders_empty_element() {
        let node = HtmlNode::parent("ul", Vec::new());
        assert_eq!(node.render().unwrap(), "<ul></ul>");
    }

    #[test]
    fn parent_without_tag_fails() {
        let node = HtmlNode::parent("", vec![HtmlNode::text("x")]);
        assert_eq!(node.render(), Err(RenderError::MissingTag));
    }

    #[test]
    fn invalid_descendant_aborts_whole_render() {
        let node = HtmlNode::parent(
            "div",
            vec![HtmlNode::text("ok"), HtmlNode::parent("", Vec::new())],
        );
        assert_eq!(node.render(), Err(RenderError::MissingTag));
    }

    #[test]
    fn equality_is_structural() {
        let a = HtmlNode::parent("p", vec![HtmlNode::text("x")]).with_attribute("id", "1");
        let b = HtmlNode::parent("p", vec![HtmlNode::text("x")]).with_attribute("id", "1");
        let c = HtmlNode::parent("p", vec![HtmlNode::text("y")]).with_attribute("id", "1");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn accessors() {
        let node = HtmlNode::parent("ol", vec![HtmlNode::leaf("li", "a")]);
        assert_eq!(node.tag(), Some("ol"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].tag(), Some("li"));
        assert!(HtmlNode::text("t").children().is_empty());
        assert_eq!(HtmlNode::text("t").tag(), None);
    }
}
