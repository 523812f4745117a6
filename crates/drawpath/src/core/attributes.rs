//! Attribute access contract for diagram cells
//!
//! The classification pipeline never touches XML directly. It reads and
//! writes cells through [`AttributeView`], a named-attribute → text
//! contract. [`CellNode`] is the owned implementation produced by the
//! document loader.

use super::StyleProperties;

/// Named attribute access for one underlying diagram node
pub trait AttributeView {
    /// Get the text of an attribute, `None` if the attribute is absent
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Set the text of an attribute, creating it if absent
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Check whether an attribute is present at all
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Parse the `style` attribute, `None` if the node has no style
    fn style_properties(&self) -> Option<StyleProperties> {
        self.attribute("style").map(StyleProperties::parse)
    }
}

/// An owned diagram node: a tag name and its attributes in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellNode {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl CellNode {
    /// Create an empty node with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Create an `mxCell` node from attribute pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut node = Self::new("mxCell");
        for (name, value) in pairs {
            node.set_attribute(name, value);
        }
        node
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The cell id, if present
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Iterate over attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl AttributeView for CellNode {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attributes
                .push((name.to_string(), value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_node_attributes() {
        let node = CellNode::from_pairs([("id", "v1"), ("value", "A"), ("style", "ellipse;")]);
        assert_eq!(node.tag(), "mxCell");
        assert_eq!(node.id(), Some("v1"));
        assert_eq!(node.attribute("value"), Some("A"));
        assert!(node.has_attribute("style"));
        assert!(!node.has_attribute("edge"));
    }

    #[test]
    fn test_set_attribute_updates_or_appends() {
        let mut node = CellNode::from_pairs([("id", "e1"), ("value", "")]);
        node.set_attribute("value", "4");
        node.set_attribute("style", "endArrow=none;");

        let attrs: Vec<_> = node.attributes().collect();
        assert_eq!(
            attrs,
            vec![("id", "e1"), ("value", "4"), ("style", "endArrow=none;")]
        );
    }

    #[test]
    fn test_style_properties_from_view() {
        let node = CellNode::from_pairs([("id", "v1"), ("style", "ellipse;html=1;")]);
        let style = node.style_properties().unwrap();
        assert!(style.contains("ellipse"));

        let bare = CellNode::from_pairs([("id", "0")]);
        assert!(bare.style_properties().is_none());
    }
}
