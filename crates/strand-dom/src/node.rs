//! DOM node data

use crate::NodeId;
use crate::style::StyleProperty;

/// DOM node
///
/// Linked arena layout: all relations are [`NodeId`]s into the owning
/// tree, `NONE` where absent.
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn unlinked(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a document root node
    pub fn document() -> Self {
        Self::unlinked(NodeData::Document)
    }

    /// Create an element node
    pub fn element(tag: &str) -> Self {
        Self::unlinked(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::unlinked(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::unlinked(NodeData::Comment(content.into()))
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(content) => Some(content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercased
    pub tag: String,
    /// Cached id attribute (very common lookup)
    pub id: Option<String>,
    /// Cached class list
    pub classes: Vec<String>,
    /// Remaining attributes
    pub attrs: Vec<Attribute>,
    /// Inline style properties
    pub styles: Vec<StyleProperty>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            styles: Vec::new(),
        }
    }

    /// Get an attribute value
    ///
    /// `id` and `class` read from their caches; everything else from the
    /// attribute list.
    pub fn get_attr(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" => Some(self.classes.join(" ")).filter(|c| !c.is_empty()),
            _ => self
                .attrs
                .iter()
                .find(|attr| attr.name == name)
                .map(|attr| attr.value.clone()),
        }
    }

    /// Set an attribute, keeping the id/class caches in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            _ => {
                for attr in &mut self.attrs {
                    if attr.name == name {
                        attr.value = value.to_string();
                        return;
                    }
                }
                self.attrs.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    /// Check for a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class unless already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class if present
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Get an inline style property value
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|prop| prop.name == name)
            .map(|prop| prop.value.as_str())
    }

    /// Set an inline style property, replacing an existing value
    pub fn set_style(&mut self, name: &str, value: &str) {
        for prop in &mut self.styles {
            if prop.name == name {
                prop.value = value.to_string();
                return;
            }
        }
        self.styles.push(StyleProperty {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
}

/// Attribute
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
