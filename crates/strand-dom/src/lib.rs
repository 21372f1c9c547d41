//! strand DOM - Compact document model
//!
//! Arena DOM tree, selector matching, and the batched [`DomCollection`]
//! wrapper over a shared document.

mod collection;
mod document;
mod node;
mod selector;
mod style;
mod tree;

pub use collection::DomCollection;
pub use document::{Document, SharedDocument};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::Selector;
pub use style::{StyleProperty, full_height};
pub use tree::DomTree;

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether the id refers to a real node
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
