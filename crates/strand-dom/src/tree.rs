//! DOM tree (arena-based allocation)

use crate::node::Node;
use crate::NodeId;

/// Arena-based DOM tree
///
/// Nodes are never freed; removal detaches a subtree from its parent so
/// traversals no longer reach it.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes ever allocated in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only the root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Allocate a new element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Allocate a new text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(Node::text(content))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let prev_last = self.nodes[parent.0 as usize].last_child;

        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = prev_last;
        }

        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(node) => (node.parent, node.prev_sibling, node.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Iterate the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |node| node.first_child),
        }
    }

    /// Collect the descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(id, &mut out);
        out
    }

    fn collect_descendants(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for (child, _) in self.children(id) {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// Walk ancestors from the parent of `id` up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |node| node.parent),
        }
    }

    /// Concatenated text of a node's subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            out.push_str(text);
        }
        for descendant in self.descendants(id) {
            if let Some(text) = self.get(descendant).and_then(Node::as_text) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace a node's children with a single text node
    pub fn set_text(&mut self, id: NodeId, content: &str) {
        if self.get(id).is_none() {
            return;
        }
        loop {
            let first = match self.get(id) {
                Some(node) if node.first_child.is_valid() => node.first_child,
                _ => break,
            };
            self.detach(first);
        }
        let text = self.create_text(content);
        self.append_child(id, text);
    }

    /// Whether `ancestor` lies on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|candidate| candidate == ancestor)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over ancestors, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children_order() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");

        tree.append_child(tree.root(), a);
        tree.append_child(tree.root(), b);
        tree.append_child(tree.root(), c);

        let ids: Vec<NodeId> = tree.children(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_detach_middle_child() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        tree.append_child(tree.root(), a);
        tree.append_child(tree.root(), b);
        tree.append_child(tree.root(), c);

        tree.detach(b);

        let ids: Vec<NodeId> = tree.children(tree.root()).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
        assert!(!tree.get(b).unwrap().parent.is_valid());
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = DomTree::new();
        let list = tree.create_element("ul");
        let item1 = tree.create_element("li");
        let item2 = tree.create_element("li");
        let link = tree.create_element("a");

        tree.append_child(tree.root(), list);
        tree.append_child(list, item1);
        tree.append_child(list, item2);
        tree.append_child(item1, link);

        assert_eq!(tree.descendants(tree.root()), vec![list, item1, link, item2]);
    }

    #[test]
    fn test_text_content_and_set_text() {
        let mut tree = DomTree::new();
        let title = tree.create_element("title");
        tree.append_child(tree.root(), title);

        tree.set_text(title, "first");
        assert_eq!(tree.text_content(title), "first");

        tree.set_text(title, "second");
        assert_eq!(tree.text_content(title), "second");
    }

    #[test]
    fn test_is_ancestor() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(tree.root(), outer);
        tree.append_child(outer, inner);

        assert!(tree.is_ancestor(outer, inner));
        assert!(!tree.is_ancestor(inner, outer));
    }
}
