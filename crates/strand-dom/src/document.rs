//! Document - high-level document API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use strand_core::{Event, EventDispatcher, EventTarget};

use crate::selector::Selector;
use crate::tree::DomTree;
use crate::NodeId;

/// A document shared between collections and host code
pub type SharedDocument = Arc<Mutex<Document>>;

/// Document over an arena tree
///
/// Owns the tree, the document-level event dispatcher, and a per-node
/// dispatcher table so collections can attach listeners to individual
/// elements.
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    listeners: HashMap<NodeId, EventDispatcher>,
    events: EventDispatcher,
}

impl Document {
    /// Create a document with the html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        tree.append_child(root, html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: HashMap::new(),
            events: EventDispatcher::new(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: HashMap::new(),
            events: EventDispatcher::new(),
        }
    }

    /// Wrap a fresh document for sharing
    pub fn shared(url: &str) -> SharedDocument {
        Arc::new(Mutex::new(Self::new(url)))
    }

    /// Document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Create an element and append it under `parent`
    pub fn create_element(&mut self, tag: &str, parent: NodeId) -> NodeId {
        let id = self.tree.create_element(tag);
        self.tree.append_child(parent, id);
        id
    }

    /// Document title (text of <title> under <head>)
    pub fn title(&self) -> String {
        match self.title_element() {
            Some(title) => self.tree.text_content(title),
            None => String::new(),
        }
    }

    /// Set the document title, creating <title> on demand
    pub fn set_title(&mut self, title: &str) {
        let element = match self.title_element() {
            Some(element) => element,
            None => {
                if !self.head_element.is_valid() {
                    return;
                }
                self.create_element("title", self.head_element)
            }
        };
        self.tree.set_text(element, title);
    }

    fn title_element(&self) -> Option<NodeId> {
        if !self.head_element.is_valid() {
            return None;
        }
        self.tree
            .children(self.head_element)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.tag == "title"))
            .map(|(id, _)| id)
    }

    /// Get element by id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&node_id| {
                self.tree
                    .get(node_id)
                    .and_then(|node| node.as_element())
                    .is_some_and(|element| element.id.as_deref() == Some(id))
            })
    }

    /// All elements under the root matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.query_within(selector, self.tree.root())
    }

    /// All elements strictly below `context` matching `selector`
    pub fn query_within(&self, selector: &Selector, context: NodeId) -> Vec<NodeId> {
        self.tree
            .descendants(context)
            .into_iter()
            .filter(|&id| selector.matches(&self.tree, id))
            .collect()
    }

    /// Check one element against a selector
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(&self.tree, id)
    }

    /// Per-element dispatcher, created on first use.
    ///
    /// Dispatchers are shallow clones of the stored entry, so handlers
    /// subscribed through the returned handle are seen by later
    /// dispatches.
    pub fn events_for(&mut self, id: NodeId) -> EventDispatcher {
        self.listeners.entry(id).or_default().clone()
    }

    /// Fire an event on one element's dispatcher
    pub fn dispatch_to(&self, id: NodeId, event_type: &str, event: Event) -> usize {
        match self.listeners.get(&id) {
            Some(dispatcher) => dispatcher.dispatch(event_type, event),
            None => 0,
        }
    }

    /// Detach an element and drop the listeners of its subtree
    pub fn remove(&mut self, id: NodeId) {
        tracing::debug!("remove node {:?}", id);
        for descendant in self.tree.descendants(id) {
            self.listeners.remove(&descendant);
        }
        self.listeners.remove(&id);
        self.tree.detach(id);
    }
}

impl EventTarget for Document {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
