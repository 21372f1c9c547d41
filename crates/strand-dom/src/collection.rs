//! Batched element operations
//!
//! A captured set of elements over a shared document; every operation is
//! a linear pass over the members.

use strand_core::{Error, Handler};

use crate::document::SharedDocument;
use crate::selector::Selector;
use crate::NodeId;

/// A captured set of elements over a shared document
#[derive(Clone)]
pub struct DomCollection {
    document: SharedDocument,
    elements: Vec<NodeId>,
}

impl DomCollection {
    /// Collect every element in the document matching `selector`
    pub fn query(document: &SharedDocument, selector: &str) -> Result<Self, Error> {
        let selector = Selector::parse(selector)?;
        let elements = document.lock().unwrap().query_selector_all(&selector);
        tracing::debug!("query matched {} element(s)", elements.len());
        Ok(Self {
            document: document.clone(),
            elements,
        })
    }

    /// Collect matching elements strictly below `context`
    pub fn query_within(
        document: &SharedDocument,
        selector: &str,
        context: NodeId,
    ) -> Result<Self, Error> {
        let selector = Selector::parse(selector)?;
        let elements = document.lock().unwrap().query_within(&selector, context);
        Ok(Self {
            document: document.clone(),
            elements,
        })
    }

    /// Wrap an already-captured set of elements
    pub fn from_nodes(document: &SharedDocument, elements: Vec<NodeId>) -> Self {
        Self {
            document: document.clone(),
            elements,
        }
    }

    /// The captured element ids
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    /// Number of captured elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the collection captured nothing
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Run `f` for every member with its index
    pub fn each(&self, mut f: impl FnMut(NodeId, usize)) {
        for (index, &id) in self.elements.iter().enumerate() {
            f(id, index);
        }
    }

    /// New collection keeping only members that match `selector`
    pub fn filter(&self, selector: &str) -> Result<Self, Error> {
        let selector = Selector::parse(selector)?;
        let document = self.document.lock().unwrap();
        let elements = self
            .elements
            .iter()
            .copied()
            .filter(|&id| document.matches(id, &selector))
            .collect();
        Ok(Self {
            document: self.document.clone(),
            elements,
        })
    }

    /// New collection of matching descendants of every member, in member
    /// order
    pub fn find(&self, selector: &str) -> Result<Self, Error> {
        let selector = Selector::parse(selector)?;
        let document = self.document.lock().unwrap();
        let mut elements = Vec::new();
        for &id in &self.elements {
            elements.extend(document.query_within(&selector, id));
        }
        Ok(Self {
            document: self.document.clone(),
            elements,
        })
    }

    /// Add a class to every member
    pub fn add_class(&self, class: &str) {
        let mut document = self.document.lock().unwrap();
        for &id in &self.elements {
            if let Some(element) = document.tree_mut().get_mut(id).and_then(|n| n.as_element_mut()) {
                element.add_class(class);
            }
        }
    }

    /// Remove a class from every member
    pub fn remove_class(&self, class: &str) {
        let mut document = self.document.lock().unwrap();
        for &id in &self.elements {
            if let Some(element) = document.tree_mut().get_mut(id).and_then(|n| n.as_element_mut()) {
                element.remove_class(class);
            }
        }
    }

    /// Apply inline style properties to every member
    pub fn css(&self, styles: &[(&str, &str)]) {
        let mut document = self.document.lock().unwrap();
        for &id in &self.elements {
            if let Some(element) = document.tree_mut().get_mut(id).and_then(|n| n.as_element_mut()) {
                for (name, value) in styles {
                    element.set_style(name, value);
                }
            }
        }
    }

    /// Detach every member from the tree
    pub fn remove(&self) {
        let mut document = self.document.lock().unwrap();
        for &id in &self.elements {
            document.remove(id);
        }
    }

    /// Attach a handler to every member's dispatcher
    pub fn subscribe(&self, event_types: &str, handler: Handler) {
        let mut document = self.document.lock().unwrap();
        for &id in &self.elements {
            document.events_for(id).subscribe(event_types, handler.clone());
        }
    }

    /// Detach a previously attached handler from every member
    pub fn unsubscribe(&self, event_types: &str, handler: &Handler) {
        let mut document = self.document.lock().unwrap();
        for &id in &self.elements {
            document.events_for(id).unsubscribe(event_types, handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use std::sync::{Arc, Mutex};
    use strand_core::{handler, Event};

    /// body > ul#menu > (li.item.active, li.item) plus body > p
    fn fixture() -> SharedDocument {
        let shared = Document::shared("about:blank");
        {
            let mut doc = shared.lock().unwrap();
            let body = doc.body();
            let list = doc.create_element("ul", body);
            let first = doc.create_element("li", list);
            let second = doc.create_element("li", list);
            doc.create_element("p", body);

            let tree = doc.tree_mut();
            tree.get_mut(list).unwrap().as_element_mut().unwrap().set_attr("id", "menu");
            tree.get_mut(first)
                .unwrap()
                .as_element_mut()
                .unwrap()
                .set_attr("class", "item active");
            tree.get_mut(second)
                .unwrap()
                .as_element_mut()
                .unwrap()
                .set_attr("class", "item");
        }
        shared
    }

    #[test]
    fn test_query_and_len() {
        let doc = fixture();
        let items = DomCollection::query(&doc, "li").unwrap();
        assert_eq!(items.len(), 2);

        let everything = DomCollection::query(&doc, "ul, p").unwrap();
        assert_eq!(everything.len(), 2);
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let doc = fixture();
        assert!(DomCollection::query(&doc, "li[checked]").is_err());
    }

    #[test]
    fn test_filter() {
        let doc = fixture();
        let items = DomCollection::query(&doc, "li").unwrap();

        let active = items.filter(".active").unwrap();
        assert_eq!(active.len(), 1);

        let none = items.filter("p").unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_find_in_member_order() {
        let doc = fixture();
        let body = DomCollection::query(&doc, "body").unwrap();

        let items = body.find(".item").unwrap();
        assert_eq!(items.len(), 2);

        let expected = DomCollection::query(&doc, ".item").unwrap();
        assert_eq!(items.elements(), expected.elements());
    }

    #[test]
    fn test_each_passes_indices() {
        let doc = fixture();
        let items = DomCollection::query(&doc, "li").unwrap();

        let mut indices = Vec::new();
        items.each(|_, index| indices.push(index));
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_class_editing() {
        let doc = fixture();
        let items = DomCollection::query(&doc, "li").unwrap();

        items.add_class("selected");
        assert_eq!(items.filter(".selected").unwrap().len(), 2);

        items.remove_class("selected");
        assert!(items.filter(".selected").unwrap().is_empty());
    }

    #[test]
    fn test_css_applies_to_all_members() {
        let doc = fixture();
        let items = DomCollection::query(&doc, "li").unwrap();
        items.css(&[("height", "20px"), ("margin-top", "4px")]);

        let document = doc.lock().unwrap();
        for &id in items.elements() {
            let element = document.tree().get(id).unwrap().as_element().unwrap();
            assert_eq!(element.style("height"), Some("20px"));
            assert_eq!(element.style("margin-top"), Some("4px"));
        }
    }

    #[test]
    fn test_remove_detaches_members() {
        let doc = fixture();
        DomCollection::query(&doc, "li").unwrap().remove();

        assert!(DomCollection::query(&doc, "li").unwrap().is_empty());
        // The list itself is still attached.
        assert_eq!(DomCollection::query(&doc, "ul").unwrap().len(), 1);
    }

    #[test]
    fn test_subscribe_and_unsubscribe_members() {
        let doc = fixture();
        let items = DomCollection::query(&doc, "li").unwrap();

        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        let h = handler(move |_| *c.lock().unwrap() += 1);
        items.subscribe("click", h.clone());

        {
            let document = doc.lock().unwrap();
            for &id in items.elements() {
                document.dispatch_to(id, "click", Event::new());
            }
        }
        assert_eq!(*count.lock().unwrap(), 2);

        items.unsubscribe("click", &h);
        {
            let document = doc.lock().unwrap();
            for &id in items.elements() {
                document.dispatch_to(id, "click", Event::new());
            }
        }
        assert_eq!(*count.lock().unwrap(), 2);
    }
}
