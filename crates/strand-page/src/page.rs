//! Page facade
//!
//! Owns the shared document and session history and plays the part of
//! the window: window-level events fire on the page's own dispatcher,
//! document-level events on the document's.

use strand_core::{Error, Event, EventDispatcher, EventTarget};
use strand_dom::{Document, DomCollection, SharedDocument};
use strand_history::{Address, History, SharedHistory};

/// A page: one document, one session history, one window-level target
pub struct Page {
    document: SharedDocument,
    history: SharedHistory,
    events: EventDispatcher,
}

impl Page {
    /// Create a page at `url` with the given title
    pub fn new(url: &str, title: &str) -> Self {
        let document = Document::shared(url);
        document.lock().unwrap().set_title(title);

        Self {
            document,
            history: History::shared(url),
            events: EventDispatcher::new(),
        }
    }

    /// The shared document
    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// The shared session history
    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    /// Current document title
    pub fn title(&self) -> String {
        self.document.lock().unwrap().title()
    }

    /// A deep-link tracker mounted at the domain root
    pub fn address(&self) -> Address {
        Address::new(self.history.clone())
    }

    /// A deep-link tracker mounted under `root`
    pub fn address_with_root(&self, root: &str) -> Result<Address, Error> {
        Address::with_root(self.history.clone(), root)
    }

    /// Collect elements of this page's document matching `selector`
    pub fn select(&self, selector: &str) -> Result<DomCollection, Error> {
        DomCollection::query(&self.document, selector)
    }

    /// Run the load sequence: the document's content-loaded event first,
    /// then the window-level load event.
    pub fn load(&self) {
        tracing::info!("page load: {}", self.document.lock().unwrap().url());

        let document_events = self.document.lock().unwrap().events().clone();
        document_events.dispatch("DOMContentLoaded", Event::new());
        self.events.dispatch("load", Event::new());
    }
}

impl EventTarget for Page {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
