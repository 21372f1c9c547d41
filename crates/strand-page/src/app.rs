//! App lifecycle
//!
//! Re-dispatches the page's lifecycle signals as app-level events: the
//! document's content-loaded event becomes `init`, the window-level load
//! event becomes `load`. Each payload records the original event name.

use serde_json::json;
use strand_core::{Event, EventDispatcher, EventTarget, handler};

use crate::page::Page;

/// App-level lifecycle target
pub struct App {
    title: String,
    events: EventDispatcher,
}

impl App {
    /// Create an app bound to a page's lifecycle
    pub fn new(page: &Page) -> Self {
        let title = page.title();
        let events = EventDispatcher::new();

        let init_events = events.clone();
        page.document().lock().unwrap().subscribe(
            "DOMContentLoaded",
            handler(move |original: &mut Event| {
                init_events.dispatch(
                    "init",
                    Event::with_detail(json!({ "original_event": original.event_type })),
                );
            }),
        );

        let load_events = events.clone();
        page.subscribe(
            "load",
            handler(move |original: &mut Event| {
                load_events.dispatch(
                    "load",
                    Event::with_detail(json!({ "original_event": original.event_type })),
                );
            }),
        );

        Self { title, events }
    }

    /// The title captured from the page at construction
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl EventTarget for App {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
