//! Session history
//!
//! Entry list with a current index: push truncates forward history,
//! back/forward/go move the index. Every move fires a `popstate` event on
//! the history's own dispatcher so deep-link trackers can resynchronize.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use strand_core::{Event, EventDispatcher, EventTarget, Handler};

/// A history shared between the page and deep-link trackers
pub type SharedHistory = Arc<Mutex<History>>;

/// History entry
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub state: Option<Value>,
}

/// Session history
///
/// `popstate` handlers run while the caller still borrows the history, so
/// they must not call back into it; resynchronize from the event payload
/// instead.
pub struct History {
    entries: Vec<HistoryEntry>,
    current: usize,
    events: EventDispatcher,
}

impl History {
    pub fn new(initial_url: &str) -> Self {
        Self {
            entries: vec![HistoryEntry {
                url: initial_url.to_string(),
                title: String::new(),
                state: None,
            }],
            current: 0,
            events: EventDispatcher::new(),
        }
    }

    /// Wrap a fresh history for sharing
    pub fn shared(initial_url: &str) -> SharedHistory {
        Arc::new(Mutex::new(Self::new(initial_url)))
    }

    /// Push a new entry, dropping forward history
    pub fn push_state(&mut self, state: Option<Value>, title: &str, url: &str) {
        self.entries.truncate(self.current + 1);
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            title: title.to_string(),
            state,
        });
        self.current = self.entries.len() - 1;
        tracing::debug!("push {} ({} entries)", url, self.entries.len());
    }

    /// Replace the current entry
    pub fn replace_state(&mut self, state: Option<Value>, title: &str, url: &str) {
        let entry = &mut self.entries[self.current];
        entry.url = url.to_string();
        entry.title = title.to_string();
        entry.state = state;
    }

    /// Go back one entry
    pub fn back(&mut self) -> Option<HistoryEntry> {
        self.go(-1)
    }

    /// Go forward one entry
    pub fn forward(&mut self) -> Option<HistoryEntry> {
        self.go(1)
    }

    /// Move by `delta` entries; fires `popstate` when the move lands
    pub fn go(&mut self, delta: i32) -> Option<HistoryEntry> {
        let target = self.current as i64 + delta as i64;
        if target < 0 || target >= self.entries.len() as i64 {
            return None;
        }
        self.current = target as usize;
        let entry = self.entries[self.current].clone();
        tracing::debug!("navigate to {}", entry.url);
        self.events.dispatch(
            "popstate",
            Event::pop_state(entry.url.clone(), entry.state.clone()),
        );
        Some(entry)
    }

    /// Re-fire `popstate` for the current entry without moving.
    ///
    /// Used after a push so every popstate listener observes the same
    /// signal whether the navigation came from a push or from
    /// back/forward.
    pub fn notify_pop_state(&self) -> usize {
        let entry = self.current();
        self.events.dispatch(
            "popstate",
            Event::pop_state(entry.url.clone(), entry.state.clone()),
        )
    }

    /// Subscribe to `popstate`
    pub fn on_pop_state(&self, handler: Handler) {
        self.events.subscribe("popstate", handler);
    }

    /// Current entry
    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.current]
    }

    /// Number of entries
    pub fn length(&self) -> usize {
        self.entries.len()
    }
}

impl EventTarget for History {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
