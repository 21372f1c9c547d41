//! Event dispatch
//!
//! Publish/subscribe table keyed by event-type name. Handlers fire
//! synchronously, in registration order, on the caller's thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;

/// Identity of a dispatching object.
///
/// Stands in for object identity when an event records which dispatcher
/// fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetId(u64);

impl TargetId {
    /// Placeholder for an event that has not been routed through a
    /// dispatcher yet.
    pub const UNSET: TargetId = TargetId(0);

    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TargetId {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Event payload
///
/// One struct covers every event kind; kind-specific fields are optional
/// (entry url and state on navigation events, previous hash/state on
/// `change` events). `event_type` and `current_target` are filled in by
/// the dispatcher at dispatch time.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Event {
    /// Name of the event being dispatched
    pub event_type: String,
    /// Dispatcher the event is firing from
    pub current_target: TargetId,
    /// Path of the history entry a navigation event refers to
    pub url: Option<String>,
    /// State blob of the history entry a navigation event refers to
    pub state: Option<Value>,
    /// Path before the navigation that produced a `change` event
    pub previous_hash: Option<String>,
    /// State blob before the navigation that produced a `change` event
    pub previous_state: Option<Value>,
    /// Free-form payload
    pub detail: Option<Value>,
}

impl Event {
    /// Create an empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event carrying a free-form payload
    pub fn with_detail(detail: Value) -> Self {
        Self {
            detail: Some(detail),
            ..Self::default()
        }
    }

    /// Create a navigation event for a history entry
    pub fn pop_state(url: impl Into<String>, state: Option<Value>) -> Self {
        Self {
            url: Some(url.into()),
            state,
            ..Self::default()
        }
    }

    /// Create a `change` event recording the pre-navigation values
    pub fn change(previous_hash: impl Into<String>, previous_state: Option<Value>) -> Self {
        Self {
            previous_hash: Some(previous_hash.into()),
            previous_state,
            ..Self::default()
        }
    }
}

/// Shareable event handler.
///
/// Removal matches on pointer identity of the closure allocation, so keep
/// the returned handle around when the subscription must be undone later.
pub type Handler = Arc<dyn Fn(&mut Event) + Send + Sync>;

/// Wrap a closure as a shareable [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&mut Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Publish/subscribe event dispatcher.
///
/// Cloning is shallow: clones share the same subscription table and
/// target identity, which lets registered closures hold a handle to the
/// dispatcher of the object that owns them.
#[derive(Clone)]
pub struct EventDispatcher {
    target: TargetId,
    table: Arc<Mutex<HashMap<String, Vec<Handler>>>>,
}

impl EventDispatcher {
    /// Create a dispatcher with a fresh target identity
    pub fn new() -> Self {
        Self {
            target: TargetId::next(),
            table: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Identity recorded as `current_target` on dispatched events
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Attach a handler to one or more event types.
    ///
    /// `event_types` is a single name or a comma/whitespace separated
    /// list. Tokens of length <= 1 are ignored; they are the debris of
    /// splitting adjacent delimiters, not usable event names.
    pub fn subscribe(&self, event_types: &str, handler: Handler) {
        let mut table = self.table.lock().unwrap();
        for name in split_types(event_types) {
            tracing::debug!("subscribe {}", name);
            table.entry(name.to_string()).or_default().push(handler.clone());
        }
    }

    /// Detach a previously attached handler from the listed event types.
    ///
    /// The same `Handler` handle that was subscribed must be passed;
    /// matching is by pointer identity. Unknown types or handlers are a
    /// silent no-op.
    pub fn unsubscribe(&self, event_types: &str, handler: &Handler) {
        let mut table = self.table.lock().unwrap();
        for name in split_types(event_types) {
            if let Some(handlers) = table.get_mut(name) {
                handlers.retain(|h| !Arc::ptr_eq(h, handler));
            }
        }
    }

    /// Detach every handler from the listed event types.
    pub fn unsubscribe_all(&self, event_types: &str) {
        let mut table = self.table.lock().unwrap();
        for name in split_types(event_types) {
            table.remove(name);
        }
    }

    /// Fire an event, invoking handlers in registration order.
    ///
    /// The payload is stamped with the event name and this dispatcher's
    /// target before the first handler runs. Returns the number of
    /// handlers invoked; no subscribers is a no-op returning 0.
    ///
    /// The handler list is snapshotted at dispatch start: a handler that
    /// subscribes or unsubscribes during dispatch only affects later
    /// dispatches. A panicking handler is not caught and aborts the
    /// remaining invocations.
    pub fn dispatch(&self, event_type: &str, mut event: Event) -> usize {
        let snapshot: Vec<Handler> = {
            let table = self.table.lock().unwrap();
            match table.get(event_type) {
                Some(handlers) => handlers.clone(),
                None => return 0,
            }
        };

        event.event_type = event_type.to_string();
        event.current_target = self.target;

        tracing::debug!("dispatch {} to {} handler(s)", event_type, snapshot.len());
        for handler in &snapshot {
            handler(&mut event);
        }
        snapshot.len()
    }

    /// Fire an event with an empty payload
    pub fn emit(&self, event_type: &str) -> usize {
        self.dispatch(event_type, Event::new())
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Objects that fire events through an owned dispatcher.
///
/// Composition replaces the prototype chaining of classic event-emitter
/// hierarchies: implement `events()` and the subscription surface comes
/// with it.
pub trait EventTarget {
    /// The dispatcher this object fires its events through
    fn events(&self) -> &EventDispatcher;

    /// Attach a handler to one or more event types
    fn subscribe(&self, event_types: &str, handler: Handler) {
        self.events().subscribe(event_types, handler);
    }

    /// Detach a previously attached handler
    fn unsubscribe(&self, event_types: &str, handler: &Handler) {
        self.events().unsubscribe(event_types, handler);
    }

    /// Detach every handler for the listed event types
    fn unsubscribe_all(&self, event_types: &str) {
        self.events().unsubscribe_all(event_types);
    }

    /// Fire an event on behalf of this object
    fn dispatch(&self, event_type: &str, event: Event) -> usize {
        self.events().dispatch(event_type, event)
    }
}

fn split_types(event_types: &str) -> impl Iterator<Item = &str> {
    event_types
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| name.len() > 1)
}
