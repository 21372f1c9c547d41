//! Deep-link address tracking
//!
//! Tracks the history path relative to an application root and mirrors
//! the last-navigated state blob. The cached path is never read without
//! having been re-derived from the live history entry first: a resync
//! handler registered at construction follows every `popstate`, and
//! `set_hash` routes its own push through a synthetic `popstate`.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use strand_core::{Error, Event, EventDispatcher, EventTarget, handler};

use crate::history::SharedHistory;

#[derive(Debug, Default)]
struct AddressState {
    hash: String,
    state: Option<Value>,
}

/// Deep-link tracker over a shared session history
pub struct Address {
    root: String,
    inner: Arc<Mutex<AddressState>>,
    history: SharedHistory,
    events: EventDispatcher,
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Address")
            .field("root", &self.root)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl Address {
    /// Create an address tracker mounted at the domain root `/`
    pub fn new(history: SharedHistory) -> Self {
        Self::with_root(history, "/").expect("\"/\" is a valid root")
    }

    /// Create an address tracker for an application mounted under `root`.
    ///
    /// The root is the path prefix stripped from every observed entry;
    /// it must be an absolute path.
    pub fn with_root(history: SharedHistory, root: &str) -> Result<Self, Error> {
        if !root.starts_with('/') {
            return Err(Error::type_mismatch("absolute root path", root));
        }

        let inner = Arc::new(Mutex::new(AddressState::default()));

        {
            let history = history.lock().unwrap();
            let entry = history.current();
            let mut state = inner.lock().unwrap();
            state.hash = strip_root(root, &entry.url);
            state.state = entry.state.clone();
        }

        let resync_inner = inner.clone();
        let resync_root = root.to_string();
        history.lock().unwrap().on_pop_state(handler(move |event: &mut Event| {
            let mut state = resync_inner.lock().unwrap();
            if let Some(url) = &event.url {
                state.hash = strip_root(&resync_root, url);
            }
            state.state = event.state.clone();
        }));

        Ok(Self {
            root: root.to_string(),
            inner,
            history,
            events: EventDispatcher::new(),
        })
    }

    /// The configured application root
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Last-resynchronized path, always `/`-prefixed
    pub fn hash(&self) -> String {
        self.inner.lock().unwrap().hash.clone()
    }

    /// Last-resynchronized state blob
    pub fn state(&self) -> Option<Value> {
        self.inner.lock().unwrap().state.clone()
    }

    /// Navigate to a new path under the root.
    ///
    /// A path equal to the current one is a no-op returning `false`: no
    /// entry is pushed and no event fires. Otherwise an entry is pushed
    /// with the given title and state, a synthetic `popstate` resyncs
    /// every history listener (this tracker included), and a `change`
    /// event carrying the previous path and state goes out to this
    /// object's own subscribers. The popstate always precedes the
    /// `change`, so `change` subscribers observe history already updated.
    pub fn set_hash(&self, new_hash: &str, title: &str, state: Option<Value>) -> bool {
        let target = normalize_hash(new_hash);
        let (previous_hash, previous_state) = {
            let current = self.inner.lock().unwrap();
            (current.hash.clone(), current.state.clone())
        };

        if previous_hash == target {
            return false;
        }

        let url = resolve(&self.root, new_hash);
        tracing::debug!("set_hash {} -> {}", previous_hash, target);

        self.history
            .lock()
            .unwrap()
            .push_state(state, title, &url);
        self.history.lock().unwrap().notify_pop_state();

        self.dispatch("change", Event::change(previous_hash, previous_state));
        true
    }
}

impl EventTarget for Address {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}

/// Derive the root-relative path of a history entry.
///
/// An entry outside the root keeps its path as observed; the component
/// is not safety-critical and prefers a readable value over a failure.
fn strip_root(root: &str, path: &str) -> String {
    let stripped = path.strip_prefix(root).unwrap_or(path);
    format!("/{}", stripped.trim_start_matches('/'))
}

fn normalize_hash(hash: &str) -> String {
    format!("/{}", hash.trim_start_matches('/'))
}

fn resolve(root: &str, hash: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), hash.trim_start_matches('/'))
}
