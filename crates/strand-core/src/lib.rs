//! strand core - Event dispatch and shared plumbing
//!
//! Publish/subscribe dispatcher composed into the other strand crates via
//! the [`EventTarget`] trait, the framework error taxonomy, and option
//! merging helpers.

mod error;
mod events;
mod options;

pub use error::Error;
pub use events::{Event, EventDispatcher, EventTarget, Handler, TargetId, handler};
pub use options::extend_options;
