//! strand page - Page facade and app lifecycle
//!
//! Ties a shared document and session history together behind one host
//! object and re-exposes the member crates.

mod app;
mod page;

pub use app::App;
pub use page::Page;

pub use strand_core::{Error, Event, EventDispatcher, EventTarget, Handler, TargetId, handler};
pub use strand_dom::{Document, DomCollection, NodeId, SharedDocument};
pub use strand_history::{Address, History, SharedHistory};
