//! strand history - Session history and deep linking
//!
//! In-memory session history (the substrate the browser would otherwise
//! provide) and the [`Address`] deep-link tracker layered on top of it.

mod address;
mod history;

pub use address::Address;
pub use history::{History, HistoryEntry, SharedHistory};
