//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the analysis engine and its collaborators (history storage,
//! narrative service).

mod history;
mod narrative;

pub use history::HistoryStore;
pub use narrative::{CancelFlag, NarrativeError, NarrativeProvider, NarrativeRequest};
