//! History port: Trait for the rolling analysis history.
//!
//! This trait abstracts the storage backend (SQLite) from the application logic.

use crate::domain::HistoryEntry;

/// Trait for local history persistence.
///
/// Implementations keep at most `HISTORY_LIMIT` entries, newest first.
/// A stored entry must load back with identical input and result.
pub trait HistoryStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save an entry and evict anything beyond the newest `HISTORY_LIMIT`.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_entry(&self, entry: &HistoryEntry) -> Result<(), Self::Error>;

    /// Load recent entries (up to `limit`), newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, Self::Error>;

    /// Load a single entry by ID.
    ///
    /// # Returns
    /// `None` if no entry has this ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_entry(&self, id: &str) -> Result<Option<HistoryEntry>, Self::Error>;

    /// Get the number of stored entries.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count_entries(&self) -> Result<usize, Self::Error>;

    /// Delete an entry by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn delete_entry(&self, id: &str) -> Result<(), Self::Error>;

    /// Remove every entry.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
