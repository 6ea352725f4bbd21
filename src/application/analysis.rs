//! Analysis service: Runs the engine and keeps the rolling history.
//!
//! This service coordinates:
//! - Panel analysis (pure, never fails)
//! - History entry creation
//! - Persistence, where a failure is reported but never changes the result

use std::sync::Arc;

use crate::domain::{analyze, AnalysisResult, CbcInput, HistoryEntry};
use crate::ports::HistoryStore;
use crate::HemoscanError;

/// An analyzed panel and whether it reached the history store.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedPanel {
    pub entry: HistoryEntry,
    pub persisted: bool,
}

impl AnalyzedPanel {
    #[must_use]
    pub fn result(&self) -> &AnalysisResult {
        &self.entry.result
    }

    #[must_use]
    pub fn input(&self) -> &CbcInput {
        &self.entry.input
    }
}

/// Service for analyzing CBC panels.
pub struct AnalysisService<S>
where
    S: HistoryStore,
{
    storage: Arc<S>,
}

impl<S> AnalysisService<S>
where
    S: HistoryStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new analysis service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Analyze a panel and record it in the history.
    #[must_use]
    pub fn run(&self, input: CbcInput) -> AnalyzedPanel {
        let result = analyze(&input);

        tracing::info!(
            "Analysis complete: type={}, severity={}, risk={}",
            result.classification.anemia_type,
            result.classification.severity,
            result.risk_level
        );

        let entry = HistoryEntry::new(input, result);
        let persisted = match self.storage.save_entry(&entry) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save history entry: {}", e);
                false
            }
        };

        AnalyzedPanel { entry, persisted }
    }

    /// Get recent entries, newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HemoscanError> {
        self.storage
            .load_recent(limit)
            .map_err(|e| HemoscanError::Storage(e.into()))
    }

    /// Load one entry by ID.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn load(&self, id: &str) -> Result<Option<HistoryEntry>, HemoscanError> {
        self.storage
            .load_entry(id)
            .map_err(|e| HemoscanError::Storage(e.into()))
    }

    /// Get the number of stored entries.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn history_count(&self) -> Result<usize, HemoscanError> {
        self.storage
            .count_entries()
            .map_err(|e| HemoscanError::Storage(e.into()))
    }

    /// Remove a single entry.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn delete(&self, id: &str) -> Result<(), HemoscanError> {
        self.storage
            .delete_entry(id)
            .map_err(|e| HemoscanError::Storage(e.into()))
    }

    /// Remove every entry.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn clear_history(&self) -> Result<(), HemoscanError> {
        self.storage
            .clear_all()
            .map_err(|e| HemoscanError::Storage(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::SqliteHistoryStore;
    use crate::adapters::StorageError;
    use crate::domain::{samples, AnemiaType, RiskLevel, HISTORY_LIMIT};

    fn create_test_service() -> AnalysisService<SqliteHistoryStore> {
        let storage = Arc::new(SqliteHistoryStore::in_memory().expect("Should create db"));
        AnalysisService::new(storage)
    }

    /// Store that refuses every write.
    struct FailingStore;

    impl HistoryStore for FailingStore {
        type Error = StorageError;

        fn save_entry(&self, _: &HistoryEntry) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn load_recent(&self, _: usize) -> Result<Vec<HistoryEntry>, StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn load_entry(&self, _: &str) -> Result<Option<HistoryEntry>, StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn count_entries(&self) -> Result<usize, StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn delete_entry(&self, _: &str) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }
        fn clear_all(&self) -> Result<(), StorageError> {
            Err(StorageError::LockPoisoned)
        }
    }

    #[test]
    fn test_run_persists_entry() {
        let service = create_test_service();
        let input = samples::find("iron-def").expect("Sample exists").data;

        let panel = service.run(input);
        assert!(panel.persisted);
        assert_eq!(
            panel.result().classification.anemia_type,
            AnemiaType::IronDeficiency
        );
        assert_eq!(panel.result().risk_level, RiskLevel::Critical);

        let loaded = service
            .load(&panel.entry.id)
            .expect("Should load")
            .expect("Should exist");
        assert_eq!(loaded, panel.entry);
        assert_eq!(service.history_count().expect("Should count"), 1);
    }

    #[test]
    fn test_save_failure_keeps_result() {
        let service = AnalysisService::new(Arc::new(FailingStore));
        let input = samples::find("chronic").expect("Sample exists").data;

        let panel = service.run(input);
        assert!(!panel.persisted);
        assert_eq!(*panel.result(), analyze(&input));
        assert!(matches!(
            service.recent(HISTORY_LIMIT),
            Err(HemoscanError::Storage(StorageError::LockPoisoned))
        ));
    }

    #[test]
    fn test_recent_is_newest_first_and_bounded() {
        let service = create_test_service();
        let mut last_id = String::new();
        for sample in samples::SAMPLE_PATIENTS.iter().cycle().take(12) {
            last_id = service.run(sample.data).entry.id;
        }

        let recent = service.recent(HISTORY_LIMIT).expect("Should load");
        assert_eq!(recent.len(), HISTORY_LIMIT);
        assert_eq!(recent[0].id, last_id);
        assert!(recent
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn test_delete_and_clear_history() {
        let service = create_test_service();
        let normal = service.run(samples::find("normal").expect("Sample exists").data);
        service.run(samples::find("severe").expect("Sample exists").data);

        service.delete(&normal.entry.id).expect("Should delete");
        assert!(service.load(&normal.entry.id).expect("Should query").is_none());
        assert_eq!(service.history_count().expect("Should count"), 1);

        service.clear_history().expect("Should clear");
        assert_eq!(service.history_count().expect("Should count"), 0);
    }
}
