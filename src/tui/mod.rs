//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Dashboard with engine status and analysis history
//! - CBC panel entry
//! - Analysis result with report export
//! - Streamed AI insights

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{NarrativeProgress, NarrativeWorker, NarrativeWorkerHandle};
