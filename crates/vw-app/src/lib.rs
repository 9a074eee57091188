//! Shared application service layer for voltwatch.
//!
//! Frontends drive a [`DashboardSession`] and poll its [`DashboardView`];
//! config loading, task runs, exports and history queries live here too so
//! every frontend behaves the same.

pub mod config_service;
pub mod dashboard;
pub mod error;
pub mod export_service;
pub mod progress;
pub mod query;
pub mod session;
pub mod source;
pub mod task_service;

// Re-export key types for convenience
pub use config_service::{
    ConfigSummary, init_config, load_config, save_config, summarize_config, validate_config,
};
pub use dashboard::{CellCard, DashboardView};
pub use error::{AppError, AppResult};
pub use export_service::{ExportKind, export_history, export_series, export_task_log, series_csv};
pub use progress::SimProgressEvent;
pub use query::{HistorySummary, extract_cell_series, get_history_summary, list_cell_ids};
pub use session::DashboardSession;
pub use source::ConfiguredSource;
pub use task_service::{TaskRunOptions, build_sequencer, run_tasks};
