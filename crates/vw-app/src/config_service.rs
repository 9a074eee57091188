//! Config loading, saving, validation and introspection.

use std::path::Path;

use vw_project::{ConfigError, DashboardConfig};

use crate::error::{AppError, AppResult};

/// Summary of a config for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSummary {
    pub name: String,
    pub version: u32,
    pub cell_count: usize,
    pub manual_cells: usize,
    pub task_count: usize,
    pub max_history: usize,
    pub auto_refresh: bool,
}

/// Load a config file; `.json` is read as JSON, anything else as YAML.
pub fn load_config(path: &Path) -> AppResult<DashboardConfig> {
    let config = vw_project::load(path).map_err(|e| match e {
        ConfigError::Io(source) => AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })?;
    tracing::info!(path = %path.display(), cells = config.cell_count(), "config loaded");
    Ok(config)
}

pub fn save_config(path: &Path, config: &DashboardConfig) -> AppResult<()> {
    vw_project::save(path, config).map_err(|e| match e {
        ConfigError::Io(source) => AppError::ConfigFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

pub fn validate_config(config: &DashboardConfig) -> AppResult<()> {
    vw_project::validate_config(config)?;
    Ok(())
}

/// Write the default config to `path`. Refuses to replace an existing file
/// unless `overwrite` is set.
pub fn init_config(path: &Path, overwrite: bool) -> AppResult<DashboardConfig> {
    if path.exists() && !overwrite {
        return Err(AppError::InvalidInput(format!(
            "{} already exists",
            path.display()
        )));
    }
    let config = DashboardConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

pub fn summarize_config(config: &DashboardConfig) -> ConfigSummary {
    ConfigSummary {
        name: config.name.clone(),
        version: config.version,
        cell_count: config.cell_count(),
        manual_cells: config
            .cells
            .iter()
            .filter(|c| c.manual_reading().is_some())
            .count(),
        task_count: config.tasks.len(),
        max_history: config.max_history(),
        auto_refresh: config.refresh.auto_refresh,
    }
}
