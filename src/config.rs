use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::ui::state::grid_handle::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

pub const DB_PATH_VAR: &str = "PANELBOARD_DB";
pub const DATA_DIR_VAR: &str = "PANELBOARD_DATA_DIR";
pub const PAGE_SIZE_VAR: &str = "PANELBOARD_PAGE_SIZE";
pub const LOG_VAR: &str = "PANELBOARD_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub page_size: usize,
    pub log_filter: String,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from a variable lookup; anything unset falls
    /// back to the platform data directory and built-in defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = match non_empty(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let db_path = non_empty(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("catalog.sqlite"));
        let page_size = non_empty(PAGE_SIZE_VAR)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|size| PAGE_SIZE_OPTIONS.contains(size))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let log_filter = non_empty(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            data_dir,
            db_path,
            page_size,
            log_filter,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "panelboard", "catalog")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}
