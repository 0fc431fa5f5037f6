use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{LogbookError, Result, SortKey};

const CONFIG_FILE: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory where the logbook data files live
    pub data_dir: PathBuf,

    /// Editor used for writing dive notes
    pub editor_command: Option<String>,

    /// Default number of dives shown by `list`
    pub list_limit: usize,

    /// Default ordering for `list` and `search`
    pub default_sort: SortKey,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "divelog")
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".divelog"));

        Config {
            data_dir,
            editor_command: None,
            list_limit: 20,
            default_sort: SortKey::DateDesc,
        }
    }
}

impl Config {
    /// Platform location of the config file, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Loads the config at `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| LogbookError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| LogbookError::DirectoryError {
                path: parent.to_path_buf(),
            })?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` assignment.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| LogbookError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            })?;

        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "editor_command" => {
                self.editor_command = (!value.is_empty()).then(|| value.to_string())
            }
            "list_limit" => {
                self.list_limit = value.parse().map_err(|_| LogbookError::ConfigError {
                    message: format!("list_limit must be a whole number, got '{}'", value),
                })?
            }
            "default_sort" => self.default_sort = value.parse()?,
            _ => {
                return Err(LogbookError::ConfigError {
                    message: format!("Unknown setting '{}'", key),
                })
            }
        }
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
