// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for ack2vim
//!
//! Loads configuration from .ack2vimrc.toml in current directory or ~/.config/ack2vim/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::search::DEFAULT_SEARCH_TOOL;
use crate::synthesize::{EditorSettings, DEFAULT_EDITOR};

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from .ack2vimrc.toml or ~/.config/ack2vim/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor program used in the emitted command
    pub editor: Option<String>,
    /// Search tool to run
    pub search_tool: Option<String>,
    /// Open files in tab pages (`-p`)
    pub tab_pages: Option<bool>,
    /// Default output format (text or json)
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. explicit path (`--config`)
    /// 2. .ack2vimrc.toml in current directory
    /// 3. ~/.config/ack2vim/config.toml
    pub fn load(explicit: Option<&Path>) -> Self {
        if let Some(config) = explicit.and_then(Self::load_from_path) {
            return config;
        }

        // Try current directory first
        if let Some(config) = Self::load_from_path(Path::new(".ack2vimrc.toml")) {
            return config;
        }

        // Try home directory config
        if let Some(config) = Self::home_config_path().and_then(|p| Self::load_from_path(&p)) {
            return config;
        }

        Self::default()
    }

    fn home_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("ack2vim").join("config.toml"))
    }

    fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    /// Merge CLI options with config (CLI wins)
    pub fn merge_search_tool(&self, cli_value: Option<&str>) -> String {
        cli_value
            .map(str::to_string)
            .or_else(|| self.search_tool.clone())
            .unwrap_or_else(|| DEFAULT_SEARCH_TOOL.to_string())
    }

    /// Merge CLI options with config (CLI wins)
    pub fn merge_editor(&self, cli_editor: Option<&str>, cli_no_tabs: bool) -> EditorSettings {
        EditorSettings {
            program: cli_editor
                .map(str::to_string)
                .or_else(|| self.editor.clone())
                .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            tab_pages: !cli_no_tabs && self.tab_pages.unwrap_or(true),
        }
    }
}
