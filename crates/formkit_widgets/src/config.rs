//! Widget configuration (formkit.toml)
//!
//! Every key is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! submit_label = "Submit"
//!
//! [placeholders]
//! select = "Select..."
//! phone = "(123) 456-7890"
//! date = "MM/DD/YYYY"
//!
//! [layout]
//! x = 0.0
//! y = 0.0
//! width = 320.0
//! row_height = 40.0
//! item_height = 32.0
//! gap = 12.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level widget configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Label of each form's submit button
    pub submit_label: String,
    pub placeholders: PlaceholderConfig,
    pub layout: LayoutConfig,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            submit_label: "Submit".to_string(),
            placeholders: PlaceholderConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl FormsConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded widget config");
        Ok(config)
    }
}

/// Placeholder text shown while a field is empty
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    pub select: String,
    pub phone: String,
    pub date: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            select: "Select...".to_string(),
            phone: "(123) 456-7890".to_string(),
            date: "MM/DD/YYYY".to_string(),
        }
    }
}

/// Geometry used by `Form::layout`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Height of one field row and of the submit button
    pub row_height: f32,
    /// Height of one dropdown item
    pub item_height: f32,
    /// Vertical space between rows
    pub gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 320.0,
            row_height: 40.0,
            item_height: 32.0,
            gap: 12.0,
        }
    }
}
