//! YAML view configuration.
//!
//! ```yaml
//! view_paths: [app/views, vendor/views]
//! layout_namespace: layouts
//! default_layout: application   # null disables the fallback
//! default_formats: [html]
//! ```
//!
//! Relative view paths are joined onto a base directory when the
//! configuration is turned into [`ViewPaths`]. Configuration is read once,
//! when a controller type's views are first built.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RenderError;
use crate::layout::{Layouts, DEFAULT_LAYOUT, DEFAULT_LAYOUT_NAMESPACE};
use crate::template::ViewPaths;

/// View configuration for a controller type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Roots in search order.
    pub view_paths: Vec<PathBuf>,
    /// Directory holding layouts.
    pub layout_namespace: String,
    /// Fallback layout; `None` disables it.
    pub default_layout: Option<String>,
    /// Formats requested when a render does not name any.
    pub default_formats: Vec<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_paths: Vec::new(),
            layout_namespace: DEFAULT_LAYOUT_NAMESPACE.to_string(),
            default_layout: Some(DEFAULT_LAYOUT.to_string()),
            default_formats: Vec::new(),
        }
    }
}

impl ViewConfig {
    /// Parses configuration from YAML.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ConfigError`] for malformed YAML or unknown keys.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RenderError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            RenderError::ConfigError(msg) => {
                RenderError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Builds view paths, resolving relative entries against `base`.
    pub fn view_paths(&self, base: impl AsRef<Path>) -> ViewPaths {
        let base = base.as_ref();
        self.view_paths
            .iter()
            .fold(ViewPaths::new(), |paths, entry| {
                if entry.is_absolute() {
                    paths.append(entry.clone())
                } else {
                    paths.append(base.join(entry))
                }
            })
    }

    /// Builds the layout settings.
    pub fn layouts(&self) -> Layouts {
        Layouts::new()
            .namespace(self.layout_namespace.as_str())
            .default_layout(self.default_layout.as_deref())
    }
}
