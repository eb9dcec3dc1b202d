//! Configuration file handling for manipulation runs.
//!
//! A config file pins the choices a front end would otherwise ask for: which
//! pages to target, traversal direction, and whether locked cells are honored.
//! Every field is optional in the JSON document.

use crate::engine::{ExecuteOptions, ManipScope, RangeParam};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings applied to every manipulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipConfig {
    /// Leave overwrite-protected cells alone
    pub honor_locked_cells: bool,

    /// Walk pages from last to first
    pub reverse: bool,

    /// Target a single page instead of the whole grid
    pub page: Option<usize>,
}

impl Default for ManipConfig {
    fn default() -> Self {
        Self {
            honor_locked_cells: true,
            reverse: false,
            page: None,
        }
    }
}

impl ManipConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration against a grid with `page_count` pages
    pub fn validate(&self, page_count: usize) -> Result<()> {
        if page_count == 0 {
            anyhow::bail!("Grid has no pages");
        }

        if let Some(page) = self.page {
            if page >= page_count {
                anyhow::bail!(
                    "Configured page {} is out of range (grid has {} pages)",
                    page,
                    page_count
                );
            }
        }

        Ok(())
    }

    pub fn scope(&self) -> ManipScope {
        ManipScope::from_page(self.page)
    }

    pub fn range(&self, page_count: usize) -> RangeParam {
        self.scope().to_range(page_count, self.reverse)
    }

    pub fn execute_options(&self) -> ExecuteOptions {
        ExecuteOptions {
            honor_locked_cells: self.honor_locked_cells,
        }
    }
}
