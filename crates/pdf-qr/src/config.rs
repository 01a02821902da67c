//! Front-end defaults loaded from `config.json`
//!
//! ```json
//! {
//!   "defaults":   { "page": 1, "x": 2.0, "y": 3.0, "unit": "cm", "size": 4.0, "size_unit": "cm" },
//!   "validation": { "tol_pt": 3.0, "paper_check": "warn", "check_all_pages": false, "paper_dim_mode": "visible" }
//! }
//! ```
//!
//! Every key is optional.

use crate::constants::DEFAULT_TOLERANCE_PT;
use crate::options::PaperValidation;
use crate::qr::QrStyle;
use crate::types::*;
use crate::units::{Measurement, Unit};
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// File name searched for by [`QrConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Placement values a front-end pre-fills
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct PlacementDefaults {
    pub page: usize,
    pub x: f64,
    pub y: f64,
    pub unit: Unit,
    pub size: f64,
    pub size_unit: Unit,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            x: 2.0,
            y: 3.0,
            unit: Unit::Centimeter,
            size: 4.0,
            size_unit: Unit::Centimeter,
        }
    }
}

impl PlacementDefaults {
    pub fn size(&self) -> Measurement {
        Measurement::new(self.size, self.size_unit)
    }
}

/// Validation values a front-end pre-fills
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ValidationDefaults {
    pub tol_pt: f64,
    pub paper_check: PaperCheck,
    pub check_all_pages: bool,
    pub paper_dim_mode: PaperDimMode,
}

impl Default for ValidationDefaults {
    fn default() -> Self {
        Self {
            tol_pt: DEFAULT_TOLERANCE_PT,
            paper_check: PaperCheck::Warn,
            check_all_pages: false,
            paper_dim_mode: PaperDimMode::Visible,
        }
    }
}

impl From<ValidationDefaults> for PaperValidation {
    fn from(v: ValidationDefaults) -> Self {
        PaperValidation {
            tolerance_pt: v.tol_pt,
            paper_check: v.paper_check,
            page_scope: PageScope::from_check_all(v.check_all_pages),
            paper_dim_mode: v.paper_dim_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct QrConfig {
    pub defaults: PlacementDefaults,
    pub validation: ValidationDefaults,
    pub qr: QrStyle,
}

impl QrConfig {
    /// Load a configuration file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_json(&bytes)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| QrError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| QrError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Load the first `config.json` found by [`find_config_file`].
    ///
    /// Returns the defaults and `None` when there is no such file.
    #[cfg(feature = "serde")]
    pub async fn discover() -> Result<(Self, Option<PathBuf>)> {
        match find_config_file() {
            Some(path) => {
                let config = Self::load(&path).await?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }
}

/// Search the working directory, then the executable's directory
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE_NAME));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
    {
        candidates.push(exe_dir.join(CONFIG_FILE_NAME));
    }
    candidates.into_iter().find(|c| c.is_file())
}
