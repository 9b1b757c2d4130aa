//! Workbench settings
//!
//! Display sizes and tolerances shared by the commands, persisted as RON.

use std::path::Path;

use mr_geometry::DEFAULT_COPLANAR_EPSILON;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted point size or line width
pub const MIN_DISPLAY_SIZE: f64 = 1.0;

/// Largest accepted point size or line width
pub const MAX_DISPLAY_SIZE: f64 = 50.0;

/// Errors that can occur while loading, saving or changing settings
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    #[error("Failed to parse settings: {0}")]
    Deserialize(String),

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Coplanar tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),
}

/// A single change made from the settings command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SettingsChange {
    /// Keep the toolbar visible after leaving the workbench
    KeepToolbar(bool),
    /// New point size for created points
    PointSize(f64),
    /// New line width for created edges
    LineWidth(f64),
    /// New coplanarity tolerance
    CoplanarTolerance(f64),
}

/// Workbench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemodelSettings {
    /// Keep the toolbar visible after leaving the workbench
    pub keep_toolbar: bool,
    /// Point size applied to created points
    pub point_size: f64,
    /// Line width applied to created edges
    pub line_width: f64,
    /// Bounding-box volume tolerance for the coplanar points command
    pub coplanar_tolerance: f64,
}

impl Default for RemodelSettings {
    fn default() -> Self {
        Self {
            keep_toolbar: false,
            point_size: 4.0,
            line_width: 5.0,
            coplanar_tolerance: DEFAULT_COPLANAR_EPSILON,
        }
    }
}

impl RemodelSettings {
    /// Apply a change, rejecting out-of-range values
    pub fn apply(&mut self, change: SettingsChange) -> Result<(), SettingsError> {
        match change {
            SettingsChange::KeepToolbar(keep) => self.keep_toolbar = keep,
            SettingsChange::PointSize(size) => {
                self.point_size = check_display_size("Point size", size)?;
            }
            SettingsChange::LineWidth(width) => {
                self.line_width = check_display_size("Line width", width)?;
            }
            SettingsChange::CoplanarTolerance(tolerance) => {
                if !(tolerance.is_finite() && tolerance > 0.0) {
                    return Err(SettingsError::InvalidTolerance(tolerance));
                }
                self.coplanar_tolerance = tolerance;
            }
        }
        Ok(())
    }

    /// Save settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = self.to_ron()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    /// Serialize settings to a RON string
    pub fn to_ron(&self) -> Result<String, SettingsError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Parse settings from a RON string
    pub fn from_ron(content: &str) -> Result<Self, SettingsError> {
        ron::from_str(content).map_err(|e| SettingsError::Deserialize(e.to_string()))
    }
}

fn check_display_size(name: &'static str, value: f64) -> Result<f64, SettingsError> {
    if (MIN_DISPLAY_SIZE..=MAX_DISPLAY_SIZE).contains(&value) {
        Ok(value)
    } else {
        Err(SettingsError::OutOfRange {
            name,
            value,
            min: MIN_DISPLAY_SIZE,
            max: MAX_DISPLAY_SIZE,
        })
    }
}
