//! JSON configuration and report helpers for MTF measurement.

use crate::{DynamicRange, EdgeLine, MtfError, MtfMeasurement, MtfParams, Orientation, PeakWindow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(thiserror::Error, Debug)]
pub enum MtfIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration of a measurement run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MtfConfig {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub params: MtfParams,
    /// External charting program receiving the exported tables.
    #[serde(default)]
    pub chart_tool: Option<String>,
}

impl MtfConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MtfIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MtfIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Directory receiving the artifacts, `.` when unset.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtfReport {
    pub image_path: String,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub range: Option<DynamicRange>,
    #[serde(default)]
    pub cut_point: Option<u8>,
    #[serde(default)]
    pub edge_line: Option<EdgeLine>,
    #[serde(default)]
    pub oversampling: Option<usize>,
    #[serde(default)]
    pub peak: Option<PeakWindow>,
    #[serde(default)]
    pub mtf: Option<Vec<f32>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MtfReport {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            orientation: None,
            range: None,
            cut_point: None,
            edge_line: None,
            oversampling: None,
            peak: None,
            mtf: None,
            error: None,
        }
    }

    /// Populate report fields from a successful measurement.
    pub fn set_measurement(&mut self, m: &MtfMeasurement) {
        self.orientation = Some(m.orientation);
        self.range = Some(m.range);
        self.cut_point = Some(m.cut_point);
        self.edge_line = Some(m.edge_line);
        self.oversampling = Some(m.oversampling);
        self.peak = Some(m.peak);
        self.mtf = Some(m.mtf.clone());
        self.error = None;
    }

    /// Record a measurement error.
    pub fn set_error(&mut self, err: &MtfError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MtfIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MtfIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
