// src/data_input/manifest.rs

//! Experiment manifests: one JSON document per data-collection session that maps each
//! export to its typed acquisition parameters.
//!
//! ```json
//! {
//!   "name": "Single-ended resistor sweep",
//!   "temperature_c": 22.5,
//!   "window_hz": [190.0, 1500.0],
//!   "layout": { "skip_rows": 0, "header": "auto" },
//!   "entries": [
//!     { "file": "998k.csv", "resistance_ohm": 998000.0 },
//!     { "file": "50ohm.csv", "resistance_ohm": 50.0, "exclude_from_fit": true }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CELSIUS_OFFSET_K, DEFAULT_BAND_MAX_HZ, DEFAULT_BAND_MIN_HZ, TEMPERATURE_TOLERANCE_K,
};
use crate::data_input::csv_parser::{CsvLayout, HeaderMode};
use crate::data_input::series::FrequencyWindow;
use crate::error::AnalysisResult;
use crate::plot_framework::format_resistance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestHeader {
    #[default]
    Auto,
    Present,
    Absent,
}

impl From<ManifestHeader> for HeaderMode {
    fn from(h: ManifestHeader) -> Self {
        match h {
            ManifestHeader::Auto => HeaderMode::Auto,
            ManifestHeader::Present => HeaderMode::Present,
            ManifestHeader::Absent => HeaderMode::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSpec {
    pub skip_rows: usize,
    pub header: ManifestHeader,
}

impl From<LayoutSpec> for CsvLayout {
    fn from(spec: LayoutSpec) -> Self {
        CsvLayout {
            skip_rows: spec.skip_rows,
            header: spec.header.into(),
            ..CsvLayout::default()
        }
    }
}

/// One data file and the parameters it was recorded with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestEntry {
    pub file: PathBuf,
    pub label: Option<String>,
    pub resistance_ohm: Option<f64>,
    pub sensitivity_v: Option<f64>,
    pub time_constant_s: Option<f64>,
    pub material: Option<String>,
    /// Overrides the experiment temperature (e.g. a cryostat run).
    pub temperature_k: Option<f64>,
    pub exclude_from_fit: bool,
    /// Overrides the experiment-level layout.
    pub layout: Option<LayoutSpec>,
}

impl ManifestEntry {
    /// Legend label: explicit label, else derived from the typed parameters.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        let mut parts = Vec::new();
        if let Some(r) = self.resistance_ohm {
            parts.push(format_resistance(r));
        }
        if let Some(s) = self.sensitivity_v {
            parts.push(if s.abs() < 1e-6 {
                format!("{:.0} nV", s * 1e9)
            } else {
                format!("{:.0} µV", s * 1e6)
            });
        }
        if let Some(tc) = self.time_constant_s {
            parts.push(format!("{:.0} ms", tc * 1e3));
        }
        if let Some(material) = &self.material {
            parts.push(material.clone());
        }
        if parts.is_empty() {
            self.file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file.display().to_string())
        } else {
            parts.join(" ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    pub temperature_c: Option<f64>,
    pub temperature_k: Option<f64>,
    pub temperature_tolerance_k: f64,
    /// Include the thermometer tolerance in the theoretical uncertainty.
    pub include_temperature_tolerance: bool,
    pub window_hz: (f64, f64),
    pub layout: LayoutSpec,
    pub entries: Vec<ManifestEntry>,
    /// Directory the entry paths are relative to; set to the manifest's own
    /// directory by `load`.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            temperature_c: None,
            temperature_k: None,
            temperature_tolerance_k: TEMPERATURE_TOLERANCE_K,
            include_temperature_tolerance: true,
            window_hz: (DEFAULT_BAND_MIN_HZ, DEFAULT_BAND_MAX_HZ),
            layout: LayoutSpec::default(),
            entries: Vec::new(),
            base_dir: PathBuf::new(),
        }
    }
}

impl Manifest {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read manifest '{}': {e}", path.display()))?;
        let mut manifest = Self::from_json(&text)
            .map_err(|e| format!("Failed to parse manifest '{}': {e}", path.display()))?;
        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::info!(
            "Loaded manifest '{}' with {} entries",
            manifest.name,
            manifest.entries.len()
        );
        Ok(manifest)
    }

    /// Experiment temperature in kelvin; kelvin wins if both are given.
    pub fn temperature(&self) -> Option<f64> {
        self.temperature_k
            .or_else(|| self.temperature_c.map(|c| c + CELSIUS_OFFSET_K))
    }

    pub fn entry_temperature(&self, entry: &ManifestEntry) -> Option<f64> {
        entry.temperature_k.or_else(|| self.temperature())
    }

    pub fn window(&self) -> AnalysisResult<FrequencyWindow> {
        FrequencyWindow::new(self.window_hz.0, self.window_hz.1)
    }

    pub fn resolve(&self, entry: &ManifestEntry) -> PathBuf {
        if entry.file.is_absolute() {
            entry.file.clone()
        } else {
            self.base_dir.join(&entry.file)
        }
    }

    pub fn layout_for(&self, entry: &ManifestEntry) -> CsvLayout {
        entry.layout.unwrap_or(self.layout).into()
    }

    pub fn temperature_tolerance(&self) -> Option<f64> {
        self.include_temperature_tolerance
            .then_some(self.temperature_tolerance_k)
    }
}


// src/data_input/manifest.rs
