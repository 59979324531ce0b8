// src/experiments.rs

//! Manifest-driven workflows shared by the CLI subcommands.

use std::error::Error;

use crate::data_analysis::band_statistics::{
    BandStatistics, MeanSquarePoint, TheoryComparison, ToleranceSpec,
};
use crate::data_analysis::estimate::PhysicalConstantEstimate;
use crate::data_analysis::linear_fit::{boltzmann_from_fit, linear_regression, LinearFit};
use crate::data_analysis::thermal_noise::ThermalNoisePredictor;
use crate::data_input::csv_parser::read_spectrum;
use crate::data_input::manifest::{Manifest, ManifestEntry};
use crate::data_input::series::MeasurementSeries;

/// Band statistics of one resistor of a sweep.
#[derive(Debug, Clone)]
pub struct ResistorRow {
    pub label: String,
    pub resistance_ohm: f64,
    pub temperature_k: f64,
    pub stats: BandStatistics,
    pub comparison: TheoryComparison,
    pub mean_square: PhysicalConstantEstimate,
    pub in_fit: bool,
    pub series: MeasurementSeries,
}

#[derive(Debug, Clone)]
pub struct BoltzmannResult {
    /// Temperature shared by every fitted resistor.
    pub temperature_k: f64,
    pub rows: Vec<ResistorRow>,
    pub fit: LinearFit,
    pub boltzmann: PhysicalConstantEstimate,
}

impl BoltzmannResult {
    pub fn fit_points(&self) -> Vec<MeanSquarePoint> {
        self.rows
            .iter()
            .filter(|r| r.in_fit)
            .map(|r| MeanSquarePoint {
                resistance_ohm: r.resistance_ohm,
                mean_square: r.mean_square,
            })
            .collect()
    }
}

pub fn tolerances_for(manifest: &Manifest) -> ToleranceSpec {
    ToleranceSpec {
        temperature_k: manifest.temperature_tolerance(),
        ..ToleranceSpec::default()
    }
}

/// Loads every entry of a manifest as a spectrum. Unreadable files are logged and
/// skipped.
pub fn load_spectra(manifest: &Manifest) -> Vec<(ManifestEntry, MeasurementSeries)> {
    manifest
        .entries
        .iter()
        .filter_map(|entry| {
            let path = manifest.resolve(entry);
            match read_spectrum(&path, &manifest.layout_for(entry), entry.display_label()) {
                Ok(series) => Some((entry.clone(), series)),
                Err(e) => {
                    log::warn!("Skipping '{}': {e}", path.display());
                    None
                }
            }
        })
        .collect()
}

/// Band-averages each resistor of the manifest, compares it with theory and fits
/// mean-square density against resistance to estimate Boltzmann's constant.
///
/// The slope converts to `k = slope / 4T` for a single `T`, so every resistor in
/// the fit must share one temperature. Entries recorded at another temperature
/// have to be marked `exclude_from_fit`.
pub fn boltzmann_sweep(
    manifest: &Manifest,
    predictor: &ThermalNoisePredictor,
) -> Result<BoltzmannResult, Box<dyn Error>> {
    let window = manifest.window()?;
    let tolerances = tolerances_for(manifest);

    let mut rows = Vec::with_capacity(manifest.entries.len());
    for entry in &manifest.entries {
        let path = manifest.resolve(entry);
        let resistance_ohm = entry
            .resistance_ohm
            .ok_or_else(|| format!("entry '{}' has no resistance_ohm", path.display()))?;
        let entry_temperature = manifest.entry_temperature(entry).ok_or_else(|| {
            format!(
                "entry '{}' has no temperature and the manifest gives none \
                 (temperature_k or temperature_c)",
                path.display()
            )
        })?;

        let series = read_spectrum(&path, &manifest.layout_for(entry), entry.display_label())?;
        let stats = BandStatistics::compute(&series, &window)
            .map_err(|e| format!("{}: {e}", path.display()))?;
        let comparison = stats.compare(predictor, resistance_ohm, entry_temperature, &tolerances);

        rows.push(ResistorRow {
            label: series.label.clone(),
            resistance_ohm,
            temperature_k: entry_temperature,
            mean_square: stats.mean_squared(),
            stats,
            comparison,
            in_fit: !entry.exclude_from_fit,
            series,
        });
    }

    let temperature_k = shared_fit_temperature(&rows)?;
    let (x, y): (Vec<f64>, Vec<f64>) = rows
        .iter()
        .filter(|r| r.in_fit)
        .map(|r| (r.resistance_ohm, r.mean_square.value))
        .unzip();
    let fit = linear_regression(&x, &y)?;
    let boltzmann = boltzmann_from_fit(&fit, temperature_k);
    log::info!(
        "Boltzmann fit over {} resistors at {:.2} K: slope {:.4e}, r = {:.5}",
        fit.n,
        temperature_k,
        fit.slope,
        fit.r_value
    );

    Ok(BoltzmannResult {
        temperature_k,
        rows,
        fit,
        boltzmann,
    })
}

fn shared_fit_temperature(rows: &[ResistorRow]) -> Result<f64, Box<dyn Error>> {
    let mut in_fit = rows.iter().filter(|r| r.in_fit);
    let first = in_fit.next().ok_or("no manifest entry is included in the fit")?;
    if let Some(other) = in_fit.find(|r| (r.temperature_k - first.temperature_k).abs() > 1e-9) {
        return Err(format!(
            "fitted resistors were recorded at different temperatures ({} at {} K, {} at {} K); \
             mark one set exclude_from_fit",
            first.label, first.temperature_k, other.label, other.temperature_k
        )
        .into());
    }
    Ok(first.temperature_k)
}

// src/experiments.rs
