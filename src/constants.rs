// src/constants.rs

use plotters::style::colors::full_palette::{BLUE, GREEN, GREY, ORANGE, PURPLE, RED, TEAL};
use plotters::style::RGBColor;

// --- Physical constants ---

// Rounded Boltzmann constant used throughout the lab write-ups (J/K).
pub const BOLTZMANN_LAB: f64 = 1.38e-23;
// CODATA 2018 exact values.
pub const BOLTZMANN_CODATA: f64 = 1.380649e-23;
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;
// Boltzmann constant in eV/K, as used for the intrinsic resistance model.
pub const BOLTZMANN_EV: f64 = 8.617e-5;
pub const CELSIUS_OFFSET_K: f64 = 273.15;

// Accepted silicon band gap at 300 K (eV), used for percent-difference reporting.
pub const SILICON_BAND_GAP_EV: f64 = 1.16978;

// --- Measurement tolerances ---

// Resistor tolerance as a fraction of nominal value.
pub const RESISTANCE_TOLERANCE_FRACTION: f64 = 0.01;
// Thermometer tolerance in kelvin.
pub const TEMPERATURE_TOLERANCE_K: f64 = 0.1;

// --- Noise band defaults ---

pub const DEFAULT_BAND_MIN_HZ: f64 = 190.0;
pub const DEFAULT_BAND_MAX_HZ: f64 = 2000.0;

// --- Band gap pipeline defaults ---

pub const SAVGOL_WINDOW: usize = 99;
pub const SAVGOL_POLY_ORDER: usize = 3;
// Half width of the fit window around the steepest-descent temperature (K).
pub const BAND_GAP_FIT_HALF_WIDTH_K: f64 = 65.0;

// --- Intrinsic resistance model defaults (silicon) ---

pub const MODEL_PREFACTOR: f64 = 1e-2;
pub const MODEL_ELECTRON_MOBILITY: f64 = 1000.0; // cm^2/(V s)
pub const MODEL_HOLE_MOBILITY: f64 = 1000.0; // cm^2/(V s)
pub const MODEL_BAND_GAP_EV: f64 = 1.1;

// --- Theoretical plot sweep ---

pub const THEORY_FREQ_MIN_HZ: f64 = 10.0;
pub const THEORY_FREQ_MAX_HZ: f64 = 10_000.0;
pub const THEORY_FREQ_POINTS: usize = 1000;

// --- Plot dimensions and fonts ---

pub const PLOT_WIDTH: u32 = 1600;
pub const PLOT_HEIGHT: u32 = 960;

pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 14;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_ERROR_BAR: u32 = 3;
pub const MARKER_SIZE: u32 = 3;

// Number of dash segments used for dashed lines.
pub const DASH_SEGMENTS: usize = 40;

// --- Plot Color Assignments ---
pub const COLOR_WINDOW_MARKER: &RGBColor = &GREY;
pub const COLOR_ERROR_BAR: RGBColor = RGBColor(200, 200, 200);
pub const COLOR_FIT_LINE: &RGBColor = &BLUE;
pub const COLOR_DATA_POINTS: RGBColor = RGBColor(0, 0, 0);
pub const COLOR_SMOOTHED: &RGBColor = &RED;
pub const COLOR_TRANSITION: &RGBColor = &RED;

// Cycled for multi-series plots, one colour per resistor/file.
pub const SERIES_PALETTE: [&RGBColor; 6] = [&BLUE, &ORANGE, &GREEN, &RED, &PURPLE, &TEAL];

pub fn series_color(index: usize) -> RGBColor {
    *SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

// src/constants.rs
