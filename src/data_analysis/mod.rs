// src/data_analysis/mod.rs

pub mod band_gap;
pub mod band_statistics;
pub mod coil_calibration;
pub mod derivative;
pub mod descriptive;
pub mod estimate;
pub mod linear_fit;
pub mod polyfit;
pub mod smoothing;
pub mod thermal_noise;

// src/data_analysis/mod.rs
