// src/plot_functions/mod.rs

pub mod plot_band_gap;
pub mod plot_band_window;
pub mod plot_boltzmann_fit;
pub mod plot_coil_calibration;
pub mod plot_noise_spectra;
pub mod plot_resistance_sweeps;
pub mod plot_theoretical_noise;

// src/plot_functions/mod.rs
