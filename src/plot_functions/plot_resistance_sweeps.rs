// src/plot_functions/plot_resistance_sweeps.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::constants::{series_color, COLOR_FIT_LINE, COLOR_TRANSITION};
use crate::data_analysis::descriptive::DescriptiveStats;
use crate::data_input::csv_parser::{read_sweep, CsvLayout};
use crate::data_input::series::SweepSeries;
use crate::plot_framework::{
    draw_panels, draw_single_plot, PanelLayout, PlotConfig, PlotSeries, RenderConfig,
};

/// A sweep file and the legend label to show for it.
#[derive(Debug, Clone)]
pub struct SweepInput {
    pub path: PathBuf,
    pub label: String,
    pub layout: CsvLayout,
}

/// Loads every readable sweep; unreadable files are logged and skipped.
pub fn load_sweeps(inputs: &[SweepInput]) -> Vec<SweepSeries> {
    inputs
        .iter()
        .filter_map(|input| match read_sweep(&input.path, &input.layout, input.label.clone()) {
            Ok(sweep) => Some(sweep),
            Err(e) => {
                log::warn!("Skipping '{}': {e}", input.path.display());
                None
            }
        })
        .collect()
}

/// Side-by-side R(T) scatter, one panel per readable file.
pub fn plot_resistance_sweeps(
    render: &RenderConfig,
    file_name: &str,
    root_name: &str,
    inputs: &[SweepInput],
) -> Result<PathBuf, Box<dyn Error>> {
    let panels: Vec<PlotConfig> = load_sweeps(inputs)
        .into_iter()
        .enumerate()
        .map(|(i, sweep)| {
            let mut config = PlotConfig::new(
                sweep.label.clone(),
                "Temperature (K)",
                "Resistance (Ω)",
            );
            config
                .series
                .push(PlotSeries::markers(sweep.points, "", series_color(i)));
            config
        })
        .collect();

    draw_panels(render, file_name, root_name, &panels, PanelLayout::SideBySide)
}

/// Fixed-temperature run: resistance per sample with mean and ±1σ band.
pub fn plot_resistance_run(
    render: &RenderConfig,
    file_name: &str,
    sweep: &SweepSeries,
    stats: &DescriptiveStats,
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(
        format!("{}: resistance at fixed temperature", sweep.label),
        "Temperature (K)",
        "Resistance (Ω)",
    );
    config.series.push(PlotSeries::markers(
        sweep.points.clone(),
        "Samples",
        series_color(0),
    ));

    let temps = sweep.temperatures();
    let lo = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    config.series.push(PlotSeries::line(
        vec![(lo, stats.mean), (hi, stats.mean)],
        format!("Mean {:.4} Ω", stats.mean),
        *COLOR_FIT_LINE,
    ));
    if stats.std_dev.is_finite() {
        for (offset, label) in [(stats.std_dev, "±1σ"), (-stats.std_dev, "")] {
            config.series.push(PlotSeries::dashed(
                vec![(lo, stats.mean + offset), (hi, stats.mean + offset)],
                label,
                *COLOR_TRANSITION,
            ));
        }
    }

    draw_single_plot(render, file_name, &config)
}

pub fn sweep_input(path: &Path, label: Option<String>, layout: CsvLayout) -> SweepInput {
    let label = label.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    });
    SweepInput {
        path: path.to_path_buf(),
        label,
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Temp_Sweep.csv");
        let mut f = std::fs::File::create(&good).unwrap();
        writeln!(f, "Temperature,Resistance").unwrap();
        writeln!(f, "300,12.5").unwrap();
        writeln!(f, "301,12.4").unwrap();

        let inputs = vec![
            sweep_input(&dir.path().join("missing.csv"), None, CsvLayout::default()),
            sweep_input(&good, None, CsvLayout::default()),
        ];
        let sweeps = load_sweeps(&inputs);
        assert_eq!(sweeps.len(), 1);
        assert_eq!(sweeps[0].label, "Temp_Sweep");
        assert_eq!(sweeps[0].points, vec![(300.0, 12.5), (301.0, 12.4)]);
    }
}

// src/plot_functions/plot_resistance_sweeps.rs
