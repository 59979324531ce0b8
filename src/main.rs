// src/main.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use physlab_analysis::constants::{
    CELSIUS_OFFSET_K, DEFAULT_BAND_MAX_HZ, DEFAULT_BAND_MIN_HZ, PLOT_HEIGHT, PLOT_WIDTH,
    SAVGOL_POLY_ORDER, SAVGOL_WINDOW, BAND_GAP_FIT_HALF_WIDTH_K, SILICON_BAND_GAP_EV,
};
use physlab_analysis::data_analysis::band_gap::{BandGapAnalysis, BandGapConfig, IntrinsicModel};
use physlab_analysis::data_analysis::band_statistics::{BandStatistics, ToleranceSpec};
use physlab_analysis::data_analysis::coil_calibration::CoilCalibration;
use physlab_analysis::data_analysis::descriptive::DescriptiveStats;
use physlab_analysis::data_analysis::thermal_noise::{
    equivalent_noise_bandwidth, FilterRolloff, ThermalNoisePredictor,
};
use physlab_analysis::data_input::csv_parser::{
    read_coil_calibration, read_spectrum, read_sweep, CsvLayout, HeaderMode,
};
use physlab_analysis::data_input::manifest::Manifest;
use physlab_analysis::data_input::series::FrequencyWindow;
use physlab_analysis::experiments::{boltzmann_sweep, load_spectra};
use physlab_analysis::plot_framework::{format_resistance, RenderConfig};
use physlab_analysis::plot_functions::plot_band_gap::{
    plot_band_gap_fit, plot_band_gap_smoothing, plot_intrinsic_model,
};
use physlab_analysis::plot_functions::plot_band_window::plot_band_window;
use physlab_analysis::plot_functions::plot_boltzmann_fit::plot_boltzmann_fit;
use physlab_analysis::plot_functions::plot_coil_calibration::plot_coil_calibration;
use physlab_analysis::plot_functions::plot_noise_spectra::{plot_noise_spectra, SpectrumOverlay};
use physlab_analysis::plot_functions::plot_resistance_sweeps::{
    plot_resistance_run, plot_resistance_sweeps, sweep_input,
};
use physlab_analysis::plot_functions::plot_theoretical_noise::{
    plot_flicker_curve, plot_theoretical_densities,
};

/// Analysis and plotting of noise, band-gap and coil-calibration lab data
#[derive(Parser, Debug)]
#[command(name = "physlab-analysis")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory the PNG charts are written to
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,

    /// Chart width in pixels
    #[arg(long, global = true, default_value_t = PLOT_WIDTH)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, global = true, default_value_t = PLOT_HEIGHT)]
    height: u32,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Theoretical Johnson noise densities and the ENBW/flicker curve
    Theory(TheoryArgs),
    /// Band statistics of one spectrum against the Johnson–Nyquist prediction
    Band(BandArgs),
    /// Resistor sweep from a manifest to a Boltzmann constant estimate
    Boltzmann(ManifestArgs),
    /// Overlay of every spectrum listed in a manifest
    Spectra(SpectraArgs),
    /// Band gap energy from a resistance-temperature sweep
    Bandgap(BandGapArgs),
    /// Side-by-side R(T) scatter of several sweep files
    Sweeps(SweepsArgs),
    /// Descriptive statistics of a fixed-temperature resistance run
    ResistanceStats(InputArgs),
    /// Zeeman coil field-vs-current calibration
    Coil(CoilArgs),
}

#[derive(Args, Debug)]
struct CsvArgs {
    /// Leading lines to ignore before the data (or header)
    #[arg(long, default_value_t = 0)]
    skip_rows: usize,

    /// Header handling: auto, present or absent
    #[arg(long, default_value = "auto", value_parser = parse_header_mode)]
    header: HeaderMode,
}

impl CsvArgs {
    fn layout(&self) -> CsvLayout {
        CsvLayout {
            skip_rows: self.skip_rows,
            header: self.header,
            ..CsvLayout::default()
        }
    }
}

fn parse_header_mode(s: &str) -> Result<HeaderMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "auto" => Ok(HeaderMode::Auto),
        "present" => Ok(HeaderMode::Present),
        "absent" => Ok(HeaderMode::Absent),
        other => Err(format!("unknown header mode '{other}' (auto, present, absent)")),
    }
}

#[derive(Args, Debug)]
struct TheoryArgs {
    /// Resistances in ohms (repeatable)
    #[arg(long = "resistance", num_args = 1.., default_values_t = [50.0, 998e3, 510e3, 250e3])]
    resistances: Vec<f64>,

    /// Temperature in kelvin
    #[arg(long, default_value_t = 300.0)]
    temperature_k: f64,

    /// Lock-in time constant in seconds
    #[arg(long, default_value_t = 0.01)]
    time_constant: f64,

    /// Filter roll-off in dB/octave (6, 12, 18 or 24)
    #[arg(long, default_value_t = 18)]
    rolloff: u32,

    /// 1/f noise coefficient in V
    #[arg(long, default_value_t = 0.0)]
    alpha: f64,

    /// Use the CODATA Boltzmann constant instead of 1.38e-23
    #[arg(long)]
    codata: bool,
}

#[derive(Args, Debug)]
struct BandArgs {
    /// Spectrum CSV (frequency, noise)
    input: PathBuf,

    /// Resistance in ohms
    #[arg(long)]
    resistance: f64,

    /// Temperature in kelvin
    #[arg(long, conflicts_with = "temperature_c")]
    temperature_k: Option<f64>,

    /// Temperature in degrees Celsius
    #[arg(long)]
    temperature_c: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_BAND_MIN_HZ)]
    min_hz: f64,

    #[arg(long, default_value_t = DEFAULT_BAND_MAX_HZ)]
    max_hz: f64,

    /// Leave the thermometer tolerance out of the theoretical uncertainty
    #[arg(long)]
    no_temperature_tolerance: bool,

    #[arg(long)]
    codata: bool,

    #[command(flatten)]
    csv: CsvArgs,
}

#[derive(Args, Debug)]
struct ManifestArgs {
    /// Experiment manifest (JSON)
    manifest: PathBuf,

    #[arg(long)]
    codata: bool,
}

#[derive(Args, Debug)]
struct SpectraArgs {
    manifest: PathBuf,

    /// Chart title (defaults to the manifest name)
    #[arg(long)]
    title: Option<String>,

    /// Draw the theoretical level for entries with a resistance
    #[arg(long)]
    theory: bool,

    /// Draw the analysis window bounds
    #[arg(long)]
    show_window: bool,
}

#[derive(Args, Debug)]
struct BandGapArgs {
    /// Sweep CSV (temperature K, resistance Ω)
    input: PathBuf,

    #[arg(long, default_value_t = SAVGOL_WINDOW)]
    window: usize,

    #[arg(long, default_value_t = SAVGOL_POLY_ORDER)]
    order: usize,

    /// Half width in K of the fit window around the transition
    #[arg(long, default_value_t = BAND_GAP_FIT_HALF_WIDTH_K)]
    half_width: f64,

    /// Explicit fit window lower bound in K (requires --fit-max)
    #[arg(long, requires = "fit_max")]
    fit_min: Option<f64>,

    #[arg(long, requires = "fit_min")]
    fit_max: Option<f64>,

    /// Restrict the transition search to temperatures above this (K)
    #[arg(long)]
    search_min: Option<f64>,

    /// Restrict the transition search to temperatures below this (K)
    #[arg(long)]
    search_max: Option<f64>,

    /// Keep the raw resistance instead of shifting its minimum to zero
    #[arg(long)]
    no_shift: bool,

    /// Also render the intrinsic resistance model over the sweep's range
    #[arg(long)]
    model: bool,

    #[command(flatten)]
    csv: CsvArgs,
}

#[derive(Args, Debug)]
struct SweepsArgs {
    /// Sweep CSV files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[arg(long, default_value = "Resistance vs temperature")]
    title: String,

    #[command(flatten)]
    csv: CsvArgs,
}

#[derive(Args, Debug)]
struct InputArgs {
    input: PathBuf,

    #[command(flatten)]
    csv: CsvArgs,
}

#[derive(Args, Debug)]
struct CoilArgs {
    /// Calibration CSV with 'Current (mADC)' and 'Recorded Field' columns
    input: PathBuf,
}

/// `.context()` for the boxed errors returned by the plotting and IO layers.
trait BoxedContext<T> {
    fn boxed_context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> BoxedContext<T> for std::result::Result<T, Box<dyn Error>> {
    fn boxed_context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| anyhow!("{e}").context(msg.into()))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

fn predictor(codata: bool) -> ThermalNoisePredictor {
    if codata {
        ThermalNoisePredictor::codata()
    } else {
        ThermalNoisePredictor::default()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let render = RenderConfig {
        width: cli.width,
        height: cli.height,
        output_dir: cli.output_dir.clone(),
        ..RenderConfig::default()
    };

    match &cli.command {
        Command::Theory(args) => run_theory(&render, args),
        Command::Band(args) => run_band(&render, args),
        Command::Boltzmann(args) => run_boltzmann(&render, args),
        Command::Spectra(args) => run_spectra(&render, args),
        Command::Bandgap(args) => run_band_gap(&render, args),
        Command::Sweeps(args) => run_sweeps(&render, args),
        Command::ResistanceStats(args) => run_resistance_stats(&render, args),
        Command::Coil(args) => run_coil(&render, args),
    }
}

fn run_theory(render: &RenderConfig, args: &TheoryArgs) -> Result<()> {
    let predictor = predictor(args.codata);
    let rolloff = FilterRolloff::from_db_per_octave(args.rolloff)
        .ok_or_else(|| anyhow!("unsupported roll-off {} dB/oct (6, 12, 18, 24)", args.rolloff))?;
    let enbw = equivalent_noise_bandwidth(args.time_constant, rolloff);

    println!("Theoretical thermal noise at {:.2} K (k = {:e} J/K)", args.temperature_k, predictor.boltzmann);
    for &r in &args.resistances {
        println!(
            "  {:>10}: {:.4e} V/√Hz, {:.4e} V rms over {:.3} Hz ENBW",
            format_resistance(r),
            predictor.noise_density(r, args.temperature_k),
            predictor.rms_voltage(r, args.temperature_k, enbw),
            enbw
        );
    }

    plot_theoretical_densities(
        render,
        "theoretical_noise.png",
        &predictor,
        &args.resistances,
        args.temperature_k,
    )
    .boxed_context("Failed to render theoretical noise plot")?;

    if let Some(&r) = args.resistances.first() {
        let v_rms = predictor.rms_voltage(r, args.temperature_k, enbw);
        let title = format!(
            "Theoretical noise for τ = {} ms and R = {}",
            args.time_constant * 1e3,
            format_resistance(r)
        );
        plot_flicker_curve(render, "theoretical_flicker.png", &title, v_rms, args.alpha)
            .boxed_context("Failed to render flicker noise plot")?;
    }
    Ok(())
}

fn run_band(render: &RenderConfig, args: &BandArgs) -> Result<()> {
    let temperature_k = match (args.temperature_k, args.temperature_c) {
        (Some(k), _) => k,
        (None, Some(c)) => c + CELSIUS_OFFSET_K,
        (None, None) => bail!("one of --temperature-k or --temperature-c is required"),
    };
    let window = FrequencyWindow::new(args.min_hz, args.max_hz)?;
    let series = read_spectrum(&args.input, &args.csv.layout(), format_resistance(args.resistance))
        .boxed_context(format!("Failed to read spectrum '{}'", args.input.display()))?;

    let stats = BandStatistics::compute(&series, &window)
        .with_context(|| format!("No band statistics for '{}'", args.input.display()))?;
    let tolerances = if args.no_temperature_tolerance {
        ToleranceSpec::resistance_only()
    } else {
        ToleranceSpec::default()
    };
    let predictor = predictor(args.codata);
    let cmp = stats.compare(&predictor, args.resistance, temperature_k, &tolerances);

    println!("{} in [{}, {}] Hz:", series.label, window.min_hz, window.max_hz);
    println!("  samples:                  {}", stats.count);
    println!("  mean noise:               {:.4e} V/√Hz", stats.mean);
    println!("  standard deviation:       {:.4e} V/√Hz", stats.std_dev);
    println!("  standard error of mean:   {:.4e} V/√Hz", stats.sem);
    println!("  theoretical:              {:.4e} ± {:.2e} V/√Hz", cmp.theoretical, cmp.theoretical_uncertainty);
    println!("  total uncertainty:        {:.4e} V/√Hz", cmp.total_uncertainty);
    println!("  percent error:            {:.2}%", cmp.percent_error);

    let file_name = format!("{}_band.png", file_stem(&args.input));
    plot_band_window(render, &file_name, &series, &stats, Some(&cmp))
        .boxed_context("Failed to render band plot")?;
    Ok(())
}

fn run_boltzmann(render: &RenderConfig, args: &ManifestArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)
        .boxed_context(format!("Failed to load manifest '{}'", args.manifest.display()))?;
    let predictor = predictor(args.codata);
    let result = boltzmann_sweep(&manifest, &predictor).boxed_context("Boltzmann sweep failed")?;

    println!("{} at {:.2} K", manifest.name, result.temperature_k);
    for row in &result.rows {
        println!(
            "  {:>10}: mean {:.4e} ± {:.2e} V/√Hz, theory {:.4e} ± {:.2e}, error {:+.2}%{}",
            row.label,
            row.stats.mean,
            row.comparison.total_uncertainty,
            row.comparison.theoretical,
            row.comparison.theoretical_uncertainty,
            row.comparison.percent_error,
            if row.in_fit { "" } else { " (excluded from fit)" }
        );
    }
    let k = result.boltzmann;
    println!("Fit: {} (r = {:.5}, p = {:.3e})", result.fit.equation(), result.fit.r_value, result.fit.p_value);
    println!(
        "Boltzmann constant: {k} J/K, {:+.2}% ± {:.2}% from {:e}",
        k.percent_error(predictor.boltzmann),
        k.percent_error_uncertainty(predictor.boltzmann),
        predictor.boltzmann
    );

    let stem = file_stem(&args.manifest);
    let spectra: Vec<SpectrumOverlay> = result
        .rows
        .iter()
        .map(|row| SpectrumOverlay {
            series: row.series.clone(),
            theoretical: Some(row.comparison.theoretical),
            uncertainty: Some(row.comparison.total_uncertainty),
        })
        .collect();
    let window = manifest.window()?;
    plot_noise_spectra(
        render,
        &format!("{stem}_spectra.png"),
        &manifest.name,
        &spectra,
        Some(&window),
    )
    .boxed_context("Failed to render spectra plot")?;
    plot_boltzmann_fit(
        render,
        &format!("{stem}_boltzmann_fit.png"),
        &result.fit_points(),
        &result.fit,
        &predictor,
        result.temperature_k,
    )
    .boxed_context("Failed to render Boltzmann fit plot")?;
    Ok(())
}

fn run_spectra(render: &RenderConfig, args: &SpectraArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)
        .boxed_context(format!("Failed to load manifest '{}'", args.manifest.display()))?;
    let predictor = ThermalNoisePredictor::default();

    let spectra: Vec<SpectrumOverlay> = load_spectra(&manifest)
        .into_iter()
        .map(|(entry, series)| {
            let theoretical = if args.theory {
                entry
                    .resistance_ohm
                    .zip(manifest.entry_temperature(&entry))
                    .map(|(r, t)| predictor.noise_density(r, t))
            } else {
                None
            };
            SpectrumOverlay {
                theoretical,
                ..SpectrumOverlay::new(series)
            }
        })
        .collect();
    if spectra.is_empty() {
        bail!("none of the {} manifest entries could be read", manifest.entries.len());
    }

    let window = manifest.window()?;
    let title = args.title.clone().unwrap_or_else(|| manifest.name.clone());
    let file_name = format!("{}_spectra.png", file_stem(&args.manifest));
    plot_noise_spectra(
        render,
        &file_name,
        &title,
        &spectra,
        args.show_window.then_some(&window),
    )
    .boxed_context("Failed to render spectra plot")?;
    Ok(())
}

fn run_band_gap(render: &RenderConfig, args: &BandGapArgs) -> Result<()> {
    let label = file_stem(&args.input);
    let sweep = read_sweep(&args.input, &args.csv.layout(), label.clone())
        .boxed_context(format!("Failed to read sweep '{}'", args.input.display()))?;

    let search_range = match (args.search_min, args.search_max) {
        (None, None) => None,
        (lo, hi) => Some((lo.unwrap_or(f64::NEG_INFINITY), hi.unwrap_or(f64::INFINITY))),
    };
    let config = BandGapConfig {
        smoothing_window: args.window,
        smoothing_order: args.order,
        shift_to_minimum: !args.no_shift,
        search_range,
        fit_range: args.fit_min.zip(args.fit_max),
        fit_half_width_k: args.half_width,
    };
    let analysis = BandGapAnalysis::run(&sweep, &config)
        .with_context(|| format!("Band gap analysis of '{}' failed", args.input.display()))?;

    let fit = &analysis.fit;
    let eg = analysis.band_gap;
    println!("{label}:");
    println!("  transition temperature:  {:.2} K", analysis.transition_temperature);
    println!("  fit window:              {:.1}–{:.1} K ({} points)", analysis.fit_range.0, analysis.fit_range.1, fit.n);
    println!("  slope:                   {}", fit.slope);
    println!("  intercept:               {}", fit.intercept);
    println!("  correlation (r):         {}", fit.r_value);
    println!("  p-value:                 {}", fit.p_value);
    println!("  standard error:          {}", fit.std_err);
    println!("Estimated band gap energy: {:.4} eV, with uncertainty: {:.4} eV", eg.value, eg.uncertainty);
    println!(
        "Percent difference from {SILICON_BAND_GAP_EV} eV: {:.2}%",
        eg.percent_error(SILICON_BAND_GAP_EV).abs()
    );

    plot_band_gap_smoothing(
        render,
        &format!("{label}_band_gap_smoothing.png"),
        &format!("{label}: smoothing and derivative"),
        &analysis,
    )
    .boxed_context("Failed to render smoothing plot")?;
    plot_band_gap_fit(render, &format!("{label}_band_gap_fit.png"), &analysis)
        .boxed_context("Failed to render band gap fit plot")?;

    if args.model {
        plot_intrinsic_model(
            render,
            &format!("{label}_intrinsic_model.png"),
            &IntrinsicModel::default(),
            &analysis.temperatures,
        )
        .boxed_context("Failed to render intrinsic model plot")?;
    }
    Ok(())
}

fn run_sweeps(render: &RenderConfig, args: &SweepsArgs) -> Result<()> {
    let inputs: Vec<_> = args
        .inputs
        .iter()
        .map(|p| sweep_input(p, None, args.csv.layout()))
        .collect();
    plot_resistance_sweeps(render, "resistance_sweeps.png", &args.title, &inputs)
        .boxed_context("Failed to render sweep comparison")?;
    Ok(())
}

fn run_resistance_stats(render: &RenderConfig, args: &InputArgs) -> Result<()> {
    let label = file_stem(&args.input);
    let sweep = read_sweep(&args.input, &args.csv.layout(), label.clone())
        .boxed_context(format!("Failed to read '{}'", args.input.display()))?;
    let stats = DescriptiveStats::compute(&sweep.resistances())
        .with_context(|| format!("No statistics for '{}'", args.input.display()))?;

    println!("Mean Resistance: {} Ohms", stats.mean);
    println!("Median Resistance: {} Ohms", stats.median);
    println!("Standard Deviation of Resistance: {} Ohms", stats.std_dev);
    println!("Minimum Resistance: {} Ohms", stats.min);
    println!("Maximum Resistance: {} Ohms", stats.max);

    plot_resistance_run(render, &format!("{label}_stats.png"), &sweep, &stats)
        .boxed_context("Failed to render resistance plot")?;
    Ok(())
}

fn run_coil(render: &RenderConfig, args: &CoilArgs) -> Result<()> {
    let rows = read_coil_calibration(&args.input)
        .boxed_context(format!("Failed to read calibration '{}'", args.input.display()))?;
    let calibration = CoilCalibration::fit(&rows).context("Coil calibration fit failed")?;
    println!("{}", calibration.equation());

    let file_name = format!("{}_coil.png", file_stem(&args.input));
    plot_coil_calibration(render, &file_name, &calibration)
        .boxed_context("Failed to render coil calibration plot")?;
    Ok(())
}

// src/main.rs
