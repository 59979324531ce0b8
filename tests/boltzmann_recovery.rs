// tests/boltzmann_recovery.rs

use std::io::Write;
use std::path::Path;

use approx::assert_relative_eq;
use physlab_analysis::constants::BOLTZMANN_LAB;
use physlab_analysis::data_analysis::thermal_noise::ThermalNoisePredictor;
use physlab_analysis::data_input::manifest::Manifest;
use physlab_analysis::experiments::{boltzmann_sweep, load_spectra};

const TEMPERATURE_K: f64 = 295.65;

fn write_flat_spectrum(path: &Path, level: f64) {
    let mut f = std::fs::File::create(path).unwrap();
    writeln!(f, "Frequency,Noise").unwrap();
    for i in 0..300 {
        writeln!(f, "{},{}", 100.0 + 10.0 * i as f64, level).unwrap();
    }
}

fn manifest_json(entries: &str) -> String {
    format!(
        r#"{{
            "name": "Synthetic single-ended sweep",
            "temperature_k": {TEMPERATURE_K},
            "window_hz": [190.0, 1500.0],
            "entries": [{entries}]
        }}"#
    )
}

#[test]
fn noise_free_densities_recover_boltzmann_constant() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = ThermalNoisePredictor::default();
    let resistances = [250e3, 510e3, 998e3, 1492.5e3];

    let mut entries = Vec::new();
    for r in resistances {
        let name = format!("{r}.csv");
        write_flat_spectrum(&dir.path().join(&name), predictor.noise_density(r, TEMPERATURE_K));
        entries.push(format!(r#"{{ "file": "{name}", "resistance_ohm": {r} }}"#));
    }
    // 50 Ω terminator dominated by amplifier noise; listed but not fitted.
    write_flat_spectrum(&dir.path().join("50.csv"), 5e-9);
    entries.push(r#"{ "file": "50.csv", "resistance_ohm": 50.0, "exclude_from_fit": true }"#.to_string());

    let manifest_path = dir.path().join("sweep.json");
    std::fs::write(&manifest_path, manifest_json(&entries.join(","))).unwrap();
    let manifest = Manifest::load(&manifest_path).unwrap();

    let result = boltzmann_sweep(&manifest, &predictor).unwrap();
    assert_eq!(result.rows.len(), 5);
    assert_eq!(result.fit.n, 4);
    assert_eq!(result.fit_points().len(), 4);
    assert_relative_eq!(result.boltzmann.value, BOLTZMANN_LAB, max_relative = 1e-9);

    for row in result.rows.iter().filter(|r| r.in_fit) {
        assert_eq!(row.stats.count, 132);
        assert!(row.comparison.percent_error.abs() < 1e-9);
        assert_relative_eq!(row.temperature_k, TEMPERATURE_K);
    }
    let terminator = result.rows.iter().find(|r| !r.in_fit).unwrap();
    assert_eq!(terminator.label, "50 Ω");
    assert!(terminator.comparison.percent_error > 0.0);
}

#[test]
fn missing_files_fail_the_fit_but_not_the_overlay() {
    let dir = tempfile::tempdir().unwrap();
    write_flat_spectrum(&dir.path().join("a.csv"), 1e-7);
    let entries = r#"{ "file": "a.csv", "resistance_ohm": 998000.0 },
                     { "file": "missing.csv", "resistance_ohm": 510000.0 }"#;
    let manifest_path = dir.path().join("m.json");
    std::fs::write(&manifest_path, manifest_json(entries)).unwrap();
    let manifest = Manifest::load(&manifest_path).unwrap();

    assert!(boltzmann_sweep(&manifest, &ThermalNoisePredictor::default()).is_err());

    let spectra = load_spectra(&manifest);
    assert_eq!(spectra.len(), 1);
    assert_eq!(spectra[0].1.label, "998 kΩ");
}

/// Writes noise-free spectra for `(resistance, temperature, extra manifest fields)`.
fn sweep_manifest(dir: &Path, entries: &[(f64, f64, &str)]) -> Manifest {
    let predictor = ThermalNoisePredictor::default();
    let json: Vec<String> = entries
        .iter()
        .map(|&(r, t, extra)| {
            let name = format!("{r}_{t}.csv");
            write_flat_spectrum(&dir.join(&name), predictor.noise_density(r, t));
            format!(r#"{{ "file": "{name}", "resistance_ohm": {r}{extra} }}"#)
        })
        .collect();
    let manifest_path = dir.join("sweep.json");
    std::fs::write(&manifest_path, manifest_json(&json.join(","))).unwrap();
    Manifest::load(&manifest_path).unwrap()
}

#[test]
fn fitted_resistors_at_mixed_temperatures_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = sweep_manifest(
        dir.path(),
        &[
            (250e3, TEMPERATURE_K, ""),
            (510e3, TEMPERATURE_K, ""),
            (998e3, 170.0, r#", "temperature_k": 170.0"#),
        ],
    );
    let err = boltzmann_sweep(&manifest, &ThermalNoisePredictor::default()).unwrap_err();
    assert!(err.to_string().contains("different temperatures"), "{err}");
}

#[test]
fn excluded_cryostat_entry_keeps_the_fit_at_room_temperature() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = sweep_manifest(
        dir.path(),
        &[
            (250e3, TEMPERATURE_K, ""),
            (510e3, TEMPERATURE_K, ""),
            (998e3, 170.0, r#", "temperature_k": 170.0, "exclude_from_fit": true"#),
        ],
    );
    let result = boltzmann_sweep(&manifest, &ThermalNoisePredictor::default()).unwrap();
    assert_eq!(result.temperature_k, TEMPERATURE_K);
    assert_eq!(result.fit.n, 2);
    assert_relative_eq!(result.boltzmann.value, BOLTZMANN_LAB, max_relative = 1e-9);

    let cryo = result.rows.iter().find(|r| !r.in_fit).unwrap();
    assert_eq!(cryo.temperature_k, 170.0);
    assert!(cryo.comparison.percent_error.abs() < 1e-9);
}

#[test]
fn shared_override_temperature_is_used_for_the_fit() {
    let dir = tempfile::tempdir().unwrap();
    let cold = r#", "temperature_k": 170.0"#;
    let manifest = sweep_manifest(
        dir.path(),
        &[(250e3, 170.0, cold), (510e3, 170.0, cold), (998e3, 170.0, cold)],
    );
    let result = boltzmann_sweep(&manifest, &ThermalNoisePredictor::default()).unwrap();
    assert_eq!(result.temperature_k, 170.0);
    assert_relative_eq!(result.boltzmann.value, BOLTZMANN_LAB, max_relative = 1e-9);
}

// tests/boltzmann_recovery.rs
