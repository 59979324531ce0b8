// src/data_input/csv_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data_input::series::{CalibrationPoint, MeasurementSeries, SweepSeries};
use crate::error::AnalysisError;

/// How the first data row of a file should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Drop the first record if it does not parse as numbers.
    #[default]
    Auto,
    /// Always drop the first record after `skip_rows`.
    Present,
    /// Every record is data.
    Absent,
}

/// Layout of a two-column instrument export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CsvLayout {
    pub skip_rows: usize,
    pub header: HeaderMode,
    pub x_column: usize,
    pub y_column: usize,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            skip_rows: 0,
            header: HeaderMode::Auto,
            x_column: 0,
            y_column: 1,
        }
    }
}

/// Splits a record whose only field holds `"a,b"` (the malformed combined
/// column written by the temperature logger) into its parts.
fn expand_combined(record: &StringRecord) -> Vec<String> {
    if record.len() == 1 {
        if let Some(field) = record.get(0) {
            if field.contains(',') {
                return field.split(',').map(|s| s.trim().to_string()).collect();
            }
        }
    }
    record.iter().map(|s| s.trim().to_string()).collect()
}

fn parse_pair(fields: &[String], layout: &CsvLayout) -> Option<(f64, f64)> {
    let x = fields.get(layout.x_column)?.parse::<f64>().ok()?;
    let y = fields.get(layout.y_column)?.parse::<f64>().ok()?;
    if x.is_finite() && y.is_finite() {
        Some((x, y))
    } else {
        None
    }
}

/// Reads `(x, y)` pairs from any reader. Rows that do not parse are skipped with a
/// warning, the same way a numeric coercion followed by dropping NaN rows would.
pub fn parse_xy_pairs<R: Read>(
    reader: R,
    layout: &CsvLayout,
    source_name: &str,
) -> Result<Vec<(f64, f64)>, Box<dyn Error>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut pairs = Vec::new();
    let mut first_data_record = true;

    for (row_index, result) in csv_reader.records().enumerate() {
        if row_index < layout.skip_rows {
            continue;
        }
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("{source_name}: skipping row {} due to CSV read error: {e}", row_index + 1);
                continue;
            }
        };
        let fields = expand_combined(&record);
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }

        let is_first = first_data_record;
        first_data_record = false;
        if is_first && layout.header == HeaderMode::Present {
            log::debug!("{source_name}: header row {:?}", fields);
            continue;
        }

        match parse_pair(&fields, layout) {
            Some(pair) => pairs.push(pair),
            None if is_first && layout.header == HeaderMode::Auto => {
                log::debug!("{source_name}: treating row {} as header {:?}", row_index + 1, fields);
            }
            None => {
                log::warn!("{source_name}: skipping non-numeric row {}: {:?}", row_index + 1, fields);
            }
        }
    }

    if pairs.is_empty() {
        return Err(AnalysisError::NoRows(source_name.to_string()).into());
    }
    log::info!("{source_name}: read {} data rows", pairs.len());
    Ok(pairs)
}

pub fn read_xy_pairs(path: &Path, layout: &CsvLayout) -> Result<Vec<(f64, f64)>, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open '{}': {e}", path.display()))?;
    parse_xy_pairs(BufReader::new(file), layout, &path.display().to_string())
}

/// Reads a `(frequency, noise)` spectrum export.
pub fn read_spectrum(
    path: &Path,
    layout: &CsvLayout,
    label: impl Into<String>,
) -> Result<MeasurementSeries, Box<dyn Error>> {
    Ok(MeasurementSeries::new(label, read_xy_pairs(path, layout)?))
}

/// Reads a `(temperature, resistance)` sweep export.
pub fn read_sweep(
    path: &Path,
    layout: &CsvLayout,
    label: impl Into<String>,
) -> Result<SweepSeries, Box<dyn Error>> {
    Ok(SweepSeries::new(label, read_xy_pairs(path, layout)?))
}

pub const COIL_CURRENT_HEADER: &str = "Current (mADC)";
pub const COIL_FIELD_HEADER: &str = "Recorded Field";

/// Reads a coil calibration table, locating columns by header name.
pub fn parse_coil_calibration<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<CalibrationPoint>, Box<dyn Error>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let header_record = csv_reader.headers()?.clone();

    let find = |name: &str| -> Result<usize, AnalysisError> {
        header_record
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    };
    let current_idx = find(COIL_CURRENT_HEADER)?;
    let field_idx = find(COIL_FIELD_HEADER)?;

    let mut points = Vec::new();
    for (row_index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let parsed = record
            .get(current_idx)
            .and_then(|v| v.parse::<f64>().ok())
            .zip(record.get(field_idx).and_then(|v| v.parse::<f64>().ok()));
        match parsed {
            Some((current_ma, field_kg)) => points.push(CalibrationPoint {
                current_ma,
                field_kg,
            }),
            None => log::warn!("{source_name}: skipping row {} with missing values", row_index + 2),
        }
    }

    if points.is_empty() {
        return Err(AnalysisError::NoRows(source_name.to_string()).into());
    }
    Ok(points)
}

pub fn read_coil_calibration(path: &Path) -> Result<Vec<CalibrationPoint>, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open '{}': {e}", path.display()))?;
    parse_coil_calibration(BufReader::new(file), &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_header_is_dropped() {
        let data = "Frequency,Noise\n100,1e-8\n200,2e-8\n";
        let pairs = parse_xy_pairs(data.as_bytes(), &CsvLayout::default(), "mem").unwrap();
        assert_eq!(pairs, vec![(100.0, 1e-8), (200.0, 2e-8)]);
    }

    #[test]
    fn test_combined_column_is_split() {
        // Logger wrote a bogus title line, then each row quoted as one field.
        let data = "Sweep export\n\"Temperature,Resistance\"\n\"300.5,1200\"\n\"301.0,1190.5\"\n";
        let layout = CsvLayout {
            skip_rows: 1,
            ..CsvLayout::default()
        };
        let pairs = parse_xy_pairs(data.as_bytes(), &layout, "mem").unwrap();
        assert_eq!(pairs, vec![(300.5, 1200.0), (301.0, 1190.5)]);
    }

    #[test]
    fn test_non_numeric_rows_are_coerced_away() {
        let data = "1,2\nabc,3\n4,\n5,6\n";
        let layout = CsvLayout {
            header: HeaderMode::Absent,
            ..CsvLayout::default()
        };
        let pairs = parse_xy_pairs(data.as_bytes(), &layout, "mem").unwrap();
        assert_eq!(pairs, vec![(1.0, 2.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_present_header_drops_numeric_first_row() {
        let data = "0,0\n1,1\n";
        let layout = CsvLayout {
            header: HeaderMode::Present,
            ..CsvLayout::default()
        };
        let pairs = parse_xy_pairs(data.as_bytes(), &layout, "mem").unwrap();
        assert_eq!(pairs, vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = parse_xy_pairs("Frequency,Noise\n".as_bytes(), &CsvLayout::default(), "mem")
            .unwrap_err();
        assert!(err.to_string().contains("no usable numeric rows"));
    }

    #[test]
    fn test_coil_columns_found_by_name() {
        let data = "Recorded Field,Current (mADC),Note\n0.010,100,a\n0.021,200,b\n";
        let points = parse_coil_calibration(data.as_bytes(), "mem").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].current_ma, 200.0);
        assert_eq!(points[1].field_kg, 0.021);
    }

    #[test]
    fn test_coil_missing_column() {
        let data = "Current (mADC),Field\n1,2\n";
        let err = parse_coil_calibration(data.as_bytes(), "mem").unwrap_err();
        assert!(err.to_string().contains("Recorded Field"));
    }
}

// src/data_input/csv_parser.rs
