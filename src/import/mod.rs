//! CSV import of wind survey tables.
//!
//! The input is a plain comma-separated file with a header row. Four columns
//! are required, matched by exact name:
//!
//! | Column | Field | Unit |
//! |---|---|---|
//! | `지점` | site | identifier |
//! | `풍속` | wind speed | m/s |
//! | `초과확률` | exceedance probability | % |
//! | `풍속비` | wind speed ratio | - |
//!
//! Any other columns are kept verbatim and written back on export.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wind_eval::import::SurveyTable;
//!
//! let survey = SurveyTable::from_path("survey.csv")?;
//! for row in survey.rows() {
//!     println!("{}: {} m/s", row.site, row.wind_speed);
//! }
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::rating::Scale;

/// Header of the site identifier column.
pub const SITE_COLUMN: &str = "지점";
/// Header of the wind speed column.
pub const WIND_SPEED_COLUMN: &str = "풍속";
/// Header of the exceedance probability column.
pub const EXCEEDANCE_COLUMN: &str = "초과확률";
/// Header of the wind speed ratio column.
pub const SPEED_RATIO_COLUMN: &str = "풍속비";

/// One surveyed point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Site identifier.
    pub site: String,

    /// Wind speed in m/s.
    pub wind_speed: f64,

    /// Exceedance probability in percent.
    pub exceedance_probability: f64,

    /// Ratio of local to reference wind speed.
    pub wind_speed_ratio: f64,
}

impl MeasurementRow {
    /// The measurement a scale is rated on.
    #[must_use]
    pub fn value_for(&self, scale: Scale) -> f64 {
        match scale {
            Scale::Lawson => self.wind_speed,
            Scale::Nen8100 => self.exceedance_probability,
            Scale::Murakami => self.wind_speed_ratio,
        }
    }
}

/// A measurement row together with the raw cells it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    /// Parsed measurements.
    pub row: MeasurementRow,
    /// Every cell of the input line, in header order.
    pub cells: Vec<String>,
}

/// An immutable survey table read from CSV.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyTable {
    headers: Vec<String>,
    records: Vec<SurveyRecord>,
}

/// Column positions of the required fields.
#[derive(Debug, Clone, Copy)]
struct Columns {
    site: usize,
    wind_speed: usize,
    exceedance: usize,
    speed_ratio: usize,
}

impl Columns {
    fn locate(headers: &[String]) -> Result<Self> {
        Ok(Self {
            site: require_column(headers, SITE_COLUMN)?,
            wind_speed: require_column(headers, WIND_SPEED_COLUMN)?,
            exceedance: require_column(headers, EXCEEDANCE_COLUMN)?,
            speed_ratio: require_column(headers, SPEED_RATIO_COLUMN)?,
        })
    }
}

impl SurveyTable {
    /// Read a survey from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading survey");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a survey from any CSV source.
    ///
    /// Fails on the first missing column or non-numeric cell; no rows are
    /// returned in that case. Empty numeric cells read as NaN.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = read_headers(&mut reader)?;
        let columns = Columns::locate(&headers)?;

        let mut records = Vec::new();
        for (line_num, record) in reader.records().enumerate() {
            let record = record?;
            // +2 for 1-based and header
            let line = line_num + 2;

            let cell = |idx: usize| record.get(idx).unwrap_or("");
            let number = |idx: usize| parse_number(cell(idx), line, &headers[idx]);

            let row = MeasurementRow {
                site: cell(columns.site).to_string(),
                wind_speed: number(columns.wind_speed)?,
                exceedance_probability: number(columns.exceedance)?,
                wind_speed_ratio: number(columns.speed_ratio)?,
            };

            records.push(SurveyRecord {
                row,
                cells: record.iter().map(String::from).collect(),
            });
        }

        debug!(rows = records.len(), columns = headers.len(), "survey loaded");
        Ok(Self { headers, records })
    }

    /// Build a table directly from measurement rows, with only the four
    /// required columns.
    #[must_use]
    pub fn from_rows(rows: Vec<MeasurementRow>) -> Self {
        let headers = [
            SITE_COLUMN,
            WIND_SPEED_COLUMN,
            EXCEEDANCE_COLUMN,
            SPEED_RATIO_COLUMN,
        ]
        .iter()
        .map(|h| (*h).to_string())
        .collect();

        let records = rows
            .into_iter()
            .map(|row| SurveyRecord {
                cells: vec![
                    row.site.clone(),
                    format_number(row.wind_speed),
                    format_number(row.exceedance_probability),
                    format_number(row.wind_speed_ratio),
                ],
                row,
            })
            .collect();

        Self { headers, records }
    }

    /// Column headers in input order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Records in input order.
    #[must_use]
    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    /// Parsed measurement rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = &MeasurementRow> {
        self.records.iter().map(|r| &r.row)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads the header row, dropping a leading byte-order mark if present.
pub(crate) fn read_headers<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>> {
    Ok(reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect())
}

/// Finds a column by exact header name.
pub(crate) fn require_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_number(cell: &str, line: usize, column: &str) -> Result<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse().map_err(|_| Error::InvalidNumber {
        line,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = "지점,풍속,초과확률,풍속비,비고\n\
                          P1,16,3,1.2,corner\n\
                          P2,5.5,0.8,0.95,\n";

    #[test]
    fn test_read_survey() {
        let table = SurveyTable::from_reader(SURVEY.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.headers().len(), 5);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].site, "P1");
        assert_eq!(rows[0].wind_speed, 16.0);
        assert_eq!(rows[0].exceedance_probability, 3.0);
        assert_eq!(rows[1].wind_speed_ratio, 0.95);
        assert_eq!(table.records()[0].cells[4], "corner");
    }

    #[test]
    fn test_bom_header() {
        let input = format!("\u{feff}{SURVEY}");
        let table = SurveyTable::from_reader(input.as_bytes()).unwrap();
        assert_eq!(table.headers()[0], SITE_COLUMN);
    }

    #[test]
    fn test_missing_column() {
        let input = "지점,풍속,풍속비\nP1,16,1.2\n";
        let err = SurveyTable::from_reader(input.as_bytes()).unwrap_err();
        match err {
            Error::MissingColumn { column } => assert_eq!(column, EXCEEDANCE_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_number_aborts() {
        let input = "지점,풍속,초과확률,풍속비\nP1,16,3,1.2\nP2,fast,3,1.2\n";
        let err = SurveyTable::from_reader(input.as_bytes()).unwrap_err();
        match err {
            Error::InvalidNumber { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, WIND_SPEED_COLUMN);
                assert_eq!(value, "fast");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cell_is_nan() {
        let input = "지점,풍속,초과확률,풍속비\nP1,,3,1.2\n";
        let table = SurveyTable::from_reader(input.as_bytes()).unwrap();
        assert!(table.rows().next().unwrap().wind_speed.is_nan());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        std::fs::write(&path, SURVEY).unwrap();
        let table = SurveyTable::from_path(&path).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_rows() {
        let table = SurveyTable::from_rows(vec![MeasurementRow {
            site: "P9".to_string(),
            wind_speed: 7.5,
            exceedance_probability: 1.0,
            wind_speed_ratio: 1.05,
        }]);
        assert_eq!(table.headers()[1], WIND_SPEED_COLUMN);
        assert_eq!(table.records()[0].cells, vec!["P9", "7.5", "1", "1.05"]);
    }
}
