//! Augmented survey tables and their CSV/JSON export.
//!
//! The exported CSV carries every input column plus `Lawson 등급`,
//! `NEN8100 등급`, `Murakami 등급` and `종합 평가`, encoded as UTF-8 with a
//! byte-order mark so spreadsheet tools pick up the Korean headers.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::import::{MeasurementRow, SITE_COLUMN, SurveyRecord, read_headers, require_column};
use crate::rating::{
    Grade, Grades, LawsonGrade, LawsonPolicy, MurakamiGrade, Nen8100Grade, Scale, Verdict,
};

/// UTF-8 byte-order mark written at the start of exported CSV files.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Columns appended to the survey on export, in order.
pub const OUTPUT_COLUMNS: [&str; 4] = [
    Scale::Lawson.grade_column(),
    Scale::Nen8100.grade_column(),
    Scale::Murakami.grade_column(),
    Verdict::COLUMN,
];

/// One surveyed point with its grades.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRow {
    record: SurveyRecord,
    grades: Grades,
}

impl AugmentedRow {
    #[must_use]
    pub fn new(record: SurveyRecord, grades: Grades) -> Self {
        Self { record, grades }
    }

    /// Parsed measurements.
    #[must_use]
    pub fn measurement(&self) -> &MeasurementRow {
        &self.record.row
    }

    /// Raw input cells.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.record.cells
    }

    #[must_use]
    pub fn grades(&self) -> &Grades {
        &self.grades
    }

    /// Composite verdict, derived from the grades.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.grades.verdict()
    }

    /// Output cells for the four appended columns.
    fn output_cells(&self) -> [&'static str; 4] {
        [
            self.grades.lawson.map_or("", LawsonGrade::label),
            self.grades.nen8100.map_or("", Nen8100Grade::label),
            self.grades.murakami.map_or("", MurakamiGrade::label),
            self.verdict().label(),
        ]
    }
}

/// A survey table with grades and verdicts attached.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedTable {
    headers: Vec<String>,
    policy: LawsonPolicy,
    rows: Vec<AugmentedRow>,
}

impl AugmentedTable {
    #[must_use]
    pub fn new(headers: Vec<String>, policy: LawsonPolicy, rows: Vec<AugmentedRow>) -> Self {
        Self {
            headers,
            policy,
            rows,
        }
    }

    /// Input column headers.
    #[must_use]
    pub fn input_headers(&self) -> &[String] {
        &self.headers
    }

    /// Lawson policy the grades were produced with.
    #[must_use]
    pub fn policy(&self) -> LawsonPolicy {
        self.policy
    }

    #[must_use]
    pub fn rows(&self) -> &[AugmentedRow] {
        &self.rows
    }

    /// Parsed measurement rows, for plotting.
    pub fn measurements(&self) -> impl Iterator<Item = &MeasurementRow> {
        self.rows.iter().map(AugmentedRow::measurement)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Headers of the exported table.
    ///
    /// Appended columns that already exist in the input (for example when an
    /// exported file is evaluated again) are replaced in place.
    #[must_use]
    pub fn output_headers(&self) -> Vec<String> {
        self.output_layout().0
    }

    fn output_layout(&self) -> (Vec<String>, [usize; 4]) {
        let mut headers = self.headers.clone();
        let mut positions = [0; 4];
        for (slot, name) in positions.iter_mut().zip(OUTPUT_COLUMNS) {
            *slot = match headers.iter().position(|h| h == name) {
                Some(idx) => idx,
                None => {
                    headers.push(name.to_string());
                    headers.len() - 1
                }
            };
        }
        (headers, positions)
    }

    /// Rows of the exported table, aligned with
    /// [`output_headers`](Self::output_headers). Unclassified grades are
    /// empty cells.
    #[must_use]
    pub fn output_rows(&self) -> Vec<Vec<&str>> {
        let (headers, positions) = self.output_layout();
        self.rows
            .iter()
            .map(|row| {
                let mut cells: Vec<&str> = row.cells().iter().map(String::as_str).collect();
                cells.resize(headers.len(), "");
                for (idx, value) in positions.iter().zip(row.output_cells()) {
                    cells[*idx] = value;
                }
                cells
            })
            .collect()
    }

    /// Write the table as BOM-prefixed CSV without an index column.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(UTF8_BOM)?;

        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.output_headers())?;
        for cells in self.output_rows() {
            csv.write_record(&cells)?;
        }

        csv.flush()?;
        Ok(())
    }

    /// Exported CSV as bytes.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Write the exported CSV to a file.
    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write_csv(std::io::BufWriter::new(file))
    }

    /// Grade and verdict counts.
    #[must_use]
    pub fn summary(&self) -> GradeSummary {
        GradeSummary::from_grades(self.rows.iter().map(|r| (*r.grades(), r.verdict())))
    }

    /// JSON-serializable report of the whole table.
    #[must_use]
    pub fn report(&self) -> AssessmentReport {
        AssessmentReport {
            policy: self.policy,
            timestamp: chrono::Utc::now(),
            summary: self.summary(),
            rows: self
                .rows
                .iter()
                .map(|r| RowReport {
                    measurement: r.measurement().clone(),
                    grades: *r.grades(),
                    verdict: r.verdict(),
                })
                .collect(),
        }
    }

    /// Write the JSON report to a file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.report())?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

/// Grades and verdict as read back from an exported CSV.
///
/// Values come from the file as written; nothing is re-derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedRow {
    pub site: String,
    pub grades: Grades,
    pub verdict: Verdict,
}

impl GradedRow {
    /// Read graded rows from an exported CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_csv(file)
    }

    /// Read graded rows from any exported CSV source.
    ///
    /// Empty grade cells read as unclassified; unknown labels and empty
    /// verdicts are errors.
    pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Self>> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = read_headers(&mut reader)?;

        let site_idx = require_column(&headers, SITE_COLUMN)?;
        let mut idx = [0; 4];
        for (slot, name) in idx.iter_mut().zip(OUTPUT_COLUMNS) {
            *slot = require_column(&headers, name)?;
        }

        let mut rows = Vec::new();
        for (line_num, record) in reader.records().enumerate() {
            let record = record?;
            let line = line_num + 2;
            let cell = |i: usize| record.get(i).unwrap_or("");

            let grades = Grades {
                lawson: parse_grade(cell(idx[0]), line, OUTPUT_COLUMNS[0], LawsonGrade::from_label)?,
                nen8100: parse_grade(cell(idx[1]), line, OUTPUT_COLUMNS[1], Nen8100Grade::from_label)?,
                murakami: parse_grade(
                    cell(idx[2]),
                    line,
                    OUTPUT_COLUMNS[2],
                    MurakamiGrade::from_label,
                )?,
            };
            let verdict = Verdict::from_label(cell(idx[3])).ok_or_else(|| Error::InvalidGrade {
                line,
                column: OUTPUT_COLUMNS[3].to_string(),
                value: cell(idx[3]).to_string(),
            })?;

            rows.push(Self {
                site: cell(site_idx).to_string(),
                grades,
                verdict,
            });
        }

        Ok(rows)
    }
}

fn parse_grade<G>(
    value: &str,
    line: usize,
    column: &str,
    parse: impl Fn(&str) -> Option<G>,
) -> Result<Option<G>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse(value).map(Some).ok_or_else(|| Error::InvalidGrade {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Grade counts on one scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleCounts {
    /// Points per grade label.
    pub grades: BTreeMap<String, usize>,
    /// Points outside every bin.
    pub unclassified: usize,
}

/// Grade and verdict counts over a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeSummary {
    /// Number of points.
    pub total: usize,
    /// Points rated 위험.
    pub hazardous: usize,
    /// Points rated 양호.
    pub acceptable: usize,
    /// Counts per scale.
    pub scales: BTreeMap<Scale, ScaleCounts>,
}

impl GradeSummary {
    /// Count grades and verdicts.
    pub fn from_grades(rows: impl IntoIterator<Item = (Grades, Verdict)>) -> Self {
        let mut summary = Self::default();
        for scale in Scale::all() {
            summary.scales.insert(*scale, ScaleCounts::default());
        }

        for (grades, verdict) in rows {
            summary.total += 1;
            match verdict {
                Verdict::Hazardous => summary.hazardous += 1,
                Verdict::Acceptable => summary.acceptable += 1,
            }
            for scale in Scale::all() {
                let counts = summary.scales.entry(*scale).or_default();
                match grades.get(*scale) {
                    Some(grade) => {
                        *counts.grades.entry(grade.label().to_string()).or_default() += 1;
                    }
                    None => counts.unclassified += 1,
                }
            }
        }

        summary
    }

    /// Count for one grade.
    #[must_use]
    pub fn count(&self, grade: Grade) -> usize {
        self.scales
            .get(&grade.scale())
            .and_then(|c| c.grades.get(grade.label()))
            .copied()
            .unwrap_or(0)
    }
}

/// One row of the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    #[serde(flatten)]
    pub measurement: MeasurementRow,
    #[serde(flatten)]
    pub grades: Grades,
    pub verdict: Verdict,
}

/// JSON report of an assessment run.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    /// Lawson policy used.
    pub policy: LawsonPolicy,

    /// When this report was generated.
    #[serde(with = "chrono_serde")]
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Grade and verdict counts.
    pub summary: GradeSummary,

    /// Per-point results in input order.
    pub rows: Vec<RowReport>,
}

mod chrono_serde {
    use chrono::{DateTime, Utc};
    use serde::{Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{Assessment, AssessmentConfig};
    use crate::import::SurveyTable;

    const SURVEY: &str = "지점,풍속,초과확률,풍속비\n\
                          P1,16,3,1.2\n\
                          P2,5,0.5,0.9\n\
                          P3,9,25,1.6\n\
                          P4,3,150,-1\n";

    fn table() -> AugmentedTable {
        let survey = SurveyTable::from_reader(SURVEY.as_bytes()).unwrap();
        Assessment::new(AssessmentConfig::default())
            .unwrap()
            .evaluate(survey)
    }

    #[test]
    fn test_export_has_bom_and_columns() {
        let bytes = table().to_csv_bytes().unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "지점,풍속,초과확률,풍속비,Lawson 등급,NEN8100 등급,Murakami 등급,종합 평가"
        );
        assert_eq!(lines.next().unwrap(), "P1,16,3,1.2,E,B,3,위험");
        assert_eq!(lines.next().unwrap(), "P2,5,0.5,0.9,B,A,1,양호");
        assert_eq!(lines.next().unwrap(), "P3,9,25,1.6,D,E,4,위험");
        assert_eq!(lines.next().unwrap(), "P4,3,150,-1,A,,,양호");
    }

    #[test]
    fn test_roundtrip_preserves_grades() {
        let table = table();
        let bytes = table.to_csv_bytes().unwrap();
        let reread = GradedRow::read_csv(bytes.as_slice()).unwrap();

        assert_eq!(reread.len(), table.len());
        for (row, graded) in table.rows().iter().zip(&reread) {
            assert_eq!(&graded.site, &row.measurement().site);
            assert_eq!(&graded.grades, row.grades());
            assert_eq!(graded.verdict, row.verdict());
        }
    }

    #[test]
    fn test_reevaluating_export_does_not_duplicate_columns() {
        let first = table().to_csv_bytes().unwrap();
        let survey = SurveyTable::from_reader(first.as_slice()).unwrap();
        let second = Assessment::new(AssessmentConfig::default())
            .unwrap()
            .evaluate(survey);

        assert_eq!(second.output_headers().len(), 8);
        assert_eq!(second.to_csv_bytes().unwrap(), first);
    }

    #[test]
    fn test_read_rejects_unknown_grade() {
        let input = "지점,Lawson 등급,NEN8100 등급,Murakami 등급,종합 평가\nP1,Z,A,1,양호\n";
        let err = GradedRow::read_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidGrade { line: 2, .. }));
    }

    #[test]
    fn test_read_requires_verdict_column() {
        let input = "지점,Lawson 등급,NEN8100 등급,Murakami 등급\nP1,A,A,1\n";
        let err = GradedRow::read_csv(input.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { .. }));
    }

    #[test]
    fn test_summary_counts() {
        let summary = table().summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.hazardous, 2);
        assert_eq!(summary.acceptable, 2);
        assert_eq!(summary.count(Grade::Lawson(LawsonGrade::E)), 1);
        assert_eq!(summary.count(Grade::Nen8100(Nen8100Grade::E)), 1);
        assert_eq!(summary.scales[&Scale::Nen8100].unclassified, 1);
        assert_eq!(summary.scales[&Scale::Murakami].unclassified, 1);
        assert_eq!(summary.scales[&Scale::Lawson].unclassified, 0);
    }

    #[test]
    fn test_save_csv_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let table = table();

        let csv_path = dir.path().join("result.csv");
        table.save_csv(&csv_path).unwrap();
        let reread = GradedRow::from_path(&csv_path).unwrap();
        assert_eq!(reread.len(), 4);

        let json_path = dir.path().join("result.json");
        table.save_json(&json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["policy"], "binned");
        assert_eq!(json["summary"]["hazardous"], 2);
        assert_eq!(json["rows"][0]["site"], "P1");
        assert_eq!(json["rows"][0]["lawson"], "E");
        assert_eq!(json["rows"][0]["murakami"], "3");
        assert_eq!(json["rows"][0]["verdict"], "위험");
        assert!(json["rows"][3]["nen8100"].is_null());
    }
}
