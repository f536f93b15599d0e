//! Assessment pipeline: survey in, augmented table and nomogram out.
//!
//! Each run is independent: a [`SurveyTable`] goes in, an immutable
//! [`AugmentedTable`] comes out, and nothing is retained between runs.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::eval::report::{AugmentedRow, AugmentedTable};
use crate::import::SurveyTable;
use crate::nomogram::{NomogramConfig, NomogramGeometry, render_svg};
use crate::rating::{Classifier, LawsonPolicy, Scale, validate_tables};

/// Configuration for an assessment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentConfig {
    /// How Lawson grades are assigned.
    pub lawson_policy: LawsonPolicy,

    /// Chart settings.
    pub nomogram: NomogramConfig,
}

impl AssessmentConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> AssessmentConfigBuilder {
        AssessmentConfigBuilder::default()
    }
}

/// Builder for [`AssessmentConfig`].
#[derive(Debug, Default)]
pub struct AssessmentConfigBuilder {
    lawson_policy: Option<LawsonPolicy>,
    nomogram: Option<NomogramConfig>,
}

impl AssessmentConfigBuilder {
    /// Set the Lawson policy.
    #[must_use]
    pub fn lawson_policy(mut self, policy: LawsonPolicy) -> Self {
        self.lawson_policy = Some(policy);
        self
    }

    /// Set the chart configuration.
    #[must_use]
    pub fn nomogram(mut self, config: NomogramConfig) -> Self {
        self.nomogram = Some(config);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AssessmentConfig {
        AssessmentConfig {
            lawson_policy: self.lawson_policy.unwrap_or_default(),
            nomogram: self.nomogram.unwrap_or_default(),
        }
    }
}

/// Rates surveys and draws their nomograms.
///
/// # Example
///
/// ```rust,no_run
/// use wind_eval::{Assessment, AssessmentConfig, LawsonPolicy};
///
/// let config = AssessmentConfig::builder()
///     .lawson_policy(LawsonPolicy::Binned)
///     .build();
///
/// let assessment = Assessment::new(config)?;
/// let table = assessment.evaluate_path("survey.csv")?;
/// table.save_csv("result.csv")?;
/// std::fs::write("nomogram.svg", assessment.render_nomogram(&table))?;
/// # Ok::<(), wind_eval::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Assessment {
    config: AssessmentConfig,
    classifier: Classifier,
}

impl Assessment {
    /// Create an assessment, validating the static band tables and
    /// normalization domains once.
    pub fn new(config: AssessmentConfig) -> Result<Self> {
        validate_tables()?;
        debug!(policy = config.lawson_policy.name(), "assessment ready");
        Ok(Self {
            classifier: Classifier::new(config.lawson_policy),
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Rate every row of a survey.
    #[must_use]
    pub fn evaluate(&self, survey: SurveyTable) -> AugmentedTable {
        let headers = survey.headers().to_vec();
        let rows: Vec<AugmentedRow> = survey
            .records()
            .iter()
            .map(|record| {
                let grades = self.classifier.grade(&record.row);
                if grades.has_unclassified() {
                    let missing: Vec<&str> = Scale::all()
                        .iter()
                        .filter(|s| grades.get(**s).is_none())
                        .map(|s| s.name())
                        .collect();
                    warn!(site = %record.row.site, scales = ?missing, "point left unclassified");
                }
                AugmentedRow::new(record.clone(), grades)
            })
            .collect();

        let table = AugmentedTable::new(headers, self.config.lawson_policy, rows);
        let summary = table.summary();
        info!(
            points = summary.total,
            hazardous = summary.hazardous,
            policy = self.config.lawson_policy.name(),
            "survey rated"
        );
        table
    }

    /// Read a survey CSV file and rate it.
    pub fn evaluate_path(&self, path: impl AsRef<Path>) -> Result<AugmentedTable> {
        let survey = SurveyTable::from_path(path)?;
        Ok(self.evaluate(survey))
    }

    /// Nomogram geometry for a rated table.
    #[must_use]
    pub fn nomogram(&self, table: &AugmentedTable) -> NomogramGeometry {
        NomogramGeometry::compute(table.measurements())
    }

    /// Nomogram SVG for a rated table.
    #[must_use]
    pub fn render_nomogram(&self, table: &AugmentedTable) -> String {
        render_svg(&self.nomogram(table), &self.config.nomogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::MeasurementRow;
    use crate::rating::{LawsonGrade, Verdict};

    fn survey() -> SurveyTable {
        SurveyTable::from_rows(vec![
            MeasurementRow {
                site: "P1".to_string(),
                wind_speed: 16.0,
                exceedance_probability: 3.0,
                wind_speed_ratio: 1.2,
            },
            MeasurementRow {
                site: "P2".to_string(),
                wind_speed: 21.0,
                exceedance_probability: 0.5,
                wind_speed_ratio: 1.0,
            },
        ])
    }

    #[test]
    fn test_builder_defaults() {
        let config = AssessmentConfig::builder().build();
        assert_eq!(config.lawson_policy, LawsonPolicy::Binned);
        assert_eq!(config.nomogram.title, "Nomogram");
        assert_eq!(config, AssessmentConfig::default());
    }

    #[test]
    fn test_evaluate_binned() {
        let assessment = Assessment::new(AssessmentConfig::default()).unwrap();
        let table = assessment.evaluate(survey());

        assert_eq!(table.len(), 2);
        assert_eq!(table.policy(), LawsonPolicy::Binned);
        assert_eq!(table.rows()[0].grades().lawson, Some(LawsonGrade::E));
        assert_eq!(table.rows()[0].verdict(), Verdict::Hazardous);
        assert_eq!(table.rows()[1].grades().lawson, Some(LawsonGrade::E));
    }

    #[test]
    fn test_evaluate_conditional() {
        let config = AssessmentConfig::builder()
            .lawson_policy(LawsonPolicy::Conditional)
            .build();
        let assessment = Assessment::new(config).unwrap();
        let table = assessment.evaluate(survey());

        assert_eq!(table.rows()[0].grades().lawson, Some(LawsonGrade::S1));
        assert_eq!(table.rows()[1].grades().lawson, Some(LawsonGrade::S2));
        // S1/S2 do not trigger the hazard rule on their own.
        assert_eq!(table.rows()[0].verdict(), Verdict::Acceptable);
    }

    #[test]
    fn test_evaluate_path_and_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        std::fs::write(&path, "지점,풍속,초과확률,풍속비\nP1,16,3,1.2\n").unwrap();

        let config = AssessmentConfig::builder()
            .nomogram(NomogramConfig::new("Site survey"))
            .build();
        let assessment = Assessment::new(config).unwrap();
        let table = assessment.evaluate_path(&path).unwrap();
        assert_eq!(table.len(), 1);

        let geometry = assessment.nomogram(&table);
        assert_eq!(geometry.markers.len(), 3);

        let svg = assessment.render_nomogram(&table);
        assert!(svg.contains("Site survey"));
    }

    #[test]
    fn test_evaluate_path_missing_file() {
        let assessment = Assessment::new(AssessmentConfig::default()).unwrap();
        let err = assessment.evaluate_path("/nonexistent/survey.csv").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
