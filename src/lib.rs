//! # wind-eval
//!
//! Wind comfort and safety assessment of surveyed points.
//!
//! Every point is rated on three standards (Lawson, NEN 8100, Murakami), the
//! three grades are combined into a 양호/위험 verdict, and all points are
//! drawn on a nomogram: three color-banded lanes with one dashed marker per
//! point and lane.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wind_eval::{Assessment, AssessmentConfig};
//!
//! let assessment = Assessment::new(AssessmentConfig::default())?;
//! let table = assessment.evaluate_path("survey.csv")?;
//!
//! table.save_csv("result.csv")?;
//! std::fs::write("nomogram.svg", assessment.render_nomogram(&table))?;
//! ```
//!
//! ## Modules
//!
//! - [`error`]: Error types for the library
//! - [`import`]: CSV import of survey tables
//! - [`rating`]: Band tables, per-scale classification and the verdict
//! - [`normalize`]: Plot coordinates for raw measurements
//! - [`nomogram`]: Chart geometry and SVG rendering
//! - [`eval`]: Assessment pipeline, CSV/JSON export and summaries

pub mod error;
pub mod eval;
pub mod import;
pub mod nomogram;
pub mod normalize;
pub mod rating;

// Re-export commonly used types
pub use error::{Error, Result};
pub use eval::{
    report::{AssessmentReport, AugmentedRow, AugmentedTable, GradeSummary, GradedRow},
    session::{Assessment, AssessmentConfig},
};
pub use import::{MeasurementRow, SurveyTable};
pub use nomogram::{NomogramConfig, NomogramGeometry};
pub use normalize::Domain;
pub use rating::{
    Classifier, Grade, Grades, LawsonGrade, LawsonPolicy, MurakamiGrade, Nen8100Grade, Scale,
    Verdict, classify,
};
