//! Assessment pipeline and report generation.
//!
//! - [`session::Assessment`]: rates a survey and draws its nomogram
//! - [`session::AssessmentConfig`]: Lawson policy and chart settings
//! - [`report`]: augmented tables, CSV/JSON export and summaries

pub mod report;
pub mod session;

pub use report::{AssessmentReport, AugmentedRow, AugmentedTable, GradeSummary, GradedRow};
pub use session::{Assessment, AssessmentConfig, AssessmentConfigBuilder};
