//! Wind rating: per-scale classification and the composite verdict.
//!
//! Each surveyed point is rated on three independent scales:
//!
//! | Scale | Measurement | Grades |
//! |---|---|---|
//! | Lawson | wind speed (m/s) | A-E (S1, S2 with the conditional policy) |
//! | NEN 8100 | exceedance probability (%) | A-E |
//! | Murakami | wind speed ratio | 1-4 |
//!
//! A point is [`Verdict::Hazardous`] when Lawson or NEN 8100 grade it `E` or
//! Murakami grades it `4`.

pub mod bands;
pub mod grade;
pub mod lawson;

pub use bands::{BinTable, ColorBands, validate_tables};
pub use grade::{Grade, LawsonGrade, MurakamiGrade, Nen8100Grade, Scale, Verdict};

use serde::{Deserialize, Serialize};

use crate::import::MeasurementRow;
use bands::{LAWSON_BINS, MURAKAMI_BINS, NEN8100_BINS};

/// How Lawson grades are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawsonPolicy {
    /// Wind speed binned like the other two scales.
    #[default]
    Binned,
    /// Wind speed and exceedance probability through the conditional rule
    /// in [`lawson::classify_conditional`].
    Conditional,
}

impl LawsonPolicy {
    /// Parse from string (case-insensitive).
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "binned" | "bins" | "b" => Some(Self::Binned),
            "conditional" | "joint" | "a" => Some(Self::Conditional),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Binned => "binned",
            Self::Conditional => "conditional",
        }
    }
}

/// Classifies a single value on one scale with the binned rule.
///
/// Returns `None` when the value falls outside every bin.
///
/// ```
/// use wind_eval::rating::{classify, Grade, Nen8100Grade, Scale};
///
/// assert_eq!(classify(Scale::Nen8100, 2.5), Some(Grade::Nen8100(Nen8100Grade::B)));
/// assert_eq!(classify(Scale::Nen8100, -1.0), None);
/// ```
#[must_use]
pub fn classify(scale: Scale, value: f64) -> Option<Grade> {
    match scale {
        Scale::Lawson => LAWSON_BINS.lookup(value).map(Grade::Lawson),
        Scale::Nen8100 => NEN8100_BINS.lookup(value).map(Grade::Nen8100),
        Scale::Murakami => MURAKAMI_BINS.lookup(value).map(Grade::Murakami),
    }
}

/// The three grades of one point. `None` means unclassified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grades {
    pub lawson: Option<LawsonGrade>,
    pub nen8100: Option<Nen8100Grade>,
    pub murakami: Option<MurakamiGrade>,
}

impl Grades {
    /// Composite verdict for these grades.
    ///
    /// Unclassified grades never count as hazardous. Only `E` triggers the
    /// Lawson hazard, so `S1`/`S2` from the conditional policy do not.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        let hazardous = self.lawson == Some(LawsonGrade::E)
            || self.nen8100 == Some(Nen8100Grade::E)
            || self.murakami == Some(MurakamiGrade::Four);
        if hazardous {
            Verdict::Hazardous
        } else {
            Verdict::Acceptable
        }
    }

    /// Grade on one scale.
    #[must_use]
    pub fn get(&self, scale: Scale) -> Option<Grade> {
        match scale {
            Scale::Lawson => self.lawson.map(Grade::Lawson),
            Scale::Nen8100 => self.nen8100.map(Grade::Nen8100),
            Scale::Murakami => self.murakami.map(Grade::Murakami),
        }
    }

    /// Whether any scale left the point unclassified.
    #[must_use]
    pub fn has_unclassified(&self) -> bool {
        self.lawson.is_none() || self.nen8100.is_none() || self.murakami.is_none()
    }
}

/// Rates measurement rows on all three scales.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    policy: LawsonPolicy,
}

impl Classifier {
    #[must_use]
    pub fn new(policy: LawsonPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> LawsonPolicy {
        self.policy
    }

    /// Lawson grade under the configured policy.
    #[must_use]
    pub fn lawson(&self, row: &MeasurementRow) -> Option<LawsonGrade> {
        match self.policy {
            LawsonPolicy::Binned => LAWSON_BINS.lookup(row.wind_speed),
            LawsonPolicy::Conditional => Some(lawson::classify_conditional(
                row.wind_speed,
                row.exceedance_probability,
            )),
        }
    }

    /// All three grades of a row.
    #[must_use]
    pub fn grade(&self, row: &MeasurementRow) -> Grades {
        Grades {
            lawson: self.lawson(row),
            nen8100: NEN8100_BINS.lookup(row.exceedance_probability),
            murakami: MURAKAMI_BINS.lookup(row.wind_speed_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(wind_speed: f64, exceedance_probability: f64, wind_speed_ratio: f64) -> MeasurementRow {
        MeasurementRow {
            site: "P1".to_string(),
            wind_speed,
            exceedance_probability,
            wind_speed_ratio,
        }
    }

    #[test]
    fn test_classify_nen8100_edges() {
        let nen = |v| classify(Scale::Nen8100, v).map(Grade::label);
        assert_eq!(nen(2.5), Some("B"));
        assert_eq!(nen(2.499), Some("A"));
        assert_eq!(nen(0.0), Some("A"));
        assert_eq!(nen(20.0), Some("E"));
        assert_eq!(nen(100.0), None);
    }

    #[test]
    fn test_classify_murakami_edges() {
        let mk = |v| classify(Scale::Murakami, v).map(Grade::label);
        assert_eq!(mk(1.0), Some("2"));
        assert_eq!(mk(0.999), Some("1"));
        assert_eq!(mk(1.1), Some("3"));
        assert_eq!(mk(1.5), Some("4"));
    }

    #[test]
    fn test_classify_lawson_binned() {
        let lw = |v| classify(Scale::Lawson, v).map(Grade::label);
        assert_eq!(lw(20.0), Some("E"));
        assert_eq!(lw(19.999), Some("E"));
        assert_eq!(lw(15.0), Some("E"));
        assert_eq!(lw(10.0), Some("E"));
        assert_eq!(lw(9.99), Some("D"));
        assert_eq!(lw(4.0), Some("B"));
        assert_eq!(lw(3.0), Some("A"));
        assert_eq!(lw(-1.0), None);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for v in [0.0, 0.5, 1.05, 2.5, 7.0, 16.0, 42.0] {
            for scale in Scale::all() {
                assert_eq!(classify(*scale, v), classify(*scale, v));
            }
        }
    }

    #[test]
    fn test_verdict_rule() {
        let grades = Grades {
            lawson: Some(LawsonGrade::D),
            nen8100: Some(Nen8100Grade::E),
            murakami: Some(MurakamiGrade::Two),
        };
        assert_eq!(grades.verdict(), Verdict::Hazardous);

        let grades = Grades {
            lawson: Some(LawsonGrade::D),
            nen8100: Some(Nen8100Grade::D),
            murakami: Some(MurakamiGrade::Four),
        };
        assert_eq!(grades.verdict(), Verdict::Hazardous);

        let grades = Grades {
            lawson: Some(LawsonGrade::S2),
            nen8100: Some(Nen8100Grade::A),
            murakami: Some(MurakamiGrade::One),
        };
        assert_eq!(grades.verdict(), Verdict::Acceptable);
    }

    #[test]
    fn test_unclassified_is_not_hazardous() {
        assert_eq!(Grades::default().verdict(), Verdict::Acceptable);
        assert!(Grades::default().has_unclassified());
    }

    #[test]
    fn test_end_to_end_point() {
        let grades = Classifier::default().grade(&row(16.0, 3.0, 1.2));
        assert_eq!(grades.lawson, Some(LawsonGrade::E));
        assert_eq!(grades.nen8100, Some(Nen8100Grade::B));
        assert_eq!(grades.murakami, Some(MurakamiGrade::Three));
        assert_eq!(grades.verdict(), Verdict::Hazardous);
    }

    #[test]
    fn test_policies_disagree_on_lawson() {
        let r = row(16.0, 3.0, 1.2);
        let binned = Classifier::new(LawsonPolicy::Binned).grade(&r);
        let conditional = Classifier::new(LawsonPolicy::Conditional).grade(&r);
        assert_eq!(binned.lawson, Some(LawsonGrade::E));
        assert_eq!(conditional.lawson, Some(LawsonGrade::S1));
        assert_eq!(binned.nen8100, conditional.nen8100);
        assert_eq!(conditional.verdict(), Verdict::Acceptable);
    }

    #[test]
    fn test_policy_from_str_loose() {
        assert_eq!(LawsonPolicy::from_str_loose("Binned"), Some(LawsonPolicy::Binned));
        assert_eq!(
            LawsonPolicy::from_str_loose("CONDITIONAL"),
            Some(LawsonPolicy::Conditional)
        );
        assert_eq!(LawsonPolicy::from_str_loose("other"), None);
    }
}
