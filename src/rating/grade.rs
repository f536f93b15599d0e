//! Grade and verdict types for the three rating scales.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three wind rating standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Lawson comfort criteria, rated on wind speed (m/s).
    Lawson,
    /// Dutch NEN 8100, rated on exceedance probability (%).
    Nen8100,
    /// Murakami criteria, rated on wind speed ratio.
    Murakami,
}

impl Scale {
    /// All scales in nomogram lane order (left to right).
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Nen8100, Self::Lawson, Self::Murakami]
    }

    /// Display name of the standard.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Lawson => "Lawson",
            Self::Nen8100 => "NEN8100",
            Self::Murakami => "Murakami",
        }
    }

    /// Header of the grade column this scale adds to the output table.
    #[must_use]
    pub const fn grade_column(self) -> &'static str {
        match self {
            Self::Lawson => "Lawson 등급",
            Self::Nen8100 => "NEN8100 등급",
            Self::Murakami => "Murakami 등급",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lawson grade. Ordered by increasing risk.
///
/// `S1` and `S2` are only produced by the conditional Lawson policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LawsonGrade {
    A,
    B,
    C,
    D,
    E,
    S1,
    S2,
}

impl LawsonGrade {
    /// Label as written to the output table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::S1 => "S1",
            Self::S2 => "S2",
        }
    }

    /// Parse a label.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            "S1" => Some(Self::S1),
            "S2" => Some(Self::S2),
            _ => None,
        }
    }
}

/// NEN 8100 grade, `A` (best) to `E` (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nen8100Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Nen8100Grade {
    /// Label as written to the output table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }

    /// Parse a label.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "E" => Some(Self::E),
            _ => None,
        }
    }
}

/// Murakami grade, `1` (best) to `4` (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MurakamiGrade {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
}

impl MurakamiGrade {
    /// Label as written to the output table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
        }
    }

    /// Parse a label. Accepts `"4.0"` style labels written by spreadsheet tools.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().trim_end_matches(".0") {
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            "3" => Some(Self::Three),
            "4" => Some(Self::Four),
            _ => None,
        }
    }
}

/// A grade on any of the three scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scale", content = "grade", rename_all = "snake_case")]
pub enum Grade {
    Lawson(LawsonGrade),
    Nen8100(Nen8100Grade),
    Murakami(MurakamiGrade),
}

impl Grade {
    /// Scale this grade belongs to.
    #[must_use]
    pub fn scale(self) -> Scale {
        match self {
            Self::Lawson(_) => Scale::Lawson,
            Self::Nen8100(_) => Scale::Nen8100,
            Self::Murakami(_) => Scale::Murakami,
        }
    }

    /// Label as written to the output table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Lawson(g) => g.label(),
            Self::Nen8100(g) => g.label(),
            Self::Murakami(g) => g.label(),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Composite safety verdict for one surveyed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// 양호
    #[serde(rename = "양호")]
    Acceptable,
    /// 위험
    #[serde(rename = "위험")]
    Hazardous,
}

impl Verdict {
    /// Header of the verdict column in the output table.
    pub const COLUMN: &'static str = "종합 평가";

    /// Label as written to the output table.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Acceptable => "양호",
            Self::Hazardous => "위험",
        }
    }

    /// Parse a label.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim() {
            "양호" => Some(Self::Acceptable),
            "위험" => Some(Self::Hazardous),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_hazardous(self) -> bool {
        self == Self::Hazardous
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lawson_ordering() {
        assert!(LawsonGrade::A < LawsonGrade::E);
        assert!(LawsonGrade::E < LawsonGrade::S1);
        assert!(LawsonGrade::S1 < LawsonGrade::S2);
    }

    #[test]
    fn test_label_roundtrip() {
        for g in [LawsonGrade::A, LawsonGrade::D, LawsonGrade::S2] {
            assert_eq!(LawsonGrade::from_label(g.label()), Some(g));
        }
        assert_eq!(Nen8100Grade::from_label(" E "), Some(Nen8100Grade::E));
        assert_eq!(MurakamiGrade::from_label("3"), Some(MurakamiGrade::Three));
        assert_eq!(MurakamiGrade::from_label("4.0"), Some(MurakamiGrade::Four));
        assert_eq!(MurakamiGrade::from_label("5"), None);
        assert_eq!(Verdict::from_label("위험"), Some(Verdict::Hazardous));
        assert_eq!(Verdict::from_label("bad"), None);
    }

    #[test]
    fn test_lane_order() {
        assert_eq!(
            Scale::all(),
            &[Scale::Nen8100, Scale::Lawson, Scale::Murakami]
        );
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&MurakamiGrade::Four).unwrap();
        assert_eq!(json, "\"4\"");
        let json = serde_json::to_string(&Verdict::Hazardous).unwrap();
        assert_eq!(json, "\"위험\"");
    }
}
