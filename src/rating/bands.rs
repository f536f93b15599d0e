//! Static band tables: classification bins and nomogram color bands.
//!
//! Classification bins and color bands are separate tables. The Lawson color
//! bands split the 10-20 m/s range at 12 and 15 while the Lawson bins only
//! split at 15, and the Murakami color bands stop at 2.0 while the bins run to
//! the sentinel edge.

use crate::error::{Error, Result};
use crate::normalize::Domain;

use super::grade::{LawsonGrade, MurakamiGrade, Nen8100Grade, Scale};

/// Upper edge the last classification bin is extended to.
pub const SENTINEL_UPPER: f64 = 100.0;

/// Left-closed, right-open bins mapping a raw value to a grade.
#[derive(Debug, Clone, Copy)]
pub struct BinTable<G: 'static> {
    /// Scale the bins belong to.
    pub scale: Scale,
    /// Bin edges, strictly increasing; one more than `labels`.
    pub edges: &'static [f64],
    /// Grade of each bin.
    pub labels: &'static [G],
}

impl<G: Copy> BinTable<G> {
    /// Lower edge of the first bin.
    #[must_use]
    pub fn lower_edge(&self) -> f64 {
        self.edges[0]
    }

    /// Effective upper edge of the last bin, after sentinel extension.
    #[must_use]
    pub fn upper_edge(&self) -> f64 {
        self.edges[self.labels.len()].max(SENTINEL_UPPER)
    }

    /// Looks up the grade for `value`.
    ///
    /// Returns `None` for NaN and for values outside
    /// `[lower_edge, upper_edge)`.
    #[must_use]
    pub fn lookup(&self, value: f64) -> Option<G> {
        let last = self.labels.len().checked_sub(1)?;
        self.labels.iter().enumerate().find_map(|(i, &label)| {
            let lower = self.edges[i];
            let upper = if i == last {
                self.upper_edge()
            } else {
                self.edges[i + 1]
            };
            (lower <= value && value < upper).then_some(label)
        })
    }

    /// Checks edge count and ordering.
    pub fn validate(&self) -> Result<()> {
        validate_edges(self.scale.name(), self.edges, self.labels.len())
    }
}

/// Lawson bins over wind speed (m/s). 10-15 and 15-20 both grade `E`.
pub const LAWSON_BINS: BinTable<LawsonGrade> = BinTable {
    scale: Scale::Lawson,
    edges: &[0.0, 4.0, 6.0, 8.0, 10.0, 15.0, 20.0],
    labels: &[
        LawsonGrade::A,
        LawsonGrade::B,
        LawsonGrade::C,
        LawsonGrade::D,
        LawsonGrade::E,
        LawsonGrade::E,
    ],
};

/// NEN 8100 bins over exceedance probability (%).
pub const NEN8100_BINS: BinTable<Nen8100Grade> = BinTable {
    scale: Scale::Nen8100,
    edges: &[0.0, 2.5, 5.0, 10.0, 20.0, 100.0],
    labels: &[
        Nen8100Grade::A,
        Nen8100Grade::B,
        Nen8100Grade::C,
        Nen8100Grade::D,
        Nen8100Grade::E,
    ],
};

/// Murakami bins over wind speed ratio.
pub const MURAKAMI_BINS: BinTable<MurakamiGrade> = BinTable {
    scale: Scale::Murakami,
    edges: &[0.0, 1.0, 1.1, 1.5, 100.0],
    labels: &[
        MurakamiGrade::One,
        MurakamiGrade::Two,
        MurakamiGrade::Three,
        MurakamiGrade::Four,
    ],
};

/// Colored bands painted behind one nomogram lane.
#[derive(Debug, Clone, Copy)]
pub struct ColorBands {
    /// Scale the lane shows.
    pub scale: Scale,
    /// Band edges, strictly increasing; one more than `colors`.
    pub edges: &'static [f64],
    /// SVG color keyword of each band.
    pub colors: &'static [&'static str],
}

/// One colored band in raw units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub color: &'static str,
}

impl ColorBands {
    /// Bands as `(lower, upper, color)` triples.
    pub fn bands(&self) -> impl Iterator<Item = Band> + '_ {
        self.colors.iter().enumerate().map(|(i, &color)| Band {
            lower: self.edges[i],
            upper: self.edges[i + 1],
            color,
        })
    }

    /// Maps an edge into `[0, 1]` using this table's own first and last edge.
    #[must_use]
    pub fn relative(&self, edge: f64) -> f64 {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        (edge - first) / (last - first)
    }

    /// Checks edge count and ordering.
    pub fn validate(&self) -> Result<()> {
        validate_edges(self.scale.name(), self.edges, self.colors.len())
    }
}

pub const LAWSON_COLORS: ColorBands = ColorBands {
    scale: Scale::Lawson,
    edges: &[0.0, 4.0, 6.0, 8.0, 10.0, 12.0, 15.0, 20.0],
    colors: &[
        "blue",
        "deepskyblue",
        "cyan",
        "yellowgreen",
        "gold",
        "orange",
        "red",
    ],
};

pub const NEN8100_COLORS: ColorBands = ColorBands {
    scale: Scale::Nen8100,
    edges: &[0.0, 2.5, 5.0, 10.0, 20.0, 100.0],
    colors: &["blue", "skyblue", "lightgreen", "orange", "red"],
};

pub const MURAKAMI_COLORS: ColorBands = ColorBands {
    scale: Scale::Murakami,
    edges: &[0.0, 1.0, 1.1, 1.5, 2.0],
    colors: &["blue", "lightblue", "yellowgreen", "red"],
};

impl Scale {
    /// Color bands for this scale's nomogram lane.
    #[must_use]
    pub fn color_bands(self) -> &'static ColorBands {
        match self {
            Self::Lawson => &LAWSON_COLORS,
            Self::Nen8100 => &NEN8100_COLORS,
            Self::Murakami => &MURAKAMI_COLORS,
        }
    }
}

/// Validates every static table and normalization domain.
///
/// Called once when an [`Assessment`](crate::eval::Assessment) is built, so
/// per-row code can rely on the tables being well formed.
pub fn validate_tables() -> Result<()> {
    LAWSON_BINS.validate()?;
    NEN8100_BINS.validate()?;
    MURAKAMI_BINS.validate()?;
    for scale in Scale::all() {
        scale.color_bands().validate()?;
        let domain = Domain::for_scale(*scale);
        Domain::new(scale.name(), domain.min(), domain.max())?;
    }
    Ok(())
}

fn validate_edges(name: &str, edges: &[f64], bins: usize) -> Result<()> {
    let invalid = |reason: String| Error::InvalidBandTable {
        name: name.to_string(),
        reason,
    };

    if bins == 0 {
        return Err(invalid("no bins".to_string()));
    }
    if edges.len() != bins + 1 {
        return Err(invalid(format!(
            "{} edges for {} bins (expected {})",
            edges.len(),
            bins,
            bins + 1
        )));
    }
    if edges.iter().any(|e| !e.is_finite()) {
        return Err(invalid("non-finite edge".to_string()));
    }
    if let Some(w) = edges.windows(2).find(|w| w[0] >= w[1]) {
        return Err(invalid(format!(
            "edges not strictly increasing at {} >= {}",
            w[0], w[1]
        )));
    }
    Ok(())
}
