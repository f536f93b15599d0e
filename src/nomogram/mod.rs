//! Nomogram geometry: three color-banded lanes with one marker per point.
//!
//! Geometry is computed in data coordinates (lane centers at x = 0, 1, 2 and
//! y in `[0, 1]`) and kept separate from drawing, see [`svg`] for the SVG
//! adapter.
//!
//! Two normalizations meet on each lane:
//!
//! - band rectangles are scaled by the color table's own first and last edge
//!   ([`ColorBands::relative`]);
//! - markers are scaled by the measurement's declared [`Domain`].
//!
//! The two ranges differ for every lane (Lawson bands span 0-20 m/s while
//! markers use 4-20 m/s), so a marker does not necessarily sit inside the
//! band of its own grade.

pub mod svg;

pub use svg::{NomogramConfig, render_svg};

use serde::Serialize;

use crate::import::MeasurementRow;
use crate::normalize::Domain;
use crate::rating::{ColorBands, Scale};

/// Half width of a lane and of its markers, in lane units.
pub const HALF_WIDTH: f64 = 0.4;

/// One vertical lane of the nomogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lane {
    /// Scale shown in this lane.
    pub scale: Scale,
    /// X coordinate of the lane center.
    pub center: f64,
}

impl Lane {
    /// Tick label under the lane.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.scale {
            Scale::Nen8100 => "NEN8100 (%)",
            Scale::Lawson => "Lawson 2001 (m/s)",
            Scale::Murakami => "Murakami (V/V\u{20de})",
        }
    }

    #[must_use]
    pub fn x0(&self) -> f64 {
        self.center - HALF_WIDTH
    }

    #[must_use]
    pub fn x1(&self) -> f64 {
        self.center + HALF_WIDTH
    }
}

/// The three lanes, left to right.
#[must_use]
pub fn lanes() -> Vec<Lane> {
    Scale::all()
        .iter()
        .enumerate()
        .map(|(i, &scale)| Lane {
            scale,
            center: i as f64,
        })
        .collect()
}

/// A filled band rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandRect {
    pub scale: Scale,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub color: &'static str,
}

/// A dashed horizontal marker for one point on one lane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub scale: Scale,
    pub site: String,
    pub x0: f64,
    pub x1: f64,
    pub y: f64,
}

/// Everything needed to draw a nomogram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NomogramGeometry {
    pub lanes: Vec<Lane>,
    pub bands: Vec<BandRect>,
    pub markers: Vec<Marker>,
}

impl NomogramGeometry {
    /// Computes band rectangles for every lane and markers for every row.
    ///
    /// Markers are emitted row by row, in lane order within a row. Values
    /// that are missing (NaN) produce no marker. Values outside the declared
    /// domain produce markers outside `[0, 1]`; clipping is up to the
    /// renderer.
    pub fn compute<'a>(rows: impl IntoIterator<Item = &'a MeasurementRow>) -> Self {
        let lanes = lanes();

        let bands = lanes
            .iter()
            .flat_map(|lane| band_rects(lane, lane.scale.color_bands()))
            .collect();

        let mut markers = Vec::new();
        for row in rows {
            for lane in &lanes {
                let y = Domain::for_scale(lane.scale).normalize(row.value_for(lane.scale));
                if !y.is_finite() {
                    continue;
                }
                markers.push(Marker {
                    scale: lane.scale,
                    site: row.site.clone(),
                    x0: lane.x0(),
                    x1: lane.x1(),
                    y,
                });
            }
        }

        Self {
            lanes,
            bands,
            markers,
        }
    }

    /// Horizontal data range covering every lane.
    #[must_use]
    pub fn x_extent(&self) -> (f64, f64) {
        let min = self.lanes.iter().map(Lane::x0).fold(f64::INFINITY, f64::min);
        let max = self
            .lanes
            .iter()
            .map(Lane::x1)
            .fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }

    /// Markers drawn on one lane.
    pub fn markers_for(&self, scale: Scale) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| m.scale == scale)
    }
}

fn band_rects(lane: &Lane, table: &ColorBands) -> Vec<BandRect> {
    table
        .bands()
        .map(|band| BandRect {
            scale: lane.scale,
            x0: lane.x0(),
            x1: lane.x1(),
            y0: table.relative(band.lower),
            y1: table.relative(band.upper),
            color: band.color,
        })
        .collect()
}
