//! SVG rendering of a [`NomogramGeometry`].
//!
//! The y axis is fixed to `[0, 1]`; markers outside that range are clipped to
//! the plot area. Text colors follow light and dark mode via CSS media
//! queries, band colors do not.

use std::fmt::Write as _;

use super::NomogramGeometry;

/// Horizontal padding around the lanes, as a fraction of their extent.
const X_MARGIN: f64 = 0.05;

/// Nomogram chart configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NomogramConfig {
    /// Chart title.
    pub title: String,
    /// Y-axis label.
    pub y_label: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
}

impl Default for NomogramConfig {
    fn default() -> Self {
        Self {
            title: "Nomogram".to_string(),
            y_label: "Normalization 0-1".to_string(),
            width: 600,
            height: 800,
        }
    }
}

impl NomogramConfig {
    /// Creates a configuration with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the Y-axis label.
    #[must_use]
    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    /// Sets the chart dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Renders the nomogram as a standalone SVG document.
///
/// # Example
///
/// ```rust
/// use wind_eval::import::MeasurementRow;
/// use wind_eval::nomogram::{render_svg, NomogramConfig, NomogramGeometry};
///
/// let rows = vec![MeasurementRow {
///     site: "P1".to_string(),
///     wind_speed: 16.0,
///     exceedance_probability: 3.0,
///     wind_speed_ratio: 1.2,
/// }];
///
/// let geometry = NomogramGeometry::compute(&rows);
/// let svg = render_svg(&geometry, &NomogramConfig::default());
/// assert!(svg.starts_with("<svg"));
/// ```
#[must_use]
pub fn render_svg(geometry: &NomogramGeometry, config: &NomogramConfig) -> String {
    let mut svg = String::with_capacity(8192);

    let width = config.width;
    let height = config.height;
    let margin_top = 50;
    let margin_right = 30;
    let margin_bottom = 70;
    let margin_left = 80;
    let plot_width = width.saturating_sub(margin_left + margin_right).max(1);
    let plot_height = height.saturating_sub(margin_top + margin_bottom).max(1);

    let (lane_min, lane_max) = geometry.x_extent();
    let pad = (lane_max - lane_min) * X_MARGIN;
    let (min_x, max_x) = (lane_min - pad, lane_max + pad);

    let scale_x = |v: f64| -> f64 {
        f64::from(margin_left) + (v - min_x) / (max_x - min_x) * f64::from(plot_width)
    };
    let scale_y =
        |v: f64| -> f64 { f64::from(margin_top) + (1.0 - v) * f64::from(plot_height) };

    // SVG header
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}">"#,
        width, height
    );

    svg.push_str(
        r#"<style>
  :root {
    --bg-color: #ffffff;
    --text-color: #1a1a1a;
    --axis-color: #333333;
  }
  @media (prefers-color-scheme: dark) {
    :root {
      --bg-color: #1a1a1a;
      --text-color: #e0e0e0;
      --axis-color: #b0b0b0;
    }
  }
  .background { fill: var(--bg-color); }
  .title { font: bold 18px system-ui, sans-serif; fill: var(--text-color); }
  .axis-label { font: 13px system-ui, sans-serif; fill: var(--text-color); }
  .tick-label { font: 11px system-ui, sans-serif; fill: var(--text-color); }
  .axis { stroke: var(--axis-color); stroke-width: 1.5; fill: none; }
  .marker { stroke: black; stroke-width: 1; stroke-dasharray: 3.7 1.6; }
</style>
"#,
    );

    let _ = writeln!(
        svg,
        r#"<rect class="background" width="{}" height="{}"/>"#,
        width, height
    );

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" class="title">{}</text>"#,
        f64::from(width) / 2.0,
        escape_xml(&config.title)
    );

    let _ = writeln!(
        svg,
        r#"<clipPath id="plot-area"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
        margin_left, margin_top, plot_width, plot_height
    );
    svg.push_str("<g clip-path=\"url(#plot-area)\">\n");

    // Bands
    for band in &geometry.bands {
        let x = scale_x(band.x0);
        let y = scale_y(band.y1);
        let _ = writeln!(
            svg,
            r#"<rect class="band" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x,
            y,
            scale_x(band.x1) - x,
            scale_y(band.y0) - y,
            band.color
        );
    }

    // Markers
    for marker in &geometry.markers {
        let y = scale_y(marker.y);
        let _ = writeln!(
            svg,
            r#"<line class="marker" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"/>"#,
            scale_x(marker.x0),
            y,
            scale_x(marker.x1),
            y
        );
    }

    svg.push_str("</g>\n");

    // Frame
    let _ = writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" class="axis"/>"#,
        margin_left, margin_top, plot_width, plot_height
    );

    // Y ticks
    for i in 0..=5 {
        let v = f64::from(i) / 5.0;
        let y = scale_y(v);
        let _ = writeln!(
            svg,
            r#"<line x1="{}" y1="{:.2}" x2="{}" y2="{:.2}" class="axis"/>"#,
            margin_left - 5,
            y,
            margin_left,
            y
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.2}" text-anchor="end" class="tick-label">{:.1}</text>"#,
            margin_left - 8,
            y + 4.0,
            v
        );
    }

    // Lane labels
    for lane in &geometry.lanes {
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{}" text-anchor="middle" class="tick-label">{}</text>"#,
            scale_x(lane.center),
            height.saturating_sub(margin_bottom) + 20,
            escape_xml(lane.label())
        );
    }

    // Y axis label (rotated)
    let _ = writeln!(
        svg,
        r#"<text x="25" y="{}" text-anchor="middle" class="axis-label" transform="rotate(-90 25 {})">{}</text>"#,
        f64::from(height) / 2.0,
        f64::from(height) / 2.0,
        escape_xml(&config.y_label)
    );

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::MeasurementRow;

    fn rows() -> Vec<MeasurementRow> {
        vec![
            MeasurementRow {
                site: "P1".to_string(),
                wind_speed: 16.0,
                exceedance_probability: 3.0,
                wind_speed_ratio: 1.2,
            },
            MeasurementRow {
                site: "P2".to_string(),
                wind_speed: 6.0,
                exceedance_probability: 0.5,
                wind_speed_ratio: 0.9,
            },
        ]
    }

    #[test]
    fn test_render_basic() {
        let geometry = NomogramGeometry::compute(&rows());
        let svg = render_svg(&geometry, &NomogramConfig::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Nomogram"));
        assert!(svg.contains("Normalization 0-1"));
        assert!(svg.contains("Lawson 2001 (m/s)"));
        assert_eq!(svg.matches(r#"class="band""#).count(), 16);
        assert_eq!(svg.matches(r#"class="marker""#).count(), 6);
        assert!(svg.contains(r#"fill="deepskyblue""#));
    }

    #[test]
    fn test_empty_table_still_draws_bands() {
        let geometry = NomogramGeometry::compute(&[]);
        let svg = render_svg(&geometry, &NomogramConfig::default());
        assert_eq!(svg.matches(r#"class="band""#).count(), 16);
        assert_eq!(svg.matches(r#"class="marker""#).count(), 0);
    }

    #[test]
    fn test_title_is_escaped() {
        let geometry = NomogramGeometry::compute(&[]);
        let config = NomogramConfig::new("A & B <site>").with_dimensions(300, 400);
        let svg = render_svg(&geometry, &config);
        assert!(svg.contains("A &amp; B &lt;site&gt;"));
        assert!(svg.contains(r#"viewBox="0 0 300 400""#));
    }

    #[test]
    fn test_marker_position() {
        // Lawson 12 m/s normalizes to 0.5: halfway down the plot area.
        let rows = vec![MeasurementRow {
            site: "mid".to_string(),
            wind_speed: 12.0,
            exceedance_probability: f64::NAN,
            wind_speed_ratio: f64::NAN,
        }];
        let geometry = NomogramGeometry::compute(&rows);
        let svg = render_svg(&geometry, &NomogramConfig::default());
        // margin_top 50 + 0.5 * (800 - 120)
        assert!(svg.contains(r#"y1="390.00""#));
        assert_eq!(svg.matches(r#"class="marker""#).count(), 1);
    }
}
