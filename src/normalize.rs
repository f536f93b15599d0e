//! Normalization of raw measurements into nomogram coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rating::Scale;

/// A fixed `[min, max]` range that maps linearly onto `[0, 1]`.
///
/// Construction through [`Domain::new`] guarantees `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    min: f64,
    max: f64,
}

/// Wind speed domain (m/s), plotted on the Lawson lane.
pub const WIND_SPEED_DOMAIN: Domain = Domain {
    min: 4.0,
    max: 20.0,
};

/// Exceedance probability domain (%), plotted on the NEN 8100 lane.
pub const EXCEEDANCE_DOMAIN: Domain = Domain {
    min: 0.0,
    max: 20.0,
};

/// Wind speed ratio domain, plotted on the Murakami lane.
pub const SPEED_RATIO_DOMAIN: Domain = Domain { min: 1.0, max: 1.5 };

impl Domain {
    /// Creates a domain, rejecting empty, inverted or non-finite ranges.
    pub fn new(name: &str, min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(Error::InvalidDomain {
                name: name.to_string(),
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    /// Declared domain of the measurement a scale is rated on.
    #[must_use]
    pub fn for_scale(scale: Scale) -> Self {
        match scale {
            Scale::Lawson => WIND_SPEED_DOMAIN,
            Scale::Nen8100 => EXCEEDANCE_DOMAIN,
            Scale::Murakami => SPEED_RATIO_DOMAIN,
        }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps `value` to `(value - min) / (max - min)`.
    ///
    /// Not clamped: values outside the domain land outside `[0, 1]`.
    ///
    /// ```
    /// use wind_eval::normalize::WIND_SPEED_DOMAIN;
    ///
    /// assert_eq!(WIND_SPEED_DOMAIN.normalize(12.0), 0.5);
    /// assert_eq!(WIND_SPEED_DOMAIN.normalize(4.0), 0.0);
    /// ```
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoints() {
        for scale in Scale::all() {
            let d = Domain::for_scale(*scale);
            assert_eq!(d.normalize(d.min()), 0.0);
            assert_eq!(d.normalize(d.max()), 1.0);
        }
        assert_eq!(WIND_SPEED_DOMAIN.normalize(12.0), 0.5);
    }

    #[test]
    fn test_normalize_not_clamped() {
        assert_eq!(WIND_SPEED_DOMAIN.normalize(0.0), -0.25);
        assert_eq!(EXCEEDANCE_DOMAIN.normalize(40.0), 2.0);
        assert!(SPEED_RATIO_DOMAIN.normalize(2.0) > 1.0);
    }

    #[test]
    fn test_new_rejects_degenerate() {
        assert!(matches!(
            Domain::new("x", 1.0, 1.0),
            Err(Error::InvalidDomain { .. })
        ));
        assert!(Domain::new("x", 2.0, 1.0).is_err());
        assert!(Domain::new("x", 0.0, f64::INFINITY).is_err());
        assert_eq!(Domain::new("x", 4.0, 20.0).unwrap(), WIND_SPEED_DOMAIN);
    }
}
