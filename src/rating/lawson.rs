//! Conditional Lawson rule over wind speed and exceedance probability.
//!
//! Unlike the binned rule this reads two measurements and can produce the
//! safety grades `S1`/`S2`. The rule is applied exactly as published: the
//! `0.023` threshold and the `5` threshold are both compared against the same
//! exceedance probability value (percent in this crate).

use super::grade::LawsonGrade;

/// Probability above which the safety grades `S1`/`S2` apply.
pub const SAFETY_PROBABILITY: f64 = 0.023;

/// Probability above which a 10 m/s point is graded `E` instead of `D`.
pub const COMFORT_PROBABILITY: f64 = 5.0;

/// Grades a point with the conditional rule. Total: every input gets a grade.
#[must_use]
pub fn classify_conditional(wind_speed: f64, probability: f64) -> LawsonGrade {
    let v = wind_speed;
    let p = probability;
    if v >= 20.0 && p > SAFETY_PROBABILITY {
        LawsonGrade::S2
    } else if v >= 15.0 && p > SAFETY_PROBABILITY {
        LawsonGrade::S1
    } else if v >= 10.0 && p > COMFORT_PROBABILITY {
        LawsonGrade::E
    } else if v >= 10.0 && p <= COMFORT_PROBABILITY {
        LawsonGrade::D
    } else if v >= 8.0 && p <= COMFORT_PROBABILITY {
        LawsonGrade::C
    } else if v >= 6.0 && p <= COMFORT_PROBABILITY {
        LawsonGrade::B
    } else {
        // Both the `v >= 4` branch and the fallback grade A.
        LawsonGrade::A
    }
}
