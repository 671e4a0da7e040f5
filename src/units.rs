//! Unit conversion between feet and meters.
//!
//! The square-foot factor is a fixed constant rather than the reciprocal of
//! `0.3048²`. Results must match legacy outputs exactly, so every conversion
//! goes through these helpers.

use serde::{Deserialize, Serialize};

/// Square feet per square meter.
pub const SQ_FT_PER_SQ_M: f64 = 10.7639;

/// Square meters per square foot, used where the legacy formulas multiply
/// instead of dividing (electrical point estimates).
pub const SQ_M_PER_SQ_FT: f64 = 0.092903;

/// Meters per foot.
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Cubic feet per cubic meter.
pub const CU_FT_PER_CU_M: f64 = 35.3147;

/// Linear unit accepted by area and material inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ft")]
    Feet,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Meters => "m",
            LengthUnit::Feet => "ft",
        }
    }

    /// Convert a length expressed in this unit to meters.
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Meters => value,
            LengthUnit::Feet => feet_to_meters(value),
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn sq_m_to_sq_ft(sq_m: f64) -> f64 {
    sq_m * SQ_FT_PER_SQ_M
}

pub fn sq_ft_to_sq_m(sq_ft: f64) -> f64 {
    sq_ft / SQ_FT_PER_SQ_M
}

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

pub fn cu_m_to_cu_ft(cu_m: f64) -> f64 {
    cu_m * CU_FT_PER_CU_M
}

/// Round to two decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sq_m_to_sq_ft_uses_fixed_constant() {
        assert_eq!(sq_m_to_sq_ft(1.0), 10.7639);
        assert_eq!(sq_m_to_sq_ft(100.0), 100.0 * 10.7639);
    }

    #[test]
    fn test_square_round_trip() {
        for x in [0.001, 1.0, 9.290304, 123.456, 99_999.0] {
            let back = sq_ft_to_sq_m(sq_m_to_sq_ft(x));
            assert!(((back - x) / x).abs() < 1e-9, "round trip drifted for {}", x);
        }
    }

    #[test]
    fn test_linear_conversions() {
        assert!((feet_to_meters(10.0) - 3.048).abs() < 1e-12);
        assert!((meters_to_feet(3.048) - 10.0).abs() < 1e-12);
        assert_eq!(LengthUnit::Meters.to_meters(2.5), 2.5);
        assert!((LengthUnit::Feet.to_meters(1.0) - 0.3048).abs() < 1e-12);
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&LengthUnit::Feet).unwrap(), "\"ft\"");
        let unit: LengthUnit = serde_json::from_str("\"m\"").unwrap();
        assert_eq!(unit, LengthUnit::Meters);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1076.3899999), 1076.39);
        assert_eq!(round2(12.345678), 12.35);
        assert_eq!(round2(1500.0), 1500.0);
    }
}
