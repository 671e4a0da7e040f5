//! Area engine: plot, built-up, carpet and multi-floor areas.
//!
//! Every function here trusts its inputs. Callers gate values through
//! [`crate::validation`] first; see [`crate::services::CalculatorService`].

use serde::{Deserialize, Serialize};

use crate::units::{sq_m_to_sq_ft, LengthUnit};

/// Default share of the plot usable for construction.
pub const DEFAULT_BUILT_UP_PERCENTAGE: f64 = 70.0;

/// Default share of the built-up area that is livable floor.
pub const DEFAULT_CARPET_PERCENTAGE: f64 = 75.0;

/// Plot dimensions as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaInput {
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

/// An area reported in both unit systems.
///
/// `area` is canonical and always in square meters; `area_in_sq_m` repeats it
/// for display code that reads both fields symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaResult {
    pub area: f64,
    pub area_in_sq_ft: f64,
    pub area_in_sq_m: f64,
}

impl AreaResult {
    /// Build a result from a canonical square-meter value.
    pub fn from_sq_m(sq_m: f64) -> Self {
        Self {
            area: sq_m,
            area_in_sq_ft: sq_m_to_sq_ft(sq_m),
            area_in_sq_m: sq_m,
        }
    }
}

/// Plot area from length and width. Feet are converted per dimension before
/// multiplying.
pub fn calculate_plot_area(input: &AreaInput) -> AreaResult {
    let length_m = input.unit.to_meters(input.length);
    let width_m = input.unit.to_meters(input.width);
    AreaResult::from_sq_m(length_m * width_m)
}

/// Built-up area as a percentage of the plot area.
pub fn calculate_built_up_area(plot_area: f64, percentage: f64) -> f64 {
    plot_area * (percentage / 100.0)
}

/// Carpet area as a percentage of the built-up area.
pub fn calculate_carpet_area(built_up_area: f64, percentage: f64) -> f64 {
    built_up_area * (percentage / 100.0)
}

pub fn calculate_multi_floor_area(floor_area: f64, floors: u32) -> f64 {
    floor_area * f64::from(floors)
}
