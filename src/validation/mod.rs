//! Input validation for calculator and payment data.
//!
//! Every engine in this crate trusts its inputs. These predicates are the
//! gate: callers run them first and turn a failure into a user-facing error
//! before any engine sees the value. Validators never panic.

use serde::{Deserialize, Serialize};

use crate::material::{BrickSize, MixRatio};
use crate::payment::PaymentStatus;
use crate::units::LengthUnit;

/// Limits for validated fields. Bounds are inclusive unless noted.
pub mod limits {
    /// Maximum plot length or width.
    pub const MAX_DIMENSION: f64 = 10_000.0;
    /// Maximum slab thickness in meters.
    pub const MAX_THICKNESS_M: f64 = 10.0;
    /// Maximum slab thickness in feet.
    pub const MAX_THICKNESS_FT: f64 = 33.0;
    /// Maximum part in a mix ratio.
    pub const MAX_MIX_RATIO_PART: f64 = 10.0;
    /// Maximum area accepted by the budget estimator, in square feet.
    pub const MAX_BUDGET_AREA_SQ_FT: f64 = 100_000.0;
    /// Maximum location length in characters.
    pub const MAX_LOCATION_LENGTH: usize = 100;
    /// Minimum payment in minor units (₹1).
    pub const MIN_PAYMENT_AMOUNT: i64 = 100;
    /// Maximum payment in minor units (₹10,00,000).
    pub const MAX_PAYMENT_AMOUNT: i64 = 100_000_000;
    /// Maximum percentage (lower bound is exclusive zero).
    pub const MAX_PERCENTAGE: f64 = 100.0;
    pub const MIN_FLOORS: u32 = 1;
    pub const MAX_FLOORS: u32 = 100;
    /// Maximum coats of paint or waterproofing.
    pub const MAX_COATS: u32 = 10;
    /// Maximum tile side in millimeters.
    pub const MAX_TILE_SIDE_MM: f64 = 3_000.0;
    /// Maximum tile wastage percentage (zero allowed).
    pub const MAX_WASTAGE_PERCENTAGE: f64 = 100.0;
    pub const MIN_TILES_PER_BOX: u64 = 1;
    pub const MAX_TILES_PER_BOX: u64 = 1_000;
    /// Maximum surface area handed to a material calculator, in m².
    pub const MAX_MATERIAL_AREA_SQ_M: f64 = 100_000.0;
    /// Maximum concrete volume for steel estimates, in m³.
    pub const MAX_CONCRETE_VOLUME_M3: f64 = 10_000.0;
    /// Maximum reinforcement rate in kg per m³.
    pub const MAX_STEEL_KG_PER_M3: f64 = 500.0;
    /// Maximum paint coverage in m² per liter per coat.
    pub const MAX_PAINT_COVERAGE: f64 = 50.0;
    /// Maximum brick length or height in meters.
    pub const MAX_BRICK_SIDE_M: f64 = 1.0;
    /// Maximum mortar joint in meters (zero allowed).
    pub const MAX_MORTAR_M: f64 = 0.1;
}

/// Error constants for validation failures.
pub mod errmsg {
    pub const NOT_A_NUMBER: &str = "must be a finite number";
    pub const NOT_POSITIVE: &str = "must be greater than 0";
    pub const TOO_LARGE: &str = "exceeds maximum";
    pub const NEGATIVE: &str = "cannot be negative";

    pub const LOCATION_EMPTY: &str = "location cannot be empty";
    pub const LOCATION_TOO_LONG: &str = "location exceeds maximum length";

    pub const AMOUNT_NOT_POSITIVE: &str = "amount must be greater than 0";
    pub const AMOUNT_TOO_SMALL: &str = "amount is below the minimum of ₹1";
    pub const AMOUNT_TOO_LARGE: &str = "amount exceeds maximum";

    pub const FLOORS_OUT_OF_RANGE: &str = "floors must be between 1 and 100";
    pub const COATS_OUT_OF_RANGE: &str = "coats must be between 1 and 10";
    pub const TILES_PER_BOX_OUT_OF_RANGE: &str = "tiles per box must be between 1 and 1000";

    pub const INVALID_TRANSITION: &str = "invalid payment status transition";
}

/// A rejected input. The message is suitable for showing to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Wire form of a validation result: `{"valid": true}` or
/// `{"valid": false, "error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ValidationResult> for ValidationOutcome {
    fn from(result: ValidationResult) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                error: None,
            },
            Err(e) => Self {
                valid: false,
                error: Some(e.message),
            },
        }
    }
}

/// Check `0 < value <= max` for a named field.
fn validate_positive_at_most(field: &str, value: f64, max: f64) -> ValidationResult {
    if !value.is_finite() {
        return Err(ValidationError::new(format!(
            "{} {}",
            field,
            errmsg::NOT_A_NUMBER
        )));
    }
    if value <= 0.0 {
        return Err(ValidationError::new(format!(
            "{} {}",
            field,
            errmsg::NOT_POSITIVE
        )));
    }
    if value > max {
        return Err(ValidationError::new(format!(
            "{} {} (max: {}, got: {})",
            field,
            errmsg::TOO_LARGE,
            max,
            value
        )));
    }
    Ok(())
}

/// Check `0 <= value <= max` for a named field.
fn validate_non_negative_at_most(field: &str, value: f64, max: f64) -> ValidationResult {
    if !value.is_finite() {
        return Err(ValidationError::new(format!(
            "{} {}",
            field,
            errmsg::NOT_A_NUMBER
        )));
    }
    if value < 0.0 {
        return Err(ValidationError::new(format!("{} {}", field, errmsg::NEGATIVE)));
    }
    if value > max {
        return Err(ValidationError::new(format!(
            "{} {} (max: {}, got: {})",
            field,
            errmsg::TOO_LARGE,
            max,
            value
        )));
    }
    Ok(())
}

/// Validate plot dimensions.
///
/// Rules:
/// - length and width greater than 0
/// - both at most 10,000 in either unit
pub fn validate_area_input(length: f64, width: f64, _unit: LengthUnit) -> ValidationResult {
    validate_positive_at_most("length", length, limits::MAX_DIMENSION)?;
    validate_positive_at_most("width", width, limits::MAX_DIMENSION)
}

/// Validate slab thickness: greater than 0, at most 10 m or 33 ft.
pub fn validate_thickness(thickness: f64, unit: LengthUnit) -> ValidationResult {
    let max = match unit {
        LengthUnit::Meters => limits::MAX_THICKNESS_M,
        LengthUnit::Feet => limits::MAX_THICKNESS_FT,
    };
    validate_positive_at_most(&format!("thickness ({})", unit), thickness, max)
}

/// Validate each part of a mix ratio: greater than 0, at most 10.
pub fn validate_mix_ratio(ratio: &MixRatio) -> ValidationResult {
    validate_positive_at_most("cement ratio", ratio.cement, limits::MAX_MIX_RATIO_PART)?;
    validate_positive_at_most("sand ratio", ratio.sand, limits::MAX_MIX_RATIO_PART)?;
    validate_positive_at_most(
        "aggregate ratio",
        ratio.aggregate,
        limits::MAX_MIX_RATIO_PART,
    )
}

/// Validate a budget area in square feet: greater than 0, at most 100,000.
pub fn validate_budget_area(area_sq_ft: f64) -> ValidationResult {
    validate_positive_at_most("area", area_sq_ft, limits::MAX_BUDGET_AREA_SQ_FT)
}

/// Validate a location name.
///
/// Rules:
/// - Must not be empty after trimming
/// - Maximum 100 characters
pub fn validate_location(location: &str) -> ValidationResult {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(errmsg::LOCATION_EMPTY));
    }
    let len = trimmed.chars().count();
    if len > limits::MAX_LOCATION_LENGTH {
        return Err(ValidationError::new(format!(
            "{} (max: {}, got: {})",
            errmsg::LOCATION_TOO_LONG,
            limits::MAX_LOCATION_LENGTH,
            len
        )));
    }
    Ok(())
}

/// Validate a payment amount in minor units (paise).
///
/// Rules:
/// - Greater than 0
/// - At least 100 (₹1)
/// - At most 100,000,000 (₹10 lakh)
pub fn validate_amount(amount: i64) -> ValidationResult {
    if amount <= 0 {
        return Err(ValidationError::new(errmsg::AMOUNT_NOT_POSITIVE));
    }
    if amount < limits::MIN_PAYMENT_AMOUNT {
        return Err(ValidationError::new(format!(
            "{} (min: {}, got: {})",
            errmsg::AMOUNT_TOO_SMALL,
            limits::MIN_PAYMENT_AMOUNT,
            amount
        )));
    }
    if amount > limits::MAX_PAYMENT_AMOUNT {
        return Err(ValidationError::new(format!(
            "{} (max: {}, got: {})",
            errmsg::AMOUNT_TOO_LARGE,
            limits::MAX_PAYMENT_AMOUNT,
            amount
        )));
    }
    Ok(())
}

/// Validate a percentage factor: greater than 0, at most 100.
pub fn validate_percentage(field: &str, percentage: f64) -> ValidationResult {
    validate_positive_at_most(field, percentage, limits::MAX_PERCENTAGE)
}

pub fn validate_floors(floors: u32) -> ValidationResult {
    if !(limits::MIN_FLOORS..=limits::MAX_FLOORS).contains(&floors) {
        return Err(ValidationError::new(format!(
            "{} (got: {})",
            errmsg::FLOORS_OUT_OF_RANGE,
            floors
        )));
    }
    Ok(())
}

/// Validate coat count: 1 to 10.
pub fn validate_coats(coats: u32) -> ValidationResult {
    if coats == 0 || coats > limits::MAX_COATS {
        return Err(ValidationError::new(format!(
            "{} (got: {})",
            errmsg::COATS_OUT_OF_RANGE,
            coats
        )));
    }
    Ok(())
}

/// Validate tile dimensions in millimeters.
pub fn validate_tile_size(length_mm: f64, width_mm: f64) -> ValidationResult {
    validate_positive_at_most("tile length (mm)", length_mm, limits::MAX_TILE_SIDE_MM)?;
    validate_positive_at_most("tile width (mm)", width_mm, limits::MAX_TILE_SIDE_MM)
}

/// Validate tile wastage: 0 to 100 percent.
pub fn validate_wastage(percentage: f64) -> ValidationResult {
    validate_non_negative_at_most(
        "wastage percentage",
        percentage,
        limits::MAX_WASTAGE_PERCENTAGE,
    )
}

pub fn validate_tiles_per_box(tiles_per_box: u64) -> ValidationResult {
    if !(limits::MIN_TILES_PER_BOX..=limits::MAX_TILES_PER_BOX).contains(&tiles_per_box) {
        return Err(ValidationError::new(format!(
            "{} (got: {})",
            errmsg::TILES_PER_BOX_OUT_OF_RANGE,
            tiles_per_box
        )));
    }
    Ok(())
}

/// Validate a surface area in m² handed to a material calculator: greater
/// than 0, at most 100,000.
pub fn validate_material_area(field: &str, area: f64) -> ValidationResult {
    validate_positive_at_most(field, area, limits::MAX_MATERIAL_AREA_SQ_M)
}

/// Validate roof and wet areas for waterproofing.
///
/// Rules:
/// - Each area is at least 0 and at most 100,000 m²
/// - Their sum is greater than 0
pub fn validate_waterproofing_areas(roof_area: f64, bathroom_area: f64) -> ValidationResult {
    validate_non_negative_at_most("roof area", roof_area, limits::MAX_MATERIAL_AREA_SQ_M)?;
    validate_non_negative_at_most(
        "bathroom area",
        bathroom_area,
        limits::MAX_MATERIAL_AREA_SQ_M,
    )?;
    if roof_area + bathroom_area <= 0.0 {
        return Err(ValidationError::new(format!(
            "waterproofing area {}",
            errmsg::NOT_POSITIVE
        )));
    }
    Ok(())
}

/// Validate a concrete volume in m³: greater than 0, at most 10,000.
pub fn validate_concrete_volume(volume: f64) -> ValidationResult {
    validate_positive_at_most("concrete volume", volume, limits::MAX_CONCRETE_VOLUME_M3)
}

/// Validate a reinforcement rate: greater than 0, at most 500 kg/m³.
pub fn validate_steel_rate(kg_per_m3: f64) -> ValidationResult {
    validate_positive_at_most("steel rate", kg_per_m3, limits::MAX_STEEL_KG_PER_M3)
}

/// Validate paint coverage: greater than 0, at most 50 m² per liter.
pub fn validate_paint_coverage(coverage_per_liter: f64) -> ValidationResult {
    validate_positive_at_most(
        "coverage per liter",
        coverage_per_liter,
        limits::MAX_PAINT_COVERAGE,
    )
}

/// Validate brick dimensions.
///
/// Rules:
/// - length and height greater than 0, at most 1 m
/// - mortar joint at least 0, at most 0.1 m
pub fn validate_brick_size(brick: &BrickSize) -> ValidationResult {
    validate_positive_at_most("brick length", brick.length, limits::MAX_BRICK_SIDE_M)?;
    validate_positive_at_most("brick height", brick.height, limits::MAX_BRICK_SIDE_M)?;
    validate_non_negative_at_most("mortar joint", brick.mortar, limits::MAX_MORTAR_M)
}

/// Validate any quantity that must be a finite number greater than 0.
pub fn validate_positive(field: &str, value: f64) -> ValidationResult {
    validate_positive_at_most(field, value, f64::MAX)
}

/// Validate a payment status change against the allow-list.
pub fn validate_status_transition(from: PaymentStatus, to: PaymentStatus) -> ValidationResult {
    if from.can_transition_to(to) {
        return Ok(());
    }
    Err(ValidationError::new(format!(
        "{}: {} → {}",
        errmsg::INVALID_TRANSITION,
        from,
        to
    )))
}
