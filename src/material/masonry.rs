//! Brick counts and reinforcement steel.

use serde::{Deserialize, Serialize};

/// Share of extra bricks ordered for breakage.
pub const BRICK_WASTAGE_FACTOR: f64 = 1.05;

/// Reinforcement steel per cubic meter of concrete when no rate is given.
pub const DEFAULT_STEEL_KG_PER_M3: f64 = 100.0;

/// Brick face dimensions and mortar joint, all in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickSize {
    pub length: f64,
    pub height: f64,
    pub mortar: f64,
}

impl Default for BrickSize {
    /// Standard modular brick laid with a 10 mm joint.
    fn default() -> Self {
        Self {
            length: 0.19,
            height: 0.09,
            mortar: 0.01,
        }
    }
}

impl BrickSize {
    pub fn face_area_with_mortar(&self) -> f64 {
        (self.length + self.mortar) * (self.height + self.mortar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrickResult {
    pub base_count: u64,
    pub total_count: u64,
}

/// Bricks needed for a wall face of `wall_area` m².
///
/// Wastage is applied to the already-rounded base count, then rounded again.
pub fn calculate_bricks(wall_area: f64, brick: &BrickSize) -> BrickResult {
    let base = (wall_area / brick.face_area_with_mortar()).ceil();
    let total = (base * BRICK_WASTAGE_FACTOR).ceil();
    BrickResult {
        base_count: base as u64,
        total_count: total as u64,
    }
}

/// Reinforcement steel in kg for `volume` m³ of concrete.
pub fn calculate_steel(volume: f64, kg_per_m3: Option<f64>) -> u64 {
    let rate = kg_per_m3.unwrap_or(DEFAULT_STEEL_KG_PER_M3);
    (volume * rate).round() as u64
}
