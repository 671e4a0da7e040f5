//! Paint, tiles and flooring.

use serde::{Deserialize, Serialize};

use crate::units::sq_m_to_sq_ft;

/// Liters per paint tin.
pub const PAINT_TIN_LITERS: f64 = 20.0;
pub const DEFAULT_PAINT_COATS: u32 = 2;
/// Square meters covered by one liter for one coat.
pub const DEFAULT_PAINT_COVERAGE: f64 = 10.0;

pub const DEFAULT_TILE_WASTAGE_PERCENTAGE: f64 = 10.0;
pub const DEFAULT_TILES_PER_BOX: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintInput {
    /// Paintable surface in m².
    pub area: f64,
    #[serde(default = "default_coats")]
    pub coats: u32,
    #[serde(default = "default_coverage")]
    pub coverage_per_liter: f64,
}

fn default_coats() -> u32 {
    DEFAULT_PAINT_COATS
}

fn default_coverage() -> f64 {
    DEFAULT_PAINT_COVERAGE
}

impl PaintInput {
    pub fn new(area: f64) -> Self {
        Self {
            area,
            coats: DEFAULT_PAINT_COATS,
            coverage_per_liter: DEFAULT_PAINT_COVERAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintResult {
    pub liters: u64,
    pub tins: u64,
}

pub fn calculate_paint(input: &PaintInput) -> PaintResult {
    let liters = (input.area * f64::from(input.coats) / input.coverage_per_liter).ceil();
    let tins = (liters / PAINT_TIN_LITERS).ceil();
    PaintResult {
        liters: liters as u64,
        tins: tins as u64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileInput {
    /// Floor or wall area in m².
    pub area: f64,
    pub tile_length_mm: f64,
    pub tile_width_mm: f64,
    #[serde(default = "default_tile_wastage")]
    pub wastage_percentage: f64,
    #[serde(default = "default_tiles_per_box")]
    pub tiles_per_box: u64,
}

fn default_tile_wastage() -> f64 {
    DEFAULT_TILE_WASTAGE_PERCENTAGE
}

fn default_tiles_per_box() -> u64 {
    DEFAULT_TILES_PER_BOX
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileResult {
    pub base_tiles: u64,
    pub wastage_tiles: u64,
    pub total_tiles: u64,
    pub boxes: u64,
}

pub fn calculate_tiles(input: &TileInput) -> TileResult {
    let tile_sq_m = (input.tile_length_mm / 1000.0) * (input.tile_width_mm / 1000.0);
    let base = (input.area / tile_sq_m).ceil();
    let wastage = (base * input.wastage_percentage / 100.0).ceil();
    let total = base + wastage;
    let boxes = (total / input.tiles_per_box as f64).ceil();
    TileResult {
        base_tiles: base as u64,
        wastage_tiles: wastage as u64,
        total_tiles: total as u64,
        boxes: boxes as u64,
    }
}

/// Flooring finish, priced per square foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlooringType {
    Vitrified,
    Marble,
    Granite,
    Wooden,
    Ceramic,
}

impl FlooringType {
    pub const ALL: [FlooringType; 5] = [
        FlooringType::Vitrified,
        FlooringType::Marble,
        FlooringType::Granite,
        FlooringType::Wooden,
        FlooringType::Ceramic,
    ];

    /// (min, max) installed rate in INR per square foot.
    pub fn rate_per_sq_ft(&self) -> (f64, f64) {
        match self {
            FlooringType::Vitrified => (50.0, 120.0),
            FlooringType::Marble => (100.0, 400.0),
            FlooringType::Granite => (80.0, 250.0),
            FlooringType::Wooden => (150.0, 500.0),
            FlooringType::Ceramic => (30.0, 80.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlooringCost {
    pub flooring_type: FlooringType,
    pub area_sq_ft: f64,
    pub min_cost: f64,
    pub max_cost: f64,
}

pub fn calculate_flooring_cost(area_sq_m: f64, flooring_type: FlooringType) -> FlooringCost {
    let area_sq_ft = sq_m_to_sq_ft(area_sq_m);
    let (min_rate, max_rate) = flooring_type.rate_per_sq_ft();
    FlooringCost {
        flooring_type,
        area_sq_ft,
        min_cost: area_sq_ft * min_rate,
        max_cost: area_sq_ft * max_rate,
    }
}
