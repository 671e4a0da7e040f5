//! Validated entry point to the calculation engines.
//!
//! Each method runs the relevant validators, converts a rejection into
//! [`ServiceError::Validation`], and only then calls the engine. Successful
//! calls emit a `CALCULATOR_USED` event when a tracker is attached.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::analytics::{AnalyticsEventPayload, AnalyticsTracker, EventKind};
use crate::area::{
    calculate_built_up_area, calculate_carpet_area, calculate_multi_floor_area,
    calculate_plot_area, AreaInput, AreaResult, DEFAULT_BUILT_UP_PERCENTAGE,
    DEFAULT_CARPET_PERCENTAGE,
};
use crate::budget::{
    compare_quality_grades, estimate_budget, BudgetInput, BudgetResult, CostConstants,
    CostConstantsOverride,
};
use crate::config::Config;
use crate::material::{
    calculate_bricks, calculate_concrete, calculate_electrical, calculate_flooring_cost,
    calculate_paint, calculate_plumbing, calculate_steel, calculate_tiles,
    calculate_waterproofing, BrickResult, BrickSize, ElectricalResult, FlooringCost,
    FlooringType, MaterialInput, MaterialResult, PaintInput, PaintResult, PlumbingResult,
    TileInput, TileResult, WaterproofingResult,
};
use crate::validation::{
    validate_area_input, validate_brick_size, validate_budget_area, validate_coats,
    validate_concrete_volume, validate_floors, validate_location, validate_material_area,
    validate_mix_ratio, validate_paint_coverage, validate_percentage, validate_positive,
    validate_steel_rate, validate_thickness, validate_tile_size, validate_tiles_per_box,
    validate_wastage, validate_waterproofing_areas, ValidationError, ValidationResult,
};

use super::ServiceError;

// ============================================================================
// Requests
// ============================================================================

/// A calculation request, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationRequest {
    PlotArea(AreaInput),
    #[serde(rename_all = "camelCase")]
    BuiltUpArea {
        plot_area: f64,
        #[serde(default)]
        percentage: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    CarpetArea {
        built_up_area: f64,
        #[serde(default)]
        percentage: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    MultiFloorArea { floor_area: f64, floors: u32 },
    Concrete(MaterialInput),
    #[serde(rename_all = "camelCase")]
    Bricks {
        wall_area: f64,
        #[serde(default)]
        brick: BrickSize,
    },
    #[serde(rename_all = "camelCase")]
    Steel {
        volume: f64,
        #[serde(default)]
        kg_per_m3: Option<f64>,
    },
    Paint(PaintInput),
    Tiles(TileInput),
    #[serde(rename_all = "camelCase")]
    Flooring {
        area_sq_m: f64,
        flooring_type: FlooringType,
    },
    #[serde(rename_all = "camelCase")]
    Electrical { built_up_sq_ft: f64, floors: u32 },
    #[serde(rename_all = "camelCase")]
    Plumbing {
        bathrooms: u32,
        kitchens: u32,
        floors: u32,
    },
    #[serde(rename_all = "camelCase")]
    Waterproofing {
        roof_area: f64,
        bathroom_area: f64,
        coats: u32,
    },
    Budget(BudgetInput),
    #[serde(rename_all = "camelCase")]
    CompareGrades { area_sq_ft: f64, location: String },
}

impl CalculationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationRequest::PlotArea(_) => "plot_area",
            CalculationRequest::BuiltUpArea { .. } => "built_up_area",
            CalculationRequest::CarpetArea { .. } => "carpet_area",
            CalculationRequest::MultiFloorArea { .. } => "multi_floor_area",
            CalculationRequest::Concrete(_) => "concrete",
            CalculationRequest::Bricks { .. } => "bricks",
            CalculationRequest::Steel { .. } => "steel",
            CalculationRequest::Paint(_) => "paint",
            CalculationRequest::Tiles(_) => "tiles",
            CalculationRequest::Flooring { .. } => "flooring",
            CalculationRequest::Electrical { .. } => "electrical",
            CalculationRequest::Plumbing { .. } => "plumbing",
            CalculationRequest::Waterproofing { .. } => "waterproofing",
            CalculationRequest::Budget(_) => "budget",
            CalculationRequest::CompareGrades { .. } => "compare_grades",
        }
    }
}

// ============================================================================
// Service
// ============================================================================

#[derive(Clone, Default)]
pub struct CalculatorService {
    constants: CostConstants,
    tracker: Option<AnalyticsTracker>,
}

impl CalculatorService {
    pub fn new(constants: CostConstants) -> Self {
        Self {
            constants,
            tracker: None,
        }
    }

    /// Service priced with the configured cost table.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cost_constants())
    }

    pub fn with_tracker(mut self, tracker: AnalyticsTracker) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn constants(&self) -> &CostConstants {
        &self.constants
    }

    fn check(&self, calculator: &'static str, result: ValidationResult) -> Result<(), ServiceError> {
        result.map_err(|e: ValidationError| {
            debug!(calculator, error = %e, "Rejected calculator input");
            ServiceError::Validation(e)
        })
    }

    fn record_use(&self, calculator: &'static str) {
        if let Some(tracker) = &self.tracker {
            // Handle dropped: fire-and-forget.
            let _ = tracker.track(
                AnalyticsEventPayload::new(EventKind::CalculatorUsed)
                    .with_metadata("calculator", calculator),
            );
        }
    }

    // ------------------------------------------------------------------------
    // Area
    // ------------------------------------------------------------------------

    pub fn plot_area(&self, input: &AreaInput) -> Result<AreaResult, ServiceError> {
        self.check(
            "plot_area",
            validate_area_input(input.length, input.width, input.unit),
        )?;
        self.record_use("plot_area");
        Ok(calculate_plot_area(input))
    }

    /// Built-up area; `percentage` defaults to 70.
    pub fn built_up_area(&self, plot_area: f64, percentage: Option<f64>) -> Result<f64, ServiceError> {
        let percentage = percentage.unwrap_or(DEFAULT_BUILT_UP_PERCENTAGE);
        self.check("built_up_area", validate_positive("plot area", plot_area))?;
        self.check(
            "built_up_area",
            validate_percentage("built-up percentage", percentage),
        )?;
        self.record_use("built_up_area");
        Ok(calculate_built_up_area(plot_area, percentage))
    }

    /// Carpet area; `percentage` defaults to 75.
    pub fn carpet_area(&self, built_up_area: f64, percentage: Option<f64>) -> Result<f64, ServiceError> {
        let percentage = percentage.unwrap_or(DEFAULT_CARPET_PERCENTAGE);
        self.check("carpet_area", validate_positive("built-up area", built_up_area))?;
        self.check(
            "carpet_area",
            validate_percentage("carpet percentage", percentage),
        )?;
        self.record_use("carpet_area");
        Ok(calculate_carpet_area(built_up_area, percentage))
    }

    pub fn multi_floor_area(&self, floor_area: f64, floors: u32) -> Result<f64, ServiceError> {
        self.check("multi_floor_area", validate_positive("floor area", floor_area))?;
        self.check("multi_floor_area", validate_floors(floors))?;
        self.record_use("multi_floor_area");
        Ok(calculate_multi_floor_area(floor_area, floors))
    }

    // ------------------------------------------------------------------------
    // Materials
    // ------------------------------------------------------------------------

    pub fn concrete(&self, input: &MaterialInput) -> Result<MaterialResult, ServiceError> {
        self.check("concrete", validate_material_area("area", input.area))?;
        self.check("concrete", validate_thickness(input.thickness, input.unit))?;
        self.check("concrete", validate_mix_ratio(&input.mix_ratio))?;
        self.record_use("concrete");
        Ok(calculate_concrete(input))
    }

    pub fn bricks(&self, wall_area: f64, brick: &BrickSize) -> Result<BrickResult, ServiceError> {
        self.check("bricks", validate_material_area("wall area", wall_area))?;
        self.check("bricks", validate_brick_size(brick))?;
        self.record_use("bricks");
        Ok(calculate_bricks(wall_area, brick))
    }

    /// Steel in kg; the rate defaults to 100 kg/m³.
    pub fn steel(&self, volume: f64, kg_per_m3: Option<f64>) -> Result<u64, ServiceError> {
        self.check("steel", validate_concrete_volume(volume))?;
        if let Some(rate) = kg_per_m3 {
            self.check("steel", validate_steel_rate(rate))?;
        }
        self.record_use("steel");
        Ok(calculate_steel(volume, kg_per_m3))
    }

    pub fn paint(&self, input: &PaintInput) -> Result<PaintResult, ServiceError> {
        self.check("paint", validate_material_area("paint area", input.area))?;
        self.check("paint", validate_coats(input.coats))?;
        self.check("paint", validate_paint_coverage(input.coverage_per_liter))?;
        self.record_use("paint");
        Ok(calculate_paint(input))
    }

    pub fn tiles(&self, input: &TileInput) -> Result<TileResult, ServiceError> {
        self.check("tiles", validate_material_area("tile area", input.area))?;
        self.check(
            "tiles",
            validate_tile_size(input.tile_length_mm, input.tile_width_mm),
        )?;
        self.check("tiles", validate_wastage(input.wastage_percentage))?;
        self.check("tiles", validate_tiles_per_box(input.tiles_per_box))?;
        self.record_use("tiles");
        Ok(calculate_tiles(input))
    }

    pub fn flooring(
        &self,
        area_sq_m: f64,
        flooring_type: FlooringType,
    ) -> Result<FlooringCost, ServiceError> {
        self.check("flooring", validate_material_area("flooring area", area_sq_m))?;
        self.record_use("flooring");
        Ok(calculate_flooring_cost(area_sq_m, flooring_type))
    }

    pub fn electrical(&self, built_up_sq_ft: f64, floors: u32) -> Result<ElectricalResult, ServiceError> {
        self.check("electrical", validate_budget_area(built_up_sq_ft))?;
        self.check("electrical", validate_floors(floors))?;
        self.record_use("electrical");
        Ok(calculate_electrical(built_up_sq_ft, floors))
    }

    pub fn plumbing(
        &self,
        bathrooms: u32,
        kitchens: u32,
        floors: u32,
    ) -> Result<PlumbingResult, ServiceError> {
        self.check("plumbing", validate_floors(floors))?;
        self.record_use("plumbing");
        Ok(calculate_plumbing(bathrooms, kitchens, floors))
    }

    pub fn waterproofing(
        &self,
        roof_area: f64,
        bathroom_area: f64,
        coats: u32,
    ) -> Result<WaterproofingResult, ServiceError> {
        self.check(
            "waterproofing",
            validate_waterproofing_areas(roof_area, bathroom_area),
        )?;
        self.check("waterproofing", validate_coats(coats))?;
        self.record_use("waterproofing");
        Ok(calculate_waterproofing(roof_area, bathroom_area, coats))
    }

    // ------------------------------------------------------------------------
    // Budget
    // ------------------------------------------------------------------------

    pub fn budget(&self, input: &BudgetInput) -> Result<BudgetResult, ServiceError> {
        self.validate_budget_input(input.area_sq_ft, &input.location)?;
        self.record_use("budget");
        Ok(estimate_budget(input, &self.constants))
    }

    /// Budget priced with this service's table merged with `overrides`.
    pub fn budget_with_overrides(
        &self,
        input: &BudgetInput,
        overrides: &CostConstantsOverride,
    ) -> Result<BudgetResult, ServiceError> {
        self.validate_budget_input(input.area_sq_ft, &input.location)?;
        self.record_use("budget");
        Ok(estimate_budget(input, &self.constants.merged(overrides)))
    }

    pub fn compare_grades(
        &self,
        area_sq_ft: f64,
        location: &str,
    ) -> Result<Vec<BudgetResult>, ServiceError> {
        self.validate_budget_input(area_sq_ft, location)?;
        self.record_use("compare_grades");
        Ok(compare_quality_grades(area_sq_ft, location, &self.constants))
    }

    fn validate_budget_input(&self, area_sq_ft: f64, location: &str) -> Result<(), ServiceError> {
        self.check("budget", validate_budget_area(area_sq_ft))?;
        self.check("budget", validate_location(location))
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Run any request and return its result as JSON.
    pub fn run(&self, request: &CalculationRequest) -> Result<Value, ServiceError> {
        let value = match request {
            CalculationRequest::PlotArea(input) => serde_json::to_value(self.plot_area(input)?)?,
            CalculationRequest::BuiltUpArea {
                plot_area,
                percentage,
            } => serde_json::to_value(self.built_up_area(*plot_area, *percentage)?)?,
            CalculationRequest::CarpetArea {
                built_up_area,
                percentage,
            } => serde_json::to_value(self.carpet_area(*built_up_area, *percentage)?)?,
            CalculationRequest::MultiFloorArea { floor_area, floors } => {
                serde_json::to_value(self.multi_floor_area(*floor_area, *floors)?)?
            }
            CalculationRequest::Concrete(input) => serde_json::to_value(self.concrete(input)?)?,
            CalculationRequest::Bricks { wall_area, brick } => {
                serde_json::to_value(self.bricks(*wall_area, brick)?)?
            }
            CalculationRequest::Steel { volume, kg_per_m3 } => {
                serde_json::to_value(self.steel(*volume, *kg_per_m3)?)?
            }
            CalculationRequest::Paint(input) => serde_json::to_value(self.paint(input)?)?,
            CalculationRequest::Tiles(input) => serde_json::to_value(self.tiles(input)?)?,
            CalculationRequest::Flooring {
                area_sq_m,
                flooring_type,
            } => serde_json::to_value(self.flooring(*area_sq_m, *flooring_type)?)?,
            CalculationRequest::Electrical {
                built_up_sq_ft,
                floors,
            } => serde_json::to_value(self.electrical(*built_up_sq_ft, *floors)?)?,
            CalculationRequest::Plumbing {
                bathrooms,
                kitchens,
                floors,
            } => serde_json::to_value(self.plumbing(*bathrooms, *kitchens, *floors)?)?,
            CalculationRequest::Waterproofing {
                roof_area,
                bathroom_area,
                coats,
            } => serde_json::to_value(self.waterproofing(*roof_area, *bathroom_area, *coats)?)?,
            CalculationRequest::Budget(input) => serde_json::to_value(self.budget(input)?)?,
            CalculationRequest::CompareGrades {
                area_sq_ft,
                location,
            } => serde_json::to_value(self.compare_grades(*area_sq_ft, location)?)?,
        };
        Ok(value)
    }
}
