//! Electrical, plumbing and waterproofing estimates.

use serde::{Deserialize, Serialize};

use crate::units::SQ_M_PER_SQ_FT;

/// Square meters served by one light point.
const SQ_M_PER_LIGHT_POINT: f64 = 10.0;
const SQ_M_PER_FAN_POINT: f64 = 12.0;
const SQ_M_PER_SOCKET_POINT: f64 = 8.0;
/// Meters of wire per point.
const WIRING_METERS_PER_POINT: u64 = 25;
/// INR per installed point.
const COST_PER_POINT: u64 = 175;

/// Pipe meters per bathroom and kitchen, per floor.
const CPVC_METERS_PER_BATHROOM: u64 = 15;
const CPVC_METERS_PER_KITCHEN: u64 = 10;
const PVC_METERS_PER_BATHROOM: u64 = 20;
const PVC_METERS_PER_KITCHEN: u64 = 15;
const FITTINGS_PER_PIPE_METER: f64 = 0.3;
const CPVC_COST_PER_METER: u64 = 250;
const PVC_COST_PER_METER: u64 = 100;

/// INR per liter of waterproofing compound.
const WATERPROOFING_COST_PER_LITER: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectricalResult {
    pub light_points: u64,
    pub fan_points: u64,
    pub socket_points: u64,
    pub total_points: u64,
    pub wiring_length_m: u64,
    pub estimated_cost: u64,
}

/// Electrical points for `built_up_sq_ft` per floor across `floors`.
pub fn calculate_electrical(built_up_sq_ft: f64, floors: u32) -> ElectricalResult {
    let total_sq_m = built_up_sq_ft * SQ_M_PER_SQ_FT * f64::from(floors);

    let light_points = (total_sq_m / SQ_M_PER_LIGHT_POINT).ceil() as u64;
    let fan_points = (total_sq_m / SQ_M_PER_FAN_POINT).ceil() as u64;
    let socket_points = (total_sq_m / SQ_M_PER_SOCKET_POINT).ceil() as u64;
    let total_points = light_points + fan_points + socket_points;

    ElectricalResult {
        light_points,
        fan_points,
        socket_points,
        total_points,
        wiring_length_m: total_points * WIRING_METERS_PER_POINT,
        estimated_cost: total_points * COST_PER_POINT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlumbingResult {
    pub cpvc_pipe_m: u64,
    pub pvc_pipe_m: u64,
    pub fittings: u64,
    pub estimated_cost: u64,
}

pub fn calculate_plumbing(bathrooms: u32, kitchens: u32, floors: u32) -> PlumbingResult {
    let bathrooms = u64::from(bathrooms);
    let kitchens = u64::from(kitchens);
    let floors = u64::from(floors);

    let cpvc = (bathrooms * CPVC_METERS_PER_BATHROOM + kitchens * CPVC_METERS_PER_KITCHEN) * floors;
    let pvc = (bathrooms * PVC_METERS_PER_BATHROOM + kitchens * PVC_METERS_PER_KITCHEN) * floors;
    let fittings = ((cpvc + pvc) as f64 * FITTINGS_PER_PIPE_METER).ceil() as u64;

    PlumbingResult {
        cpvc_pipe_m: cpvc,
        pvc_pipe_m: pvc,
        fittings,
        estimated_cost: cpvc * CPVC_COST_PER_METER + pvc * PVC_COST_PER_METER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterproofingResult {
    pub liters: u64,
    pub estimated_cost: u64,
}

/// Waterproofing compound for roof and wet areas, in m², at one liter per
/// square meter per coat.
pub fn calculate_waterproofing(roof_area: f64, bathroom_area: f64, coats: u32) -> WaterproofingResult {
    let liters = ((roof_area + bathroom_area) * f64::from(coats)).ceil() as u64;
    WaterproofingResult {
        liters,
        estimated_cost: liters * WATERPROOFING_COST_PER_LITER,
    }
}
