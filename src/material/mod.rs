//! Material quantity engine.
//!
//! Derives material volumes, counts and rough costs from areas and volumes.
//! Like the area engine, these functions assume validated input.
//!
//! - [`concrete`]: concrete mix volumes and cement bags
//! - [`masonry`]: bricks and reinforcement steel
//! - [`finishing`]: paint, tiles and flooring cost ranges
//! - [`utilities`]: electrical points, plumbing pipe and waterproofing

pub mod concrete;
pub mod finishing;
pub mod masonry;
pub mod utilities;

pub use concrete::{calculate_concrete, MaterialInput, MaterialResult, MixRatio};
pub use finishing::{
    calculate_flooring_cost, calculate_paint, calculate_tiles, FlooringCost, FlooringType,
    PaintInput, PaintResult, TileInput, TileResult,
};
pub use masonry::{calculate_bricks, calculate_steel, BrickSize, BrickResult, DEFAULT_STEEL_KG_PER_M3};
pub use utilities::{
    calculate_electrical, calculate_plumbing, calculate_waterproofing, ElectricalResult,
    PlumbingResult, WaterproofingResult,
};
