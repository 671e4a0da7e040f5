//! Concrete mix quantities.

use serde::{Deserialize, Serialize};

use crate::units::{cu_m_to_cu_ft, LengthUnit};

/// Wet (poured) to dry (loose) volume factor.
pub const DRY_VOLUME_MULTIPLIER: f64 = 1.54;

/// Cement bulk density in kg/m³.
pub const CEMENT_DENSITY_KG_PER_M3: f64 = 1440.0;

/// Weight of one cement bag in kg.
pub const CEMENT_BAG_KG: f64 = 50.0;

/// Relative parts of cement, sand and aggregate. Only the proportions matter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixRatio {
    pub cement: f64,
    pub sand: f64,
    pub aggregate: f64,
}

impl MixRatio {
    pub fn new(cement: f64, sand: f64, aggregate: f64) -> Self {
        Self {
            cement,
            sand,
            aggregate,
        }
    }

    pub fn total_parts(&self) -> f64 {
        self.cement + self.sand + self.aggregate
    }
}

impl Default for MixRatio {
    /// M15 nominal mix, 1:2:4.
    fn default() -> Self {
        Self::new(1.0, 2.0, 4.0)
    }
}

/// Slab or footing to be poured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialInput {
    /// Plan area in square meters.
    pub area: f64,
    /// Thickness in `unit`.
    pub thickness: f64,
    #[serde(default)]
    pub mix_ratio: MixRatio,
    #[serde(default)]
    pub unit: LengthUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResult {
    pub wet_volume: f64,
    pub dry_volume: f64,
    pub cement_volume: f64,
    pub sand_volume: f64,
    pub aggregate_volume: f64,
    pub cement_weight_kg: f64,
    pub cement_bags: u64,
    pub sand_cubic_feet: f64,
    pub aggregate_cubic_feet: f64,
}

pub fn calculate_concrete(input: &MaterialInput) -> MaterialResult {
    let thickness_m = input.unit.to_meters(input.thickness);
    let wet_volume = input.area * thickness_m;
    let dry_volume = wet_volume * DRY_VOLUME_MULTIPLIER;

    let total_parts = input.mix_ratio.total_parts();
    let share = |part: f64| dry_volume * part / total_parts;

    let cement_volume = share(input.mix_ratio.cement);
    let sand_volume = share(input.mix_ratio.sand);
    let aggregate_volume = share(input.mix_ratio.aggregate);

    let cement_weight_kg = cement_volume * CEMENT_DENSITY_KG_PER_M3;
    let cement_bags = (cement_weight_kg / CEMENT_BAG_KG).ceil() as u64;

    MaterialResult {
        wet_volume,
        dry_volume,
        cement_volume,
        sand_volume,
        aggregate_volume,
        cement_weight_kg,
        cement_bags,
        sand_cubic_feet: cu_m_to_cu_ft(sand_volume),
        aggregate_cubic_feet: cu_m_to_cu_ft(aggregate_volume),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab(area: f64, thickness: f64, unit: LengthUnit) -> MaterialInput {
        MaterialInput {
            area,
            thickness,
            mix_ratio: MixRatio::default(),
            unit,
        }
    }

    #[test]
    fn test_volumes_in_meters() {
        let result = calculate_concrete(&slab(100.0, 0.1, LengthUnit::Meters));
        assert!((result.wet_volume - 10.0).abs() < 1e-9);
        assert!((result.dry_volume - 15.4).abs() < 1e-9);
        assert!((result.cement_volume - 2.2).abs() < 1e-9);
        assert!((result.sand_volume - 4.4).abs() < 1e-9);
        assert!((result.aggregate_volume - 8.8).abs() < 1e-9);
    }

    #[test]
    fn test_cement_bags_round_up() {
        // 2.2 m³ × 1440 = 3168 kg → 63.36 bags
        let result = calculate_concrete(&slab(100.0, 0.1, LengthUnit::Meters));
        assert!((result.cement_weight_kg - 3168.0).abs() < 1e-6);
        assert_eq!(result.cement_bags, 64);
    }

    #[test]
    fn test_thickness_in_feet() {
        let metric = calculate_concrete(&slab(10.0, 0.3048, LengthUnit::Meters));
        let imperial = calculate_concrete(&slab(10.0, 1.0, LengthUnit::Feet));
        assert!((metric.wet_volume - imperial.wet_volume).abs() < 1e-12);
    }

    #[test]
    fn test_volumes_split_by_ratio() {
        let result = calculate_concrete(&slab(50.0, 0.15, LengthUnit::Meters));
        let total = result.cement_volume + result.sand_volume + result.aggregate_volume;
        assert!((total - result.dry_volume).abs() < 1e-9);
        assert!((result.sand_volume - 2.0 * result.cement_volume).abs() < 1e-9);
    }

    #[test]
    fn test_cubic_feet() {
        let result = calculate_concrete(&slab(100.0, 0.1, LengthUnit::Meters));
        assert!((result.sand_cubic_feet - result.sand_volume * 35.3147).abs() < 1e-9);
        assert!((result.aggregate_cubic_feet - result.aggregate_volume * 35.3147).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_need_not_sum_to_anything() {
        let input = MaterialInput {
            mix_ratio: MixRatio::new(2.0, 4.0, 8.0),
            ..slab(100.0, 0.1, LengthUnit::Meters)
        };
        let doubled = calculate_concrete(&input);
        let nominal = calculate_concrete(&slab(100.0, 0.1, LengthUnit::Meters));
        assert!((doubled.cement_volume - nominal.cement_volume).abs() < 1e-9);
    }

    #[test]
    fn test_input_json_shape() {
        let input: MaterialInput = serde_json::from_str(
            r#"{"area": 20, "thickness": 0.5, "mixRatio": {"cement": 1, "sand": 1.5, "aggregate": 3}, "unit": "ft"}"#,
        )
        .unwrap();
        assert_eq!(input.unit, LengthUnit::Feet);
        assert_eq!(input.mix_ratio.sand, 1.5);
    }
}
