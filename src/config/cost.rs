//! Cost constants used by the budget estimator.
//!
//! A default table ships with the crate ([`DEFAULT_COST_CONSTANTS`]). Callers
//! override parts of it with a [`CostConstantsOverride`], typically loaded from
//! configuration or an admin document. Each section merges independently:
//! overriding one base rate or adding one city keeps every unspecified key.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Key of the fallback entry in the location multiplier table.
pub const DEFAULT_LOCATION: &str = "default";

/// Multiplier used when neither the location nor `"default"` is in the table.
pub const FALLBACK_LOCATION_MULTIPLIER: f64 = 1.0;

/// Default cost table (INR per square foot).
pub static DEFAULT_COST_CONSTANTS: LazyLock<CostConstants> = LazyLock::new(|| CostConstants {
    base_cost_per_sq_ft: BaseCostPerSqFt {
        basic: 1500.0,
        standard: 2000.0,
        premium: 3000.0,
    },
    location_multipliers: [
        ("mumbai", 1.5),
        ("delhi", 1.3),
        ("bangalore", 1.25),
        ("pune", 1.2),
        ("chennai", 1.15),
        ("hyderabad", 1.1),
        ("kolkata", 1.05),
        (DEFAULT_LOCATION, 1.0),
    ]
    .into_iter()
    .map(|(city, multiplier)| (city.to_string(), multiplier))
    .collect(),
    cost_breakdown_percentages: CostBreakdownPercentages {
        foundation: 15.0,
        structure: 35.0,
        finishing: 25.0,
        electrical: 10.0,
        plumbing: 8.0,
        miscellaneous: 7.0,
    },
});

/// Construction quality grade, driving the base cost per square foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Basic,
    Standard,
    Premium,
}

impl QualityGrade {
    pub const ALL: [QualityGrade; 3] = [
        QualityGrade::Basic,
        QualityGrade::Standard,
        QualityGrade::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::Basic => "basic",
            QualityGrade::Standard => "standard",
            QualityGrade::Premium => "premium",
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget line item, one per breakdown percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostComponent {
    Foundation,
    Structure,
    Finishing,
    Electrical,
    Plumbing,
    Miscellaneous,
}

impl CostComponent {
    pub const ALL: [CostComponent; 6] = [
        CostComponent::Foundation,
        CostComponent::Structure,
        CostComponent::Finishing,
        CostComponent::Electrical,
        CostComponent::Plumbing,
        CostComponent::Miscellaneous,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseCostPerSqFt {
    pub basic: f64,
    pub standard: f64,
    pub premium: f64,
}

impl BaseCostPerSqFt {
    pub fn get(&self, grade: QualityGrade) -> f64 {
        match grade {
            QualityGrade::Basic => self.basic,
            QualityGrade::Standard => self.standard,
            QualityGrade::Premium => self.premium,
        }
    }
}

/// Share of the total cost per component, in percent.
///
/// The shares are expected to add up to 100. Nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownPercentages {
    pub foundation: f64,
    pub structure: f64,
    pub finishing: f64,
    pub electrical: f64,
    pub plumbing: f64,
    pub miscellaneous: f64,
}

impl CostBreakdownPercentages {
    pub fn get(&self, component: CostComponent) -> f64 {
        match component {
            CostComponent::Foundation => self.foundation,
            CostComponent::Structure => self.structure,
            CostComponent::Finishing => self.finishing,
            CostComponent::Electrical => self.electrical,
            CostComponent::Plumbing => self.plumbing,
            CostComponent::Miscellaneous => self.miscellaneous,
        }
    }

    pub fn total(&self) -> f64 {
        CostComponent::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Complete cost table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostConstants {
    pub base_cost_per_sq_ft: BaseCostPerSqFt,
    /// Keyed by normalized location (trimmed, lowercase).
    pub location_multipliers: BTreeMap<String, f64>,
    pub cost_breakdown_percentages: CostBreakdownPercentages,
}

impl Default for CostConstants {
    fn default() -> Self {
        DEFAULT_COST_CONSTANTS.clone()
    }
}

impl CostConstants {
    /// Return a copy of `self` with `overrides` applied section by section.
    pub fn merged(&self, overrides: &CostConstantsOverride) -> Self {
        let mut merged = self.clone();

        let base = &overrides.base_cost_per_sq_ft;
        merged.base_cost_per_sq_ft = BaseCostPerSqFt {
            basic: base.basic.unwrap_or(self.base_cost_per_sq_ft.basic),
            standard: base.standard.unwrap_or(self.base_cost_per_sq_ft.standard),
            premium: base.premium.unwrap_or(self.base_cost_per_sq_ft.premium),
        };

        for (location, multiplier) in &overrides.location_multipliers {
            merged
                .location_multipliers
                .insert(normalize_location(location), *multiplier);
        }

        let pct = &overrides.cost_breakdown_percentages;
        let current = &self.cost_breakdown_percentages;
        merged.cost_breakdown_percentages = CostBreakdownPercentages {
            foundation: pct.foundation.unwrap_or(current.foundation),
            structure: pct.structure.unwrap_or(current.structure),
            finishing: pct.finishing.unwrap_or(current.finishing),
            electrical: pct.electrical.unwrap_or(current.electrical),
            plumbing: pct.plumbing.unwrap_or(current.plumbing),
            miscellaneous: pct.miscellaneous.unwrap_or(current.miscellaneous),
        };

        merged
    }

    /// Multiplier for `location`, falling back to the `"default"` entry and
    /// then to 1.0.
    pub fn location_multiplier(&self, location: &str) -> f64 {
        self.location_multipliers
            .get(&normalize_location(location))
            .or_else(|| self.location_multipliers.get(DEFAULT_LOCATION))
            .copied()
            .unwrap_or(FALLBACK_LOCATION_MULTIPLIER)
    }
}

/// Trim and lowercase a location for table lookups.
pub fn normalize_location(location: &str) -> String {
    location.trim().to_lowercase()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseCostOverride {
    pub basic: Option<f64>,
    pub standard: Option<f64>,
    pub premium: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownOverride {
    pub foundation: Option<f64>,
    pub structure: Option<f64>,
    pub finishing: Option<f64>,
    pub electrical: Option<f64>,
    pub plumbing: Option<f64>,
    pub miscellaneous: Option<f64>,
}

/// Partial cost table. Absent keys keep their current value on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostConstantsOverride {
    // Snake-case aliases cover keys arriving through environment variables.
    #[serde(alias = "base_cost_per_sq_ft")]
    pub base_cost_per_sq_ft: BaseCostOverride,
    #[serde(alias = "location_multipliers")]
    pub location_multipliers: BTreeMap<String, f64>,
    #[serde(alias = "cost_breakdown_percentages")]
    pub cost_breakdown_percentages: BreakdownOverride,
}

impl CostConstantsOverride {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
