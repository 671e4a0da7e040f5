//! Budget estimator.
//!
//! Combines an area, a quality grade and a location into a total cost and a
//! per-component breakdown, using a [`CostConstants`] table.
//!
//! # Rounding
//!
//! Cost per square foot is kept to two decimals; the total is rounded to the
//! nearest whole currency unit. Each breakdown line is rounded on its own and
//! the lines are never reconciled against the total, so their sum can differ
//! from `total_cost` by a few units. Consumers rely on these exact figures.

use serde::{Deserialize, Serialize};

use crate::units::{round2, sq_ft_to_sq_m, SQ_FT_PER_SQ_M};

pub use crate::config::cost::{CostComponent, CostConstants, CostConstantsOverride, QualityGrade};

/// What to estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInput {
    pub area_sq_ft: f64,
    pub quality_grade: QualityGrade,
    pub location: String,
}

impl BudgetInput {
    pub fn new(area_sq_ft: f64, quality_grade: QualityGrade, location: impl Into<String>) -> Self {
        Self {
            area_sq_ft,
            quality_grade,
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub foundation: i64,
    pub structure: i64,
    pub finishing: i64,
    pub electrical: i64,
    pub plumbing: i64,
    pub miscellaneous: i64,
}

impl CostBreakdown {
    pub fn get(&self, component: CostComponent) -> i64 {
        match component {
            CostComponent::Foundation => self.foundation,
            CostComponent::Structure => self.structure,
            CostComponent::Finishing => self.finishing,
            CostComponent::Electrical => self.electrical,
            CostComponent::Plumbing => self.plumbing,
            CostComponent::Miscellaneous => self.miscellaneous,
        }
    }

    pub fn total(&self) -> i64 {
        CostComponent::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetArea {
    pub sq_ft: f64,
    pub sq_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub total_cost: i64,
    pub cost_per_sq_ft: f64,
    pub cost_per_sq_m: f64,
    pub breakdown: CostBreakdown,
    pub area: BudgetArea,
    pub quality_grade: QualityGrade,
    pub location: String,
}

/// Estimate the budget for `input` with `constants`.
pub fn estimate_budget(input: &BudgetInput, constants: &CostConstants) -> BudgetResult {
    let base = constants.base_cost_per_sq_ft.get(input.quality_grade);
    let multiplier = constants.location_multiplier(&input.location);

    let cost_per_sq_ft = round2(base * multiplier);
    let total_cost = (input.area_sq_ft * cost_per_sq_ft).round() as i64;

    let component = |c: CostComponent| estimate_component_cost(total_cost, c, constants);
    let breakdown = CostBreakdown {
        foundation: component(CostComponent::Foundation),
        structure: component(CostComponent::Structure),
        finishing: component(CostComponent::Finishing),
        electrical: component(CostComponent::Electrical),
        plumbing: component(CostComponent::Plumbing),
        miscellaneous: component(CostComponent::Miscellaneous),
    };

    BudgetResult {
        total_cost,
        cost_per_sq_ft,
        cost_per_sq_m: round2(cost_per_sq_ft * SQ_FT_PER_SQ_M),
        breakdown,
        area: BudgetArea {
            sq_ft: input.area_sq_ft,
            sq_m: sq_ft_to_sq_m(input.area_sq_ft),
        },
        quality_grade: input.quality_grade,
        location: input.location.clone(),
    }
}

/// Estimate with the default table merged with `overrides`.
pub fn estimate_budget_with_overrides(
    input: &BudgetInput,
    overrides: &CostConstantsOverride,
) -> BudgetResult {
    estimate_budget(input, &CostConstants::default().merged(overrides))
}

/// Share of `total_cost` for one component, rounded to a whole unit.
pub fn estimate_component_cost(
    total_cost: i64,
    component: CostComponent,
    constants: &CostConstants,
) -> i64 {
    let pct = constants.cost_breakdown_percentages.get(component);
    (total_cost as f64 * pct / 100.0).round() as i64
}

/// One estimate per quality grade, basic first.
pub fn compare_quality_grades(
    area_sq_ft: f64,
    location: &str,
    constants: &CostConstants,
) -> Vec<BudgetResult> {
    QualityGrade::ALL
        .iter()
        .map(|grade| estimate_budget(&BudgetInput::new(area_sq_ft, *grade, location), constants))
        .collect()
}
