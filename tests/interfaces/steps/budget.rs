//! Budget estimator step definitions.

use buildmart::budget::{BudgetInput, BudgetResult, CostComponent, CostConstants, QualityGrade};
use buildmart::config::cost::CostConstantsOverride;
use buildmart::services::{CalculatorService, ServiceError};
use cucumber::{given, then, when, World};

/// Test context for budget scenarios.
#[derive(Debug, Default, World)]
pub struct BudgetWorld {
    overrides: CostConstantsOverride,
    last_result: Option<BudgetResult>,
    last_comparison: Vec<BudgetResult>,
    last_error: Option<String>,
}

impl BudgetWorld {
    fn service(&self) -> CalculatorService {
        CalculatorService::new(CostConstants::default().merged(&self.overrides))
    }

    fn result(&self) -> &BudgetResult {
        self.last_result.as_ref().expect("No estimate was made")
    }

    fn grade(&self, grade: QualityGrade) -> &BudgetResult {
        self.last_comparison
            .iter()
            .find(|r| r.quality_grade == grade)
            .expect("Grade missing from comparison")
    }
}

fn parse_grade(grade: &str) -> QualityGrade {
    serde_json::from_value(serde_json::Value::String(grade.to_string()))
        .expect("Unknown quality grade")
}

fn parse_component(component: &str) -> CostComponent {
    CostComponent::ALL
        .into_iter()
        .find(|c| format!("{:?}", c).eq_ignore_ascii_case(component))
        .expect("Unknown cost component")
}

// --- Given steps ---

#[given("the default cost table")]
async fn given_default_table(world: &mut BudgetWorld) {
    world.overrides = CostConstantsOverride::default();
}

#[given(expr = "the {string} base cost is overridden to {float}")]
async fn given_base_cost_override(world: &mut BudgetWorld, grade: String, cost: f64) {
    let base = &mut world.overrides.base_cost_per_sq_ft;
    match parse_grade(&grade) {
        QualityGrade::Basic => base.basic = Some(cost),
        QualityGrade::Standard => base.standard = Some(cost),
        QualityGrade::Premium => base.premium = Some(cost),
    }
}

// --- When steps ---

#[when(expr = "I estimate {float} sq ft of {string} quality in {string}")]
async fn when_estimate(world: &mut BudgetWorld, area: f64, grade: String, location: String) {
    let input = BudgetInput::new(area, parse_grade(&grade), location);
    match world.service().budget(&input) {
        Ok(result) => {
            world.last_result = Some(result);
            world.last_error = None;
        }
        Err(ServiceError::Validation(e)) => {
            world.last_result = None;
            world.last_error = Some(e.message().to_string());
        }
        Err(e) => panic!("Unexpected error: {}", e),
    }
}

#[when(expr = "I compare quality grades for {float} sq ft in {string}")]
async fn when_compare(world: &mut BudgetWorld, area: f64, location: String) {
    world.last_comparison = world
        .service()
        .compare_grades(area, &location)
        .expect("Comparison should succeed");
}

// --- Then steps ---

#[then(expr = "the cost per sq ft is {float}")]
async fn then_cost_per_sq_ft(world: &mut BudgetWorld, expected: f64) {
    assert_eq!(world.result().cost_per_sq_ft, expected);
}

#[then(expr = "the cost per sq m is {float}")]
async fn then_cost_per_sq_m(world: &mut BudgetWorld, expected: f64) {
    assert_eq!(world.result().cost_per_sq_m, expected);
}

#[then(expr = "the total cost is {int}")]
async fn then_total_cost(world: &mut BudgetWorld, expected: i64) {
    assert_eq!(world.result().total_cost, expected);
}

#[then(expr = "the {string} share is {int}")]
async fn then_component_share(world: &mut BudgetWorld, component: String, expected: i64) {
    let component = parse_component(&component);
    assert_eq!(world.result().breakdown.get(component), expected);
}

#[then("premium costs more than standard")]
async fn then_premium_over_standard(world: &mut BudgetWorld) {
    assert!(
        world.grade(QualityGrade::Premium).total_cost
            > world.grade(QualityGrade::Standard).total_cost
    );
}

#[then("standard costs more than basic")]
async fn then_standard_over_basic(world: &mut BudgetWorld) {
    assert!(
        world.grade(QualityGrade::Standard).total_cost > world.grade(QualityGrade::Basic).total_cost
    );
}

#[then("the breakdown is within 1 percent of the total")]
async fn then_breakdown_close(world: &mut BudgetWorld) {
    let result = world.result();
    let drift = (result.breakdown.total() - result.total_cost).abs() as f64;
    assert!(
        drift <= result.total_cost as f64 * 0.01,
        "Breakdown drift {} too large",
        drift
    );
}

#[then(expr = "the estimate is rejected mentioning {string}")]
async fn then_rejected(world: &mut BudgetWorld, fragment: String) {
    let error = world.last_error.as_ref().expect("Expected a rejection");
    assert!(
        error.contains(&fragment),
        "Error '{}' should mention '{}'",
        error,
        fragment
    );
}
