//! Interface tests for the calculators and the analytics store using Cucumber.
//!
//! ```bash
//! cargo test --test interfaces
//! ```

mod steps;

use cucumber::World;
use steps::analytics::AnalyticsWorld;
use steps::budget::BudgetWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Budget Estimator Interface Tests ===\n");
    BudgetWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/interfaces/features/budget.feature")
        .await;

    println!("\n=== Running Analytics Interface Tests ===\n");
    AnalyticsWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/interfaces/features/analytics.feature")
        .await;
}
