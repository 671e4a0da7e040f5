//! buildmart-estimate: one-shot calculator
//!
//! Reads a JSON calculation request from the file named by the first
//! argument, or from stdin when no argument is given, and prints the result
//! as JSON on stdout.
//!
//! ```text
//! echo '{"kind": "budget", "areaSqFt": 1200, "qualityGrade": "standard", "location": "Pune"}' \
//!     | buildmart-estimate
//! ```
//!
//! ## Configuration
//! - BUILDMART_CONFIG: YAML file with cost overrides (optional)
//! - BUILDMART_LOG: log filter (default: info), written to stderr
//!
//! Exits with status 1 when the input is rejected, 2 on any other failure.

use std::io::Read;
use std::process::ExitCode;

use tracing::{error, info};

use buildmart::config::Config;
use buildmart::services::{CalculationRequest, CalculatorService, ServiceError};
use buildmart::utils::bootstrap::init_tracing;

fn read_request() -> Result<String, std::io::Error> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn run() -> Result<String, Box<dyn std::error::Error>> {
    let config = Config::load(None)?;
    let service = CalculatorService::from_config(&config);

    let request: CalculationRequest = serde_json::from_str(&read_request()?)?;
    info!(kind = request.kind(), "Running calculation");

    let result = service.run(&request)?;
    Ok(serde_json::to_string_pretty(&result)?)
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<ServiceError>() {
            Some(ServiceError::Validation(rejected)) => {
                eprintln!("{}", rejected);
                ExitCode::from(1)
            }
            _ => {
                error!(error = %e, "Calculation failed");
                ExitCode::from(2)
            }
        },
    }
}
