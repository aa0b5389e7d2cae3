//! Calculator Status Tool
//!
//! Provides runtime status information about the calculator service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::NutritionixConfig;

/// Usage instructions for AI assistants
pub const CALCULATOR_INSTRUCTIONS: &str = r#"
# Recipe Nutrition Calculator Instructions

Describe a recipe as ingredients with percentage weights, give the total
batch weight, and get one nutrition facts label for the whole batch.

## Workflow

1. `get_form` - see the current rows (a new form has one blank row, 100 g total)
2. `set_total_weight` - batch weight in grams (must be greater than 0)
3. For each ingredient:
   - `add_ingredient` with `name` and `percentage`, or
   - `update_ingredient_name` / `update_ingredient_percentage` on an existing row
4. `calculate_nutrition` - validates, weighs, looks up, and sums
5. `get_nutrition_facts` - re-read the last successful result

## Rules

- Every row needs a name and a percentage. An empty percentage means
  "not entered", not zero. Remove unused rows with `remove_ingredient`.
- Percentages must add up to at least 100%. Call
  `set_ignore_remaining(true)` to calculate a partial recipe.
- Names are sent to the lookup service as natural language, e.g.
  "120g chicken breast". Use plain food names.
- Weights are grams only.

## Errors

- Validation problems are reported one at a time, most basic first.
- "Nutrition data not found. Please check the ingredient name: X." means
  the service could not match X; rename that row and calculate again.
- "Error fetching nutrition data. Please check the API." means the service
  failed for another reason (credentials, network). Check `calculator_status`.

## Known limitation

Vitamin A, vitamin C, calcium, and iron in the totals are copied from the
last ingredient, not summed. The per-ingredient `breakdown` has each value.
"#;

/// Runtime status of the calculator service
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Lookup service
    pub api_endpoint: String,
    pub credentials_configured: bool,

    /// Usage
    pub calculations_succeeded: u64,
    pub calculations_failed: u64,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    api_endpoint: String,
    credentials_configured: bool,
    calculations_succeeded: u64,
    calculations_failed: u64,
}

impl StatusTracker {
    pub fn new(config: &NutritionixConfig) -> Self {
        Self {
            start_time: Instant::now(),
            api_endpoint: config.endpoint.clone(),
            credentials_configured: config.has_credentials(),
            calculations_succeeded: 0,
            calculations_failed: 0,
        }
    }

    pub fn record_calculation(&mut self, success: bool) {
        if success {
            self.calculations_succeeded += 1;
        } else {
            self.calculations_failed += 1;
        }
    }

    pub fn get_status(&self) -> CalculatorStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        CalculatorStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            api_endpoint: self.api_endpoint.clone(),
            credentials_configured: self.credentials_configured,
            calculations_succeeded: self.calculations_succeeded,
            calculations_failed: self.calculations_failed,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
