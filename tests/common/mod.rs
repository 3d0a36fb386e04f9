//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_sim::sim::balance::EnergyBalanceCalculator;
use pv_sim::sim::types::{SimulationResult, SiteConstants};

/// Largest slider bound across the presets.
pub const MAX_PANELS: i64 = 30;

/// Tolerance for values derived through several multiplications.
pub const EPS: f64 = 1e-9;

/// Calculator with the standard site, tariffs, and catalog.
pub fn standard_calculator() -> EnergyBalanceCalculator {
    EnergyBalanceCalculator::standard()
}

/// Default site constants (1.8 m², 1824 kWh/m², 8261 kWh).
pub fn default_site() -> SiteConstants {
    SiteConstants::default()
}

/// Computes every catalog entry at every count in `0..=MAX_PANELS`.
pub fn all_results(financials: bool) -> Vec<SimulationResult> {
    let calc = standard_calculator();
    let names: Vec<String> = calc
        .catalog()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut out = Vec::new();
    for name in &names {
        for n in 0..=MAX_PANELS {
            out.push(
                calc.compute_by_name(name, n, financials)
                    .expect("catalog entries are valid"),
            );
        }
    }
    out
}

/// Asserts `actual` is within `EPS` of `expected`.
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}
