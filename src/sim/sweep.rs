//! Evaluate the calculator over a range of panel counts.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::balance::EnergyBalanceCalculator;
use super::types::{SimulationInput, SimulationResult};

/// Inclusive panel-count range with a default position, as offered by a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    /// Smallest selectable count.
    pub min: u32,
    /// Largest selectable count.
    pub max: u32,
    /// Initial count.
    pub default: u32,
}

impl SliderRange {
    /// Creates a range. Bounds are not reordered.
    pub fn new(min: u32, max: u32, default: u32) -> Self {
        Self { min, max, default }
    }

    /// Clamps `count` into the range.
    pub fn clamp(&self, count: i64) -> u32 {
        let clamped = count.clamp(i64::from(self.min), i64::from(self.max));
        u32::try_from(clamped).unwrap_or(self.min)
    }

    /// Every selectable count, ascending.
    pub fn counts(self) -> impl Iterator<Item = u32> {
        self.min..=self.max
    }
}

impl Default for SliderRange {
    fn default() -> Self {
        Self::new(0, 20, 10)
    }
}

/// Computes one result per count in `range`.
///
/// # Errors
///
/// Returns the calculator error for an unknown panel type.
pub fn sweep(
    calculator: &EnergyBalanceCalculator,
    panel_type: &str,
    range: SliderRange,
    financials: bool,
) -> Result<Vec<SimulationResult>> {
    range
        .counts()
        .map(|count| {
            let input =
                SimulationInput::new(panel_type, i64::from(count)).with_financials(financials);
            calculator.compute(&input)
        })
        .collect()
}

/// Smallest count in `range` whose yearly production covers consumption.
///
/// # Errors
///
/// Returns the calculator error for an unknown panel type.
pub fn breakeven_count(
    calculator: &EnergyBalanceCalculator,
    panel_type: &str,
    range: SliderRange,
) -> Result<Option<u32>> {
    let site = *calculator.site();
    Ok(sweep(calculator, panel_type, range, false)?
        .into_iter()
        .find(|r| r.covers_consumption(&site))
        .map(|r| r.panel_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_covers_full_range() {
        let calc = EnergyBalanceCalculator::standard();
        let results = sweep(&calc, "Monocristallin", SliderRange::new(5, 30, 12), false).unwrap();
        assert_eq!(results.len(), 26);
        assert_eq!(results.first().map(|r| r.panel_count), Some(5));
        assert_eq!(results.last().map(|r| r.panel_count), Some(30));
    }

    #[test]
    fn sweep_is_monotonic_in_production() {
        let calc = EnergyBalanceCalculator::standard();
        let results = sweep(&calc, "Amorphe", SliderRange::new(0, 30, 10), false).unwrap();
        for pair in results.windows(2).skip(1) {
            assert!(pair[1].annual_production_kwh > pair[0].annual_production_kwh);
            assert!(pair[1].installation_cost > pair[0].installation_cost);
        }
    }

    #[test]
    fn breakeven_for_monocristallin() {
        // 0.2 × 1.8 × 1824 = 656.64 kWh per panel → 13 panels reach 8261.
        let calc = EnergyBalanceCalculator::standard();
        let n = breakeven_count(&calc, "Monocristallin", SliderRange::new(0, 30, 10)).unwrap();
        assert_eq!(n, Some(13));
    }

    #[test]
    fn breakeven_out_of_range() {
        let calc = EnergyBalanceCalculator::standard();
        let n = breakeven_count(&calc, "Amorphe", SliderRange::new(0, 20, 10)).unwrap();
        assert_eq!(n, None);
    }

    #[test]
    fn clamp_respects_bounds() {
        let r = SliderRange::new(5, 30, 12);
        assert_eq!(r.clamp(-3), 5);
        assert_eq!(r.clamp(17), 17);
        assert_eq!(r.clamp(99), 30);
    }
}
