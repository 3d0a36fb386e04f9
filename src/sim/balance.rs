//! Yearly energy balance of a residential PV installation.

use tracing::debug;

use crate::catalog::PanelCatalog;
use crate::error::{Result, SimError};

use super::types::{Financials, SimulationInput, SimulationResult, SiteConstants, TariffConstants};

/// Fraction of the production/consumption overlap actually used on site.
pub const SELF_CONSUMPTION_FACTOR: f64 = 0.9;

/// kWp to Wp conversion.
pub const WATTS_PER_KILOWATT: f64 = 1000.0;

/// Computes the energy balance for one input.
///
/// The steps run in a fixed order on `f64` so that identical inputs always
/// produce bit-identical results:
///
/// 1. area = count × panel area
/// 2. power (kWp) = efficiency / 100 × area
/// 3. production = power × irradiation
/// 4. self-consumed = min(production, consumption) × [`SELF_CONSUMPTION_FACTOR`]
/// 5. surplus = max(0, production − self-consumed)
/// 6. grid draw = max(0, consumption − self-consumed)
/// 7. cost = power × 1000 × cost per watt
///
/// Savings and ROI are added when `input.financials` is set.
///
/// # Errors
///
/// Returns [`SimError::InvalidPanelType`] if the panel type is not in
/// `catalog`, or [`SimError::InvalidPanelCount`] if the count is negative.
///
/// # Examples
///
/// ```
/// use pv_sim::catalog::PanelCatalog;
/// use pv_sim::sim::balance::compute;
/// use pv_sim::sim::types::{SimulationInput, SiteConstants, TariffConstants};
///
/// let input = SimulationInput::new("Monocristallin", 10);
/// let r = compute(
///     &input,
///     &SiteConstants::default(),
///     &TariffConstants::default(),
///     &PanelCatalog::standard(),
/// )
/// .unwrap();
/// assert!((r.installation_cost - 4320.0).abs() < 1e-9);
/// ```
pub fn compute(
    input: &SimulationInput,
    site: &SiteConstants,
    tariff: &TariffConstants,
    catalog: &PanelCatalog,
) -> Result<SimulationResult> {
    let panel = catalog.get(&input.panel_type)?;
    let panel_count = u32::try_from(input.panel_count).map_err(|_| SimError::InvalidPanelCount {
        count: input.panel_count,
    })?;

    let total_area_m2 = f64::from(panel_count) * site.panel_area_m2;
    let installed_power_kwp = (panel.efficiency_percent / 100.0) * total_area_m2;
    let annual_production_kwh = installed_power_kwp * site.annual_irradiation_kwh_per_m2;

    let self_consumed_kwh =
        annual_production_kwh.min(site.annual_consumption_kwh) * SELF_CONSUMPTION_FACTOR;
    let grid_surplus_kwh = (annual_production_kwh - self_consumed_kwh).max(0.0);
    let grid_draw_kwh = (site.annual_consumption_kwh - self_consumed_kwh).max(0.0);

    let installation_cost = installed_power_kwp * WATTS_PER_KILOWATT * panel.cost_per_watt;

    let financials = input.financials.then(|| {
        let annual_savings = annual_savings(self_consumed_kwh, grid_surplus_kwh, tariff);
        Financials {
            annual_savings,
            roi_percent: roi_percent(
                annual_savings,
                installation_cost,
                tariff.roi_horizon_years,
            )
            .ok(),
        }
    });

    debug!(
        panel_type = %panel.name,
        panel_count,
        production_kwh = annual_production_kwh,
        cost = installation_cost,
        "energy balance computed"
    );

    Ok(SimulationResult {
        panel_type: panel.name.clone(),
        panel_count,
        total_area_m2,
        installed_power_kwp,
        annual_production_kwh,
        self_consumed_kwh,
        grid_surplus_kwh,
        grid_draw_kwh,
        installation_cost,
        financials,
    })
}

/// Yearly value of the installation: avoided purchases plus feed-in revenue.
pub fn annual_savings(self_consumed_kwh: f64, grid_surplus_kwh: f64, tariff: &TariffConstants) -> f64 {
    self_consumed_kwh * tariff.self_consumption_value_per_kwh
        + grid_surplus_kwh * tariff.feed_in_tariff_per_kwh
}

/// Net return over `horizon_years` as a percentage of the investment,
/// rounded to 2 decimals.
///
/// # Errors
///
/// Returns [`SimError::RoiUndefined`] when `installation_cost` is zero.
pub fn roi_percent(annual_savings: f64, installation_cost: f64, horizon_years: u32) -> Result<f64> {
    if installation_cost == 0.0 {
        return Err(SimError::RoiUndefined);
    }
    let gain = annual_savings * f64::from(horizon_years) - installation_cost;
    Ok(round2(gain / installation_cost * 100.0))
}

/// Rounds to 2 decimal places on the exact binary value.
///
/// Scaling by 100 before rounding can land a value just below a `.xx5`
/// boundary exactly on it, so the decimal formatter does the rounding.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Immutable calculator configuration built once at startup.
///
/// Holds the site, tariff, and catalog so callers only pass the per-request
/// [`SimulationInput`]. Safe to share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyBalanceCalculator {
    site: SiteConstants,
    tariff: TariffConstants,
    catalog: PanelCatalog,
}

impl EnergyBalanceCalculator {
    /// Creates a calculator from explicit configuration.
    pub fn new(site: SiteConstants, tariff: TariffConstants, catalog: PanelCatalog) -> Self {
        Self {
            site,
            tariff,
            catalog,
        }
    }

    /// Calculator with the default site, tariffs, and standard catalog.
    pub fn standard() -> Self {
        Self::new(
            SiteConstants::default(),
            TariffConstants::default(),
            PanelCatalog::standard(),
        )
    }

    /// Computes the balance for `input`. See [`compute`].
    ///
    /// # Errors
    ///
    /// Same as [`compute`].
    pub fn compute(&self, input: &SimulationInput) -> Result<SimulationResult> {
        compute(input, &self.site, &self.tariff, &self.catalog)
    }

    /// Shorthand building the input from its parts.
    ///
    /// # Errors
    ///
    /// Same as [`compute`].
    pub fn compute_by_name(
        &self,
        panel_type: &str,
        panel_count: i64,
        financials: bool,
    ) -> Result<SimulationResult> {
        self.compute(&SimulationInput::new(panel_type, panel_count).with_financials(financials))
    }

    /// Site constants in use.
    pub fn site(&self) -> &SiteConstants {
        &self.site
    }

    /// Tariffs in use.
    pub fn tariff(&self) -> &TariffConstants {
        &self.tariff
    }

    /// Panel catalog in use.
    pub fn catalog(&self) -> &PanelCatalog {
        &self.catalog
    }
}

impl Default for EnergyBalanceCalculator {
    fn default() -> Self {
        Self::standard()
    }
}
