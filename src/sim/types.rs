//! Core calculator types: site constants, inputs, and results.

use serde::{Deserialize, Serialize};

/// Fixed physical parameters of the installation site.
///
/// # Examples
///
/// ```
/// use pv_sim::sim::types::SiteConstants;
///
/// let site = SiteConstants::default();
/// assert_eq!(site.panel_area_m2, 1.8);
/// assert_eq!(site.annual_consumption_kwh, 8261.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConstants {
    /// Surface of a single panel (m²).
    pub panel_area_m2: f64,
    /// Yearly solar irradiation on the panel plane (kWh/m²/year).
    pub annual_irradiation_kwh_per_m2: f64,
    /// Yearly household consumption (kWh/year).
    pub annual_consumption_kwh: f64,
}

impl Default for SiteConstants {
    fn default() -> Self {
        Self {
            panel_area_m2: 1.8,
            annual_irradiation_kwh_per_m2: 1824.0,
            annual_consumption_kwh: 8261.0,
        }
    }
}

/// Prices used by the optional financial mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConstants {
    /// Value of one self-consumed kWh (€/kWh), i.e. the avoided retail price.
    pub self_consumption_value_per_kwh: f64,
    /// Feed-in tariff paid for one exported kWh (€/kWh).
    pub feed_in_tariff_per_kwh: f64,
    /// Horizon of the return-on-investment figure (years).
    pub roi_horizon_years: u32,
}

impl Default for TariffConstants {
    fn default() -> Self {
        Self {
            self_consumption_value_per_kwh: 0.25,
            feed_in_tariff_per_kwh: 0.10,
            roi_horizon_years: 20,
        }
    }
}

/// One calculator request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Catalog key of the panel technology.
    pub panel_type: String,
    /// Number of panels. Signed so that a negative request can be reported.
    pub panel_count: i64,
    /// Whether to compute savings and ROI.
    #[serde(default)]
    pub financials: bool,
}

impl SimulationInput {
    /// Creates an input without the financial add-on.
    pub fn new(panel_type: impl Into<String>, panel_count: i64) -> Self {
        Self {
            panel_type: panel_type.into(),
            panel_count,
            financials: false,
        }
    }

    /// Enables or disables the financial add-on.
    pub fn with_financials(mut self, financials: bool) -> Self {
        self.financials = financials;
        self
    }
}

/// Savings and return on investment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Financials {
    /// Yearly value of self-consumption plus feed-in revenue (€/year).
    pub annual_savings: f64,
    /// Return over the tariff horizon in percent, rounded to 2 decimals.
    ///
    /// `None` when the installation costs nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roi_percent: Option<f64>,
}

/// Complete energy balance for one input.
///
/// Recomputed from scratch on every call; nothing is cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Resolved panel technology name.
    pub panel_type: String,
    /// Number of panels.
    pub panel_count: u32,
    /// Total panel surface (m²).
    pub total_area_m2: f64,
    /// Nameplate power of the array (kWp).
    pub installed_power_kwp: f64,
    /// Yearly production (kWh).
    pub annual_production_kwh: f64,
    /// Production used on site (kWh).
    pub self_consumed_kwh: f64,
    /// Production exported to the grid (kWh).
    pub grid_surplus_kwh: f64,
    /// Consumption still drawn from the grid (kWh).
    pub grid_draw_kwh: f64,
    /// Up-front cost of the installation (€).
    pub installation_cost: f64,
    /// Savings and ROI, present only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials: Option<Financials>,
}

impl SimulationResult {
    /// Share of the household consumption covered by self-consumption (%).
    pub fn self_sufficiency_percent(&self, site: &SiteConstants) -> f64 {
        if site.annual_consumption_kwh > 0.0 {
            100.0 * self.self_consumed_kwh / site.annual_consumption_kwh
        } else {
            0.0
        }
    }

    /// Share of the production that is consumed on site (%).
    pub fn self_consumption_rate_percent(&self) -> f64 {
        if self.annual_production_kwh > 0.0 {
            100.0 * self.self_consumed_kwh / self.annual_production_kwh
        } else {
            0.0
        }
    }

    /// Returns `true` when yearly production covers yearly consumption.
    pub fn covers_consumption(&self, site: &SiteConstants) -> bool {
        self.annual_production_kwh >= site.annual_consumption_kwh
    }
}
