//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::catalog::PanelType;
use crate::sim::sweep::SliderRange;
use crate::sim::types::{SimulationResult, SiteConstants, TariffConstants};

/// Panel catalog in display order.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Catalog entries.
    pub panels: Vec<PanelType>,
}

/// Fixed configuration the calculator was built with.
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    /// Site constants.
    pub site: SiteConstants,
    /// Tariffs for the financial mode.
    pub tariff: TariffConstants,
    /// Selectable panel-count range.
    pub slider: SliderRange,
}

/// Single result plus the ratios derived from it.
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    /// Computed energy balance.
    #[serde(flatten)]
    pub result: SimulationResult,
    /// Share of consumption covered on site (%).
    pub self_sufficiency_percent: f64,
    /// Share of production consumed on site (%).
    pub self_consumption_rate_percent: f64,
}

/// Query for `GET /simulate`.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Catalog key.
    pub panel_type: String,
    /// Number of panels.
    pub panel_count: i64,
    /// Include savings and ROI.
    #[serde(default)]
    pub financials: bool,
}

/// Query for `GET /sweep`.
#[derive(Debug, Deserialize)]
pub struct SweepQuery {
    /// Catalog key.
    pub panel_type: String,
    /// First count (inclusive). Defaults to the slider minimum.
    pub from: Option<u32>,
    /// Last count (inclusive). Defaults to the slider maximum.
    pub to: Option<u32>,
    /// Include savings and ROI.
    #[serde(default)]
    pub financials: bool,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
