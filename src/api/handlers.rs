//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::types::{
    CatalogResponse, ErrorResponse, SimulateQuery, SimulateResponse, SiteResponse, SweepQuery,
};
use super::{AppState, MAX_SWEEP_ROWS};
use crate::error::SimError;
use crate::sim::sweep::{SliderRange, sweep};
use crate::sim::types::{SimulationInput, SimulationResult};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

/// Unknown panel types are 404, everything else the caller got wrong is 400.
fn from_sim_error(err: &SimError) -> ApiError {
    let status = match err {
        SimError::InvalidPanelType { .. } => StatusCode::NOT_FOUND,
        SimError::InvalidPanelCount { .. } | SimError::RoiUndefined => StatusCode::BAD_REQUEST,
    };
    error_response(status, err.to_string())
}

/// `GET /catalog` → 200 + `CatalogResponse`
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        panels: state.calculator.catalog().iter().cloned().collect(),
    })
}

/// `GET /site` → 200 + `SiteResponse`
pub async fn get_site(State(state): State<Arc<AppState>>) -> Json<SiteResponse> {
    Json(SiteResponse {
        site: *state.calculator.site(),
        tariff: *state.calculator.tariff(),
        slider: state.slider,
    })
}

/// Computes one energy balance.
///
/// `GET /simulate?panel_type=Bifacial&panel_count=12&financials=true`
/// → 200 + `SimulateResponse`; 404 for an unknown type; 400 for a negative count.
pub async fn get_simulate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SimulateQuery>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let input = SimulationInput::new(query.panel_type, query.panel_count)
        .with_financials(query.financials);
    let result = state
        .calculator
        .compute(&input)
        .map_err(|e| from_sim_error(&e))?;

    Ok(Json(SimulateResponse {
        self_sufficiency_percent: result.self_sufficiency_percent(state.calculator.site()),
        self_consumption_rate_percent: result.self_consumption_rate_percent(),
        result,
    }))
}

/// Computes energy balances over a count range.
///
/// `GET /sweep?panel_type=Amorphe` → slider range
/// `GET /sweep?panel_type=Amorphe&from=2&to=8` → counts 2..=8
/// `GET /sweep?panel_type=Amorphe&from=8&to=2` → 400
pub async fn get_sweep(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SweepQuery>,
) -> Result<Json<Vec<SimulationResult>>, ApiError> {
    let from = query.from.unwrap_or(state.slider.min);
    let to = query.to.unwrap_or(state.slider.max);

    if from > to {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("`from` ({from}) must be <= `to` ({to})"),
        ));
    }
    if to - from >= MAX_SWEEP_ROWS {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("range too large, at most {MAX_SWEEP_ROWS} counts per request"),
        ));
    }

    let range = SliderRange::new(from, to, from);
    sweep(&state.calculator, &query.panel_type, range, query.financials)
        .map(Json)
        .map_err(|e| from_sim_error(&e))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sim::balance::EnergyBalanceCalculator;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            calculator: EnergyBalanceCalculator::standard(),
            slider: SliderRange::new(0, 20, 10),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn catalog_returns_five_entries() {
        let (status, json) = get_json("/catalog").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["panels"].as_array().map(Vec::len), Some(5));
        assert_eq!(json["panels"][0]["name"], "Monocristallin");
    }

    #[tokio::test]
    async fn site_reports_constants() {
        let (status, json) = get_json("/site").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["site"]["annual_consumption_kwh"], 8261.0);
        assert_eq!(json["slider"]["max"], 20);
        assert_eq!(json["tariff"]["roi_horizon_years"], 20);
    }

    #[tokio::test]
    async fn simulate_returns_balance() {
        let (status, json) = get_json("/simulate?panel_type=Monocristallin&panel_count=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["panel_count"], 10);
        let cost = json["installation_cost"].as_f64().unwrap();
        assert!((cost - 4320.0).abs() < 1e-9);
        assert!(json.get("financials").is_none());
    }

    #[tokio::test]
    async fn simulate_unknown_type_returns_404() {
        let (status, json) = get_json("/simulate?panel_type=Tandem&panel_count=3").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn simulate_negative_count_returns_400() {
        let (status, json) = get_json("/simulate?panel_type=Amorphe&panel_count=-2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("-2"));
    }

    #[tokio::test]
    async fn sweep_defaults_to_slider_range() {
        let (status, json) = get_json("/sweep?panel_type=Amorphe").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(21));
    }

    #[tokio::test]
    async fn sweep_invalid_range_returns_400() {
        let (status, json) = get_json("/sweep?panel_type=Amorphe&from=8&to=2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
