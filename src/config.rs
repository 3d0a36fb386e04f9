//! TOML-based scenario configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{PanelCatalog, PanelType};
use crate::sim::balance::EnergyBalanceCalculator;
use crate::sim::sweep::SliderRange;
use crate::sim::types::{SiteConstants, TariffConstants};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `salma` preset. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Physical site parameters.
    #[serde(default)]
    pub site: SiteConstants,
    /// Prices for the financial mode.
    #[serde(default)]
    pub tariff: TariffConstants,
    /// Form defaults: slider bounds, selection, weather labels.
    #[serde(default)]
    pub ui: UiConfig,
    /// Catalog override. The standard catalog is used when absent.
    #[serde(default)]
    pub panels: Option<Vec<PanelType>>,
}

/// How the cosmetic weather label is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherMode {
    /// The user picks a label; the first one is preselected.
    Selected,
    /// A label is drawn at random.
    Random,
}

/// Form defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Page title shown above the report.
    pub title: String,
    /// Smallest selectable panel count.
    pub slider_min: u32,
    /// Largest selectable panel count.
    pub slider_max: u32,
    /// Initially selected panel count.
    pub slider_default: u32,
    /// Initially selected panel technology.
    pub default_panel_type: String,
    /// Whether savings and ROI are shown.
    pub financials: bool,
    /// Weather label selection mode.
    pub weather_mode: WeatherMode,
    /// Weather labels offered.
    pub weather_labels: Vec<String>,
}

const SHORT_WEATHER: [&str; 3] = ["☀️ Ensoleillé", "🌤️ Nuageux", "🌧️ Pluvieux"];

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Simulation PV - Projet Salma".to_string(),
            slider_min: 0,
            slider_max: 20,
            slider_default: 10,
            default_panel_type: "Monocristallin".to_string(),
            financials: false,
            weather_mode: WeatherMode::Selected,
            weather_labels: labels(&SHORT_WEATHER),
        }
    }
}

fn labels(src: &[&str]) -> Vec<String> {
    src.iter().map(|s| (*s).to_string()).collect()
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"ui.slider_max"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["salma", "classic", "residential", "projet"];

    /// Two-chart page with a weather selector and a 0–20 slider.
    pub fn salma() -> Self {
        Self {
            site: SiteConstants::default(),
            tariff: TariffConstants::default(),
            ui: UiConfig::default(),
            panels: None,
        }
    }

    /// Single-chart page with a random weather banner and a 0–25 slider.
    pub fn classic() -> Self {
        Self {
            ui: UiConfig {
                title: "Simulateur d'installation photovoltaïque".to_string(),
                slider_max: 25,
                weather_mode: WeatherMode::Random,
                weather_labels: labels(&[
                    "☀️ Ensoleillé",
                    "🌤️ Nuageux",
                    "🌧️ Pluvieux",
                    "⛅ Variable",
                    "🌩️ Orageux",
                ]),
                ..UiConfig::default()
            },
            ..Self::salma()
        }
    }

    /// Residential sizing page with savings and ROI over 5–30 panels.
    pub fn residential() -> Self {
        Self {
            ui: UiConfig {
                title: "Simulateur d'installation solaire résidentielle".to_string(),
                slider_min: 5,
                slider_max: 30,
                slider_default: 12,
                financials: true,
                weather_mode: WeatherMode::Random,
                weather_labels: labels(&[
                    "☀️ Ensoleillé",
                    "🌤️ Partiellement nuageux",
                    "⛅ Nuages légers",
                    "🌧️ Pluie",
                    "🌩️ Orage",
                ]),
                ..UiConfig::default()
            },
            ..Self::salma()
        }
    }

    /// Project page identical in behavior to `salma`.
    pub fn projet() -> Self {
        Self {
            ui: UiConfig {
                title: "Simulation photovoltaïque - Projet Salma Attaibe".to_string(),
                ..UiConfig::default()
            },
            ..Self::salma()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "salma" => Ok(Self::salma()),
            "classic" => Ok(Self::classic()),
            "residential" => Ok(Self::residential()),
            "projet" => Ok(Self::projet()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Catalog in effect: the override if present, otherwise the standard one.
    pub fn catalog(&self) -> PanelCatalog {
        self.panels
            .clone()
            .map_or_else(PanelCatalog::standard, PanelCatalog::new)
    }

    /// Slider bounds from the `[ui]` section.
    pub fn slider(&self) -> SliderRange {
        SliderRange::new(self.ui.slider_min, self.ui.slider_max, self.ui.slider_default)
    }

    /// Builds the immutable calculator. Call [`validate`](Self::validate) first.
    pub fn build(&self) -> EnergyBalanceCalculator {
        EnergyBalanceCalculator::new(self.site, self.tariff, self.catalog())
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let site = &self.site;
        if !(site.panel_area_m2.is_finite() && site.panel_area_m2 > 0.0) {
            errors.push(ConfigError::new("site.panel_area_m2", "must be finite and > 0"));
        }
        if !(site.annual_irradiation_kwh_per_m2.is_finite()
            && site.annual_irradiation_kwh_per_m2 > 0.0)
        {
            errors.push(ConfigError::new(
                "site.annual_irradiation_kwh_per_m2",
                "must be finite and > 0",
            ));
        }
        if !(site.annual_consumption_kwh.is_finite() && site.annual_consumption_kwh >= 0.0) {
            errors.push(ConfigError::new(
                "site.annual_consumption_kwh",
                "must be finite and >= 0",
            ));
        }

        let tariff = &self.tariff;
        if !(tariff.self_consumption_value_per_kwh.is_finite()
            && tariff.self_consumption_value_per_kwh >= 0.0)
        {
            errors.push(ConfigError::new(
                "tariff.self_consumption_value_per_kwh",
                "must be finite and >= 0",
            ));
        }
        if !(tariff.feed_in_tariff_per_kwh.is_finite() && tariff.feed_in_tariff_per_kwh >= 0.0) {
            errors.push(ConfigError::new(
                "tariff.feed_in_tariff_per_kwh",
                "must be finite and >= 0",
            ));
        }
        if tariff.roi_horizon_years == 0 {
            errors.push(ConfigError::new("tariff.roi_horizon_years", "must be > 0"));
        }

        let catalog = self.catalog();
        if catalog.is_empty() {
            errors.push(ConfigError::new("panels", "must contain at least one entry"));
        }
        let mut seen = HashSet::new();
        for (i, panel) in catalog.iter().enumerate() {
            if !seen.insert(panel.name.to_lowercase()) {
                errors.push(ConfigError::new(
                    format!("panels[{i}].name"),
                    format!("duplicate panel type \"{}\"", panel.name),
                ));
            }
            if !(panel.efficiency_percent > 0.0 && panel.efficiency_percent <= 100.0) {
                errors.push(ConfigError::new(
                    format!("panels[{i}].efficiency_percent"),
                    "must be in (0, 100]",
                ));
            }
            if !(panel.cost_per_watt.is_finite() && panel.cost_per_watt > 0.0) {
                errors.push(ConfigError::new(
                    format!("panels[{i}].cost_per_watt"),
                    "must be finite and > 0",
                ));
            }
        }

        let ui = &self.ui;
        if ui.slider_min > ui.slider_max {
            errors.push(ConfigError::new("ui.slider_min", "must be <= ui.slider_max"));
        }
        if !(ui.slider_min..=ui.slider_max).contains(&ui.slider_default) {
            errors.push(ConfigError::new(
                "ui.slider_default",
                "must be within [ui.slider_min, ui.slider_max]",
            ));
        }
        if catalog.get(&ui.default_panel_type).is_err() {
            errors.push(ConfigError::new(
                "ui.default_panel_type",
                format!("\"{}\" is not in the catalog", ui.default_panel_type),
            ));
        }
        if ui.weather_labels.is_empty() {
            errors.push(ConfigError::new("ui.weather_labels", "must not be empty"));
        }

        errors
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::salma()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn residential_enables_financials() {
        let cfg = ScenarioConfig::residential();
        assert!(cfg.ui.financials);
        assert_eq!(cfg.slider(), SliderRange::new(5, 30, 12));
        assert_eq!(cfg.ui.weather_mode, WeatherMode::Random);
    }

    #[test]
    fn classic_widens_slider() {
        let cfg = ScenarioConfig::classic();
        assert_eq!(cfg.slider(), SliderRange::new(0, 25, 10));
        assert_eq!(cfg.ui.weather_labels.len(), 5);
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[site]
panel_area_m2 = 1.7
annual_irradiation_kwh_per_m2 = 1500.0
annual_consumption_kwh = 5000.0

[tariff]
self_consumption_value_per_kwh = 0.22
feed_in_tariff_per_kwh = 0.13
roi_horizon_years = 25

[ui]
title = "Test"
slider_min = 2
slider_max = 16
slider_default = 8
default_panel_type = "Bifacial"
financials = true
weather_mode = "random"
weather_labels = ["sun", "rain"]

[[panels]]
name = "Bifacial"
efficiency_percent = 19.5
cost_per_watt = 1.4

[[panels]]
name = "Tandem"
efficiency_percent = 28.0
cost_per_watt = 2.1
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.site.panel_area_m2), Some(1.7));
        assert_eq!(cfg.as_ref().map(|c| c.tariff.roi_horizon_years), Some(25));
        assert_eq!(cfg.as_ref().map(|c| c.catalog().len()), Some(2));
        assert_eq!(
            cfg.as_ref().map(|c| c.ui.weather_mode),
            Some(WeatherMode::Random)
        );
        assert!(cfg.map(|c| c.validate().is_empty()).unwrap_or(false));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[ui]
slider_max = 30
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.ui.slider_max), Some(30));
        assert_eq!(cfg.as_ref().map(|c| c.ui.slider_default), Some(10));
        assert_eq!(cfg.as_ref().map(|c| c.site.annual_consumption_kwh), Some(8261.0));
        assert_eq!(cfg.as_ref().map(|c| c.catalog().len()), Some(5));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[site]
panel_area_m2 = 1.8
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_inverted_slider() {
        let mut cfg = ScenarioConfig::salma();
        cfg.ui.slider_min = 25;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "ui.slider_min"));
        assert!(errors.iter().any(|e| e.field == "ui.slider_default"));
    }

    #[test]
    fn validation_catches_unknown_default_panel() {
        let mut cfg = ScenarioConfig::salma();
        cfg.ui.default_panel_type = "Tandem".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "ui.default_panel_type"));
    }

    #[test]
    fn validation_catches_bad_panels() {
        let mut cfg = ScenarioConfig::salma();
        cfg.panels = Some(vec![
            PanelType::new("Monocristallin", 0.0, 1.2),
            PanelType::new("monocristallin", 20.0, -1.0),
        ]);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "panels[0].efficiency_percent"));
        assert!(errors.iter().any(|e| e.field == "panels[1].name"));
        assert!(errors.iter().any(|e| e.field == "panels[1].cost_per_watt"));
    }

    #[test]
    fn validation_catches_zero_area() {
        let mut cfg = ScenarioConfig::salma();
        cfg.site.panel_area_m2 = 0.0;
        cfg.tariff.roi_horizon_years = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "site.panel_area_m2"));
        assert!(errors.iter().any(|e| e.field == "tariff.roi_horizon_years"));
    }

    #[test]
    fn validation_rejects_non_finite_values() {
        let toml = r#"
[site]
annual_irradiation_kwh_per_m2 = inf

[tariff]
feed_in_tariff_per_kwh = nan

[[panels]]
name = "Monocristallin"
efficiency_percent = 20.0
cost_per_watt = inf
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "site.annual_irradiation_kwh_per_m2"));
        assert!(errors.iter().any(|e| e.field == "tariff.feed_in_tariff_per_kwh"));
        assert!(errors.iter().any(|e| e.field == "panels[0].cost_per_watt"));
    }

    #[test]
    fn build_uses_configured_site() {
        let mut cfg = ScenarioConfig::salma();
        cfg.site.annual_consumption_kwh = 4000.0;
        let calc = cfg.build();
        let r = calc.compute_by_name("Monocristallin", 0, false).unwrap();
        assert_eq!(r.grid_draw_kwh, 4000.0);
    }
}
