//! TUI application state: the form inputs and the latest result.

use crate::config::ScenarioConfig;
use crate::error::SimError;
use crate::sim::balance::EnergyBalanceCalculator;
use crate::sim::sweep::SliderRange;
use crate::sim::types::{SimulationInput, SimulationResult};
use crate::weather::WeatherPicker;

/// TUI application state.
///
/// Every input change calls [`App::recompute`], mirroring a form that
/// re-renders on each widget change.
pub struct App {
    /// Active scenario (kept for preset switches).
    scenario: ScenarioConfig,
    /// Calculator built from the scenario.
    calculator: EnergyBalanceCalculator,
    /// Selectable panel counts.
    pub slider: SliderRange,
    /// Index of the selected panel type in the catalog.
    pub panel_index: usize,
    /// Selected panel count, always inside `slider`.
    pub panel_count: u32,
    /// Whether savings and ROI are shown.
    pub financials: bool,
    /// Cosmetic weather banner.
    pub weather: WeatherPicker,
    /// Latest calculator output.
    pub result: Result<SimulationResult, SimError>,
    /// Name of the active preset, or `"custom"` for a scenario file.
    pub preset_name: String,
    /// Seed for the weather banner.
    seed: u64,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates an app from a named preset, falling back to `salma`.
    pub fn new(preset: &str, seed: u64) -> Self {
        let scenario = ScenarioConfig::from_preset(preset).unwrap_or_else(|_| ScenarioConfig::salma());
        Self::from_scenario(preset, scenario, seed)
    }

    /// Creates an app from an already validated scenario.
    pub fn from_scenario(name: &str, scenario: ScenarioConfig, seed: u64) -> Self {
        let calculator = scenario.build();
        let slider = scenario.slider();
        let panel_index = calculator
            .catalog()
            .index_of(&scenario.ui.default_panel_type)
            .unwrap_or(0);
        let weather = WeatherPicker::from_ui(&scenario.ui, seed);
        let financials = scenario.ui.financials;
        let panel_name = calculator
            .catalog()
            .get_index(panel_index)
            .map_or_else(String::new, |p| p.name.clone());
        let result = calculator.compute(
            &SimulationInput::new(panel_name, i64::from(slider.default))
                .with_financials(financials),
        );
        Self {
            scenario,
            calculator,
            slider,
            panel_index,
            panel_count: slider.default,
            financials,
            weather,
            result,
            preset_name: name.to_string(),
            seed,
            quit: false,
        }
    }

    /// Recomputes the result from the current inputs.
    pub fn recompute(&mut self) {
        let name = self.panel_name().to_string();
        let input = SimulationInput::new(name, i64::from(self.panel_count))
            .with_financials(self.financials);
        self.result = self.calculator.compute(&input);
    }

    /// Name of the selected panel type.
    pub fn panel_name(&self) -> &str {
        self.calculator
            .catalog()
            .get_index(self.panel_index)
            .map_or("", |p| p.name.as_str())
    }

    /// Catalog names in display order.
    pub fn panel_names(&self) -> Vec<&str> {
        self.calculator.catalog().names()
    }

    /// Calculator in use.
    pub fn calculator(&self) -> &EnergyBalanceCalculator {
        &self.calculator
    }

    /// Page title from the scenario.
    pub fn title(&self) -> &str {
        &self.scenario.ui.title
    }

    /// Selects the next panel type, wrapping around.
    pub fn next_panel(&mut self) {
        let len = self.calculator.catalog().len();
        if len > 0 {
            self.panel_index = (self.panel_index + 1) % len;
            self.recompute();
        }
    }

    /// Selects the previous panel type, wrapping around.
    pub fn prev_panel(&mut self) {
        let len = self.calculator.catalog().len();
        if len > 0 {
            self.panel_index = (self.panel_index + len - 1) % len;
            self.recompute();
        }
    }

    /// Moves the panel-count slider by `delta`, clamped to its bounds.
    pub fn adjust_count(&mut self, delta: i64) {
        let next = self.slider.clamp(i64::from(self.panel_count) + delta);
        if next != self.panel_count {
            self.panel_count = next;
            self.recompute();
        }
    }

    /// Toggles the savings/ROI add-on.
    pub fn toggle_financials(&mut self) {
        self.financials = !self.financials;
        self.recompute();
    }

    /// Advances the weather banner. Does not touch the result.
    pub fn next_weather(&mut self) {
        self.weather.advance();
    }

    /// Switches to a different preset, resetting every input.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        *self = Self::from_scenario(name, scenario, self.seed);
    }
}
