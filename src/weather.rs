//! Cosmetic weather banner.
//!
//! The label is decoration only. It is seeded independently and never reaches
//! the calculator.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::{UiConfig, WeatherMode};

/// Chooses the weather label shown above the results.
#[derive(Debug, Clone)]
pub struct WeatherPicker {
    labels: Vec<String>,
    mode: WeatherMode,
    current: usize,
    rng: StdRng,
}

impl WeatherPicker {
    /// Creates a picker over `labels`.
    ///
    /// In [`WeatherMode::Random`] the first label is drawn immediately; in
    /// [`WeatherMode::Selected`] the first label is preselected.
    pub fn new(labels: Vec<String>, mode: WeatherMode, seed: u64) -> Self {
        let mut picker = Self {
            labels,
            mode,
            current: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        if mode == WeatherMode::Random {
            picker.reroll();
        }
        picker
    }

    /// Builds a picker from the `[ui]` section.
    pub fn from_ui(ui: &UiConfig, seed: u64) -> Self {
        Self::new(ui.weather_labels.clone(), ui.weather_mode, seed)
    }

    /// Current label, or an empty string when no labels are configured.
    pub fn label(&self) -> &str {
        self.labels.get(self.current).map_or("", String::as_str)
    }

    /// Advances the label: a fresh draw in random mode, the next entry otherwise.
    pub fn advance(&mut self) {
        match self.mode {
            WeatherMode::Random => self.reroll(),
            WeatherMode::Selected => self.select(self.current + 1),
        }
    }

    /// Selects the label at `index`, wrapping around.
    pub fn select(&mut self, index: usize) {
        if !self.labels.is_empty() {
            self.current = index % self.labels.len();
        }
    }

    fn reroll(&mut self) {
        if !self.labels.is_empty() {
            self.current = self.rng.random_range(0..self.labels.len());
        }
    }
}
