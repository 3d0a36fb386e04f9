//! Color constants and bar scaling helpers for the TUI.

use ratatui::style::Color;

/// Production bar.
pub const PRODUCTION_COLOR: Color = Color::Green;
/// Consumption bar.
pub const CONSUMPTION_COLOR: Color = Color::Red;
/// Self-consumed energy bar.
pub const SELF_CONSUMED_COLOR: Color = Color::LightGreen;
/// Injected energy bar.
pub const SURPLUS_COLOR: Color = Color::Yellow;
/// Grid draw bar.
pub const GRID_DRAW_COLOR: Color = Color::Gray;
/// Slider gauge.
pub const SLIDER_COLOR: Color = Color::Cyan;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Error text.
pub const ERROR_FG: Color = Color::Red;

/// Converts an energy figure to a bar value; negatives draw as empty.
pub fn bar_value(kwh: f64) -> u64 {
    if kwh.is_finite() && kwh > 0.0 {
        kwh.round() as u64
    } else {
        0
    }
}

/// Slider position as a 0–1 ratio for the gauge.
pub fn slider_ratio(value: u32, min: u32, max: u32) -> f64 {
    if max > min {
        f64::from(value.saturating_sub(min)) / f64::from(max - min)
    } else {
        1.0
    }
}
