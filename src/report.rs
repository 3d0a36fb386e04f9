//! Text rendering of a simulation result: summary labels and bar charts.

use std::fmt;

use crate::sim::types::{SimulationResult, SiteConstants};

/// Width of the longest bar, in characters.
const BAR_WIDTH: usize = 40;

/// Formats `value` with no decimals and `,` thousands separators.
///
/// # Examples
///
/// ```
/// use pv_sim::report::thousands;
///
/// assert_eq!(thousands(4320.0), "4,320");
/// assert_eq!(thousands(1234567.6), "1,234,568");
/// ```
pub fn thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

/// Result summary as shown on the calculator page.
pub struct SummaryReport<'a> {
    /// Page title.
    pub title: &'a str,
    /// Cosmetic weather label; omitted when empty.
    pub weather: &'a str,
    /// Result to describe.
    pub result: &'a SimulationResult,
    /// Site used to compute the result.
    pub site: &'a SiteConstants,
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        writeln!(f, "=== {} ===", self.title)?;
        if !self.weather.is_empty() {
            writeln!(f, "Météo :                {}", self.weather)?;
        }
        writeln!(f, "Panneau :              {} x {}", r.panel_count, r.panel_type)?;
        writeln!(f, "Surface installée :    {:.2} m²", r.total_area_m2)?;
        writeln!(f, "Puissance installée :  {:.2} kWc", r.installed_power_kwp)?;
        writeln!(f, "Production estimée :   {:.0} kWh/an", r.annual_production_kwh)?;
        writeln!(f, "Autoconsommée :        {:.0} kWh/an", r.self_consumed_kwh)?;
        writeln!(f, "Réseau requis :        {:.0} kWh/an", r.grid_draw_kwh)?;
        writeln!(f, "Surplus injecté :      {:.0} kWh/an", r.grid_surplus_kwh)?;
        writeln!(
            f,
            "Autonomie :            {:.1}%",
            r.self_sufficiency_percent(self.site)
        )?;
        write!(f, "Coût estimé :          {} €", thousands(r.installation_cost))?;
        if let Some(fin) = &r.financials {
            writeln!(f)?;
            writeln!(f, "Économie estimée :     {:.0} €/an", fin.annual_savings)?;
            match fin.roi_percent {
                Some(roi) => write!(f, "ROI :                  {roi:.2} %")?,
                None => write!(f, "ROI :                  n/a")?,
            }
        }
        Ok(())
    }
}

/// One bar of a [`BarChart`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Category label.
    pub label: String,
    /// Bar value; negative values are drawn as empty bars.
    pub value: f64,
}

/// Horizontal bar chart scaled to the largest value.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    /// Chart title.
    pub title: String,
    /// Unit printed after each value.
    pub unit: String,
    /// Bars in display order.
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Creates a chart from `(label, value)` pairs.
    pub fn new(title: &str, unit: &str, bars: &[(&str, f64)]) -> Self {
        Self {
            title: title.to_string(),
            unit: unit.to_string(),
            bars: bars
                .iter()
                .map(|&(label, value)| Bar {
                    label: label.to_string(),
                    value,
                })
                .collect(),
        }
    }

    /// Yearly production against household consumption.
    pub fn production_vs_consumption(result: &SimulationResult, site: &SiteConstants) -> Self {
        Self::new(
            "Production vs Besoin",
            "kWh/an",
            &[
                ("Production", result.annual_production_kwh),
                ("Consommation", site.annual_consumption_kwh),
            ],
        )
    }

    /// Split between self-consumption, injection, and grid draw.
    pub fn energy_split(result: &SimulationResult) -> Self {
        Self::new(
            "Répartition de l'énergie solaire",
            "kWh/an",
            &[
                ("Autoconsommée", result.self_consumed_kwh),
                ("Injectée", result.grid_surplus_kwh),
                ("Reprise réseau", result.grid_draw_kwh),
            ],
        )
    }

    /// Bar lengths in characters, proportional to the largest value.
    pub fn bar_lengths(&self, width: usize) -> Vec<usize> {
        let max = self.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        self.bars
            .iter()
            .map(|b| {
                if max > 0.0 && b.value > 0.0 {
                    ((b.value / max) * width as f64).round() as usize
                } else {
                    0
                }
            })
            .collect()
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- {} ---", self.title)?;
        let label_width = self
            .bars
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(0);
        for (bar, len) in self.bars.iter().zip(self.bar_lengths(BAR_WIDTH)) {
            let pad = label_width - bar.label.chars().count();
            write!(
                f,
                "\n{}{} |{:<width$}| {:.0} {}",
                bar.label,
                " ".repeat(pad),
                "█".repeat(len),
                bar.value,
                self.unit,
                width = BAR_WIDTH
            )?;
        }
        Ok(())
    }
}
