//! CSV export for sizing sweeps.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::SimulationResult;

/// Column header for the sweep CSV export.
const HEADER: &str = "panel_type,panel_count,total_area_m2,installed_power_kwp,\
                      annual_production_kwh,self_consumed_kwh,grid_surplus_kwh,\
                      grid_draw_kwh,installation_cost,annual_savings,roi_percent";

/// Exports sweep results to a CSV file at the given path.
///
/// Writes a header row followed by one row per panel count. The financial
/// columns are left empty for results computed without the financial mode.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[SimulationResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes sweep results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[SimulationResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        let savings = r
            .financials
            .map(|f| format!("{:.2}", f.annual_savings))
            .unwrap_or_default();
        let roi = r
            .financials
            .and_then(|f| f.roi_percent)
            .map(|v| format!("{v:.2}"))
            .unwrap_or_default();
        wtr.write_record(&[
            r.panel_type.clone(),
            r.panel_count.to_string(),
            format!("{:.2}", r.total_area_m2),
            format!("{:.4}", r.installed_power_kwp),
            format!("{:.2}", r.annual_production_kwh),
            format!("{:.2}", r.self_consumed_kwh),
            format!("{:.2}", r.grid_surplus_kwh),
            format!("{:.2}", r.grid_draw_kwh),
            format!("{:.2}", r.installation_cost),
            savings,
            roi,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::balance::EnergyBalanceCalculator;
    use crate::sim::sweep::{SliderRange, sweep};

    fn sample(financials: bool) -> Vec<SimulationResult> {
        let calc = EnergyBalanceCalculator::standard();
        sweep(&calc, "Hétérojonction", SliderRange::new(0, 4, 2), financials).unwrap()
    }

    fn render(results: &[SimulationResult]) -> String {
        let mut buf = Vec::new();
        write_csv(results, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_lists_all_columns() {
        let output = render(&sample(false));
        let first_line = output.lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "panel_type,panel_count,total_area_m2,installed_power_kwp,\
             annual_production_kwh,self_consumed_kwh,grid_surplus_kwh,\
             grid_draw_kwh,installation_cost,annual_savings,roi_percent"
        );
    }

    #[test]
    fn row_count_matches_sweep() {
        let output = render(&sample(false));
        // 1 header + counts 0..=4
        assert_eq!(output.lines().count(), 6);
    }

    #[test]
    fn financial_columns_empty_without_financials() {
        let output = render(&sample(false));
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        for record in rdr.records() {
            let rec = record.expect("row should parse");
            assert_eq!(&rec[9], "");
            assert_eq!(&rec[10], "");
        }
    }

    #[test]
    fn zero_panel_row_has_no_roi() {
        let output = render(&sample(true));
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][1], "0");
        assert_eq!(&rows[0][9], "0.00");
        assert_eq!(&rows[0][10], "");
        assert!(rows[1][10].parse::<f64>().is_ok());
    }

    #[test]
    fn deterministic_output() {
        assert_eq!(render(&sample(true)), render(&sample(true)));
    }
}
