//! pv-sim entry point: CLI wiring and config-driven calculator construction.

mod cli;

use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pv_sim::config::ScenarioConfig;
use pv_sim::io::export::export_csv;
use pv_sim::report::{BarChart, SummaryReport};
use pv_sim::sim::sweep::{breakeven_count, sweep};
use pv_sim::sim::types::SimulationInput;
use pv_sim::weather::WeatherPicker;

use cli::CliOptions;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pv_sim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the scenario: `--scenario` file, then `--preset`, then `salma`.
fn load_scenario(cli: &CliOptions) -> (String, ScenarioConfig) {
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path).map(|cfg| ("custom".to_string(), cfg))
    } else {
        let name = cli.preset.clone().unwrap_or_else(|| "salma".to_string());
        ScenarioConfig::from_preset(&name).map(|cfg| (name, cfg))
    };

    match loaded {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        cli::print_usage();
        return;
    }

    let (scenario_name, mut scenario) = load_scenario(&cli);

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    info!(scenario = %scenario_name, "scenario loaded");

    let seed = cli.seed.unwrap_or_else(rand::random);

    if cli.tui {
        run_tui(&cli, &scenario_name, &mut scenario, seed);
        return;
    }

    let calculator = scenario.build();
    let slider = scenario.slider();
    let panel_type = cli
        .panel_type
        .clone()
        .unwrap_or_else(|| scenario.ui.default_panel_type.clone());
    let panels = cli.panels.unwrap_or(i64::from(slider.default));
    let financials = cli.financials || scenario.ui.financials;

    let input = SimulationInput::new(panel_type.clone(), panels).with_financials(financials);
    let result = match calculator.compute(&input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let weather = WeatherPicker::from_ui(&scenario.ui, seed);
    let report = SummaryReport {
        title: &scenario.ui.title,
        weather: weather.label(),
        result: &result,
        site: calculator.site(),
    };
    println!("{report}");
    println!();
    println!("{}", BarChart::production_vs_consumption(&result, calculator.site()));
    println!();
    println!("{}", BarChart::energy_split(&result));

    match breakeven_count(&calculator, &panel_type, slider) {
        Ok(Some(n)) => println!("\nCouverture de la consommation à partir de {n} panneaux"),
        Ok(None) => println!(
            "\nConsommation non couverte entre {} et {} panneaux",
            slider.min, slider.max
        ),
        Err(e) => error!("breakeven search failed: {e}"),
    }

    if let Some(ref path) = cli.sweep_out {
        let rows = match sweep(&calculator, &panel_type, slider, financials) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        };
        if let Err(e) = export_csv(&rows, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), rows = rows.len(), "sweep written");
    }

    if cli.serve {
        serve_api(&cli, calculator, slider);
    }
}

#[cfg(feature = "api")]
fn serve_api(
    cli: &CliOptions,
    calculator: pv_sim::sim::balance::EnergyBalanceCalculator,
    slider: pv_sim::sim::sweep::SliderRange,
) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(pv_sim::api::AppState { calculator, slider });
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port.unwrap_or(cli::DEFAULT_PORT)));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(pv_sim::api::serve(state, addr)) {
        eprintln!("error: server failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve_api(
    cli: &CliOptions,
    _calculator: pv_sim::sim::balance::EnergyBalanceCalculator,
    _slider: pv_sim::sim::sweep::SliderRange,
) {
    let _ = cli.port;
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}

#[cfg(feature = "tui")]
fn run_tui(cli: &CliOptions, name: &str, scenario: &mut ScenarioConfig, seed: u64) {
    if let Some(ref panel_type) = cli.panel_type {
        if let Err(e) = scenario.catalog().get(panel_type) {
            eprintln!("error: {e}");
            process::exit(1);
        }
        scenario.ui.default_panel_type.clone_from(panel_type);
    }
    if let Some(n) = cli.panels {
        scenario.ui.slider_default = scenario.slider().clamp(n);
    }
    scenario.ui.financials |= cli.financials;

    let app = pv_sim::tui::runtime::App::from_scenario(name, scenario.clone(), seed);
    if let Err(e) = pv_sim::tui::run(app) {
        eprintln!("error: TUI crashed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_cli: &CliOptions, _name: &str, _scenario: &mut ScenarioConfig, _seed: u64) {
    eprintln!("error: --tui requires building with `--features tui`");
    process::exit(1);
}
