use std::env;
use std::path::PathBuf;

/// Default API port.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub panel_type: Option<String>,
    pub panels: Option<i64>,
    pub financials: bool,
    pub seed: Option<u64>,
    pub sweep_out: Option<PathBuf>,
    pub serve: bool,
    pub port: Option<u16>,
    pub tui: bool,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--panel-type" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --panel-type (expected a catalog name)")?;
                opts.panel_type = Some(name.to_string());
            }
            "--panels" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --panels (expected an integer)")?;
                let n = raw
                    .parse::<i64>()
                    .map_err(|_| format!("--panels value \"{raw}\" is not a valid integer"))?;
                opts.panels = Some(n);
            }
            "--financials" => opts.financials = true,
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let s = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(s);
            }
            "--sweep-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --sweep-out (expected a file path)")?;
                if opts.sweep_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--sweep-out provided more than once".to_string());
                }
            }
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let p = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                opts.port = Some(p);
            }
            "--tui" => opts.tui = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    if opts.serve && opts.tui {
        return Err("arguments `--serve` and `--tui` are mutually exclusive".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("pv-sim: residential photovoltaic sizing calculator");
    eprintln!();
    eprintln!("Usage: pv-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>       Load scenario from TOML config file");
    eprintln!("  --preset <name>         Use a built-in preset (salma, classic, residential, projet)");
    eprintln!("  --panel-type <name>     Panel technology (default from the scenario)");
    eprintln!("  --panels <n>            Number of panels (default from the scenario)");
    eprintln!("  --financials            Show annual savings and ROI");
    eprintln!("  --seed <u64>            Seed for the weather banner");
    eprintln!("  --sweep-out <path>      Export a sweep over the slider range to CSV");
    eprintln!("  --serve                 Start the REST API server (feature `api`)");
    eprintln!("  --port <u16>            API server port (default: {DEFAULT_PORT})");
    eprintln!("  --tui                   Open the interactive form (feature `tui`)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the salma preset is used.");
}
