//! Advisor entry point: CLI wiring, fetch, optimize, and report.

use std::process;

use chrono::Local;

use charge_advisor::cli::{self, CliOptions};
use charge_advisor::config::AdvisorConfig;
use charge_advisor::export::export_csv;
use charge_advisor::optimizer::WindowOptimizer;
use charge_advisor::report;
use charge_advisor::source::PvpcClient;

fn print_help() {
    eprintln!("charge-advisor — cheapest EV charging window from Spanish PVPC prices");
    eprintln!();
    eprintln!("Usage: charge-advisor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --date <YYYY-MM-DD>   Day to query (default: today)");
    eprintln!("  --hours <n>           Charging duration in whole hours");
    eprintln!("                        (default: derived from energy and charger power)");
    eprintln!("  --energy <kwh>        Energy to charge in kWh (default: from config)");
    eprintln!("  --prices-only         Print the daily price table instead");
    eprintln!("  --config <path>       Load advisor settings from a TOML file");
    eprintln!("  --export <path>       Also write the day's prices to a CSV file");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve               Start the REST API server");
        eprintln!("  --port <u16>          API server port (default: 3000)");
    }
    eprintln!("  --help                Show this help message");
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        process::exit(0);
    }
    match cli::parse_args_from(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            print_help();
            process::exit(1);
        }
    }
}

fn load_config(opts: &CliOptions) -> AdvisorConfig {
    let config = match opts.config {
        Some(ref path) => match AdvisorConfig::from_toml_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => AdvisorConfig::default(),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn main() {
    let opts = parse_args();
    let config = load_config(&opts);

    let client = match PvpcClient::new(&config.source) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    #[cfg(feature = "api")]
    if opts.serve {
        use std::net::SocketAddr;
        use std::sync::{Arc, Mutex};

        use charge_advisor::cache::PriceCache;

        let state = Arc::new(charge_advisor::api::AppState {
            client,
            cache: Mutex::new(PriceCache::new()),
            config,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], opts.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(charge_advisor::api::serve(state, addr));
        return;
    }

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });

    let date = opts.date.unwrap_or_else(|| Local::now().date_naive());

    // One-shot mode fetches exactly once; the per-date cache only pays off
    // in the long-lived API server.
    let series = match rt.block_on(client.fetch_day(date)) {
        Ok(series) => series,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if let Some(ref path) = opts.export {
        if let Err(e) = export_csv(&series, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Prices written to {}", path.display());
    }

    if opts.prices_only {
        println!("{}", report::format_daily_prices(&series));
        return;
    }

    let energy_kwh = opts.energy_kwh.unwrap_or(config.charger.default_energy_kwh);
    // A derived duration is capped at the day's length; an explicit --hours
    // is passed through so out-of-range requests surface as errors.
    let duration_hours = match opts.hours {
        Some(h) => h,
        None => WindowOptimizer::duration_for_energy(energy_kwh, config.charger.power_kw)
            .min(series.len()),
    };

    match WindowOptimizer::find_best_window(&series, duration_hours, energy_kwh) {
        Ok(window) => {
            println!("{window}");
            println!();
            println!("{}", report::explanation(&window));
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
