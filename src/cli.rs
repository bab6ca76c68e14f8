//! Hand-rolled CLI argument parsing for the advisor binary.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct CliOptions {
    /// Day to query; `None` means today.
    pub date: Option<NaiveDate>,
    /// Requested charging duration in whole hours.
    pub hours: Option<usize>,
    /// Energy to charge in kWh.
    pub energy_kwh: Option<f32>,
    /// Print the daily price table instead of a recommendation.
    pub prices_only: bool,
    /// Optional TOML configuration file.
    pub config: Option<PathBuf>,
    /// Optional CSV export path for the day's prices.
    pub export: Option<PathBuf>,
    #[cfg(feature = "api")]
    /// Start the REST API server instead of a one-shot query.
    pub serve: bool,
    #[cfg(feature = "api")]
    /// API server port.
    pub port: u16,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            date: None,
            hours: None,
            energy_kwh: None,
            prices_only: false,
            config: None,
            export: None,
            #[cfg(feature = "api")]
            serve: false,
            #[cfg(feature = "api")]
            port: 3000,
        }
    }
}

/// Parses options from an argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first offending argument.
pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--date" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --date (expected YYYY-MM-DD)".to_string())?;
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| format!("invalid date \"{raw}\", use YYYY-MM-DD"))?;
                opts.date = Some(date);
            }
            "--hours" => {
                i += 1;
                let raw = args.get(i).ok_or_else(|| {
                    "missing value for --hours (expected a whole number of hours)".to_string()
                })?;
                let hours: usize = raw
                    .parse()
                    .map_err(|_| format!("invalid --hours value \"{raw}\""))?;
                opts.hours = Some(hours);
            }
            "--energy" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --energy (expected kWh)".to_string())?;
                let kwh: f32 = raw
                    .parse()
                    .map_err(|_| format!("invalid --energy value \"{raw}\""))?;
                opts.energy_kwh = Some(kwh);
            }
            "--prices-only" => {
                opts.prices_only = true;
            }
            "--config" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --config (expected a TOML path)".to_string())?;
                opts.config = Some(PathBuf::from(raw));
            }
            "--export" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --export (expected a CSV path)".to_string())?;
                opts.export = Some(PathBuf::from(raw));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                opts.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| "missing value for --port (expected a u16)".to_string())?;
                opts.port = raw
                    .parse()
                    .map_err(|_| format!("invalid --port value \"{raw}\""))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.prices_only && (opts.hours.is_some() || opts.energy_kwh.is_some()) {
        return Err(
            "--prices-only cannot be combined with --hours or --energy; choose one mode"
                .to_string(),
        );
    }

    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn defaults_to_todays_recommendation() {
        let opts = parse_args_from(&[]).expect("parse should succeed");
        assert!(opts.date.is_none());
        assert!(opts.hours.is_none());
        assert!(!opts.prices_only);
    }

    #[test]
    fn parses_full_request() {
        let opts = parse_args_from(&args(&[
            "--date",
            "2024-01-15",
            "--hours",
            "4",
            "--energy",
            "30.5",
        ]))
        .expect("parse should succeed");
        assert_eq!(opts.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(opts.hours, Some(4));
        assert_eq!(opts.energy_kwh, Some(30.5));
    }

    #[test]
    fn rejects_malformed_date() {
        let err = parse_args_from(&args(&["--date", "15/01/2024"])).unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));
    }

    #[test]
    fn rejects_missing_value() {
        let err = parse_args_from(&args(&["--hours"])).unwrap_err();
        assert!(err.contains("--hours"));
    }

    #[test]
    fn rejects_unknown_argument() {
        let err = parse_args_from(&args(&["--frobnicate"])).unwrap_err();
        assert!(err.contains("unknown argument"));
    }

    #[test]
    fn prices_only_excludes_request_flags() {
        let err = parse_args_from(&args(&["--prices-only", "--hours", "3"])).unwrap_err();
        assert!(err.contains("--prices-only"));
    }

    #[test]
    fn parses_export_path() {
        let opts = parse_args_from(&args(&["--prices-only", "--export", "prices.csv"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.export.as_deref().and_then(|p| p.to_str()),
            Some("prices.csv")
        );
    }
}
