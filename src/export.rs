//! CSV export for daily price series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::prices::PriceSeries;

/// Column header for CSV price export.
const HEADER: &str = "date,hour,price_eur_kwh";

/// Exports a day's prices to a CSV file at the given path.
///
/// Writes a header row followed by one row per price point in hour order.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(series: &PriceSeries, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(series, buf)
}

/// Writes a day's prices as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(series: &PriceSeries, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    let date = series.date().to_string();
    for p in series.points() {
        wtr.write_record(&[
            date.clone(),
            p.hour.to_string(),
            format!("{:.4}", p.price_eur_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
