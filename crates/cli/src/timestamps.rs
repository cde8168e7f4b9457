use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Column holding event times (seconds) in CSV input.
pub const TIME_COLUMN: &str = "time";

/// Read event timestamps from `.csv` (column `time`), `.json` (array of
/// numbers), or whitespace-separated text.
pub fn read_timestamps(path: &Path) -> Result<Vec<f64>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => read_csv(path),
        Some("json") => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {} as a JSON array of numbers", path.display()))
        }
        _ => {
            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            parse_text(&text)
        }
    }
}

fn read_csv(path: &Path) -> Result<Vec<f64>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([col(TIME_COLUMN).cast(DataType::Float64)])
        .collect()
        .with_context(|| format!("reading column `{TIME_COLUMN}` from {}", path.display()))?;
    let times = df.column(TIME_COLUMN)?.f64()?;
    times
        .into_iter()
        .enumerate()
        .map(|(row, t)| t.with_context(|| format!("empty `{TIME_COLUMN}` at row {row}")))
        .collect()
}

fn parse_text(text: &str) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for (i, tok) in text.split_whitespace().enumerate() {
        match tok.parse::<f64>() {
            Ok(t) => out.push(t),
            Err(_) => bail!("token {i} ({tok:?}) is not a number"),
        }
    }
    Ok(out)
}
