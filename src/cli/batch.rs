//! Batch command - classify many names, one JSON line each

use anyhow::{Context, Result};
use ngender::request::{handle, ApiEnvelope, GuessRequest};
use ngender::{Classifier, Mode};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::info;

pub fn run(classifier: &Classifier, input: Option<&Path>, mode: Mode, nolimit: bool) -> Result<()> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut classified = 0usize;
    let mut rejected = 0usize;

    for line in reader.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let result = handle(classifier, &GuessRequest::new(line, mode, nolimit));
        if result.is_ok() {
            classified += 1;
        } else {
            rejected += 1;
        }
        let envelope = ApiEnvelope::from_result(result);
        writeln!(out, "{}", serde_json::to_string(&envelope)?)?;
    }
    out.flush()?;

    info!("Batch finished: {} classified, {} rejected", classified, rejected);
    Ok(())
}
