use std::path::Path;

use crate::cli::output::{format_record, record_json};
use crate::io::event_log::{self, Category};
use crate::io::sidecar;

/// Apply `tokens` to `path` in the sidecar of `dir` and print the result.
pub fn cmd_annotate(
    dir: &Path,
    path: &str,
    tokens: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = sidecar::apply_command(dir, path, tokens).inspect_err(|e| {
        event_log::error(Category::Sidecar, e.to_string());
    })?;

    if json {
        println!("{}", record_json(&record)?);
    } else {
        for line in format_record(&record) {
            println!("{}", line);
        }
    }
    Ok(())
}
