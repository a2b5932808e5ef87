mod annotate;
pub use annotate::cmd_annotate;

use std::path::PathBuf;

use crate::cli::commands::Cli;

/// Directory to work in: `-C` if given, else the current directory
pub fn resolve_dir(dir: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match dir {
        Some(d) => {
            let abs = std::fs::canonicalize(d)
                .map_err(|e| format!("cannot resolve -C path '{}': {}", d, e))?;
            Ok(abs)
        }
        None => Ok(std::env::current_dir()?),
    }
}

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = resolve_dir(cli.dir.as_deref())?;
    match cli.path {
        // No path → interactive browser
        None => crate::tui::run(dir),
        Some(path) => cmd_annotate(&dir, &path, &cli.tokens, cli.json),
    }
}
