use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lanno::cli::commands::Cli;
use lanno::cli::handlers;

fn main() {
    let cli = Cli::parse();

    if let Some(option) = cli.misplaced_option() {
        Cli::command()
            .error(
                ErrorKind::ArgumentConflict,
                format!("'{}' must come before <PATH>", option),
            )
            .exit();
    }

    // No path launches the browser; a path applies one command and exits
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
