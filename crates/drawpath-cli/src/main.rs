//! Drawpath CLI - shortest paths over draw.io diagrams

mod cli;
mod report;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run(), once the CLI flags are known
    let app = cli::DrawpathApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
