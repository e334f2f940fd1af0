// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

use clap::Parser;

use swing_overlay::cli::args::{Cli, Commands};
use swing_overlay::cli::logging::{set_verbosity, Verbosity};
use swing_overlay::cli::{inspect, probe, render};
use swing_overlay::error;

fn main() {
    let cli = Cli::parse();

    set_verbosity(if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });

    let result = match &cli.command {
        Commands::Inspect(args) => inspect::run_inspect(args),
        Commands::Probe(args) => probe::run_probe(args),
        Commands::Render(args) => render::run_render(args),
    };

    if let Err(e) = result {
        error!("{e}");
        process::exit(1);
    }
}
