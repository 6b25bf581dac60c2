use clap::Parser;
use colored::Colorize;

use scrolldeck::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    scrolldeck::logging::init(cli.verbose, cli.quiet, cli.no_color);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
