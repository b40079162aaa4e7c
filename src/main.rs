mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    config::logging::init_logging(args.verbose, args.quiet);
    cli::context::init(args.config.as_deref());

    let result = match &args.command {
        Commands::Audit(audit) => cli::commands::audit::execute(audit),
        Commands::Keys { action } => cli::commands::keys::execute(action),
        Commands::Report(report) => cli::commands::report::execute(report),
        Commands::Console => cli::commands::console::execute(),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
