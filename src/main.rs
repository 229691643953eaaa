//! spec-tracker CLI entry point.

use clap::Parser;
use st::cli::commands;
use st::cli::{Cli, Commands};
use st::error::Error;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.dry_run {
        st::DRY_RUN.store(true, std::sync::atomic::Ordering::Relaxed);
    }
    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let json = cli.json;
    // A positional store argument wins over --store / ST_STORE.
    let global: Option<&Path> = cli.store.as_deref();

    match &cli.command {
        Commands::Extract {
            document,
            store_path,
        } => commands::extract::execute(document, store_path.as_deref().or(global), json),

        Commands::Done(args) => {
            commands::status::execute_done(args, args.store_path.as_deref().or(global), json)
        }
        Commands::Status {
            id,
            status,
            store_path,
            spec,
        } => commands::status::execute(
            id,
            status,
            spec.as_deref(),
            store_path.as_deref().or(global),
            json,
        ),

        Commands::Progress { store_path } => {
            commands::progress::execute(store_path.as_deref().or(global), json)
        }
        Commands::List(args) => commands::list::execute(args, args.store_path.as_deref().or(global), json),

        Commands::Next { store_path } => commands::next::execute(store_path.as_deref().or(global), json),
        Commands::Implement(args) => {
            commands::next::execute_implement(args, args.store_path.as_deref().or(global), json)
        }

        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(json),
    }
}
