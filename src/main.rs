use clap::Parser;
use credvault::cli::commands;
use credvault::cli::commands::update::UpdateArgs;
use credvault::cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to stderr, filtered by `CREDVAULT_LOG` (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("CREDVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(filter)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref service,
            ref username,
            ref notes,
            generate,
            length,
        } => commands::add::execute(&cli, service, username, notes, generate, length),
        Commands::Get {
            ref service,
            no_copy,
        } => commands::get::execute(&cli, service, no_copy),
        Commands::List => commands::list::execute(&cli),
        Commands::Search { ref query } => commands::search::execute(&cli, query),
        Commands::Update {
            ref service,
            ref username,
            ref notes,
            password,
            generate,
            length,
        } => commands::update::execute(
            &cli,
            service,
            &UpdateArgs {
                username: username.as_deref(),
                notes: notes.as_deref(),
                prompt_password: password,
                generate,
                length,
            },
        ),
        Commands::Delete { ref service, force } => commands::delete::execute(&cli, service, force),
        Commands::Generate {
            length,
            no_symbols,
            no_numbers,
            copy,
        } => commands::generate::execute(&cli, length, no_symbols, no_numbers, copy),
        Commands::Strength { ref password } => commands::strength::execute(password.as_deref()),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
