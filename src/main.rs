//! Dogematch CLI application entry point
//!
//! Command-line client for the dog adoption service: log in, search dogs,
//! keep favorites and get matched with one of them.
//!
//! # Usage
//!
//! ```bash
//! # Log in (prompts for missing values)
//! dogematch login --name Ana --email ana@x.com
//!
//! # Search and page through the results
//! dogematch search -b Boxer -b Akita --age-max 5 --sort age:asc
//! dogematch next
//! dogematch prev
//!
//! # Favorites and matching
//! dogematch favorites add <ID> <ID>
//! dogematch match
//!
//! # Quiet mode (only ids)
//! dogematch -q search -b Boxer
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/dogematch/config.toml` on Linux) and can be overridden with
//! `DOGEMATCH_*` environment variables. Logging goes to stderr and is
//! controlled with `RUST_LOG`.

use dogematch::{
    DogeError,
    cli::{Cli, Commands},
    commands::{self, AppContext, auth},
    config::DogeConfig,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, DogeError>;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Build the context for a command that talks to the service
fn context(config: DogeConfig, command: &Commands, quiet: bool) -> Result<AppContext> {
    let ctx = AppContext::new(config, quiet)?;

    if command.requires_auth() {
        ctx.require_user()?;
    }
    Ok(ctx)
}

/// Run one command
///
/// Config commands run without opening the database.
async fn run(config: DogeConfig, command: Commands, quiet: bool) -> Result<()> {
    match command {
        Commands::Config { command } => commands::config(config, &command, quiet),
        command => {
            let mut ctx = context(config, &command, quiet)?;
            dispatch(&mut ctx, command).await
        }
    }
}

async fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { name, email } => auth::login(ctx, name, email).await,
        Commands::Logout => auth::logout(ctx).await,
        Commands::Status => {
            auth::status(ctx);
            Ok(())
        }
        Commands::Breeds => commands::breeds(ctx).await,
        Commands::Search(args) => commands::search::execute(ctx, &args).await,
        Commands::Next => commands::search::next(ctx).await,
        Commands::Prev => commands::search::prev(ctx).await,
        Commands::Favorites { command } => commands::favorites(ctx, &command).await,
        Commands::Match => commands::matching(ctx).await,
        Commands::Config { command } => commands::config(ctx.config.clone(), &command, ctx.quiet),
    }
}

/// Main entry point for the dogematch application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `DogeError` if configuration loading fails, database initialization fails,
/// or any command handler returns an error.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let config = DogeConfig::load()?;
    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;

    run(config, cli.get_command(), quiet).await
}
