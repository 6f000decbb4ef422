//! Breeds command - list every breed known to the service

use colored::Colorize;

use crate::{DogeError, commands::AppContext};

type Result<T> = std::result::Result<T, DogeError>;

/// Execute the breeds command
///
/// A failed fetch is reported on stderr; it does not fail the command.
///
/// # Errors
/// Returns `DogeError::NotAuthenticated` without a valid session.
pub async fn execute(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;

    let breeds = ctx.search.list_breeds().await;

    if let Some(error) = ctx.search.breeds_error() {
        eprintln!("{}", error.red());
        return Ok(());
    }

    if breeds.is_empty() {
        ctx.info("No breeds found.");
        return Ok(());
    }

    ctx.info(format!("{} breeds:", breeds.len()));
    for breed in breeds {
        if ctx.quiet {
            println!("{breed}");
        } else {
            println!("  {breed}");
        }
    }
    Ok(())
}
