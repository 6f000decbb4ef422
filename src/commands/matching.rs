//! Match command - let the service pick one dog out of the favorites

use colored::Colorize;

use crate::{DogeError, commands::AppContext, output};

type Result<T> = std::result::Result<T, DogeError>;

/// Execute the match command
///
/// # Errors
/// Returns an error without a valid session, with no favorites, or if
/// either service request fails.
pub async fn execute(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;

    ctx.info(format!("Finding a match among {} favorite(s)...", ctx.favorites.len()));
    let dog = ctx.favorites.generate_match().await?;

    ctx.info(format!("{}", "It's a match!".bold().magenta()));
    println!("{}", output::dog_card(&dog, ctx.quiet));
    Ok(())
}
