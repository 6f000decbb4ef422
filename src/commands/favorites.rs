//! Favorites command - list and edit the logged-in user's favorites

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::{
    Dog, DogeError,
    cli::FavoritesCommands,
    commands::AppContext,
    output,
};

type Result<T> = std::result::Result<T, DogeError>;

/// Execute a favorites subcommand
///
/// # Errors
/// Returns an error without a valid session, if a dog cannot be fetched,
/// or if the favorites cannot be saved.
pub async fn execute(ctx: &AppContext, command: &FavoritesCommands) -> Result<()> {
    ctx.require_user()?;

    match command {
        FavoritesCommands::List => list(ctx),
        FavoritesCommands::Add { ids } => add(ctx, ids).await,
        FavoritesCommands::Remove { ids } => remove(ctx, ids),
        FavoritesCommands::Toggle { id } => toggle(ctx, id).await,
        FavoritesCommands::Clear => clear(ctx),
    }
}

fn list(ctx: &AppContext) -> Result<()> {
    let dogs = ctx.favorites.list();

    if dogs.is_empty() {
        ctx.info("No favorites yet. Add some with 'dogematch favorites add <ID>'.");
        return Ok(());
    }

    ctx.info(format!("Favorites ({}):", dogs.len()));
    for dog in &dogs {
        println!("{}", output::dog_line(dog, true, ctx.quiet));
    }
    Ok(())
}

async fn add(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let dogs = fetch(ctx, ids).await?;

    for dog in dogs {
        let label = dog.name.clone();
        if ctx.favorites.add(dog)? {
            ctx.info(format!("{} {label}", "Added".green()));
        } else {
            ctx.info(format!("{label} is already a favorite"));
        }
    }
    Ok(())
}

fn remove(ctx: &AppContext, ids: &[String]) -> Result<()> {
    for id in ids {
        if ctx.favorites.remove(id)? {
            ctx.info(format!("{} {id}", "Removed".red()));
        } else {
            ctx.info(format!("{id} is not a favorite"));
        }
    }
    Ok(())
}

async fn toggle(ctx: &AppContext, id: &str) -> Result<()> {
    if ctx.favorites.contains(id) {
        return remove(ctx, &[id.to_string()]);
    }

    for dog in fetch(ctx, &[id.to_string()]).await? {
        let label = dog.name.clone();
        if ctx.favorites.toggle(dog)? {
            ctx.info(format!("{} {label}", "Added".green()));
        }
    }
    Ok(())
}

fn clear(ctx: &AppContext) -> Result<()> {
    if ctx.favorites.is_empty() {
        ctx.info("No favorites to clear.");
        return Ok(());
    }

    if !ctx.quiet {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Remove all {} favorites?", ctx.favorites.len()))
            .default(false)
            .interact()
            .map_err(|e| DogeError::InvalidInput(format!("Failed to read input: {e}")))?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.favorites.clear()?;
    ctx.info("Favorites cleared.");
    Ok(())
}

/// Hydrate ids into records, failing on any the service does not know
async fn fetch(ctx: &AppContext, ids: &[String]) -> Result<Vec<Dog>> {
    let dogs = ctx.api.fetch_dogs(ids).await?;

    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| !dogs.iter().any(|d| &d.id == *id))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(DogeError::InvalidInput(format!("Unknown dog id(s): {}", missing.join(", "))));
    }

    Ok(dogs)
}
