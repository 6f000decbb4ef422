//! Login, logout and status commands

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};
use tracing::warn;

use crate::{DogeError, commands::AppContext, output};

type Result<T> = std::result::Result<T, DogeError>;

/// Execute the login command
///
/// Missing name or email are prompted for, unless quiet.
///
/// # Errors
/// Returns `DogeError::LoginFailed` if the service rejects the login, or
/// `DogeError::InvalidInput` if a value is missing and cannot be prompted for.
pub async fn login(ctx: &mut AppContext, name: Option<String>, email: Option<String>) -> Result<()> {
    let name = match name {
        Some(name) => name,
        None => prompt("Name", ctx.quiet)?,
    };
    let email = match email {
        Some(email) => email,
        None => prompt("Email", ctx.quiet)?,
    };

    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() {
        return Err(DogeError::InvalidInput("Name and email must not be empty".into()));
    }

    if !ctx.session.login(name, email).await {
        return Err(DogeError::LoginFailed);
    }

    let user = ctx.require_user()?.clone();
    ctx.favorites.switch_identity(Some(&user))?;
    clear_last_search(ctx);

    ctx.info(format!("Logged in as {} <{}>", user.name.bold(), user.email));
    if !ctx.favorites.is_empty() {
        ctx.info(format!("{} favorite(s) restored", ctx.favorites.len()));
    }
    Ok(())
}

/// Execute the logout command
///
/// Local state is cleared even if the service cannot be reached.
///
/// # Errors
/// Returns `DogeError` if the favorites view cannot be reset.
pub async fn logout(ctx: &mut AppContext) -> Result<()> {
    ctx.session.logout().await;
    ctx.favorites.switch_identity(None)?;
    clear_last_search(ctx);

    ctx.info("Logged out");
    Ok(())
}

/// Execute the status command
pub fn status(ctx: &AppContext) {
    match (ctx.session.current_user(), ctx.session.remaining()) {
        (Some(user), Some(left)) => {
            if ctx.quiet {
                println!("{}", user.email);
            } else {
                println!("Logged in as {} <{}>", user.name.bold(), user.email);
                println!("Session expires in {}", output::remaining(left));
                println!("Favorites: {}", ctx.favorites.len());
            }
        }
        _ => ctx.info("Not logged in".yellow()),
    }
}

fn prompt(label: &str, quiet: bool) -> Result<String> {
    if quiet {
        return Err(DogeError::InvalidInput(format!(
            "{label} is required (pass --{})",
            label.to_lowercase()
        )));
    }

    Input::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .interact_text()
        .map_err(|e| DogeError::InvalidInput(format!("Failed to read input: {e}")))
}

fn clear_last_search(ctx: &AppContext) {
    if let Err(e) = ctx.db.clear_last_search() {
        warn!(error = %e, "could not clear last search");
    }
}
