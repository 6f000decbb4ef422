//! Search commands - run a search and page through it
//!
//! The last committed page is saved so `next` and `prev` pick up where the
//! previous invocation left off.

use tracing::warn;

use crate::{
    DogeError,
    cli::SearchArgs,
    commands::AppContext,
    output,
    search::{SearchOutcome, SearchPage},
};

type Result<T> = std::result::Result<T, DogeError>;

/// Execute the search command
///
/// # Errors
/// Returns an error without a valid session, for an invalid query, or if
/// the service request fails.
pub async fn execute(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    ctx.require_user()?;

    let query = args.to_query(&ctx.config);
    let outcome = ctx.search.search(query).await?;
    show(ctx, &outcome);
    Ok(())
}

/// Execute the next command
///
/// # Errors
/// Returns an error without a valid session or saved search, or if the
/// service request fails.
pub async fn next(ctx: &AppContext) -> Result<()> {
    resume(ctx)?;

    match ctx.search.next_page().await? {
        Some(outcome) => show(ctx, &outcome),
        None => ctx.info("Already on the last page."),
    }
    Ok(())
}

/// Execute the prev command
///
/// # Errors
/// Returns an error without a valid session or saved search, or if the
/// service request fails.
pub async fn prev(ctx: &AppContext) -> Result<()> {
    resume(ctx)?;

    match ctx.search.prev_page().await? {
        Some(outcome) => show(ctx, &outcome),
        None => ctx.info("Already on the first page."),
    }
    Ok(())
}

fn resume(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;

    let saved = ctx
        .db
        .load_last_search()?
        .ok_or_else(|| DogeError::InvalidInput("No previous search. Run 'dogematch search' first.".into()))?;
    ctx.search.resume(saved);
    Ok(())
}

fn show(ctx: &AppContext, outcome: &SearchOutcome) {
    let Some(page) = outcome.page() else {
        return;
    };

    if let Err(e) = ctx.db.save_last_search(&page.to_saved()) {
        warn!(error = %e, "could not save search, next/prev will not resume it");
    }
    print_page(ctx, page);
}

fn print_page(ctx: &AppContext, page: &SearchPage) {
    if page.dogs.is_empty() {
        ctx.info("No dogs match these filters.");
        return;
    }

    for dog in &page.dogs {
        println!("{}", output::dog_line(dog, ctx.favorites.contains(&dog.id), ctx.quiet));
    }
    ctx.info(output::page_footer(&page.info(), page.has_prev(), page.has_next()));
}
