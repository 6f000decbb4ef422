//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI,
//! including dog listings, match cards and pagination footers.

use colored::Colorize;

use crate::Dog;
use crate::search::PageInfo;

/// Format a dog as a single listing line
///
/// Favorites are marked with a star. In quiet mode only the id is printed.
#[must_use]
pub fn dog_line(dog: &Dog, favorite: bool, quiet: bool) -> String {
    if quiet {
        return dog.id.clone();
    }

    let marker = if favorite { "★".yellow().to_string() } else { " ".to_string() };
    format!(
        "{marker} {} {} ({}, {} {}, {}) [{}]",
        dog.name.bold(),
        "·".dimmed(),
        dog.breed,
        dog.age,
        if dog.age == 1 { "year" } else { "years" },
        dog.zip_code,
        dog.id.dimmed(),
    )
}

/// Format a dog as a multi-line card, used for the match result
#[must_use]
pub fn dog_card(dog: &Dog, quiet: bool) -> String {
    if quiet {
        return dog.id.clone();
    }

    [
        format!("  {}", dog.name.bold().green()),
        format!("  Breed:    {}", dog.breed),
        format!("  Age:      {}", dog.age),
        format!("  Zip code: {}", dog.zip_code),
        format!("  Photo:    {}", dog.img.underline()),
        format!("  Id:       {}", dog.id.dimmed()),
    ]
    .join("\n")
}

/// Footer under a page of results, e.g. "Page 2 of 5 (showing 25 of 120)"
#[must_use]
pub fn page_footer(info: &PageInfo, has_prev: bool, has_next: bool) -> String {
    let mut footer = format!(
        "Page {} of {} (showing {} of {})",
        info.page, info.total_pages, info.showing, info.total
    );

    let hints: Vec<&str> = [(has_prev, "'prev'"), (has_next, "'next'")]
        .into_iter()
        .filter_map(|(shown, hint)| shown.then_some(hint))
        .collect();
    if !hints.is_empty() {
        footer.push_str(&format!(" - {}", hints.join(" / ")));
    }

    footer.dimmed().to_string()
}

/// Human readable duration, e.g. "59m 12s"
#[must_use]
pub fn remaining(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
