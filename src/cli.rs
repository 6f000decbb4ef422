//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for dogematch using the `clap` crate.
//!
//! # Commands
//!
//! - **login** / **logout** / **status**: manage the local session
//! - **breeds**: list every breed the service knows
//! - **search**, **next**, **prev**: filtered, paginated search
//! - **favorites**: manage the favorites of the logged-in user
//! - **match**: let the service pick one dog out of the favorites
//! - **config**: read and write configuration keys
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use dogematch::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["dogematch", "search", "-b", "Boxer", "--age-max", "5"]);
//! assert!(matches!(cli.get_command(), Commands::Search(_)));
//! ```

use clap::{Args, Parser, Subcommand};

use crate::config::DogeConfig;
use crate::search::{SearchQuery, SortOrder};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "dogematch")]
#[command(about = "Search adoptable dogs, keep favorites and get matched", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print ids)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Log in with a name and email
    Login {
        /// Display name (prompted for when omitted)
        #[arg(short = 'n', long = "name")]
        name: Option<String>,

        /// Email address (prompted for when omitted)
        #[arg(short = 'e', long = "email")]
        email: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show who is logged in and for how long (default)
    Status,

    /// List all breeds
    Breeds,

    /// Search dogs by breed and age
    #[command(visible_alias = "s")]
    Search(SearchArgs),

    /// Show the next page of the last search
    #[command(visible_alias = "n")]
    Next,

    /// Show the previous page of the last search
    #[command(visible_alias = "p")]
    Prev,

    /// Manage favorites
    #[command(visible_alias = "fav")]
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },

    /// Pick a match out of the favorites
    Match,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Filters for the search command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchArgs {
    /// Breed to include (repeatable)
    #[arg(short = 'b', long = "breed", value_name = "BREED")]
    pub breeds: Vec<String>,

    /// Minimum age in years
    #[arg(long = "age-min", value_name = "N")]
    pub age_min: Option<u32>,

    /// Maximum age in years
    #[arg(long = "age-max", value_name = "N")]
    pub age_max: Option<u32>,

    /// Sort as FIELD:DIRECTION, e.g. name:desc
    #[arg(long = "sort", value_name = "FIELD:DIR")]
    pub sort: Option<SortOrder>,

    /// Results per page (defaults to the configured page size)
    #[arg(long = "size", value_name = "N")]
    pub size: Option<u32>,

    /// Offset of the first result
    #[arg(long = "from", value_name = "N")]
    pub from: Option<u32>,
}

impl SearchArgs {
    /// Build a query, filling unset options from `config`
    #[must_use]
    pub fn to_query(&self, config: &DogeConfig) -> SearchQuery {
        SearchQuery::builder()
            .breeds(self.breeds.iter().cloned())
            .age_min(self.age_min)
            .age_max(self.age_max)
            .sort(self.sort.unwrap_or(config.default_sort))
            .size(self.size.unwrap_or(config.page_size))
            .from(self.from)
            .build()
    }
}

/// Favorites subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesCommands {
    /// List favorites
    #[command(visible_alias = "ls")]
    List,

    /// Add dogs by id
    Add {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Remove dogs by id
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(required = true, value_name = "ID")]
        ids: Vec<String>,
    },

    /// Add a dog if absent, remove it if present
    Toggle {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Remove every favorite
    Clear,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., page_size=50)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., api_base_url)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Status if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Status)
    }
}

impl Commands {
    /// Whether the command needs a valid session
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::Config { .. } | Self::Status)
    }
}

/// Split a `KEY=VALUE` setting
///
/// Returns `None` when there is no `=` or the key is empty.
#[must_use]
pub fn parse_setting(setting: &str) -> Option<(&str, &str)> {
    let (key, value) = setting.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
