//! Command-line interface parsing for nutrifetch
//!
//! This module handles parsing of CLI arguments using clap: one subcommand
//! per exposed operation, plus a global --no-cache switch that disables the
//! on-disk response cache for the invocation.

use clap::{Parser, Subcommand};

use crate::data::{autocomplete, search};

/// nutrifetch - food nutrition lookup backed by the FatSecret Platform API
#[derive(Parser, Debug)]
#[command(name = "nutrifetch")]
#[command(about = "Look up food nutrition facts from the FatSecret Platform API")]
#[command(version)]
pub struct Cli {
    /// Skip the on-disk response cache for this invocation
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands, one per exposed operation
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up canonical nutrition facts for a food by name
    ///
    /// Examples:
    ///   nutrifetch nutrition kale
    ///   nutrifetch nutrition "greek yogurt"
    Nutrition {
        /// Free-text food name
        food: String,
    },

    /// Search foods and print the matching summaries
    Search {
        /// Free-text food name
        food: String,
        /// Maximum number of results to request
        #[arg(long, default_value_t = search::DEFAULT_MAX_RESULTS)]
        max: u32,
    },

    /// Fetch the raw detail payload for a FatSecret food id
    Details {
        /// FatSecret food identifier (from a search result)
        food_id: String,
    },

    /// Print autocomplete suggestions for a partial food name
    Suggest {
        /// Partial food name (at least 2 characters)
        query: String,
        /// Maximum number of suggestions (capped at 10 upstream)
        #[arg(long, default_value_t = autocomplete::DEFAULT_MAX_RESULTS)]
        max: u32,
        /// FatSecret region code, e.g. "US"
        #[arg(long)]
        region: Option<String>,
    },
}
