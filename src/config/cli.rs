//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// xrpl-sale: command-line client for the XRPL.Sale API
///
/// Calls API endpoints and signs, verifies or parses webhook payloads.
#[derive(Debug, Parser)]
#[command(name = "xrpl-sale")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API key sent as a Bearer token
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Target environment: production or testnet
    #[arg(long, global = true)]
    pub environment: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Number of retries after a network failure
    #[arg(long = "max-retries", global = true)]
    pub max_retries: Option<u32>,

    /// Delay before the first retry, in milliseconds
    #[arg(long = "retry-delay-ms", global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Secret for signing and verifying webhook payloads
    #[arg(long = "webhook-secret", global = true)]
    pub webhook_secret: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for xrpl-sale
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path (defaults to the user configuration directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check that the API is reachable
    Ping,

    /// Show the platform status
    Status,

    /// Send an arbitrary API request and print the JSON response
    Request {
        /// HTTP method: GET, POST, PATCH or DELETE
        method: String,

        /// Path below the API base URL, e.g. /projects
        path: String,

        /// JSON request body
        #[arg(long)]
        data: Option<String>,

        /// Query parameter in 'Key=Value' format (can be specified multiple times)
        #[arg(long = "query", value_name = "K=V")]
        query: Vec<String>,
    },

    /// Print the signature header value for a payload file
    Sign {
        /// File containing the raw payload
        #[arg(long)]
        payload: PathBuf,
    },

    /// Check a payload file against a signature
    Verify {
        /// File containing the raw payload
        #[arg(long)]
        payload: PathBuf,

        /// Signature header value, e.g. sha256=...
        #[arg(long)]
        signature: String,
    },

    /// Parse a payload file into a webhook event
    Parse {
        /// File containing the raw payload
        #[arg(long)]
        payload: PathBuf,
    },
}

impl Command {
    /// Returns true if the command calls the API and needs an API key.
    #[must_use]
    pub const fn needs_api(&self) -> bool {
        matches!(self, Self::Ping | Self::Status | Self::Request { .. })
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
