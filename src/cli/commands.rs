//! CLI command definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roomgate")]
#[command(about = "Connection details issuer for real-time rooms", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Token lifetime in seconds (at least 1)
    #[arg(
        long,
        env = "ROOMGATE_TOKEN_TTL",
        default_value_t = 3600,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ttl: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "0.0.0.0:3000", env = "ROOMGATE_BIND")]
        bind: String,
    },

    /// Issue connection details without running the server
    ///
    /// Examples:
    ///   roomgate token demo-room --identity user-abc
    ///   roomgate token demo-room --ttl 600
    Token {
        /// Room to grant access to
        room: String,

        /// Participant identity (random if not specified)
        #[arg(long)]
        identity: Option<String>,
    },

    /// Verify a token and print its claims
    Inspect {
        /// Token to inspect
        token: String,
    },
}
