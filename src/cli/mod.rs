//! CLI definitions and entry point.

use crate::config::CliOverrides;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod commands;

/// Minimal issue tracker served over HTTP (`SQLite`)
#[derive(Parser, Debug)]
#[command(name = "tracking", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: tracking.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (default: ./tracking.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// `SQLite` busy timeout in ms
    #[arg(long, global = true)]
    pub lock_timeout: Option<u64>,

    /// Output as JSON (errors and reports)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web application
    Serve {
        /// Address to listen on (default: 127.0.0.1:5000)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Create the database and apply the schema
    Init {
        /// Overwrite existing DB
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved configuration
    Config,
}

impl Cli {
    /// Config overrides carried by global flags and `serve --bind`.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        let bind = match &self.command {
            Commands::Serve { bind } => bind.map(|addr| addr.to_string()),
            _ => None,
        };
        CliOverrides {
            config: self.config.clone(),
            db: self.db.clone(),
            bind,
            lock_timeout: self.lock_timeout,
        }
    }
}
