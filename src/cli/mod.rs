//! CLI module - Command-line interface for catalog-filter
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

/// catalog-filter - Keeps DRM shows with episodes and trims them to image, slug and title
#[derive(Debug, Parser)]
#[command(name = "catalog-filter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default search paths
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on, overrides PORT
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Filter a request body from a file or stdin and print the result
    Filter {
        /// JSON file holding a `{"payload": [...]}` body; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Create default config file
    Init,
}

impl Cli {
    /// Resolves the effective config: defaults, file, environment, then flags.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_with(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(Commands::Serve { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host.clone_from(host);
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}

pub use commands::*;
