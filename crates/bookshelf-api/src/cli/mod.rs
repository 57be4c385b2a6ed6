//! CLI command definitions for the `bookshelf` binary.
//!
//! Uses clap derive macros for argument parsing. Running without a
//! subcommand is the same as `bookshelf serve`: the serve flags and their
//! `BOOKSHELF_*` env fallbacks are also accepted at the top level.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use bookshelf_types::config::ServerConfig;

/// Serve a book catalogue over HTTP.
#[derive(Parser)]
#[command(name = "bookshelf", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default tracing directive for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Serve settings for this invocation: the `serve` subcommand's when
    /// given, the top-level ones otherwise.
    pub fn into_serve_args(self) -> ServeArgs {
        match self.command {
            Some(Commands::Serve(args)) => args,
            _ => self.serve,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve(ServeArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Listener and database overrides. Unset values come from `config.toml`.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Interface to bind to.
    #[arg(long, env = "BOOKSHELF_HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "BOOKSHELF_PORT")]
    pub port: Option<u16>,

    /// sqlx database URL (default: `{data_dir}/bookshelf.db`).
    #[arg(long, env = "BOOKSHELF_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// Layer command-line values over the file configuration.
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database_url) = self.database_url {
            config.database_url = Some(database_url);
        }
        config
    }
}
