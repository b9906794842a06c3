//! Configuration Module
//!
//! Parses command line flags (with environment fallbacks) into the proxy's
//! startup configuration.

use std::net::IpAddr;
use std::time::Duration;

use clap::{parser::ValueSource, ArgMatches, CommandFactory, FromArgMatches, Parser};
use reqwest::Url;

use crate::error::{ProxyError, Result};

/// Command line interface.
#[derive(Debug, Clone, Parser)]
#[command(name = "caching-proxy")]
#[command(about = "Caching HTTP proxy in front of a single origin", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, env = "PROXY_PORT", required_unless_present = "clear_cache")]
    pub port: Option<u16>,

    /// Base URL of the origin server, e.g. http://dummyjson.com
    #[arg(long, env = "PROXY_ORIGIN", required_unless_present = "clear_cache")]
    pub origin: Option<String>,

    /// Address to bind the listener to
    #[arg(long, env = "PROXY_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Give up on an origin request after this many seconds (no limit when unset)
    #[arg(long, env = "PROXY_ORIGIN_TIMEOUT_SECS")]
    pub origin_timeout_secs: Option<u64>,

    /// Empty the cache and exit instead of starting the proxy
    #[arg(long)]
    pub clear_cache: bool,
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the proxy
    Serve(Config),
    /// Clear the cache and exit
    ClearCache,
}

/// Proxy configuration parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Listen address
    pub host: IpAddr,
    /// Listen port, never zero
    pub port: u16,
    /// Origin base URL; request targets are appended to it verbatim
    pub origin: String,
    /// Optional deadline for a whole origin request
    pub origin_timeout: Option<Duration>,
}

impl Config {
    /// Creates a Config for `origin` listening on `port` with defaults for
    /// everything else.
    pub fn new(port: u16, origin: impl Into<String>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port,
            origin: origin.into(),
            origin_timeout: None,
        }
    }

    /// Parses the process arguments.
    ///
    /// Exits with a usage message when clap rejects them.
    pub fn from_args() -> Result<Command> {
        Self::from_matches(&Cli::command().get_matches())
    }

    /// Builds the command from clap matches.
    ///
    /// `--clear-cache` only conflicts with `--port`/`--origin` given on the
    /// command line; values picked up from the environment are ignored.
    pub fn from_matches(matches: &ArgMatches) -> Result<Command> {
        let cli = Cli::from_arg_matches(matches)
            .map_err(|e| ProxyError::InvalidConfig(e.to_string()))?;

        if cli.clear_cache {
            let explicit = ["port", "origin"]
                .into_iter()
                .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine));
            if let Some(id) = explicit {
                return Err(ProxyError::InvalidConfig(format!(
                    "--clear-cache cannot be used with --{}",
                    id
                )));
            }
        }

        Self::from_cli(cli)
    }

    /// Validates parsed flags.
    ///
    /// # Errors
    /// Returns `ProxyError::InvalidConfig` when the port is zero or the origin
    /// is empty or not an absolute http(s) URL.
    pub fn from_cli(cli: Cli) -> Result<Command> {
        if cli.clear_cache {
            return Ok(Command::ClearCache);
        }

        let port = match cli.port {
            Some(0) | None => {
                return Err(ProxyError::InvalidConfig(
                    "--port must be a positive number".to_string(),
                ))
            }
            Some(port) => port,
        };

        let origin = cli.origin.unwrap_or_default();
        validate_origin(&origin)?;

        Ok(Command::Serve(Self {
            host: cli.host,
            port,
            origin,
            origin_timeout: cli.origin_timeout_secs.map(Duration::from_secs),
        }))
    }
}

fn validate_origin(origin: &str) -> Result<()> {
    if origin.trim().is_empty() {
        return Err(ProxyError::InvalidConfig(
            "--origin must not be empty".to_string(),
        ));
    }

    let url = Url::parse(origin)
        .map_err(|e| ProxyError::InvalidConfig(format!("--origin '{}': {}", origin, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ProxyError::InvalidConfig(format!(
            "--origin must use http or https, got '{}'",
            scheme
        ))),
    }
}
