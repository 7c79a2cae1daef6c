//! # simplehttp
//!
//! A small facade over `reqwest` that sends GET, PUT, POST, DELETE and HEAD requests
//! to a [`Resource`](crate::http::Resource) (schema, host, optional port, path) and folds the
//! outcome into one `(error, status, headers, body)` envelope.
//!
//! ```no_run
//! use simplehttp::http::{Client, HttpError, ReqwestBackend, Resource};
//!
//! # async fn example() {
//! let client = Client::new(ReqwestBackend::new());
//! let resource = Resource::new("https", "httpbin.org").with_path_appended("/status/404");
//!
//! let response = client.get(&resource, &[]).await;
//! assert_eq!(response.error, Some(HttpError::NotFound));
//! assert_eq!(response.status, Some(404));
//! # }
//! ```
//!
//! The crate also ships the `simplehttp` command-line tool, which resolves targets
//! either from a URL or from a YAML [`catalog`] of named resources.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod printer;

use bytes::Bytes;
use clap::{Args, Parser, Subcommand};
use config::ClientConfig;
use crate::http::{content_type_for_filename, Client, HttpResponse, ReqwestBackend, Resource};
use error::{AppError, CliError};
use indicatif::{ProgressBar, ProgressStyle};
use printer::print_response;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Ordered name/value pairs, applied in sequence
pub type KeyValuePairs = Vec<(String, String)>;

#[derive(Parser)]
#[command(name = "simplehttp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML catalog of named resources
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every verb
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// A URL, or a catalog resource name optionally followed by a path (`name/extra`)
    pub target: String,
    /// Request headers in Name:value format
    pub headers: Vec<String>,
    /// Print all response headers
    #[arg(short, long)]
    pub verbose: bool,
}

/// Request body options for PUT and POST
#[derive(Args, Debug, Clone, Default)]
pub struct BodyArgs {
    /// Request body
    #[arg(short, long, conflicts_with = "data_file")]
    pub data: Option<String>,
    /// Read the request body from a file; `.txt`, `.jpg` and `.png` set a default Content-Type
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

impl BodyArgs {
    /// Load the body and the content type implied by `--data-file`, if any
    pub fn load(&self) -> Result<(Option<Bytes>, Option<&'static str>), AppError> {
        match &self.data_file {
            Some(path) => {
                let bytes = fs::read(path)?;
                let name = path.to_string_lossy();
                let content_type = content_type_for_filename(&name, "text/plain");
                Ok((Some(Bytes::from(bytes)), Some(content_type)))
            }
            None => Ok((self.data.clone().map(Bytes::from), None)),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Send a GET request
    Get {
        #[command(flatten)]
        args: TargetArgs,
    },
    /// Send a PUT request
    Put {
        #[command(flatten)]
        args: TargetArgs,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Send a POST request
    Post {
        #[command(flatten)]
        args: TargetArgs,
        #[command(flatten)]
        body: BodyArgs,
    },
    /// Send a DELETE request
    Delete {
        #[command(flatten)]
        args: TargetArgs,
    },
    /// Send a HEAD request
    Head {
        #[command(flatten)]
        args: TargetArgs,
    },
}

impl Command {
    /// Split into the method, the shared arguments and the body
    pub fn into_parts(self) -> (::http::Method, TargetArgs, BodyArgs) {
        use ::http::Method;
        match self {
            Command::Get { args } => (Method::GET, args, BodyArgs::default()),
            Command::Put { args, body } => (Method::PUT, args, body),
            Command::Post { args, body } => (Method::POST, args, body),
            Command::Delete { args } => (Method::DELETE, args, BodyArgs::default()),
            Command::Head { args } => (Method::HEAD, args, BodyArgs::default()),
        }
    }
}

/// Parse `Name:value` header arguments, keeping their order
pub fn parse_headers(params: &[String]) -> Result<KeyValuePairs, AppError> {
    let mut headers = Vec::with_capacity(params.len());
    for param in params {
        let (k, v) = param
            .split_once(':')
            .ok_or_else(|| CliError::InvalidHeaderFormat(param.clone()))?;
        let key = k.trim();
        if key.is_empty() || key.contains(' ') {
            return Err(CliError::InvalidHeaderFormat(param.clone()).into());
        }
        headers.push((key.to_string(), v.trim().to_string()));
    }
    Ok(headers)
}

/// Put a default `Content-Type` ahead of the caller's headers
///
/// Headers are applied in order, so an explicit `Content-Type` still wins.
pub fn with_default_content_type(
    mut headers: KeyValuePairs,
    content_type: Option<&str>,
) -> KeyValuePairs {
    if let Some(content_type) = content_type {
        headers.insert(0, ("Content-Type".to_string(), content_type.to_string()));
    }
    headers
}

/// Turn a command-line target into a [`Resource`]
///
/// Anything containing `://` is parsed as a URL. Other targets are looked up in the
/// catalog, which must then be given.
pub fn resolve_target(target: &str, catalog: Option<&Path>) -> Result<Resource, AppError> {
    if target.contains("://") {
        return Ok(target.parse::<Resource>()?);
    }
    match catalog {
        Some(path) => Ok(catalog::load_catalog(path)?.resolve_target(target)?),
        None => Err(CliError::InvalidTarget(target.to_string()).into()),
    }
}

pub fn run_with_spinner<F, T>(message: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let style_result = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} {msg}");

    match style_result {
        Ok(style) => pb.set_style(style),
        Err(_) => pb.set_style(ProgressStyle::default_spinner()),
    }

    let result = f();
    pb.finish_and_clear();
    result
}

/// Run one command: resolve the target, send the request and print the envelope
///
/// A successful exchange returns the envelope. An envelope carrying an error is
/// printed first and then returned as `Err(AppError::Http)`, so the caller can set
/// the exit status without printing it again.
pub fn execute(cli: Cli) -> Result<HttpResponse, AppError> {
    let (method, args, body_args) = cli.command.into_parts();
    let resource = resolve_target(&args.target, cli.catalog.as_deref())?;
    let (body, content_type) = body_args.load()?;
    let headers = with_default_content_type(parse_headers(&args.headers)?, content_type);

    let backend = ReqwestBackend::from_config(&ClientConfig::default())?;
    let client = Client::new(backend);
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Runtime(format!("Failed to create async runtime: {e}")))?;

    let message = format!("{method} {resource}");
    let response = run_with_spinner(&message, || {
        rt.block_on(client.send(method, &resource, &headers, body))
    });
    print_response(&response, args.verbose);

    match response.error {
        Some(err) => Err(err.into()),
        None => Ok(response),
    }
}
