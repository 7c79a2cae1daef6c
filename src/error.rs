use std::io;

use crate::http::HttpError;
use thiserror::Error;

/// Central error type for the simplehttp command-line front end
#[derive(Debug, Error)]
pub enum AppError {
    /// The request completed with an error envelope
    #[error("request failed: {0}")]
    Http(#[from] HttpError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Cli(#[from] CliError),
    /// Reading a local input such as `--data-file` failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Resource catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: '{0}'")]
    FileNotFound(String),
    #[error("Invalid YAML in catalog file: {0}")]
    InvalidYaml(String),
    #[error("Resource '{0}' not found in catalog")]
    ResourceNotFound(String),
    #[error("Failed to resolve variables: {0}")]
    VariableResolution(String),
}

/// Command-line argument errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("Invalid target '{0}'. Use a URL such as https://host/path or a catalog name with --catalog")]
    InvalidTarget(String),
    #[error("Invalid header format '{0}'. Headers must be in 'Name:value' format")]
    InvalidHeaderFormat(String),
}

impl AppError {
    /// Provides a helpful suggestion for how to fix the error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            AppError::Http(HttpError::ConnectionFailure) => {
                Some("Check that the host is reachable and the port is correct")
            }
            AppError::Http(HttpError::InvalidUri) => {
                Some("URLs must include the scheme, e.g. https://httpbin.org/get")
            }
            AppError::Http(HttpError::Unauthorized) => {
                Some("Pass credentials as a header, e.g. Authorization:Bearer <token>")
            }
            AppError::Catalog(CatalogError::FileNotFound(_)) => {
                Some("Pass an existing YAML file with --catalog")
            }
            AppError::Catalog(CatalogError::ResourceNotFound(_)) => {
                Some("Check the 'resources' section of the catalog file")
            }
            AppError::Cli(CliError::InvalidHeaderFormat(_)) => {
                Some("Example: Authorization:Bearer123 Content-Type:application/json")
            }
            AppError::Cli(CliError::InvalidTarget(_)) => {
                Some("Example: simplehttp get https://httpbin.org/get")
            }
            AppError::Io(_) => Some("Check that the --data-file path exists and is readable"),
            _ => None,
        }
    }

    /// Lines written to stderr when a run fails
    ///
    /// An error envelope has already been rendered by the printer, so only the
    /// suggestion is added for it.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !matches!(self, AppError::Http(_)) {
            lines.push(format!("Error: {self}"));
        }
        if let Some(suggestion) = self.suggestion() {
            lines.push(format!("Suggestion: {suggestion}"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::ResourceNotFound("api".to_string());
        assert_eq!(err.to_string(), "Resource 'api' not found in catalog");

        let err: AppError = HttpError::NotFound.into();
        assert_eq!(err.to_string(), "request failed: not found");
    }

    #[test]
    fn test_error_conversions() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(app_err.to_string().contains("I/O error"));

        let app_err: AppError = CliError::InvalidTarget("x".to_string()).into();
        assert!(matches!(app_err, AppError::Cli(_)));
    }

    #[test]
    fn test_suggestion_coverage() {
        let cases = vec![
            (AppError::Http(HttpError::ConnectionFailure), true),
            (AppError::Http(HttpError::InvalidUri), true),
            (AppError::Http(HttpError::ServerError), false),
            (AppError::Catalog(CatalogError::FileNotFound("c.yaml".to_string())), true),
            (AppError::Catalog(CatalogError::InvalidYaml("bad".to_string())), false),
            (AppError::Cli(CliError::InvalidHeaderFormat("x".to_string())), true),
            (AppError::Runtime("boom".to_string()), false),
            (io::Error::new(io::ErrorKind::NotFound, "gone").into(), true),
        ];

        for (err, should_have_suggestion) in cases {
            assert_eq!(
                err.suggestion().is_some(),
                should_have_suggestion,
                "unexpected suggestion for: {err}"
            );
        }
    }

    #[test]
    fn test_error_envelope_reported_once() {
        let lines = AppError::Http(HttpError::NotFound).report_lines();
        assert!(lines.is_empty());

        let lines = AppError::Http(HttpError::ConnectionFailure).report_lines();
        assert_eq!(
            lines,
            vec!["Suggestion: Check that the host is reachable and the port is correct".to_string()]
        );

        let lines = AppError::Cli(CliError::InvalidTarget("api".to_string())).report_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Error: Invalid target 'api'"));
        assert!(lines[1].starts_with("Suggestion: "));
    }
}
