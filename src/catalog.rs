//! Named resources loaded from a YAML file.
//!
//! ```yaml
//! variables:
//!   api_host: httpbin.org
//! resources:
//!   httpbin:
//!     schema: https
//!     host: ${api_host}
//!     port: 443
//!   private:
//!     schema: https
//!     host: ${env:PRIVATE_HOST}
//!     path: /v1
//! ```
//!
//! `${name}` is looked up in `variables`, `${env:NAME}` in the process environment.

use crate::error::CatalogError;
use crate::http::Resource;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub variables: HashMap<String, String>,
    pub resources: HashMap<String, Resource>,
}

impl Catalog {
    /// Parse a catalog from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(content).map_err(|e| CatalogError::InvalidYaml(e.to_string()))
    }

    /// Look up a resource by name with every variable substituted
    pub fn resolve(&self, name: &str) -> Result<Resource, CatalogError> {
        let entry = self
            .resources
            .get(name)
            .ok_or_else(|| CatalogError::ResourceNotFound(name.to_string()))?;
        let port = entry
            .port()
            .map(|port| resolve_vars(port, &self.variables))
            .transpose()?;
        Ok(Resource::from_parts(
            resolve_vars(entry.schema(), &self.variables)?,
            resolve_vars(entry.host(), &self.variables)?,
            port,
            resolve_vars(entry.path(), &self.variables)?,
        ))
    }

    /// Resolve a `name[/suffix]` target
    ///
    /// Everything from the first `/` on is appended verbatim to the named
    /// resource's path.
    pub fn resolve_target(&self, target: &str) -> Result<Resource, CatalogError> {
        match target.find('/') {
            Some(idx) => {
                let (name, suffix) = target.split_at(idx);
                Ok(self.resolve(name)?.with_path_appended(suffix))
            }
            None => self.resolve(target),
        }
    }
}

/// Load a catalog file
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)
        .map_err(|_| CatalogError::FileNotFound(path.display().to_string()))?;
    Catalog::from_yaml(&content)
}

/// Resolves variables in a string using file-defined and environment variables.
pub fn resolve_vars(
    input: &str,
    file_vars: &HashMap<String, String>,
) -> Result<String, CatalogError> {
    let mut result = String::new();
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut var_name = String::new();
            let mut closed = false;
            for next_c in chars.by_ref() {
                if next_c == '}' {
                    closed = true;
                    break;
                }
                var_name.push(next_c);
            }
            if !closed {
                return Err(CatalogError::VariableResolution(format!(
                    "Unterminated variable: ${{{var_name}"
                )));
            }
            if let Some(env_var) = var_name.strip_prefix("env:") {
                match std::env::var(env_var) {
                    Ok(val) => result.push_str(&val),
                    Err(_) => {
                        return Err(CatalogError::VariableResolution(format!(
                            "Missing environment variable: {env_var}"
                        )))
                    }
                }
            } else {
                match file_vars.get(&var_name) {
                    Some(val) => result.push_str(val),
                    None => {
                        return Err(CatalogError::VariableResolution(format!(
                            "Missing variable: {var_name}"
                        )))
                    }
                }
            }
        } else {
            result.push(c);
        }
    }
    Ok(result)
}
