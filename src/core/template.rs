//! Token substitution for notification templates.
//! `${var}` tokens are replaced from the variable map; unresolved tokens
//! become the empty string, never an error.

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use regex::Regex;
use std::collections::HashMap;
use std::fs;

/// Default body shipped with the binary. A `template_file` config entry
/// overrides it.
pub const DEFAULT_TEMPLATE: &str =
    include_str!("../../templates/working-hours-notification.txt");

pub fn render(template: &str, variables: &HashMap<String, String>) -> String {
    let pattern = Regex::new(r"\$\{([^}]+)\}").unwrap();

    pattern
        .replace_all(template, |caps: &regex::Captures| {
            variables
                .get(&caps[1])
                .map(String::as_str)
                .unwrap_or("")
                .to_string()
        })
        .into_owned()
}

/// The template body to use: the configured file when set, the built-in
/// default otherwise.
pub fn load_template(template_file: Option<&String>) -> AppResult<String> {
    match template_file {
        Some(path) => {
            let resolved = expand_tilde(path);
            fs::read_to_string(&resolved).map_err(|e| {
                AppError::Template(format!("cannot read {}: {}", resolved.display(), e))
            })
        }
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}
