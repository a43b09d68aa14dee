use dialoguer::Input;

use super::templates::is_identifier;
use crate::error::ScaffoldError;

/// Validated intent for one scaffolding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub name: String,
    pub prefix: String,
    pub tags: Vec<String>,
}

/// Source of answers for fields missing from the command line.
pub trait Prompt {
    /// Ask a single question. An empty answer yields `default` when one is given.
    fn ask(&mut self, message: &str, default: Option<&str>) -> Result<String, ScaffoldError>;
}

/// Interactive prompt on the controlling terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn ask(&mut self, message: &str, default: Option<&str>) -> Result<String, ScaffoldError> {
        let mut input = Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}

/// Non-interactive prompt: every question is answered with its default.
pub struct DefaultsPrompt;

impl Prompt for DefaultsPrompt {
    fn ask(&mut self, _message: &str, default: Option<&str>) -> Result<String, ScaffoldError> {
        Ok(default.unwrap_or_default().to_string())
    }
}

/// Resolve the route name, prefix and tags, prompting for anything missing.
///
/// A name given by the caller is validated as-is; a prompted name is trimmed
/// first. Either way an invalid identifier fails immediately, without
/// re-prompting. Empty prefix or tags count as missing.
pub fn resolve(
    name: Option<String>,
    prefix: Option<String>,
    tags: Option<Vec<String>>,
    prompt: &mut dyn Prompt,
) -> Result<ResolvedRequest, ScaffoldError> {
    let name = match name {
        Some(name) => name,
        None => prompt
            .ask("Enter route name (e.g., users, posts)", None)?
            .trim()
            .to_string(),
    };
    validate_name(&name)?;

    let prefix = match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => prefix,
        None => {
            let default = format!("/{name}");
            let answer = prompt.ask("Enter route prefix", Some(default.as_str()))?;
            let answer = answer.trim();
            if answer.is_empty() {
                default
            } else {
                answer.to_string()
            }
        }
    };

    let tags = match tags.filter(|t| !t.is_empty()) {
        Some(tags) => tags,
        None => {
            let answer = prompt.ask("Enter tags separated by spaces", Some(name.as_str()))?;
            let tags: Vec<String> = answer.split_whitespace().map(str::to_string).collect();
            if tags.is_empty() {
                vec![name.clone()]
            } else {
                tags
            }
        }
    };

    tracing::debug!(%name, %prefix, ?tags, "resolved route request");
    Ok(ResolvedRequest { name, prefix, tags })
}

/// Fail with [`ScaffoldError::Validation`] unless `name` is an identifier.
pub fn validate_name(name: &str) -> Result<(), ScaffoldError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(ScaffoldError::Validation(format!(
            "Route name must be a valid identifier, got '{name}'"
        )))
    }
}
