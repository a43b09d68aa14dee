use colored::Colorize;
use std::path::Path;

use super::resolve::{self, DefaultsPrompt, Prompt, ResolvedRequest, TerminalPrompt};
use super::scaffold::{self, ScaffoldReport};
use crate::config::ScaffoldConfig;
use crate::error::ScaffoldError;

/// Raw CLI arguments for `routegen create-route`, before resolution.
#[derive(Debug, Clone, Default)]
pub struct CreateRouteOpts {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub tags: Option<Vec<String>>,
    pub no_interactive: bool,
}

/// Create a route module and register it in the aggregator.
///
/// Missing arguments are prompted for on the terminal, or take their
/// defaults with `--no-interactive`. The request is resolved and validated
/// before the project root is located, so an invalid name fails without
/// touching the filesystem.
pub fn run(
    opts: CreateRouteOpts,
    root: Option<&Path>,
    config_file: Option<&Path>,
) -> Result<ScaffoldReport, ScaffoldError> {
    let req = if opts.no_interactive {
        resolve_opts(opts, &mut DefaultsPrompt)?
    } else {
        resolve_opts(opts, &mut TerminalPrompt)?
    };
    let config = ScaffoldConfig::discover(root, config_file)?;
    apply(&req, &config)
}

/// Same as [`run`] against an already resolved layout, with an explicit
/// prompt provider.
pub fn run_with(
    opts: CreateRouteOpts,
    config: &ScaffoldConfig,
    prompt: &mut dyn Prompt,
) -> Result<ScaffoldReport, ScaffoldError> {
    let req = resolve_opts(opts, prompt)?;
    apply(&req, config)
}

fn resolve_opts(
    opts: CreateRouteOpts,
    prompt: &mut dyn Prompt,
) -> Result<ResolvedRequest, ScaffoldError> {
    resolve::resolve(opts.name, opts.prefix, opts.tags, prompt)
}

fn apply(req: &ResolvedRequest, config: &ScaffoldConfig) -> Result<ScaffoldReport, ScaffoldError> {
    let report = scaffold::scaffold(req, config)?;

    println!("{} Created route: {}", "✓".green(), req.name.green());
    println!("  File: {}", report.route_file.display().to_string().cyan());
    if report.import_added || report.registration_added {
        println!(
            "{} Updated: {}",
            "✓".green(),
            report.aggregator.display().to_string().cyan()
        );
    } else {
        println!(
            "{} {} already registers {}",
            "!".yellow(),
            report.aggregator.display(),
            req.name.cyan()
        );
    }

    Ok(report)
}
