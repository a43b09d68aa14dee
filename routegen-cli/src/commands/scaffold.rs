use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::aggregator::Aggregator;
use super::resolve::{validate_name, ResolvedRequest};
use super::templates;
use crate::config::ScaffoldConfig;
use crate::error::ScaffoldError;

/// Outcome of a successful [`scaffold`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub route_file: PathBuf,
    pub aggregator: PathBuf,
    pub import_added: bool,
    pub registration_added: bool,
}

/// Generate the route module for `req` and register it in the aggregator.
///
/// Steps:
/// 1. Fail with `Conflict` if the route module already exists
/// 2. Read the aggregator and patch its import and registration blocks in memory
/// 3. Create the route module (create-only, never overwrites)
/// 4. Rewrite the aggregator in full
///
/// Nothing is written before steps 1 and 2 succeed. A failure between steps 3
/// and 4 leaves an unregistered route module behind.
pub fn scaffold(
    req: &ResolvedRequest,
    config: &ScaffoldConfig,
) -> Result<ScaffoldReport, ScaffoldError> {
    validate_name(&req.name)?;

    let route_file = config.route_file(&req.name);
    if route_file.exists() {
        return Err(conflict(&req.name, &route_file));
    }

    let aggregator_path = config.aggregator_path();
    let source =
        fs::read_to_string(&aggregator_path).map_err(|e| ScaffoldError::io(&aggregator_path, e))?;
    let mut aggregator = Aggregator::parse(&source, &config.layout);
    let import_added = aggregator.add_import(&req.name);
    let registration_added = aggregator.add_registration(&req.name);

    let content = templates::route::route_module(req);
    create_new(&req.name, &route_file, &content)?;
    tracing::info!(path = %route_file.display(), "created route module");

    fs::write(&aggregator_path, aggregator.to_string())
        .map_err(|e| ScaffoldError::io(&aggregator_path, e))?;
    tracing::info!(
        path = %aggregator_path.display(),
        import_added,
        registration_added,
        "updated aggregator"
    );

    Ok(ScaffoldReport {
        route_file,
        aggregator: aggregator_path,
        import_added,
        registration_added,
    })
}

fn create_new(name: &str, path: &Path, content: &str) -> Result<(), ScaffoldError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => conflict(name, path),
            _ => ScaffoldError::io(path, e),
        })?;
    file.write_all(content.as_bytes())
        .map_err(|e| ScaffoldError::io(path, e))
}

fn conflict(name: &str, path: &Path) -> ScaffoldError {
    ScaffoldError::Conflict {
        name: name.to_string(),
        path: path.to_path_buf(),
    }
}
