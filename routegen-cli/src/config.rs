use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::commands::templates::is_identifier;
use crate::error::ScaffoldError;

/// Name of the optional layout file looked up at the project root.
pub const CONFIG_FILE: &str = "routegen.yaml";

/// Where routes live inside a project and how the aggregator refers to them.
///
/// Every field is optional in `routegen.yaml`; missing keys keep the
/// FastAPI layout defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Directory receiving route modules, relative to the project root.
    pub routes_dir: PathBuf,
    /// Aggregator file, relative to the project root.
    pub aggregator: PathBuf,
    /// Import namespace of the route modules (`from <namespace> import <name>`).
    pub namespace: String,
    /// Router variable the aggregator registers routes on.
    pub router_var: String,
    /// Extension of generated route modules, without the leading dot.
    pub extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            routes_dir: PathBuf::from("app/api/routes"),
            aggregator: PathBuf::from("app/api/main.py"),
            namespace: "app.api.routes".into(),
            router_var: "api_router".into(),
            extension: "py".into(),
        }
    }
}

impl Layout {
    fn validate(mut self) -> Result<Self, ScaffoldError> {
        if self.namespace.is_empty() || !self.namespace.split('.').all(is_identifier) {
            return Err(ScaffoldError::Config(format!(
                "namespace '{}' is not a dotted module path",
                self.namespace
            )));
        }
        if !is_identifier(&self.router_var) {
            return Err(ScaffoldError::Config(format!(
                "router_var '{}' is not an identifier",
                self.router_var
            )));
        }
        self.extension = self.extension.trim_start_matches('.').to_string();
        if self.extension.contains(|c| c == '/' || c == '\\') {
            return Err(ScaffoldError::Config(format!(
                "extension '{}' must not contain a path separator",
                self.extension
            )));
        }
        Ok(self)
    }
}

/// Apply `ROUTEGEN_*` overrides on top of a layout.
///
/// `lookup` is usually `std::env::var(..).ok()`; empty values are ignored.
pub fn apply_env_overrides<F>(layout: &mut Layout, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("ROUTEGEN_ROUTES_DIR") {
        layout.routes_dir = PathBuf::from(v);
    }
    if let Some(v) = get("ROUTEGEN_AGGREGATOR") {
        layout.aggregator = PathBuf::from(v);
    }
    if let Some(v) = get("ROUTEGEN_NAMESPACE") {
        layout.namespace = v;
    }
    if let Some(v) = get("ROUTEGEN_ROUTER_VAR") {
        layout.router_var = v;
    }
    if let Some(v) = get("ROUTEGEN_EXTENSION") {
        layout.extension = v;
    }
}

/// Parse a layout from YAML text. An empty document yields the defaults.
pub fn parse_layout(content: &str) -> Result<Layout, ScaffoldError> {
    if content.trim().is_empty() {
        return Ok(Layout::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Load the layout for a project.
///
/// Resolution order:
/// 1. `explicit` file if given (must exist), else `<root>/routegen.yaml` if present
/// 2. `ROUTEGEN_*` environment variables
pub fn load_layout(root: &Path, explicit: Option<&Path>) -> Result<Layout, ScaffoldError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Some(root.join(CONFIG_FILE)).filter(|p| p.is_file()),
    };

    let mut layout = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading layout file");
            let content =
                std::fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
            parse_layout(&content)?
        }
        None => Layout::default(),
    };

    apply_env_overrides(&mut layout, |key| std::env::var(key).ok());
    layout.validate()
}

/// Walk up from `start` to the first directory that looks like a project root:
/// one containing `routegen.yaml` or the default aggregator file.
pub fn find_project_root(start: &Path) -> Result<PathBuf, ScaffoldError> {
    let default_aggregator = Layout::default().aggregator;
    for dir in start.ancestors() {
        if dir.join(CONFIG_FILE).is_file() || dir.join(&default_aggregator).is_file() {
            tracing::debug!(root = %dir.display(), "found project root");
            return Ok(dir.to_path_buf());
        }
    }
    Err(ScaffoldError::ProjectRootNotFound(start.to_path_buf()))
}

/// Resolved project layout handed to the scaffolder.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    pub project_root: PathBuf,
    pub layout: Layout,
}

impl ScaffoldConfig {
    pub fn new(project_root: impl Into<PathBuf>, layout: Layout) -> Self {
        ScaffoldConfig {
            project_root: project_root.into(),
            layout,
        }
    }

    /// Decide the project root once and load its layout.
    ///
    /// An explicit `root` skips discovery; otherwise the search starts at the
    /// current directory.
    pub fn discover(root: Option<&Path>, config: Option<&Path>) -> Result<Self, ScaffoldError> {
        let project_root = match root {
            Some(root) => root.to_path_buf(),
            None => {
                let cwd = std::env::current_dir().map_err(|e| ScaffoldError::io(".", e))?;
                find_project_root(&cwd)?
            }
        };
        let layout = load_layout(&project_root, config)?;
        Ok(ScaffoldConfig::new(project_root, layout))
    }

    pub fn routes_dir(&self) -> PathBuf {
        self.project_root.join(&self.layout.routes_dir)
    }

    pub fn aggregator_path(&self) -> PathBuf {
        self.project_root.join(&self.layout.aggregator)
    }

    /// Path of the route module generated for `name`.
    pub fn route_file(&self, name: &str) -> PathBuf {
        let file_name = if self.layout.extension.is_empty() {
            name.to_string()
        } else {
            format!("{name}.{}", self.layout.extension)
        };
        self.routes_dir().join(file_name)
    }
}
