use std::path::{Path, PathBuf};

/// Error type for every `routegen` operation.
#[derive(Debug)]
pub enum ScaffoldError {
    /// The route name is not a valid identifier.
    Validation(String),
    /// A route module with the requested name already exists.
    Conflict { name: String, path: PathBuf },
    /// A filesystem read or write failed.
    Io { path: PathBuf, source: std::io::Error },
    /// The layout file or an environment override is invalid.
    Config(String),
    /// No project root was found walking up from the start directory.
    ProjectRootNotFound(PathBuf),
    /// Reading an answer from the terminal failed.
    Prompt(String),
}

impl ScaffoldError {
    /// Wrap an I/O error together with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ScaffoldError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaffoldError::Validation(msg) => write!(f, "{msg}"),
            ScaffoldError::Conflict { name, path } => {
                write!(f, "Route {name} already exists ({})", path.display())
            }
            ScaffoldError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            ScaffoldError::Config(msg) => write!(f, "Config error: {msg}"),
            ScaffoldError::ProjectRootNotFound(start) => write!(
                f,
                "No project root found above '{}' (looked for routegen.yaml or app/api/main.py)",
                start.display()
            ),
            ScaffoldError::Prompt(msg) => write!(f, "Prompt failed: {msg}"),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<dialoguer::Error> for ScaffoldError {
    fn from(err: dialoguer::Error) -> Self {
        ScaffoldError::Prompt(err.to_string())
    }
}

impl From<serde_yaml::Error> for ScaffoldError {
    fn from(err: serde_yaml::Error) -> Self {
        ScaffoldError::Config(err.to_string())
    }
}
