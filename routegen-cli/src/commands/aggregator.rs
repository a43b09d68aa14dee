//! Line-level model of the aggregator file.
//!
//! The aggregator is read as a sequence of classified lines. Insertions land
//! right after the last line of the matching family, and every line that is
//! not inserted is written back exactly as it was read.

use crate::config::Layout;

/// Classification of one aggregator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `from <namespace> import <module>` for a single route module.
    RouteImport(String),
    /// Any other import from the route namespace.
    NamespaceImport,
    /// A line that registers a router (`<var>.include_router(...)`).
    Registration,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    /// Terminator as read: `"\n"`, `"\r\n"`, or empty for a last line without one.
    ending: &'static str,
    kind: LineKind,
}

/// Parsed aggregator file.
#[derive(Debug, Clone)]
pub struct Aggregator {
    lines: Vec<Line>,
    namespace: String,
    router_var: String,
    /// Terminator given to inserted lines: the first one found in the file.
    eol: &'static str,
}

impl Aggregator {
    /// Parse aggregator source using the namespace and router variable of `layout`.
    ///
    /// Each line keeps its own terminator, so files with mixed line endings
    /// are written back unchanged apart from the inserted lines.
    pub fn parse(text: &str, layout: &Layout) -> Self {
        let lines: Vec<Line> = text
            .split_inclusive('\n')
            .map(|raw| {
                let (text, ending) = if let Some(text) = raw.strip_suffix("\r\n") {
                    (text, "\r\n")
                } else if let Some(text) = raw.strip_suffix('\n') {
                    (text, "\n")
                } else {
                    (raw, "")
                };
                Line {
                    kind: classify(text, &layout.namespace),
                    text: text.to_string(),
                    ending,
                }
            })
            .collect();

        let eol = lines
            .iter()
            .map(|line| line.ending)
            .find(|ending| !ending.is_empty())
            .unwrap_or("\n");

        Aggregator {
            lines,
            namespace: layout.namespace.clone(),
            router_var: layout.router_var.clone(),
            eol,
        }
    }

    /// The statement importing route module `name`.
    pub fn import_line(&self, name: &str) -> String {
        format!("from {} import {name}", self.namespace)
    }

    /// The statement registering route module `name`'s router.
    pub fn registration_line(&self, name: &str) -> String {
        format!("{}.include_router({name}.router)", self.router_var)
    }

    /// Insert the import for `name` unless an identical line already exists.
    ///
    /// Goes after the last route-module import, else after the last import
    /// from the route namespace, else at the end of the file. Returns whether
    /// a line was added.
    pub fn add_import(&mut self, name: &str) -> bool {
        let statement = self.import_line(name);
        if self.contains(&statement) {
            return false;
        }

        let at = self
            .last_index(|kind| matches!(kind, LineKind::RouteImport(_)))
            .or_else(|| self.last_index(|kind| *kind == LineKind::NamespaceImport))
            .map(|i| i + 1)
            .unwrap_or(self.lines.len());

        tracing::debug!(line = at + 1, %statement, "inserting import");
        self.insert(at, statement, LineKind::RouteImport(name.to_string()));
        true
    }

    /// Insert the registration for `name` unless an identical line already exists.
    ///
    /// Goes after the last registration, else at the end of the file.
    /// Returns whether a line was added.
    pub fn add_registration(&mut self, name: &str) -> bool {
        let statement = self.registration_line(name);
        if self.contains(&statement) {
            return false;
        }

        let at = self
            .last_index(|kind| *kind == LineKind::Registration)
            .map(|i| i + 1)
            .unwrap_or(self.lines.len());

        tracing::debug!(line = at + 1, %statement, "inserting registration");
        self.insert(at, statement, LineKind::Registration);
        true
    }

    /// Insert a line before index `at`, taking over the terminator of the line
    /// above it. When that line ended the file without a terminator, it gets
    /// one and the new line becomes the unterminated last line instead.
    fn insert(&mut self, at: usize, text: String, kind: LineKind) {
        let eol = self.eol;
        let ending = match at.checked_sub(1).map(|i| &mut self.lines[i]) {
            Some(prev) if prev.ending.is_empty() => {
                prev.ending = eol;
                ""
            }
            Some(prev) => prev.ending,
            None => eol,
        };
        self.lines.insert(at, Line { text, ending, kind });
    }

    fn contains(&self, statement: &str) -> bool {
        self.lines.iter().any(|line| line.text.trim() == statement)
    }

    fn last_index<F>(&self, pred: F) -> Option<usize>
    where
        F: Fn(&LineKind) -> bool,
    {
        self.lines.iter().rposition(|line| pred(&line.kind))
    }
}

impl std::fmt::Display for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            f.write_str(&line.text)?;
            f.write_str(line.ending)?;
        }
        Ok(())
    }
}

/// Classify a single line of aggregator source.
pub fn classify(line: &str, namespace: &str) -> LineKind {
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix("from ") {
        let rest = rest.trim_start();
        if let Some(after_ns) = rest.strip_prefix(namespace) {
            if let Some(module) = after_ns.strip_prefix(" import ") {
                let module = module.trim();
                if super::templates::is_identifier(module) {
                    return LineKind::RouteImport(module.to_string());
                }
                return LineKind::NamespaceImport;
            }
            if after_ns.starts_with('.') || after_ns.starts_with(' ') {
                return LineKind::NamespaceImport;
            }
        }
    }

    if let Some(rest) = trimmed.strip_prefix("import ") {
        let rest = rest.trim_start();
        if let Some(after_ns) = rest.strip_prefix(namespace) {
            if after_ns.is_empty() || after_ns.starts_with('.') || after_ns.starts_with(' ') {
                return LineKind::NamespaceImport;
            }
        }
    }

    if trimmed.contains(".include_router(") {
        return LineKind::Registration;
    }

    LineKind::Other
}
