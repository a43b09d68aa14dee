//! Command implementations for the `routegen` CLI.

/// Line-level model of the aggregator file (imports and router registrations).
pub mod aggregator;

/// Route creation — `routegen create-route [NAME]`.
///
/// Resolves the request, scaffolds the module and prints what changed.
pub mod create_route;

/// Input resolution: defaults, prompts and name validation.
pub mod resolve;

/// The scaffolding pipeline: conflict check, render, create, patch.
pub mod scaffold;

/// Shared template helpers and the route module template.
pub mod templates;
