use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::create_route::{self, CreateRouteOpts};
use crate::error::ScaffoldError;

#[derive(Parser, Debug)]
#[command(
    name = "routegen",
    version,
    about = "routegen: scaffold FastAPI routes and register them in the API router"
)]
pub struct Cli {
    /// Project root (skips discovery from the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Layout file (default: <root>/routegen.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Without a subcommand the usage text is printed and the run succeeds.
    pub fn run(self) -> Result<(), ScaffoldError> {
        match self.command {
            None => {
                Cli::command()
                    .print_help()
                    .map_err(|e| ScaffoldError::io("<stdout>", e))?;
                println!();
                Ok(())
            }
            Some(command) => {
                create_route::run(
                    command.create_route_opts(),
                    self.root.as_deref(),
                    self.config.as_deref(),
                )?;
                Ok(())
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new API route
    CreateRoute {
        /// Route name (e.g. users, posts)
        name: Option<String>,
        /// Route prefix (default: /<name>)
        #[arg(long)]
        prefix: Option<String>,
        /// Route tags (default: <name>)
        #[arg(long, num_args = 1..)]
        tags: Option<Vec<String>>,
        /// Never prompt; missing values take their defaults
        #[arg(long)]
        no_interactive: bool,
    },
}

impl Commands {
    /// Convert `create-route` arguments into [`CreateRouteOpts`].
    pub fn create_route_opts(self) -> CreateRouteOpts {
        match self {
            Commands::CreateRoute {
                name,
                prefix,
                tags,
                no_interactive,
            } => CreateRouteOpts {
                name,
                prefix,
                tags,
                no_interactive,
            },
        }
    }
}
