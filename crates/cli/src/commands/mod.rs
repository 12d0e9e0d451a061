//! Routing from parsed arguments to a command node.
//!
//! Every invocation ends at either a branch, which only shows its help, or a
//! leaf, which runs through the shared pipeline in [`jira_core::pipeline`].

pub mod project;
pub mod remotelink;

use jira_core::error::Result;
use jira_core::fields::Sources;
use jira_core::pipeline::{CommandContext, LeafCommand};

use crate::cli_args::{Commands, IssueCommands, RemotelinkCommands};

pub use project::ListProjects;
pub use remotelink::AddRemoteLink;

pub enum Route {
    /// A command with subcommands but no action, named by its path from the root
    Branch { path: Vec<&'static str> },
    Leaf {
        command: Box<dyn LeafCommand>,
        sources: Sources,
    },
}

impl Route {
    fn leaf(command: impl LeafCommand + 'static, sources: Sources) -> Self {
        Self::Leaf {
            command: Box::new(command),
            sources,
        }
    }

    /// Runs a leaf command. Branches have nothing to run and succeed.
    pub fn execute(&self, context: &CommandContext<'_>) -> Result<()> {
        match self {
            Self::Branch { .. } => Ok(()),
            Self::Leaf { command, sources } => command.execute(sources, context),
        }
    }
}

pub fn route(command: Option<Commands>) -> Route {
    match command {
        None => Route::Branch { path: Vec::new() },
        Some(Commands::Project) => Route::leaf(ListProjects, Sources::default()),
        Some(Commands::Issue(issue)) => match issue.command {
            None => Route::Branch {
                path: vec!["issue"],
            },
            Some(IssueCommands::Remotelink(remotelink)) => match remotelink.command {
                None => Route::Branch {
                    path: vec!["issue", "remotelink"],
                },
                Some(RemotelinkCommands::Add(args)) => {
                    let sources = remotelink::sources(&args);
                    Route::leaf(AddRemoteLink { web: args.web }, sources)
                }
            },
        },
    }
}
