//! Command-line argument parsing.
//!
//! The clap derive types below are the command tree: enums with an optional
//! subcommand are branches, argument structs without one are leaves.

use clap::{ArgAction, CommandFactory, Parser, Subcommand};

/// Command-line client for Jira.
#[derive(Parser, Debug)]
#[command(name = "jira", version, term_width = 0)]
pub struct Args {
    /// Path to the config file.
    ///
    /// Defaults to `$JIRA_CONFIG_FILE`, then `~/.config/.jira/.config.yml`.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    /// Turn on debug output
    #[arg(
        long,
        global = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// All accessible jira projects
    ///
    /// Project lists all jira projects that a user has access to.
    #[command(alias = "projects")]
    Project,

    /// Issue manages issues in a project
    #[command(alias = "issues")]
    Issue(IssueArgs),
}

#[derive(clap::Args, Debug)]
pub struct IssueArgs {
    #[command(subcommand)]
    pub command: Option<IssueCommands>,
}

#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Manage issue remote links
    ///
    /// Remotelink command helps you add weblinks to issues. See available commands below.
    #[command(aliases = ["remotelinks", "weblink", "weblinks"])]
    Remotelink(RemotelinkArgs),
}

#[derive(clap::Args, Debug)]
pub struct RemotelinkArgs {
    #[command(subcommand)]
    pub command: Option<RemotelinkCommands>,
}

#[derive(Subcommand, Debug)]
pub enum RemotelinkCommands {
    /// Add a remote link to an issue
    ///
    /// Add adds a remotelink to an issue. Missing parameters are prompted for.
    #[command(after_help = "Examples:\n  $ jira issue remotelink add\n\n  # Pass required parameters to skip prompt\n  $ jira issue remotelink add ISSUE-1 \"My useful link\" http://example.com")]
    Add(AddArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Issue key of the source issue, eg: ISSUE-1
    #[arg(value_name = "ISSUE-KEY")]
    pub issue_key: Option<String>,

    /// Title of the link
    #[arg(value_name = "TITLE")]
    pub title: Option<String>,

    /// Url of the link
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Title of the link, when not given as an argument
    #[arg(long = "title", value_name = "TITLE")]
    pub title_flag: Option<String>,

    /// Url of the link, when not given as an argument
    #[arg(long = "url", value_name = "URL")]
    pub url_flag: Option<String>,

    /// Open issue in web browser after adding the link
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub web: bool,
}

/// Renders the help of the command at `path` below the root.
pub fn help_for(path: &[&str]) -> String {
    let mut command = Args::command();
    command.build();

    for name in path {
        let Some(child) = command.find_subcommand(name).cloned() else {
            break;
        };
        command = child;
    }

    command.render_help().to_string()
}
