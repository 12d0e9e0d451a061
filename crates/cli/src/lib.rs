//! Jira CLI Library
//!
//! This crate provides the command-line interface of the `jira` client: the
//! command tree, the routing of an invocation to a branch or a leaf, and the
//! field list and remote action of every leaf command.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing with clap
//! - [`commands`]: Routing plus one module per command family
//!
//! # Examples
//!
//! ```bash
//! # Prompt for everything that is missing
//! jira issue remotelink add
//!
//! # Pass required parameters to skip prompts, then open the issue
//! jira issue remotelink add ISSUE-1 "My useful link" http://example.com --web
//!
//! # List accessible projects
//! jira project
//! ```

pub mod cli_args;
pub mod commands;
