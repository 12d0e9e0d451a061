//! Jira Client Core Library
//!
//! This crate provides the core of the `jira` command-line client: every leaf
//! command assembles its parameters from positional arguments, flags and
//! interactive prompts, calls the remote service exactly once and reports the
//! outcome the same way.
//!
//! # Key Features
//!
//! - **Parameter Resolution**: Ordered argument, flag and prompt sources per field
//! - **Prompting**: Line-based prompts with required-value validation
//! - **Remote Client**: Blocking HTTP client for the issue tracker's REST API
//! - **Reporting**: Success messages, tables and browser deep links
//! - **Error Handling**: One error type covering every way a command can fail
//!
//! # Examples
//!
//! Resolving parameters without a terminal:
//!
//! ```
//! use jira_core::fields::{FieldSpec, Sources};
//! use jira_core::prompt::TerminalPrompter;
//! use jira_core::resolver::{resolve, ResolutionContext};
//!
//! const FIELDS: &[FieldSpec] = &[
//!     FieldSpec::positional("issueKey", "Issue key", 0).issue_key(),
//!     FieldSpec::positional("title", "Title", 1),
//! ];
//!
//! let prompter = TerminalPrompter::stdio();
//! let context = ResolutionContext {
//!     project_key: Some("PROJ"),
//!     interactive: false,
//!     debug: false,
//!     prompter: &prompter,
//! };
//! let params = resolve(FIELDS, &Sources::new(["12", "Docs"]), &context)?;
//! assert_eq!(params.get("issueKey"), Some("PROJ-12"));
//! # Ok::<(), jira_core::error::Error>(())
//! ```

pub mod browse;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod resolver;
