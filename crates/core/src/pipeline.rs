//! The resolve, invoke, report sequence shared by every leaf command.
//!
//! A command only supplies its field list, its single remote call and how the
//! outcome is reported. Everything else lives here so every command resolves,
//! validates and fails the same way.

use log::{debug, info};

use crate::browse::Browser;
use crate::client::{ClientError, RemoteClient};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, ParameterSet, Sources};
use crate::progress::{Progress, ProgressScope};
use crate::prompt::Prompter;
use crate::report::Reporter;
use crate::resolver::{self, ResolutionContext};

/// Everything one invocation runs against
pub struct CommandContext<'a> {
    pub config: &'a Config,
    /// Prompts are only shown when true
    pub interactive: bool,
    pub debug: bool,
    pub prompter: &'a dyn Prompter,
    /// Shown for the duration of the remote call
    pub progress: &'a dyn Progress,
    pub client: &'a dyn RemoteClient,
    pub reporter: &'a dyn Reporter,
    pub browser: &'a dyn Browser,
}

impl CommandContext<'_> {
    fn resolution(&self) -> ResolutionContext<'_> {
        ResolutionContext {
            project_key: self.config.project_key(),
            interactive: self.interactive,
            debug: self.debug,
            prompter: self.prompter,
        }
    }
}

/// The populated parameters and the client the action calls
pub struct ResolvedContext<'a> {
    pub params: ParameterSet,
    pub client: &'a dyn RemoteClient,
}

pub trait Action {
    type Output;

    fn fields(&self) -> &[FieldSpec];

    /// Shown next to the spinner while [`Action::invoke`] runs
    fn progress_message(&self) -> &str;

    fn invoke(&self, context: &ResolvedContext<'_>) -> std::result::Result<Self::Output, ClientError>;

    fn report(
        &self,
        context: &CommandContext<'_>,
        params: &ParameterSet,
        output: Self::Output,
    ) -> Result<()>;
}

/// Object-safe face of an [`Action`], used by the command router
pub trait LeafCommand {
    fn execute(&self, sources: &Sources, context: &CommandContext<'_>) -> Result<()>;
}

impl<A: Action> LeafCommand for A {
    fn execute(&self, sources: &Sources, context: &CommandContext<'_>) -> Result<()> {
        execute(self, sources, context)
    }
}

/// Resolves parameters, calls the remote service once and reports the outcome.
///
/// # Errors
///
/// Resolution errors abort before the remote call. A failed call becomes
/// [`Error::RemoteActionFailure`] with the client's message and nothing is
/// reported. Errors from the report step are returned as they are.
pub fn execute<A: Action + ?Sized>(
    action: &A,
    sources: &Sources,
    context: &CommandContext<'_>,
) -> Result<()> {
    let params = resolver::resolve(action.fields(), sources, &context.resolution())?;
    debug!("Resolved {} parameter(s)", params.len());

    let resolved = ResolvedContext {
        params,
        client: context.client,
    };

    let output = {
        let _progress = ProgressScope::begin(context.progress, action.progress_message());
        action.invoke(&resolved)
    }
    .map_err(|e| Error::RemoteActionFailure(e.to_string()))?;
    info!("Remote call succeeded");

    action.report(context, &resolved.params, output)
}
