//! `jira issue remotelink add ISSUE-KEY TITLE URL`

use jira_core::browse::browse_url;
use jira_core::client::ClientError;
use jira_core::error::{Error, Result};
use jira_core::fields::{FieldSpec, ParameterSet, Sources};
use jira_core::pipeline::{Action, CommandContext, ResolvedContext};

use crate::cli_args::AddArgs;

pub const ISSUE_KEY: &str = "issueKey";
pub const TITLE: &str = "title";
pub const URL: &str = "url";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::positional(ISSUE_KEY, "Issue key", 0).issue_key(),
    FieldSpec::positional(TITLE, "Title", 1).with_flag(TITLE),
    FieldSpec::positional(URL, "Url", 2).with_flag(URL),
];

/// Collects the raw argument and flag values of an `add` invocation.
pub fn sources(args: &AddArgs) -> Sources {
    let positional = [&args.issue_key, &args.title, &args.url]
        .into_iter()
        .map(|value| value.clone().unwrap_or_default());

    Sources::new(positional)
        .with_flag(TITLE, args.title_flag.clone())
        .with_flag(URL, args.url_flag.clone())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddRemoteLink {
    /// Open the issue in a browser once the link is added
    pub web: bool,
}

impl Action for AddRemoteLink {
    type Output = ();

    fn fields(&self) -> &[FieldSpec] {
        FIELDS
    }

    fn progress_message(&self) -> &str {
        "Adding link to issue"
    }

    fn invoke(&self, context: &ResolvedContext<'_>) -> std::result::Result<(), ClientError> {
        let params = &context.params;
        context.client.add_issue_remote_link(
            params.get(ISSUE_KEY).unwrap_or_default(),
            params.get(TITLE).unwrap_or_default(),
            params.get(URL).unwrap_or_default(),
        )
    }

    fn report(&self, context: &CommandContext<'_>, params: &ParameterSet, (): ()) -> Result<()> {
        let issue_key = params.require(ISSUE_KEY)?;
        let title = params.require(TITLE)?;

        context
            .reporter
            .success(&format!("Added remotelink \"{title}\""));

        let link = browse_url(&context.config.server, issue_key)?;
        context.reporter.line(&link);

        if self.web {
            context.browser.open(&link).map_err(|e| {
                Error::PostActionFailure(format!("Could not open {link} in a browser: {e}"))
            })?;
        }

        Ok(())
    }
}
