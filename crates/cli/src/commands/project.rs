use jira_core::client::{ClientError, Project};
use jira_core::error::Result;
use jira_core::fields::{FieldSpec, ParameterSet};
use jira_core::pipeline::{Action, CommandContext, ResolvedContext};
use jira_core::report::render_projects;

/// `jira project`: lists every project the user can access
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListProjects;

impl Action for ListProjects {
    type Output = Vec<Project>;

    fn fields(&self) -> &[FieldSpec] {
        &[]
    }

    fn progress_message(&self) -> &str {
        "Fetching projects"
    }

    fn invoke(&self, context: &ResolvedContext<'_>) -> std::result::Result<Vec<Project>, ClientError> {
        context.client.projects()
    }

    fn report(
        &self,
        context: &CommandContext<'_>,
        _params: &ParameterSet,
        projects: Vec<Project>,
    ) -> Result<()> {
        context.reporter.line(&render_projects(&projects));
        Ok(())
    }
}
