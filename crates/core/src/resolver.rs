//! Resolution of command parameters from arguments, flags and prompts.
//!
//! Each field is resolved on its own, strictly in declaration order:
//!
//! 1. the positional argument at the field's index,
//! 2. the field's flag,
//! 3. an interactive prompt, only when the context is interactive.
//!
//! Resolution never reaches the remote service.

use log::debug;

use crate::error::{Error, Result};
use crate::fields::{FieldSpec, ParameterSet, Sources};
use crate::prompt::Prompter;

pub struct ResolutionContext<'a> {
    pub project_key: Option<&'a str>,
    pub interactive: bool,
    pub debug: bool,
    pub prompter: &'a dyn Prompter,
}

/// Resolves every field into a [`ParameterSet`].
///
/// # Errors
///
/// Returns [`Error::MissingRequiredParameter`] when no source yields a value for
/// a required field, and [`Error::PromptFailure`] when reading the answer fails.
/// Fields after the failing one are not looked at.
pub fn resolve(
    fields: &[FieldSpec],
    sources: &Sources,
    context: &ResolutionContext<'_>,
) -> Result<ParameterSet> {
    let mut params = ParameterSet::new(context.debug);

    for field in fields {
        if let Some(value) = resolve_field(field, sources, context)? {
            params.insert(field.name, value);
        }
    }

    Ok(params)
}

fn resolve_field(
    field: &FieldSpec,
    sources: &Sources,
    context: &ResolutionContext<'_>,
) -> Result<Option<String>> {
    if let Some(value) = field.index.and_then(|index| sources.positional(index)) {
        debug!("{field} taken from positional argument");
        return Ok(Some(field.normalize(value, context.project_key)));
    }

    if let Some(value) = field.flag.and_then(|flag| sources.flag(flag)) {
        debug!("{field} taken from flag");
        return Ok(Some(field.normalize(value, context.project_key)));
    }

    if !field.required {
        return Ok(None);
    }

    if !context.interactive {
        debug!("{field} missing and input is not interactive");
        return Err(Error::missing(field.name));
    }

    let answer = context
        .prompter
        .ask(&field.question())
        .map_err(|reason| Error::prompt_failure(field.name, reason))?;

    if answer.is_empty() {
        return Err(Error::missing(field.name));
    }

    Ok(Some(field.normalize(&answer, context.project_key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{PromptError, Question};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::positional("issueKey", "Issue key", 0).issue_key(),
        FieldSpec::positional("title", "Title", 1).with_flag("title"),
        FieldSpec::positional("url", "Url", 2).with_flag("url"),
    ];

    #[derive(Default)]
    struct Scripted {
        answers: RefCell<VecDeque<std::result::Result<String, PromptError>>>,
        asked: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn answering(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| Ok((*a).to_string())).collect()),
                asked: RefCell::default(),
            }
        }
    }

    impl Prompter for Scripted {
        fn ask(&self, question: &Question) -> std::result::Result<String, PromptError> {
            self.asked.borrow_mut().push(question.name.clone());
            self.answers
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(PromptError::Closed))
        }
    }

    fn context<'a>(prompter: &'a Scripted, interactive: bool) -> ResolutionContext<'a> {
        ResolutionContext {
            project_key: Some("PROJ"),
            interactive,
            debug: false,
            prompter,
        }
    }

    #[test]
    fn test_positional_arguments_skip_prompts() {
        let prompter = Scripted::default();
        let sources = Sources::new(["7", "My link", "http://example.com"]);

        let params = resolve(FIELDS, &sources, &context(&prompter, true)).unwrap();

        assert_eq!(params.get("issueKey"), Some("PROJ-7"));
        assert_eq!(params.get("title"), Some("My link"));
        assert_eq!(params.get("url"), Some("http://example.com"));
        assert!(prompter.asked.borrow().is_empty());
    }

    #[test]
    fn test_positional_wins_over_flag() {
        let prompter = Scripted::default();
        let sources = Sources::new(["ISSUE-1", "From args", "http://a"])
            .with_flag("title", Some("From flag".into()));

        let params = resolve(FIELDS, &sources, &context(&prompter, true)).unwrap();
        assert_eq!(params.get("title"), Some("From args"));
    }

    #[test]
    fn test_flag_fills_missing_positional() {
        let prompter = Scripted::default();
        let sources = Sources::new(["ISSUE-1"])
            .with_flag("title", Some("From flag".into()))
            .with_flag("url", Some("http://flag".into()));

        let params = resolve(FIELDS, &sources, &context(&prompter, true)).unwrap();
        assert_eq!(params.get("title"), Some("From flag"));
        assert_eq!(params.get("url"), Some("http://flag"));
        assert!(prompter.asked.borrow().is_empty());
    }

    #[test]
    fn test_prompts_follow_declaration_order() {
        let prompter = Scripted::answering(&["9", "T", "http://x"]);

        let params = resolve(FIELDS, &Sources::default(), &context(&prompter, true)).unwrap();

        assert_eq!(*prompter.asked.borrow(), ["issueKey", "title", "url"]);
        assert_eq!(params.get("issueKey"), Some("PROJ-9"));
    }

    #[test]
    fn test_non_interactive_fails_without_prompting() {
        let prompter = Scripted::answering(&["unused"]);
        let sources = Sources::new(["ISSUE-1"]);

        let result = resolve(FIELDS, &sources, &context(&prompter, false));

        match result {
            Err(Error::MissingRequiredParameter { field }) => assert_eq!(field, "title"),
            other => panic!("Expected missing title, got {other:?}"),
        }
        assert!(prompter.asked.borrow().is_empty());
    }

    #[test]
    fn test_empty_answer_is_missing_and_stops_resolution() {
        let prompter = Scripted::answering(&[""]);
        let sources = Sources::new(["ISSUE-3"]);

        let result = resolve(FIELDS, &sources, &context(&prompter, true));

        assert!(matches!(result, Err(Error::MissingRequiredParameter { .. })));
        assert_eq!(*prompter.asked.borrow(), ["title"]);
    }

    #[test]
    fn test_prompt_channel_failure() {
        let prompter = Scripted::default();
        let sources = Sources::new(["ISSUE-3"]);

        let result = resolve(FIELDS, &sources, &context(&prompter, true));

        match result {
            Err(Error::PromptFailure { field, reason }) => {
                assert_eq!(field, "title");
                assert_eq!(reason, PromptError::Closed);
            }
            other => panic!("Expected prompt failure, got {other:?}"),
        }
    }

    #[test]
    fn test_optional_field_is_never_prompted() {
        const OPTIONAL: &[FieldSpec] = &[FieldSpec::positional("summary", "Summary", 0)
            .with_flag("summary")
            .optional()];
        let prompter = Scripted::default();

        let params = resolve(OPTIONAL, &Sources::default(), &context(&prompter, true)).unwrap();

        assert!(params.is_empty());
        assert!(prompter.asked.borrow().is_empty());
    }

    #[test]
    fn test_debug_is_carried() {
        let prompter = Scripted::default();
        let context = ResolutionContext {
            project_key: None,
            interactive: false,
            debug: true,
            prompter: &prompter,
        };
        let params = resolve(&[], &Sources::default(), &context).unwrap();
        assert!(params.debug());
    }
}
