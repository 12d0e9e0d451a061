use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::prompt::Question;

/// How a resolved value is normalised before it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// A bare issue number gets the default project prefix
    IssueKey,
}

/// Declaration of one command parameter and where it may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub message: &'static str,
    pub index: Option<usize>,
    pub flag: Option<&'static str>,
    pub required: bool,
    pub kind: ValueKind,
}

impl FieldSpec {
    pub const fn positional(name: &'static str, message: &'static str, index: usize) -> Self {
        Self {
            name,
            message,
            index: Some(index),
            flag: None,
            required: true,
            kind: ValueKind::Text,
        }
    }

    pub const fn with_flag(self, flag: &'static str) -> Self {
        Self {
            flag: Some(flag),
            ..self
        }
    }

    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    pub const fn issue_key(self) -> Self {
        Self {
            kind: ValueKind::IssueKey,
            ..self
        }
    }

    pub fn question(&self) -> Question {
        Question {
            name: self.name.to_string(),
            message: self.message.to_string(),
            required: self.required,
        }
    }

    pub fn normalize(&self, value: &str, project_key: Option<&str>) -> String {
        match self.kind {
            ValueKind::Text => value.to_string(),
            ValueKind::IssueKey => issue_key(project_key, value),
        }
    }
}

impl Display for FieldSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}`", self.name)
    }
}

/// Expands `123` to `PROJ-123` when a default project key is configured.
///
/// ```
/// use jira_core::fields::issue_key;
///
/// assert_eq!(issue_key(Some("PROJ"), "123"), "PROJ-123");
/// assert_eq!(issue_key(Some("PROJ"), "other-7"), "OTHER-7");
/// assert_eq!(issue_key(None, "other-7"), "other-7");
/// ```
pub fn issue_key(project_key: Option<&str>, key: &str) -> String {
    let Some(project_key) = project_key.filter(|p| !p.is_empty()) else {
        return key.to_string();
    };

    if key.parse::<u64>().is_ok() {
        format!("{project_key}-{key}")
    } else {
        key.to_uppercase()
    }
}

/// Raw inputs of one invocation: positional arguments and flag values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources {
    positional: Vec<String>,
    flags: HashMap<String, String>,
}

impl Sources {
    pub fn new<I, S>(positional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: positional.into_iter().map(Into::into).collect(),
            flags: HashMap::new(),
        }
    }

    pub fn with_flag(mut self, name: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.flags.insert(name.to_string(), value);
        }
        self
    }

    /// The positional argument at `index`, if present and non-empty.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional
            .get(index)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The value of flag `name`, if set and non-empty.
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Resolved values in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: IndexMap<String, String>,
    debug: bool,
}

impl ParameterSet {
    pub fn new(debug: bool) -> Self {
        Self {
            values: IndexMap::new(),
            debug,
        }
    }

    pub fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Fetches a value the command cannot run without.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::missing(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}
