use leon::{ParseError, RenderError};
use thiserror::Error;

use crate::client::ClientError;
use crate::prompt::PromptError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required parameter `{}`", .field)]
    MissingRequiredParameter { field: String },

    #[error("Could not read input for `{}`: {}", .field, .reason)]
    PromptFailure { field: String, reason: PromptError },

    #[error("{}", .0)]
    RemoteActionFailure(String),

    #[error("{}", .0)]
    PostActionFailure(String),

    #[error("Could not create API client: {}", .0)]
    ClientSetup(#[source] ClientError),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error reading config file at `{}`: {}", .path, .original)]
    Yaml {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Config file at `{}` is missing {}", .path, .missing)]
    IncompleteConfig { path: String, missing: String },

    #[error("No API token found, set `{}` to your Jira API token", .0)]
    MissingApiToken(&'static str),

    #[error("Unknown auth type: \"{}\" (expected `basic` or `bearer`)", .0)]
    UnknownAuthType(String),

    #[error("Error parsing link template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering link template: {}", .0)]
    Render(#[from] RenderError),
}

impl Error {
    pub fn missing(field: &str) -> Self {
        Self::MissingRequiredParameter {
            field: field.to_string(),
        }
    }

    pub fn prompt_failure(field: &str, reason: PromptError) -> Self {
        Self::PromptFailure {
            field: field.to_string(),
            reason,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn yaml_error(path: String, original: serde_yaml::Error) -> Self {
        Self::Yaml { path, original }
    }
}
