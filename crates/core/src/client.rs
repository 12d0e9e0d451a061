//! Remote API client.
//!
//! [`RemoteClient`] is the seam commands call through; [`HttpClient`] is the
//! blocking HTTP implementation used by the binary.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{AuthType, Config};

const API_SEGMENTS: [&str; 3] = ["rest", "api", "2"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{}", error_chain(.0))]
    Http(#[from] reqwest::Error),

    #[error("{}", .message)]
    Status { status: u16, message: String },

    #[error("Unable to decode response: {}", .0)]
    Decode(#[from] serde_json::Error),

    #[error("Invalid server URL {}", .0)]
    InvalidServer(String),

    #[error("Invalid issue key `{}`", .0)]
    InvalidIssueKey(String),
}

/// Joins an error with its causes, skipping causes the message already shows.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }

    message
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "displayName", default)]
    pub display_name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub key: String,
    pub name: String,
    #[serde(rename = "projectTypeKey", default)]
    pub kind: String,
    #[serde(default)]
    pub lead: Option<User>,
}

impl Project {
    pub fn lead_name(&self) -> &str {
        self.lead.as_ref().map_or("", |lead| lead.display_name.as_str())
    }
}

/// One method per remote operation a command may invoke
pub trait RemoteClient {
    fn add_issue_remote_link(
        &self,
        issue_key: &str,
        title: &str,
        url: &str,
    ) -> Result<(), ClientError>;

    fn projects(&self) -> Result<Vec<Project>, ClientError>;
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct RemoteLinkObject<'a> {
    url: &'a str,
    title: &'a str,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct RemoteLinkRequest<'a> {
    object: RemoteLinkObject<'a>,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorResponse {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

pub struct HttpClient {
    http: Client,
    base: Url,
    login: String,
    token: Option<String>,
    auth_type: AuthType,
    debug: bool,
}

impl HttpClient {
    pub fn new(config: &Config, debug: bool) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("jira-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_http(http, config, debug)
    }

    fn with_http(http: Client, config: &Config, debug: bool) -> Result<Self, ClientError> {
        let server = config.server.trim_end_matches('/');
        let base = Url::parse(server)
            .map_err(|e| ClientError::InvalidServer(format!("`{server}`: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidServer(format!(
                "`{server}`: not a base URL"
            )));
        }

        Ok(Self {
            http,
            base,
            login: config.login.clone(),
            token: config.api_token.clone(),
            auth_type: config.auth_type,
            debug,
        })
    }

    /// `{server}/rest/api/2/` followed by `segments`, each escaped as a
    /// single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(API_SEGMENTS.iter().chain(segments).copied());
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.token.as_deref().unwrap_or_default();
        match self.auth_type {
            AuthType::Basic => request.basic_auth(&self.login, Some(token)),
            AuthType::Bearer => request.bearer_auth(token),
        }
    }

    /// Sends the request and returns the body of a successful response.
    fn send(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let request = self
            .authorize(request)
            .header(reqwest::header::ACCEPT, "application/json")
            .build()?;

        if self.debug {
            debug!("Request: {} {}", request.method(), request.url());
        }

        let response = self.http.execute(request)?;
        let status = response.status();
        let body = response.text()?;

        if self.debug {
            debug!("Response: {status}\n{body}");
        }

        if status.is_success() {
            Ok(body)
        } else {
            Err(error_from_response(status, &body))
        }
    }
}

impl RemoteClient for HttpClient {
    fn add_issue_remote_link(
        &self,
        issue_key: &str,
        title: &str,
        url: &str,
    ) -> Result<(), ClientError> {
        // Dot segments are dropped by URL normalisation rather than escaped.
        if matches!(issue_key.trim(), "" | "." | "..") {
            return Err(ClientError::InvalidIssueKey(issue_key.to_string()));
        }

        let body = remote_link_body(title, url);
        let request = self
            .http
            .post(self.endpoint(&["issue", issue_key, "remotelink"]))
            .json(&body);

        self.send(request).map(|_| ())
    }

    fn projects(&self) -> Result<Vec<Project>, ClientError> {
        let mut url = self.endpoint(&["project"]);
        url.set_query(Some("expand=lead"));
        let body = self.send(self.http.get(url))?;

        Ok(serde_json::from_str(&body)?)
    }
}

fn remote_link_body<'a>(title: &'a str, url: &'a str) -> RemoteLinkRequest<'a> {
    RemoteLinkRequest {
        object: RemoteLinkObject { url, title },
    }
}

/// Builds a readable error from a non-success response.
fn error_from_response(status: StatusCode, body: &str) -> ClientError {
    let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();

    let mut messages = parsed.error_messages;
    messages.extend(
        parsed
            .errors
            .into_iter()
            .map(|(field, message)| format!("{field}: {message}")),
    );

    let message = if messages.is_empty() {
        format!(
            "Unexpected response status {}",
            status.canonical_reason().map_or_else(
                || status.as_u16().to_string(),
                |reason| format!("{} {reason}", status.as_u16())
            )
        )
    } else {
        messages.join("\n")
    };

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};

    use reqwest::header::AUTHORIZATION;

    fn config() -> Config {
        Config {
            server: "https://example.atlassian.net/".to_string(),
            login: "jane@example.com".to_string(),
            api_token: Some("token".to_string()),
            ..Config::default()
        }
    }

    fn local_client(config: &Config) -> HttpClient {
        let http = Client::builder().no_proxy().build().unwrap();
        HttpClient::with_http(http, config, true).unwrap()
    }

    fn read_request(stream: &mut TcpStream) -> String {
        let mut reader = BufReader::new(stream);
        let mut request = String::new();
        let mut content_length = 0;

        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            request.push_str(&line);
            if line == "\r\n" || line.is_empty() {
                break;
            }
        }

        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();
        request + &String::from_utf8(body).unwrap()
    }

    /// Answers one request with `status` and `body`, returning the server URL
    /// and a handle yielding the raw request.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            request
        });

        (server, handle)
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = HttpClient::new(&config(), false).unwrap();
        assert_eq!(
            client.endpoint(&["project"]).as_str(),
            "https://example.atlassian.net/rest/api/2/project"
        );
    }

    #[test]
    fn test_endpoint_keeps_server_path() {
        let client = HttpClient::new(
            &Config {
                server: "https://jira.local/jira/".into(),
                ..config()
            },
            false,
        )
        .unwrap();
        assert_eq!(
            client.endpoint(&["project"]).as_str(),
            "https://jira.local/jira/rest/api/2/project"
        );
    }

    #[test]
    fn test_issue_key_is_one_escaped_path_segment() {
        let client = HttpClient::new(
            &Config {
                server: "https://j.example".into(),
                ..config()
            },
            false,
        )
        .unwrap();

        let url = client.endpoint(&["issue", "ABC-1/../../../project?x=", "remotelink"]);

        assert_eq!(
            url.as_str(),
            "https://j.example/rest/api/2/issue/ABC-1%2F..%2F..%2F..%2Fproject%3Fx=/remotelink"
        );
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_dot_issue_key_is_rejected() {
        let client = HttpClient::new(&config(), false).unwrap();
        let error = client
            .add_issue_remote_link("..", "My link", "http://example.com")
            .unwrap_err();
        assert!(matches!(error, ClientError::InvalidIssueKey(_)));
    }

    #[test]
    fn test_invalid_server_is_rejected_up_front() {
        let result = HttpClient::new(
            &Config {
                server: "jira.local".into(),
                ..config()
            },
            false,
        );
        assert!(matches!(result, Err(ClientError::InvalidServer(_))));
    }

    #[test]
    fn test_basic_auth_is_the_default() {
        let client = HttpClient::new(&config(), false).unwrap();
        let request = client
            .authorize(client.http.get(client.endpoint(&["myself"])))
            .build()
            .unwrap();

        let header = &request.headers()[AUTHORIZATION];
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "Basic amFuZUBleGFtcGxlLmNvbTp0b2tlbg==");
    }

    #[test]
    fn test_bearer_auth_uses_token() {
        let client = HttpClient::new(
            &Config {
                auth_type: AuthType::Bearer,
                ..config()
            },
            false,
        )
        .unwrap();
        let request = client
            .authorize(client.http.get(client.endpoint(&["myself"])))
            .build()
            .unwrap();

        let header = &request.headers()[AUTHORIZATION];
        assert!(header.is_sensitive());
        assert_eq!(header.to_str().unwrap(), "Bearer token");
    }

    #[test]
    fn test_remote_link_body_shape() {
        let body = serde_json::to_value(remote_link_body("My link", "http://example.com")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"object": {"url": "http://example.com", "title": "My link"}})
        );
    }

    #[test]
    fn test_add_remote_link_error_status_is_reported() {
        let (server, handle) = serve_once(
            "404 Not Found",
            r#"{"errorMessages":["Issue does not exist or you do not have permission to see it."],"errors":{}}"#,
        );
        let client = local_client(&Config { server, ..config() });

        let error = client
            .add_issue_remote_link("ABC-1", "My link", "http://example.com")
            .unwrap_err();
        let request = handle.join().unwrap();

        assert!(matches!(error, ClientError::Status { status: 404, .. }));
        assert_eq!(
            error.to_string(),
            "Issue does not exist or you do not have permission to see it."
        );
        assert!(request.starts_with("POST /rest/api/2/issue/ABC-1/remotelink HTTP/1.1\r\n"));
        assert!(request.contains("Basic amFuZUBleGFtcGxlLmNvbTp0b2tlbg=="));
        assert!(request.ends_with(r#"{"object":{"url":"http://example.com","title":"My link"}}"#));
    }

    #[test]
    fn test_projects_are_fetched_with_lead() {
        let (server, handle) = serve_once(
            "200 OK",
            r#"[{"key":"PROJ","name":"Project","projectTypeKey":"software","lead":{"displayName":"Jane Doe"}}]"#,
        );
        let client = local_client(&Config { server, ..config() });

        let projects = client.projects().unwrap();
        let request = handle.join().unwrap();

        assert!(request.starts_with("GET /rest/api/2/project?expand=lead HTTP/1.1\r\n"));
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].lead_name(), "Jane Doe");
    }

    #[test]
    fn test_connection_failure_keeps_cause() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let server = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = local_client(&Config { server, ..config() });

        let error = client.projects().unwrap_err();

        assert!(matches!(error, ClientError::Http(_)));
        assert!(error.to_string().to_lowercase().contains("refused"));
    }

    #[test]
    fn test_error_chain_appends_new_causes_only() {
        #[derive(Debug, Error)]
        #[error("error sending request")]
        struct Outer(#[source] std::io::Error);

        let error = Outer(std::io::Error::other("connection refused"));
        assert_eq!(error_chain(&error), "error sending request: connection refused");

        let plain = std::io::Error::other("timed out");
        assert_eq!(error_chain(&plain), "timed out");
    }

    #[test]
    fn test_projects_decode() {
        let body = r#"[
            {"key": "PROJ", "name": "Project", "projectTypeKey": "software",
             "lead": {"displayName": "Jane Doe", "active": true}},
            {"key": "OPS", "name": "Operations"}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(body).unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].kind, "software");
        assert_eq!(projects[0].lead_name(), "Jane Doe");
        assert_eq!(projects[1].lead_name(), "");
    }

    #[test]
    fn test_error_from_response_collects_messages() {
        let body = r#"{"errorMessages": ["Issue does not exist or you do not have permission to see it."], "errors": {"url": "Invalid URL"}}"#;
        let error = error_from_response(StatusCode::NOT_FOUND, body);

        assert_eq!(
            error.to_string(),
            "Issue does not exist or you do not have permission to see it.\nurl: Invalid URL"
        );
        assert!(matches!(error, ClientError::Status { status: 404, .. }));
    }

    #[test]
    fn test_error_from_response_without_body() {
        let error = error_from_response(StatusCode::UNAUTHORIZED, "<html>nope</html>");
        assert_eq!(error.to_string(), "Unexpected response status 401 Unauthorized");
    }
}
