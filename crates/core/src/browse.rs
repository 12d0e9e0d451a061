use std::collections::HashMap;
use std::env;
use std::io;
use std::process::{Command, Stdio};

use leon::Template;
use log::info;

use crate::error::Result;

/// Deep link to an issue on the configured server
pub const BROWSE_TEMPLATE: &str = "{server}/browse/{key}";

/// Renders the browse link for `key`.
///
/// ```
/// use jira_core::browse::browse_url;
///
/// let url = browse_url("https://example.atlassian.net/", "ISSUE-1")?;
/// assert_eq!(url, "https://example.atlassian.net/browse/ISSUE-1");
/// # Ok::<(), jira_core::error::Error>(())
/// ```
pub fn browse_url(server: &str, key: &str) -> Result<String> {
    let template = Template::parse(BROWSE_TEMPLATE)?;

    let mut context: HashMap<&str, &str> = HashMap::new();
    context.insert("server", server.trim_end_matches('/'));
    context.insert("key", key);

    Ok(template.render(&context)?)
}

/// Capability to show a URL to the user in a web browser
pub trait Browser {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with `$BROWSER` or the platform's default opener
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(browser_env: Option<String>) -> Command {
        if let Some(browser) = browser_env {
            let mut parts = browser.split_whitespace();
            if let Some(program) = parts.next() {
                let mut command = Command::new(program);
                command.args(parts);
                return command;
            }
        }

        platform_opener()
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        launch(Self::command(env::var("BROWSER").ok()), url)
    }
}

/// Runs `command` with `url` appended and waits for it to exit.
fn launch(mut command: Command, url: &str) -> io::Result<()> {
    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    info!("Opening {url} with {:?}", command.get_program());
    let status = command.status()?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("browser exited with {status}")))
    }
}

fn platform_opener() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    }
}
