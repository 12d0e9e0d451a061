use std::io::{stderr, stdin, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use jira_core::browse::SystemBrowser;
use jira_core::client::HttpClient;
use jira_core::config::Config;
use jira_core::error::{Error, Result};
use jira_core::pipeline::CommandContext;
use jira_core::progress::SpinnerProgress;
use jira_core::prompt::TerminalPrompter;
use jira_core::report::TerminalReporter;
use log::debug;

use jira_cli::cli_args::{self, Args};
use jira_cli::commands::{self, Route};

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn execute(args: Args) -> Result<()> {
    let route = commands::route(args.command);

    if let Route::Branch { path } = &route {
        print!("{}", cli_args::help_for(path));
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let client = HttpClient::new(&config, args.debug).map_err(Error::ClientSetup)?;
    debug!("Client ready for {}", config.server);

    let prompter = TerminalPrompter::stdio();
    let progress = SpinnerProgress::new(stderr().is_terminal());
    let context = CommandContext {
        config: &config,
        interactive: stdin().is_terminal(),
        debug: args.debug,
        prompter: &prompter,
        progress: &progress,
        client: &client,
        reporter: &TerminalReporter,
        browser: &SystemBrowser,
    };

    route.execute(&context)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {e:?}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
