use std::io::{stdout, Write};

use comfy_table::{presets, Table};
use crossterm::style::Stylize;

use crate::client::Project;

/// Where command outcomes are written
pub trait Reporter {
    fn success(&self, message: &str);
    fn line(&self, text: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReporter;

impl Reporter for TerminalReporter {
    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
        let _ = stdout().flush();
    }

    fn line(&self, text: &str) {
        println!("{text}");
        let _ = stdout().flush();
    }
}

pub fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found".to_string();
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["KEY", "NAME", "TYPE", "LEAD"]);
    for project in projects {
        table.add_row(vec![
            project.key.as_str(),
            project.name.as_str(),
            project.kind.as_str(),
            project.lead_name(),
        ]);
    }

    table.to_string()
}
