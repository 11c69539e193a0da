//! Output rendering and formatting

use chrono::SecondsFormat;
use console::{Style, Term};
use papermc_types::{Build, ProjectDetail};
use serde::Serialize;
use std::io;

use crate::commands::CommandOutput;

/// Output renderer for CLI results
///
/// Results go to stdout, one item per line, so they can be piped. CI output
/// is always JSON.
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self {
            json_output,
            term: Term::stdout(),
        }
    }

    /// Render command result
    pub fn render_result(&self, result: &CommandOutput) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_plain(result)
        }
    }

    fn render_json(&self, result: &CommandOutput) -> io::Result<()> {
        match result {
            CommandOutput::Projects(projects) => print_json(projects),
            CommandOutput::Versions(versions) => print_json(versions),
            CommandOutput::Builds(builds) => print_json(builds),
            CommandOutput::Url(url) => print_json(&serde_json::json!({ "url": url })),
            CommandOutput::Saved(result) => print_json(result),
            CommandOutput::Matrix(entries) => print_json(entries),
            CommandOutput::GithubMatrix(matrix) => print_json(matrix),
            CommandOutput::Text(text) => print_json(&serde_json::json!({ "value": text })),
        }
    }

    fn render_plain(&self, result: &CommandOutput) -> io::Result<()> {
        match result {
            CommandOutput::Projects(projects) => self.render_projects(projects),
            CommandOutput::Versions(versions) => {
                for version in versions {
                    self.term.write_line(version)?;
                }
                Ok(())
            }
            CommandOutput::Builds(builds) => self.render_builds(builds),
            CommandOutput::Url(text) | CommandOutput::Text(text) => self.term.write_line(text),
            CommandOutput::Saved(result) => {
                if !result.was_verified() {
                    let warn = self.style(Style::new().yellow());
                    eprintln!(
                        "{}",
                        warn.apply_to("warning: no checksum published, file not verified")
                    );
                }
                self.term.write_line(&result.path.display().to_string())
            }
            CommandOutput::Matrix(entries) => print_json(entries),
            CommandOutput::GithubMatrix(matrix) => print_json(matrix),
        }
    }

    fn render_projects(&self, projects: &[ProjectDetail]) -> io::Result<()> {
        if projects.is_empty() {
            self.term.write_line("No projects found.")?;
            return Ok(());
        }
        for detail in projects {
            self.term
                .write_line(&format!("{} ({})", detail.project.id, detail.project.name))?;
        }
        Ok(())
    }

    fn render_builds(&self, builds: &[Build]) -> io::Result<()> {
        if builds.is_empty() {
            self.term.write_line("No builds found.")?;
            return Ok(());
        }
        let id_style = self.style(Style::new().bold());
        for build in builds {
            let time = build.time.map_or_else(
                || "-".to_string(),
                |time| time.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
            self.term.write_line(&format!(
                "{} {} {time}",
                id_style.apply_to(build.id),
                build.channel
            ))?;
        }
        Ok(())
    }

    fn style(&self, style: Style) -> Style {
        if self.supports_color() {
            style
        } else {
            Style::new()
        }
    }

    fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
