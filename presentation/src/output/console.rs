//! Console rendering of decision displays

use colored::Colorize;
use refbox_application::ports::display::DisplayAdapter;
use refbox_application::ports::surface_event::{SurfaceEvent, SurfaceNotice};
use refbox_domain::config::ConfigIssue;
use refbox_domain::{LightColor, Surface, Vote, VoteReport};

/// Draws one decision display as a line on stdout
pub struct ConsoleDisplay {
    label: String,
}

impl ConsoleDisplay {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl DisplayAdapter for ConsoleDisplay {
    fn render(&self, surface: &Surface) {
        println!("{}", ConsoleFormatter::surface_line(&self.label, surface));
    }

    fn render_jury_detail(&self, report: &VoteReport) {
        println!("{}", ConsoleFormatter::jury_detail(&self.label, report));
    }
}

/// Text formatting shared by the console adapters
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line per frame, e.g. `athlete  ● ● ●`
    pub fn surface_line(label: &str, surface: &Surface) -> String {
        let body = match surface {
            Surface::Hidden => "-".dimmed().to_string(),
            Surface::DownArrow => "▼ DOWN".yellow().bold().to_string(),
            Surface::Lights(colors) => colors
                .iter()
                .map(|c| Self::light(*c))
                .collect::<Vec<_>>()
                .join(" "),
        };
        format!("{:<10} {}", label.cyan(), body)
    }

    fn light(color: LightColor) -> String {
        match color {
            LightColor::White => "●".white().bold().to_string(),
            LightColor::Red => "●".red().bold().to_string(),
            LightColor::Neutral => "○".dimmed().to_string(),
        }
    }

    /// Vote-by-vote breakdown with times relative to the first vote.
    pub fn jury_detail(label: &str, report: &VoteReport) -> String {
        let first = report
            .votes
            .iter()
            .zip(report.times.iter())
            .filter(|(v, _)| v.is_cast())
            .map(|(_, t)| *t)
            .min();

        let cells: Vec<String> = report
            .votes
            .iter()
            .zip(report.times.iter())
            .enumerate()
            .map(|(i, (vote, at))| {
                let mark = match vote {
                    Vote::White => "W".white().bold().to_string(),
                    Vote::Red => "R".red().bold().to_string(),
                    Vote::Unset => "-".dimmed().to_string(),
                };
                match (vote.is_cast(), first) {
                    (true, Some(first)) => format!("{}:{} +{}ms", i + 1, mark, at - first),
                    _ => format!("{}:{}", i + 1, mark),
                }
            })
            .collect();

        format!(
            "{:<10} {} {}",
            label.cyan(),
            cells.join("  "),
            report.final_value().to_string().bold()
        )
    }

    pub fn notice(label: &str, notice: &SurfaceNotice) -> String {
        let event = match notice.event {
            SurfaceEvent::Down => "down".yellow(),
            SurfaceEvent::Hide => "hide".dimmed(),
        };
        format!("{:<10} {}", label.cyan(), event)
    }

    pub fn config_issue(issue: &ConfigIssue) -> String {
        if issue.is_error() {
            format!("{} {}", "error:".red().bold(), issue.message)
        } else {
            format!("{} {}", "warning:".yellow().bold(), issue.message)
        }
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
