//! Reporting sink for sort progress
//!
//! The sorter emits one [`SortEvent`] per quarantine move and per final
//! rename. Reporters only observe; nothing in the sorter depends on them.

use crossterm::style::{Color, Stylize, style};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Something that happened to a single file during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortEvent {
    /// A non-image file was moved into the quarantine directory
    Quarantined { from: PathBuf, to: PathBuf },
    /// An image received its final sequential name
    Renamed { from: PathBuf, to: PathBuf },
}

/// Receiver of sort events
pub trait Reporter {
    fn report(&mut self, event: &SortEvent);
}

impl Reporter for Vec<SortEvent> {
    fn report(&mut self, event: &SortEvent) {
        self.push(event.clone());
    }
}

/// Counts of what a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub quarantined: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> String {
        format!(
            "Renamed: {}, Quarantined: {}",
            self.renamed, self.quarantined
        )
    }
}

impl Reporter for RunSummary {
    fn report(&mut self, event: &SortEvent) {
        match event {
            SortEvent::Quarantined { .. } => self.quarantined += 1,
            SortEvent::Renamed { .. } => self.renamed += 1,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Prints each event as a styled console line and logs it through tracing
pub struct ConsoleReporter<W: Write> {
    out: W,
    summary: RunSummary,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: RunSummary::new(),
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print_line(&mut self, icon: &str, color: Color, source: &str, message: &str) {
        // Console output is best effort
        let _ = writeln!(
            self.out,
            "  {} {} {}",
            style(icon).with(color).bold(),
            style(source).italic(),
            style(message).with(Color::DarkGrey),
        );
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn report(&mut self, event: &SortEvent) {
        self.summary.report(event);
        match event {
            SortEvent::Quarantined { from, to } => {
                info!(from = %from.display(), to = %to.display(), "Quarantined non-image file");
                let dir = to
                    .parent()
                    .map(file_name)
                    .unwrap_or_default();
                self.print_line("⊘", Color::Yellow, &file_name(from), &format!("→ {}/", dir));
            }
            SortEvent::Renamed { from, to } => {
                info!(from = %from.display(), to = %to.display(), "Renamed image");
                self.print_line(
                    "✓",
                    Color::Green,
                    &format!("Renamed '{}'", file_name(from)),
                    &format!("to '{}'", file_name(to)),
                );
            }
        }
    }
}
