//! Interactive confirmation
//!
//! Reads answers line by line. `y` starts a sort and, once it finished,
//! asks again; `n` ends the session. Each sort runs to completion before
//! the next line is read.

use crate::error::Result;
use crossterm::style::{Color, Stylize, style};
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{error, info};

/// Printed before every line of input
pub const PROMPT_PREFIX: &str = "> ";

const TAG: &str = "[ImageSorting]";

/// A line typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Other,
}

impl Answer {
    /// Case-insensitive `y` / `n`; anything else is [`Answer::Other`]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("y") {
            Answer::Yes
        } else if line.eq_ignore_ascii_case("n") {
            Answer::No
        } else {
            Answer::Other
        }
    }
}

fn print_message<W: Write>(out: &mut W, color: Color, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", style(TAG).with(color).bold(), message)
}

/// Ask whether `root` should be sorted
pub fn print_intro<W: Write>(out: &mut W, root: &Path) -> io::Result<()> {
    print_message(
        out,
        Color::Cyan,
        "Are you sure that you want sort the images inside this directory:",
    )?;
    print_message(out, Color::Cyan, &format!("'{}'", root.display()))?;
    print_message(out, Color::Cyan, "Start the sorting by pressing [y/N].")
}

/// Run `sort` once and print its outcome. Returns whether it succeeded.
///
/// A failed sort is reported, not returned: the session stays usable.
pub fn run_once<W, F>(out: &mut W, sort: &mut F) -> io::Result<bool>
where
    W: Write,
    F: FnMut(&mut W) -> Result<usize>,
{
    match sort(out) {
        Ok(renamed) => {
            info!(renamed, "Sort finished");
            print_message(out, Color::Green, &format!("Renamed '{}' files", renamed))?;
            Ok(true)
        }
        Err(e) => {
            error!(error = %e, "Sorting failed");
            print_message(out, Color::Red, &format!("Sorting failed: {}", e))?;
            Ok(false)
        }
    }
}

/// Prompt until the user answers `n` or input ends
pub fn run_loop<R, W, F>(input: R, out: &mut W, mut sort: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut W) -> Result<usize>,
{
    write!(out, "{}", PROMPT_PREFIX)?;
    out.flush()?;

    for line in input.lines() {
        match Answer::parse(&line?) {
            Answer::Yes => {
                run_once(out, &mut sort)?;
            }
            Answer::No => {
                info!("Session terminated by user");
                return print_message(
                    out,
                    Color::Yellow,
                    "You successfully terminated the application",
                );
            }
            Answer::Other => print_message(
                out,
                Color::DarkGrey,
                "Press 'y' to start sorting or 'N' to terminate the application.",
            )?,
        }

        write!(out, "{}", PROMPT_PREFIX)?;
        out.flush()?;
    }

    Ok(())
}
