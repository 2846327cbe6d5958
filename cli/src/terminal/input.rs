use std::io::BufRead;

use anyhow::Context;
use colored::*;
use console::Term;

use crate::terminal::colors;

const RANGE_PROMPT: &str = "Enter the IP range (e.g. 192.168.1.1-192.168.1.100): ";

/// Asks the operator for a range when none was given on the command line.
/// Reads stdin directly so a piped range works as well as a typed one.
pub fn prompt_range() -> anyhow::Result<String> {
    Term::stdout()
        .write_str(&RANGE_PROMPT.color(colors::PRIMARY).to_string())
        .context("writing range prompt")?;

    let mut line: String = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading IP range")?;
    Ok(line.trim().to_string())
}
