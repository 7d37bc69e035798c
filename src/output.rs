//! Writing rendered text to the terminal.

use std::io::{self, Write};

use regex::Regex;

use crate::color::{codes::*, ColorAnnotator};

/// Pattern matching whole-word `@login` mentions.
fn mention_pattern(login: &str) -> Option<Regex> {
    if login.is_empty() {
        return None;
    }
    Regex::new(&format!(r"@{}\b", regex::escape(login))).ok()
}

/// Write `lines` to `out`, highlighting mentions of `current_user`.
pub fn write_lines<W: Write>(
    out: &mut W,
    lines: &[String],
    colors: &ColorAnnotator,
    current_user: &str,
) -> io::Result<()> {
    let pattern = mention_pattern(current_user);
    for line in lines {
        match &pattern {
            Some(pattern) => writeln!(out, "{}", colors.highlight(line, pattern))?,
            None => writeln!(out, "{}", line)?,
        }
    }
    out.flush()
}

/// Print `lines` to stdout, highlighting mentions of `current_user`.
pub fn print_lines(lines: &[String], colors: &ColorAnnotator, current_user: &str) -> io::Result<()> {
    write_lines(&mut io::stdout().lock(), lines, colors, current_user)
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{YELLOW}Warning:{RESET} {}", msg);
}
