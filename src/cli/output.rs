//! Terminal output for mono commands
//!
//! Status lines go to stdout, problems to stderr. Colors follow
//! NO_COLOR, CLICOLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// `error: <msg>` on stderr, used by `main` for the final error.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// `Warning: <msg>` on stderr, e.g. when `clean` finds nothing.
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Checkmark line after a finished install or build.
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Per-path result line such as `removed: apps/api/dist` or
/// `would remove: ...` for a dry run.
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}", action_line(label, msg));
}

/// Heading above a listing, e.g. `Workspaces (3)`.
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Indented listing row (workspaces, help entries).
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("{}", detail_line(msg));
}

/// Uncolored data such as the effective TOML config.
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

fn action_line(label: &str, msg: &(impl Display + ?Sized)) -> String {
    format!("{}: {}", label.green(), msg)
}

fn detail_line(msg: &(impl Display + ?Sized)) -> String {
    format!("  {}", msg)
}
