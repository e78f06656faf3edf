//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::password::{Strength, StrengthLabel};
use crate::vault::Entry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (Service, Username, Notes, Updated).
/// Passwords are never shown here.
pub fn print_entries_table(entries: &[&Entry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Username", "Notes", "Updated"]);

    for e in entries {
        table.add_row(vec![
            e.service.clone(),
            e.username.clone(),
            e.notes.clone(),
            e.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print one entry in full, password included.
pub fn print_entry(entry: &Entry) {
    println!("{:>10} {}", style("Service:").bold(), entry.service);
    println!("{:>10} {}", style("Username:").bold(), entry.username);
    println!("{:>10} {}", style("Password:").bold(), entry.password);
    if !entry.notes.is_empty() {
        println!("{:>10} {}", style("Notes:").bold(), entry.notes);
    }
}

/// Print "Strength: <label> (<score>/100)" colored by label.
pub fn print_strength(strength: &Strength) {
    let label = match strength.label {
        StrengthLabel::Weak => style(strength.label.as_str()).red().bold(),
        StrengthLabel::Fair => style(strength.label.as_str()).yellow().bold(),
        StrengthLabel::Good => style(strength.label.as_str()).cyan().bold(),
        StrengthLabel::Strong => style(strength.label.as_str()).green().bold(),
    };
    println!("Strength: {label} ({}/100)", strength.score);
}
