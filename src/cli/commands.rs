//! Command implementations for the rexcheck CLI

use rexcheck_core::lang::error_classes::ERROR_CLASSES;
use rexcheck_core::lang::match_flags::MATCH_FLAGS;
use rexcheck_core::lang::registry::VocabInfo;
use rexcheck_core::lang::syntax_options::SYNTAX_OPTIONS;

use super::{CliResult, ExitCode};

/// Print every registry with numeric values, aliases and descriptions.
pub fn print_vocab() -> CliResult<ExitCode> {
    print!("{}", render_vocab());
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn render_vocab() -> String {
    let mut out = String::new();
    render_table(&mut out, "syntax options", SYNTAX_OPTIONS, |id| id.bits());
    out.push('\n');
    render_table(&mut out, "match flags", MATCH_FLAGS, |id| id.bits());
    out.push('\n');
    render_table(&mut out, "error classes", ERROR_CLASSES, |id| id.code());
    out
}

fn render_table<Id: Copy>(out: &mut String, title: &str, table: &[VocabInfo<Id>], value: impl Fn(Id) -> u32) {
    out.push_str(title);
    out.push_str(":\n");
    for item in table {
        let value = format!("0x{:X}", value(item.id));
        out.push_str(&format!("  {:<20} {:<8} {}", item.canonical, value, item.description));
        if !item.aliases.is_empty() {
            out.push_str(&format!(" (aliases: {})", item.aliases.join(", ")));
        }
        out.push('\n');
    }
}
