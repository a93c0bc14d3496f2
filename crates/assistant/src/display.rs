use std::io::{self, Write};

use router::ConversationRecord;

use crate::constants::{commands, messages};

pub fn print_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nDeskmate")?;
    writeln!(out, "Your personal voice assistant")?;
    writeln!(out, "Type a command, '{}' for help\n", commands::HELP)
}

pub fn print_help(out: &mut impl Write, voice_available: bool) -> io::Result<()> {
    writeln!(out, "\nCommands:")?;
    writeln!(out, "  <text>      - Run a command, e.g. 'weather in London'")?;
    if voice_available {
        writeln!(out, "  {}      - Speak a command", commands::SPEAK[0])?;
    }
    writeln!(out, "  {}    - Show recent commands", commands::HISTORY)?;
    writeln!(out, "  {}       - Show this help", commands::HELP)?;
    writeln!(out, "  quit        - Exit")?;
    writeln!(out, "\nTry: weather in Paris, what time is it, who is Ada Lovelace, open github")?;
    writeln!(out, "Set RUST_LOG=info to see provider logs")
}

pub fn print_response(out: &mut impl Write, response: &str) -> io::Result<()> {
    writeln!(out, "\nResponse:")?;
    writeln!(out, "  {}\n", response)
}

pub fn print_history(out: &mut impl Write, records: &[ConversationRecord]) -> io::Result<()> {
    writeln!(out, "\nCommand History")?;
    if records.is_empty() {
        writeln!(out, "  {}", messages::NO_HISTORY)?;
    }
    for record in records {
        writeln!(out, "  {}", record)?;
    }
    writeln!(out)
}
