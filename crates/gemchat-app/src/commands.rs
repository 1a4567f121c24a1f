//! REPL input parsing.

use std::path::PathBuf;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text to submit.
    Send(String),
    /// `/attach <path>`: buffer a file for the next message.
    Attach(PathBuf),
    /// `/detach`: drop the buffered file.
    Detach,
    /// `/history`: print the transcript.
    History,
    /// `/help`
    Help,
    /// `/quit` or `/exit`
    Quit,
    /// Blank line.
    Empty,
    /// Malformed or unknown slash command, with a hint.
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  /attach <path>   attach a file to the next message
  /detach          remove the attached file
  /history         show the conversation so far
  /help            show this help
  /quit            leave
Anything else is sent as a message.";

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Send(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "attach" if arg.is_empty() => Command::Invalid("usage: /attach <path>".into()),
        "attach" => Command::Attach(PathBuf::from(arg)),
        "detach" => Command::Detach,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command /{other}, try /help")),
    }
}
