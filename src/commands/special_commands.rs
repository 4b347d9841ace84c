//! Special commands parser for interactive chat mode
//!
//! This module parses the slash commands available during interactive chat:
//! session management (new/list/switch/delete), status, help, and exit.
//! Commands are prefixed with `/` and are case-insensitive. Session numbers
//! in commands are the 1-based numbers shown by `/sessions`.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands mutate or inspect the session list rather than being
/// sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start a new session and switch to it
    NewSession,

    /// List all sessions with the active one marked
    ListSessions,

    /// Switch to a session by its 1-based display number
    Switch(usize),

    /// Delete a session by its 1-based display number
    Delete(usize),

    /// Display the current session and pending status
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the chat session
    Exit,

    /// Not a special command; the input goes to the model
    None,
}

/// Parse a line of input into a special command
///
/// Input that does not start with `/` is `SpecialCommand::None`. Slash
/// input that names no known command, or a known command with a bad
/// argument, is an error for the REPL to display.
///
/// # Examples
///
/// ```
/// use dhinchak::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(
///     parse_special_command("/switch 2").unwrap(),
///     SpecialCommand::Switch(2)
/// );
/// assert_eq!(
///     parse_special_command("hello").unwrap(),
///     SpecialCommand::None
/// );
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    let arg = parts.next();

    match command.as_str() {
        "/new" => Ok(SpecialCommand::NewSession),
        "/sessions" | "/list" => Ok(SpecialCommand::ListSessions),
        "/switch" => parse_session_number(&command, arg, "/switch <n>").map(SpecialCommand::Switch),
        "/delete" => parse_session_number(&command, arg, "/delete <n>").map(SpecialCommand::Delete),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/help" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Parse a 1-based session number argument
fn parse_session_number(
    command: &str,
    arg: Option<&str>,
    usage: &str,
) -> Result<usize, CommandError> {
    let arg = arg.ok_or_else(|| CommandError::MissingArgument {
        command: command.to_string(),
        usage: usage.to_string(),
    })?;

    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        }),
    }
}

/// Print help for available special commands
pub fn print_help() {
    println!("Available commands:");
    println!("  /new           Start a new session and switch to it");
    println!("  /sessions      List sessions (alias: /list)");
    println!("  /switch <n>    Switch to session n");
    println!("  /delete <n>    Delete session n (the last session cannot be deleted)");
    println!("  /status        Show the active session and pending state");
    println!("  /help          Show this help");
    println!("  /exit          Exit (alias: /quit)");
    println!();
    println!("Anything else is sent to the assistant.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_non_command() {
        assert_eq!(
            parse_special_command("hello there").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(parse_special_command("").unwrap(), SpecialCommand::None);
    }

    #[test]
    fn test_parse_new() {
        assert_eq!(
            parse_special_command("/new").unwrap(),
            SpecialCommand::NewSession
        );
    }

    #[test]
    fn test_parse_sessions_and_alias() {
        assert_eq!(
            parse_special_command("/sessions").unwrap(),
            SpecialCommand::ListSessions
        );
        assert_eq!(
            parse_special_command("/list").unwrap(),
            SpecialCommand::ListSessions
        );
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(
            parse_special_command("/switch 3").unwrap(),
            SpecialCommand::Switch(3)
        );
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            parse_special_command("/delete 1").unwrap(),
            SpecialCommand::Delete(1)
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            parse_special_command("/NEW").unwrap(),
            SpecialCommand::NewSession
        );
        assert_eq!(
            parse_special_command("/Switch 2").unwrap(),
            SpecialCommand::Switch(2)
        );
    }

    #[test]
    fn test_parse_status_help_exit() {
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/exit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/quit").unwrap(), SpecialCommand::Exit);
    }

    #[test]
    fn test_parse_unknown_command() {
        let result = parse_special_command("/bogus");
        assert_eq!(
            result,
            Err(CommandError::UnknownCommand("/bogus".to_string()))
        );
    }

    #[test]
    fn test_parse_switch_missing_argument() {
        let result = parse_special_command("/switch");
        assert!(matches!(result, Err(CommandError::MissingArgument { .. })));
    }

    #[test]
    fn test_parse_switch_bad_argument() {
        assert!(matches!(
            parse_special_command("/switch abc"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
        // Session numbers are 1-based; zero is rejected
        assert!(matches!(
            parse_special_command("/switch 0"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_parse_delete_bad_argument() {
        assert!(matches!(
            parse_special_command("/delete -1"),
            Err(CommandError::UnsupportedArgument { .. })
        ));
    }

    #[test]
    fn test_error_display_mentions_help() {
        let error = CommandError::UnknownCommand("/x".to_string());
        assert!(error.to_string().contains("/help"));
    }
}
