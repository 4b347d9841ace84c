/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` - Interactive multi-session chat mode
- `ask`  - Send a single prompt and print the reply

These handlers are intentionally small and use the library components:
the provider and the chat controller.
*/

use crate::chat::ChatController;

// Special commands parser for session management
pub mod special_commands;

/// Format the 1-based display label for a session id
///
/// Sessions are displayed as "Session 1", "Session 2", ... matching the id
/// plus one; slash commands accept the displayed number back.
pub fn display_number(id: usize) -> usize {
    id + 1
}

/// Map a 1-based display number back to a session id
pub fn display_to_id(n: usize) -> usize {
    n - 1
}

/// Print the session list with the active session marked
fn print_session_list(controller: &ChatController) {
    use colored::Colorize;

    let active_id = controller.active_id();
    println!("Sessions:");
    for session in controller.sessions() {
        let label = format!(
            "Session {} ({} messages)",
            display_number(session.id),
            session.messages.len()
        );
        if session.id == active_id {
            println!("  * {}", label.cyan());
        } else {
            println!("    {}", label);
        }
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Instantiates the provider and the chat controller, and runs a
    //! readline-based interactive loop that submits user input to the
    //! active session. Slash commands manage the session list.

    use super::*;
    use crate::chat::SendOutcome;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::config::Config;
    use crate::error::Result;
    use crate::providers::create_provider;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::sync::Arc;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns error if the provider or the readline editor cannot be
    /// initialized. Reply-fetch failures inside the loop are shown to the
    /// user and do not end the session.
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let provider = create_provider(&config.provider)?;
        let controller = ChatController::new(Arc::from(provider));
        let assistant_name = config.chat.assistant_name.clone();

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&assistant_name);

        loop {
            let prompt = format_prompt(controller.active_id());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::NewSession) => {
                            let id = controller.create();
                            println!("Started session {}\n", display_number(id));
                            continue;
                        }
                        Ok(SpecialCommand::ListSessions) => {
                            print_session_list(&controller);
                            println!();
                            continue;
                        }
                        Ok(SpecialCommand::Switch(n)) => {
                            let id = display_to_id(n);
                            // switch_active is unchecked; validating here is
                            // the presenting surface's job
                            if controller.sessions().iter().any(|s| s.id == id) {
                                controller.switch_active(id);
                                println!("Switched to session {}\n", n);
                            } else {
                                println!("No session {}\n", n);
                            }
                            continue;
                        }
                        Ok(SpecialCommand::Delete(n)) => {
                            let id = display_to_id(n);
                            if controller.sessions().len() == 1 {
                                println!("Cannot delete the last session\n");
                            } else if controller.sessions().iter().any(|s| s.id == id) {
                                controller.delete(id);
                                println!("Deleted session {}\n", n);
                            } else {
                                println!("No session {}\n", n);
                            }
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status(&controller);
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            println!();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {
                            // Regular message, falls through to send
                        }
                        Err(e) => {
                            println!("{}\n", e);
                            continue;
                        }
                    }

                    println!("{}", format!("{} is thinking...", assistant_name).dimmed());
                    match controller.send(trimmed).await {
                        SendOutcome::Replied(reply) => {
                            println!("{} {}\n", format!("{}:", assistant_name).cyan().bold(), reply);
                        }
                        SendOutcome::Failed => {
                            println!("{}\n", "No reply: the model could not be reached.".red());
                        }
                        SendOutcome::Ignored | SendOutcome::Dropped => {}
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Format the readline prompt for the active session
    pub fn format_prompt(active_id: usize) -> String {
        format!(
            "{} >> ",
            format!("[session {}]", display_number(active_id)).cyan()
        )
    }

    fn print_welcome_banner(assistant_name: &str) {
        println!();
        println!("{}", format!("{} Assistant", assistant_name).bold());
        println!("Type a message to chat, or '/help' for commands.");
        println!();
    }

    fn print_status(controller: &ChatController) {
        let messages = controller.active_messages();
        println!(
            "Active session: {} ({} messages)",
            display_number(controller.active_id()),
            messages.len()
        );
        println!("Sessions: {}", controller.sessions().len());
        println!(
            "Pending reply: {}\n",
            if controller.is_pending() { "yes" } else { "no" }
        );
    }
}

// Ask command handler
pub mod ask {
    //! One-shot prompt handler.
    //!
    //! Fetches a single reply and prints it; no session bookkeeping.

    use crate::config::Config;
    use crate::error::Result;
    use crate::providers::create_provider;

    /// Send a single prompt and print the reply
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `prompt` - The prompt text to send
    ///
    /// # Errors
    ///
    /// Returns error if the provider cannot be initialized or the fetch
    /// fails.
    pub async fn run_ask(config: Config, prompt: String) -> Result<()> {
        tracing::info!("Sending one-shot prompt");

        let provider = create_provider(&config.provider)?;
        let reply = provider.fetch_reply(&prompt).await?;
        println!("{}", reply);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_number_is_one_based() {
        assert_eq!(display_number(0), 1);
        assert_eq!(display_number(4), 5);
    }

    #[test]
    fn test_display_to_id_roundtrip() {
        for id in 0..5 {
            assert_eq!(display_to_id(display_number(id)), id);
        }
    }

    #[test]
    fn test_format_prompt_shows_display_number() {
        let prompt = chat::format_prompt(0);
        assert!(prompt.contains("session 1"));
        assert!(prompt.ends_with(">> "));
    }
}
