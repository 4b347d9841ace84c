//! Command-line interface definition for Dhinchak
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat and one-shot prompts.

use clap::{Parser, Subcommand};

/// Dhinchak - Multi-session chat CLI
///
/// Talk to the Gemini generative-language API from the terminal, with
/// lightweight in-memory conversation sessions.
#[derive(Parser, Debug, Clone)]
#[command(name = "dhinchak")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Dhinchak
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start interactive chat mode
    Chat {
        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Send a single prompt and print the reply
    Ask {
        /// The prompt to send
        prompt: String,

        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,
    },
}

impl Commands {
    /// Model override supplied on the command line, if any
    pub fn model_override(&self) -> Option<&str> {
        match self {
            Commands::Chat { model } => model.as_deref(),
            Commands::Ask { model, .. } => model.as_deref(),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat { model: None },
        }
    }
}
