//! Dhinchak - Multi-session chat CLI library
//!
//! This library provides the core functionality for the Dhinchak chat
//! client: the session registry and controller, the Gemini reply provider,
//! and configuration management.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `chat`: Session registry state machine and send orchestration
//! - `providers`: Reply-fetcher abstraction and the Gemini implementation
//! - `commands`: Interactive REPL and one-shot command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use dhinchak::chat::ChatController;
//! use dhinchak::config::Config;
//! use dhinchak::providers::create_provider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let controller = ChatController::new(Arc::from(provider));
//!     controller.send("Hello!").await;
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod providers;

// Re-export commonly used types
pub use chat::{ChatController, Message, Sender, SendOutcome, Session, SessionRegistry};
pub use config::Config;
pub use error::{DhinchakError, Result};
pub use providers::{GeminiProvider, Provider};
