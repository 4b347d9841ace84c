//! Conversation sessions and send orchestration
//!
//! `session` holds the pure registry state machine; `controller` wraps it
//! with a reply provider and the async send flow.

pub mod controller;
pub mod session;

pub use controller::{ChatController, SendOutcome};
pub use session::{Message, Sender, Session, SessionRegistry};
