//! Base provider trait and the canned-reply policy
//!
//! This module defines the Provider trait that all reply fetchers must
//! implement, along with the fixed creator-question policy that is checked
//! before any network call is attempted.

use crate::error::Result;
use async_trait::async_trait;

/// Trigger phrases answered locally instead of by the model
///
/// Matching is case-insensitive substring containment.
pub const CREATOR_TRIGGERS: &[&str] = &[
    "who's the creator",
    "who created",
    "creator of the website",
    "made this website",
];

/// The fixed reply for creator questions
pub const CREATOR_REPLY: &str = "The creator of this website is my maestro Debayudh.";

/// Returns the canned creator reply when `text` contains a trigger phrase
///
/// Providers call this before building a request; a `Some` result means the
/// hosted model must not be contacted for this message.
///
/// # Examples
///
/// ```
/// use dhinchak::providers::{canned_reply, CREATOR_REPLY};
///
/// assert_eq!(canned_reply("Who created this thing?"), Some(CREATOR_REPLY));
/// assert_eq!(canned_reply("what is the weather"), None);
/// ```
pub fn canned_reply(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    CREATOR_TRIGGERS
        .iter()
        .any(|trigger| lowered.contains(trigger))
        .then_some(CREATOR_REPLY)
}

/// Provider trait for reply fetchers
///
/// A provider turns one user message into one reply string. Each call is
/// stateless from the model's perspective: no conversation history is
/// attached regardless of prior turns in the session.
///
/// # Examples
///
/// ```no_run
/// use dhinchak::providers::Provider;
/// use dhinchak::error::Result;
/// use async_trait::async_trait;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl Provider for MyProvider {
///     async fn fetch_reply(&self, _text: &str) -> Result<String> {
///         Ok("Response".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetches a reply for the given user message
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is invalid.
    /// Failures are not retried.
    async fn fetch_reply(&self, text: &str) -> Result<String>;
}
