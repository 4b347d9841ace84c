//! In-memory session registry
//!
//! This module implements the conversation-session bookkeeping: an ordered
//! list of sessions, an active-session pointer, and the mutation rules for
//! create/switch/delete/append that keep the set non-empty and consistent.
//! The registry is a plain synchronous state machine with no rendering or
//! network concerns, so every rule is unit-testable in isolation.

use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human typing into the client
    User,
    /// The assistant reply
    Bot,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
        }
    }
}

/// A single transcript entry
///
/// Messages are immutable once appended; ordering within a session is
/// append order and is never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message author
    pub sender: Sender,
    /// Message text
    pub text: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use dhinchak::chat::{Message, Sender};
    ///
    /// let msg = Message::user("Hello!");
    /// assert_eq!(msg.sender, Sender::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    /// Creates a new bot message
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// A conversation thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier assigned at creation time
    pub id: usize,
    /// Transcript in append order
    pub messages: Vec<Message>,
}

impl Session {
    fn new(id: usize) -> Self {
        Self {
            id,
            messages: Vec::new(),
        }
    }
}

/// Registry of conversation sessions
///
/// Owns the session list, the active-session pointer, and the registry-wide
/// pending flag. The five methods below are the only mutation surface; no
/// other component may touch the state directly.
///
/// Invariants upheld by the mutation rules:
/// - the session list is never empty (deleting the last session is a no-op)
/// - `active_id` names a live session after `create` and `delete`
///   (`switch_active` is unchecked by contract; the caller must pass a
///   valid id)
/// - ids are assigned from the current session count, so after a deletion a
///   new session's id can collide with a still-live session's id
///
/// # Examples
///
/// ```
/// use dhinchak::chat::SessionRegistry;
///
/// let mut registry = SessionRegistry::new();
/// registry.create();
/// assert_eq!(registry.sessions().len(), 2);
/// assert_eq!(registry.active_id(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Vec<Session>,
    active_id: usize,
    pending: bool,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Creates a registry seeded with a single empty session (id 0, active)
    pub fn new() -> Self {
        Self {
            sessions: vec![Session::new(0)],
            active_id: 0,
            pending: false,
        }
    }

    /// Appends a new empty session and makes it active
    ///
    /// The new session's id is the current session count, not a monotonic
    /// counter: after a deletion the id can collide with a live session's
    /// id. Compatibility behavior, kept as-is.
    ///
    /// # Returns
    ///
    /// The id of the newly created session
    pub fn create(&mut self) -> usize {
        let id = self.sessions.len();
        self.sessions.push(Session::new(id));
        self.active_id = id;
        id
    }

    /// Sets the active-session pointer, unconditionally
    ///
    /// No validation is performed; passing an id that names no live session
    /// is a caller error and leaves active-session lookups returning `None`
    /// until the pointer is moved again.
    pub fn switch_active(&mut self, id: usize) {
        self.active_id = id;
    }

    /// Removes the first session with a matching id
    ///
    /// A no-op when exactly one session remains, or when no session matches.
    /// If the deleted session was active, the pointer moves to the first
    /// remaining session. Either way the session list stays non-empty and
    /// `active_id` stays valid.
    pub fn delete(&mut self, id: usize) {
        if self.sessions.len() == 1 {
            return;
        }
        let Some(position) = self.sessions.iter().position(|s| s.id == id) else {
            return;
        };
        self.sessions.remove(position);
        if self.active_id == id {
            self.active_id = self.sessions[0].id;
        }
    }

    /// Appends a message to the session with the given id
    ///
    /// The session is looked up in the current list, not through a cached
    /// reference. If no session matches (deleted while a reply was in
    /// flight), the append is silently dropped: no entry is added anywhere
    /// and no error is surfaced.
    pub fn append_message(&mut self, session_id: usize, message: Message) {
        if let Some(session) = self.sessions.iter_mut().find(|s| s.id == session_id) {
            session.messages.push(message);
        }
    }

    /// Sets the registry-wide pending flag
    ///
    /// A single flag, not per-session; the registry does not block a second
    /// send while one is in flight. The presenting surface is expected to
    /// hold input while pending.
    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Whether a reply fetch is in flight
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// All live sessions, in creation order
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Id of the active session
    pub fn active_id(&self) -> usize {
        self.active_id
    }

    /// The active session, if `active_id` names a live one
    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == self.active_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_has_seed_session() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.sessions().len(), 1);
        assert_eq!(registry.sessions()[0].id, 0);
        assert!(registry.sessions()[0].messages.is_empty());
        assert_eq!(registry.active_id(), 0);
        assert!(!registry.is_pending());
    }

    #[test]
    fn test_create_appends_and_activates() {
        let mut registry = SessionRegistry::new();
        let id = registry.create();
        assert_eq!(id, 1);
        assert_eq!(registry.sessions().len(), 2);
        assert_eq!(registry.active_id(), 1);
        assert!(registry.sessions()[1].messages.is_empty());
    }

    #[test]
    fn test_create_ids_follow_length() {
        let mut registry = SessionRegistry::new();
        assert_eq!(registry.create(), 1);
        assert_eq!(registry.create(), 2);
        assert_eq!(registry.create(), 3);
    }

    #[test]
    fn test_switch_active_is_unchecked() {
        let mut registry = SessionRegistry::new();
        registry.switch_active(42);
        assert_eq!(registry.active_id(), 42);
        assert!(registry.active_session().is_none());
    }

    #[test]
    fn test_delete_last_session_is_noop() {
        let mut registry = SessionRegistry::new();
        registry.delete(0);
        assert_eq!(registry.sessions().len(), 1);
        assert_eq!(registry.active_id(), 0);
    }

    #[test]
    fn test_delete_inactive_session_keeps_active() {
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.switch_active(0);
        registry.delete(1);
        assert_eq!(registry.sessions().len(), 1);
        assert_eq!(registry.sessions()[0].id, 0);
        assert_eq!(registry.active_id(), 0);
    }

    #[test]
    fn test_delete_active_session_reassigns_to_first() {
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.create();
        registry.switch_active(1);
        registry.delete(1);
        assert_eq!(registry.active_id(), 0);
        assert_eq!(
            registry.sessions().iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.delete(99);
        assert_eq!(registry.sessions().len(), 2);
        assert_eq!(registry.active_id(), 1);
    }

    #[test]
    fn test_registry_never_empty_under_any_sequence() {
        let mut registry = SessionRegistry::new();
        for _ in 0..5 {
            registry.create();
        }
        for id in (0..=5).rev() {
            registry.delete(id);
            assert!(!registry.sessions().is_empty());
            assert!(registry.active_session().is_some());
        }
        assert_eq!(registry.sessions().len(), 1);
    }

    #[test]
    fn test_id_collision_after_delete_then_create() {
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.create();
        // sessions [0, 1, 2]; drop the middle one
        registry.delete(1);
        let id = registry.create();
        assert_eq!(id, 2);
        let ids: Vec<usize> = registry.sessions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 2, 2]);
    }

    #[test]
    fn test_append_message_keeps_order() {
        let mut registry = SessionRegistry::new();
        registry.append_message(0, Message::user("first"));
        registry.append_message(0, Message::bot("second"));
        registry.append_message(0, Message::user("third"));
        let texts: Vec<&str> = registry.sessions()[0]
            .messages
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_append_message_targets_only_named_session() {
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.append_message(0, Message::user("for zero"));
        assert_eq!(registry.sessions()[0].messages.len(), 1);
        assert!(registry.sessions()[1].messages.is_empty());
    }

    #[test]
    fn test_append_message_to_missing_session_is_silent() {
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.append_message(7, Message::bot("orphan"));
        for session in registry.sessions() {
            assert!(session.messages.is_empty());
        }
    }

    #[test]
    fn test_append_after_delete_drops_reply() {
        // The in-flight race: a reply addressed to a session deleted while
        // the fetch was pending must vanish without touching other sessions.
        let mut registry = SessionRegistry::new();
        registry.create();
        registry.switch_active(0);
        registry.append_message(0, Message::user("hello"));
        registry.delete(0);
        assert_eq!(registry.active_id(), 1);
        registry.append_message(0, Message::bot("late reply"));
        assert!(registry.sessions()[0].messages.is_empty());
        assert_eq!(registry.sessions()[0].id, 1);
    }

    #[test]
    fn test_create_switch_delete_walkthrough() {
        // create -> switch -> delete sequence with exact ids
        let mut registry = SessionRegistry::new();
        registry.create();
        assert_eq!(registry.active_id(), 1);
        registry.switch_active(0);
        assert_eq!(registry.active_id(), 0);
        registry.delete(1);
        let ids: Vec<usize> = registry.sessions().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0]);
        assert_eq!(registry.active_id(), 0);
    }

    #[test]
    fn test_pending_flag_roundtrip() {
        let mut registry = SessionRegistry::new();
        assert!(!registry.is_pending());
        registry.set_pending(true);
        assert!(registry.is_pending());
        registry.set_pending(false);
        assert!(!registry.is_pending());
    }

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.text, "hi");
        let bot = Message::bot("hello");
        assert_eq!(bot.sender, Sender::Bot);
    }

    #[test]
    fn test_sender_display() {
        assert_eq!(Sender::User.to_string(), "user");
        assert_eq!(Sender::Bot.to_string(), "bot");
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Test");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(json.contains("\"text\":\"Test\""));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
