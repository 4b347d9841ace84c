//! Chat controller: session registry plus reply-fetch orchestration
//!
//! The controller owns the registry behind a lock and a reply provider, and
//! exposes the registry's mutation surface to the presenting layer. `send`
//! is the only async operation: it appends the user entry, fetches a reply,
//! and appends (or silently drops) the result.

use crate::chat::session::{Message, Session, SessionRegistry};
use crate::providers::Provider;
use std::sync::{Arc, RwLock};

/// Outcome of a `send` call
///
/// Registry state transitions are identical regardless of which variant the
/// caller receives; the outcome exists so a presenting surface can show a
/// failure notice if it wants one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// Reply fetched and appended to the originating session
    Replied(String),
    /// Reply fetched, but the originating session was deleted mid-flight
    /// and the append was dropped
    Dropped,
    /// Reply fetch failed; no reply was appended
    Failed,
}

/// Drives conversation sessions against a reply provider
///
/// All methods take `&self`; state lives behind an `RwLock` so a send that
/// is parked on the network does not hold the registry. Mutations are
/// atomic with respect to the lock; `send` spans exactly one suspension
/// point, with the lock released across it.
///
/// # Examples
///
/// ```
/// use dhinchak::chat::ChatController;
/// use dhinchak::providers::Provider;
/// use dhinchak::error::Result;
/// use async_trait::async_trait;
/// use std::sync::Arc;
///
/// struct CannedProvider;
///
/// #[async_trait]
/// impl Provider for CannedProvider {
///     async fn fetch_reply(&self, _text: &str) -> Result<String> {
///         Ok("ok".to_string())
///     }
/// }
///
/// let controller = ChatController::new(Arc::new(CannedProvider));
/// controller.create();
/// assert_eq!(controller.sessions().len(), 2);
/// assert_eq!(controller.active_id(), 1);
/// ```
pub struct ChatController {
    registry: Arc<RwLock<SessionRegistry>>,
    provider: Arc<dyn Provider>,
}

impl ChatController {
    /// Creates a controller with a freshly seeded registry
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(SessionRegistry::new())),
            provider,
        }
    }

    /// Creates a new session and makes it active
    ///
    /// # Returns
    ///
    /// The id of the new session
    pub fn create(&self) -> usize {
        self.registry
            .write()
            .map(|mut registry| registry.create())
            .unwrap_or_default()
    }

    /// Sets the active session pointer, unconditionally
    ///
    /// The caller must pass an id that names a live session; see
    /// [`SessionRegistry::switch_active`].
    pub fn switch_active(&self, id: usize) {
        if let Ok(mut registry) = self.registry.write() {
            registry.switch_active(id);
        }
    }

    /// Deletes a session; a no-op for the last remaining session
    pub fn delete(&self, id: usize) {
        if let Ok(mut registry) = self.registry.write() {
            registry.delete(id);
        }
    }

    /// Snapshot of all sessions, in creation order
    pub fn sessions(&self) -> Vec<Session> {
        self.registry
            .read()
            .map(|registry| registry.sessions().to_vec())
            .unwrap_or_default()
    }

    /// Id of the active session
    pub fn active_id(&self) -> usize {
        self.registry
            .read()
            .map(|registry| registry.active_id())
            .unwrap_or_default()
    }

    /// Transcript of the active session, empty if the pointer is dangling
    pub fn active_messages(&self) -> Vec<Message> {
        self.registry
            .read()
            .map(|registry| {
                registry
                    .active_session()
                    .map(|session| session.messages.clone())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Whether a reply fetch is in flight
    pub fn is_pending(&self) -> bool {
        self.registry
            .read()
            .map(|registry| registry.is_pending())
            .unwrap_or_default()
    }

    /// Sends user text to the active session and fetches a reply
    ///
    /// Blank or whitespace-only text is ignored with no state change.
    /// Otherwise the user entry is appended to the active session and the
    /// pending flag is raised before the fetch; on success the reply is
    /// appended to the session captured at send time, looked up by id in
    /// the then-current list. A session deleted while the fetch was in
    /// flight silently loses the reply. On fetch failure the error is
    /// logged and no reply is appended. The pending flag is cleared on
    /// every path.
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        // Append the user entry and raise pending under one lock
        let target_id = {
            let Ok(mut registry) = self.registry.write() else {
                tracing::error!("Session registry lock poisoned, dropping send");
                return SendOutcome::Failed;
            };
            let id = registry.active_id();
            registry.append_message(id, Message::user(text));
            registry.set_pending(true);
            id
        };

        let result = self.provider.fetch_reply(text).await;

        let Ok(mut registry) = self.registry.write() else {
            tracing::error!("Session registry lock poisoned, dropping reply");
            return SendOutcome::Failed;
        };
        registry.set_pending(false);

        match result {
            Ok(reply) => {
                let alive = registry.sessions().iter().any(|s| s.id == target_id);
                registry.append_message(target_id, Message::bot(reply.clone()));
                if alive {
                    SendOutcome::Replied(reply)
                } else {
                    SendOutcome::Dropped
                }
            }
            Err(e) => {
                tracing::error!("Reply fetch failed: {}", e);
                SendOutcome::Failed
            }
        }
    }
}
