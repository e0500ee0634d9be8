//! Session controller: the single owner of client-side chat state.
//!
//! Every user action is a method taking `&mut self`. Network calls are split
//! into [`SessionController::begin_send`] and [`SessionController::complete`]
//! so a front-end can run the request elsewhere while ticks keep arriving.

use serde::{Deserialize, Serialize};
use stoic_types::ChatRequest;

use crate::error::{ProxyError, Result, SessionError};
use crate::ids::SessionIdGenerator;
use crate::models::{ChatHistory, ChatSession, Message};
use crate::proxy::ProxyClient;
use crate::storage::HistoryStore;
use crate::throttle::{ThrottleConfig, ThrottleState};

/// Model message appended when a reply could not be obtained
pub const APOLOGY: &str = "Maaf, terjadi kesalahan. Silakan coba lagi.";

/// Snapshot of everything the UI renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub history: ChatHistory,
    pub current_id: String,
    pub messages: Vec<Message>,
    pub input: String,
    pub pending_image: Option<String>,
    /// Session id of the request in flight, if any
    pub in_flight: Option<String>,
    pub throttle: ThrottleState,
}

/// An accepted message waiting for the proxy's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Session the message was sent from
    pub session_id: String,
    pub request: ChatRequest,
}

/// Where a completed reply ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Appended to the session on screen
    Active,
    /// The user switched away; appended to the stored session
    Background,
    /// The originating session was deleted meanwhile
    Dropped,
}

pub struct SessionController {
    store: HistoryStore,
    state: SessionState,
    throttle_config: ThrottleConfig,
    ids: SessionIdGenerator,
}

impl SessionController {
    /// Restore saved history; the most recent session becomes active, or a
    /// fresh one is started when nothing usable is stored.
    pub fn load(store: HistoryStore) -> Self {
        Self::with_throttle(store, ThrottleConfig::default())
    }

    pub fn with_throttle(store: HistoryStore, throttle_config: ThrottleConfig) -> Self {
        let history = match store.load_history() {
            Ok(history) => history.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable chat history: {}", e);
                ChatHistory::default()
            }
        };

        let mut ids = SessionIdGenerator::new();
        let (current_id, messages) = match history.first() {
            Some(session) => (session.id.clone(), session.messages.clone()),
            None => (ids.next_id(), Vec::new()),
        };

        tracing::debug!(sessions = history.len(), current = %current_id, "Session state loaded");

        Self {
            store,
            state: SessionState {
                history,
                current_id,
                messages,
                input: String::new(),
                pending_image: None,
                in_flight: None,
                throttle: ThrottleState::new(),
            },
            throttle_config,
            ids,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn history(&self) -> &ChatHistory {
        &self.state.history
    }

    pub fn current_id(&self) -> &str {
        &self.state.current_id
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn pending_image(&self) -> Option<&str> {
        self.state.pending_image.as_deref()
    }

    pub fn throttle(&self) -> &ThrottleState {
        &self.state.throttle
    }

    pub fn is_loading(&self) -> bool {
        self.state.in_flight.is_some()
    }

    /// Whether the send control is enabled, ignoring the input contents
    pub fn is_send_enabled(&self) -> bool {
        !self.is_loading() && self.state.throttle.is_clear()
    }

    /// Whether `begin_send` would accept right now
    pub fn can_send(&self) -> bool {
        self.is_send_enabled()
            && (!self.state.input.trim().is_empty() || self.state.pending_image.is_some())
    }

    /// Label of the send control
    pub fn send_label(&self) -> String {
        if self.is_loading() {
            "Mengirim...".to_string()
        } else if self.state.throttle.short_cooldown > 0 {
            format!("Tunggu {}s", self.state.throttle.short_cooldown)
        } else {
            "Kirim".to_string()
        }
    }

    /// Notice shown while the long cooldown runs
    pub fn long_cooldown_notice(&self) -> Option<String> {
        let remaining = self.state.throttle.long_cooldown;
        (remaining > 0).then(|| {
            format!("Silakan tunggu 1 menit. Sisa waktu: {} detik", remaining)
        })
    }

    /// True exactly once per storage: the first-run usage guide should be shown
    pub fn take_guide(&self) -> bool {
        match self.store.take_guide() {
            Ok(show) => show,
            Err(e) => {
                tracing::warn!("Failed to read guide flag: {}", e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    pub fn attach_image(&mut self, data_uri: impl Into<String>) {
        self.state.pending_image = Some(data_uri.into());
    }

    pub fn remove_image(&mut self) {
        self.state.pending_image = None;
    }

    // ------------------------------------------------------------------
    // Sending
    // ------------------------------------------------------------------

    /// Accept the current input as a user message.
    ///
    /// Returns `None` without touching any state when the input is blank
    /// with no image, a cooldown is running, or a request is in flight.
    pub fn begin_send(&mut self) -> Option<PendingRequest> {
        if !self.can_send() {
            return None;
        }

        let input = std::mem::take(&mut self.state.input);
        let image = self.state.pending_image.take();
        let text = (!input.is_empty()).then(|| input.clone());

        self.state.messages.push(Message::user(text, image.clone()));
        self.state.in_flight = Some(self.state.current_id.clone());

        if self.state.throttle.accept(&self.throttle_config) {
            tracing::info!(
                secs = self.throttle_config.long_cooldown_secs,
                "Message limit reached, long cooldown started"
            );
        }

        self.sync_current();

        Some(PendingRequest {
            session_id: self.state.current_id.clone(),
            request: ChatRequest {
                message: input,
                image,
            },
        })
    }

    /// Apply the proxy's outcome for `pending`.
    ///
    /// Failures never abort the session: they become an apology message.
    pub fn complete(
        &mut self,
        pending: PendingRequest,
        outcome: std::result::Result<String, ProxyError>,
    ) -> Delivery {
        self.state.in_flight = None;

        let reply = match outcome {
            Ok(text) => Message::model(text),
            Err(e) => {
                tracing::warn!(session = %pending.session_id, "Error sending message: {}", e);
                Message::model(APOLOGY)
            }
        };

        if pending.session_id == self.state.current_id {
            self.state.messages.push(reply);
            self.sync_current();
            return Delivery::Active;
        }

        let stored = match self.state.history.get_mut(&pending.session_id) {
            Some(session) => {
                session.push(reply);
                true
            }
            None => false,
        };

        if stored {
            self.persist();
            Delivery::Background
        } else {
            tracing::info!(
                session = %pending.session_id,
                "Discarding reply for a deleted session"
            );
            Delivery::Dropped
        }
    }

    /// `begin_send`, one proxy call, then `complete`
    pub async fn send(&mut self, proxy: &dyn ProxyClient) -> Option<Delivery> {
        let pending = self.begin_send()?;
        let outcome = proxy.send(&pending.request).await;
        Some(self.complete(pending, outcome))
    }

    /// One second elapsed
    pub fn tick(&mut self) -> bool {
        self.state.throttle.tick()
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Start an empty session; the previous one stays in history
    pub fn new_chat(&mut self) {
        self.state.current_id = self.fresh_id();
        self.state.messages.clear();
        self.state.input.clear();
        self.state.pending_image = None;
    }

    /// Make a stored session active and move it to the front of history
    pub fn load_chat(&mut self, id: &str) -> Result<()> {
        let session = self
            .state
            .history
            .get(id)
            .ok_or_else(|| SessionError::SessionNotFound(id.to_string()))?;

        self.state.messages = session.messages.clone();
        self.state.current_id = session.id.clone();
        self.state.input.clear();
        self.state.pending_image = None;

        self.state.history.touch(id);
        self.persist();
        Ok(())
    }

    /// Delete a session. Deleting the active one starts a fresh session.
    ///
    /// Returns false when `id` is neither stored nor active.
    pub fn delete_chat(&mut self, id: &str) -> bool {
        let removed = self.state.history.remove(id).is_some();
        if removed {
            self.persist();
        }

        if id == self.state.current_id {
            self.new_chat();
            return true;
        }
        removed
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Id not used by any stored or active session
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.ids.next_id();
            if id != self.state.current_id && !self.state.history.contains(&id) {
                return id;
            }
        }
    }

    /// Copy the active message list into history (front) and persist
    fn sync_current(&mut self) {
        if self.state.messages.is_empty() {
            return;
        }
        let session = ChatSession::new(self.state.current_id.clone(), self.state.messages.clone());
        self.state.history.upsert_front(session);
        self.persist();
    }

    /// Best-effort write of the whole history
    fn persist(&self) {
        if let Err(e) = self.store.save_history(&self.state.history) {
            tracing::warn!("Failed to persist chat history: {}", e);
        }
    }
}
