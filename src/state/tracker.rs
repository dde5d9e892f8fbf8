//! Conversation state tracker
//!
//! Keeps at most one pending state per (chat, user) pair in memory and
//! answers whether a given handler may consume the user's next message.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, UserId};
use tracing::{debug, info, warn};

use super::pending::{PendingState, StateData, StateTag};

type StateKey = (ChatId, UserId);

/// In-memory tracker of pending conversation states
#[derive(Clone, Default)]
pub struct StateTracker {
    states: Arc<Mutex<HashMap<StateKey, PendingState>>>,
    ttl: Option<Duration>,
}

impl StateTracker {
    /// Create a tracker; states older than `ttl` stop gating messages
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            states: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn states(&self) -> MutexGuard<'_, HashMap<StateKey, PendingState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a pending state, replacing any existing one for the pair
    pub fn set_state(
        &self,
        chat_id: ChatId,
        prompt_message_id: MessageId,
        user_id: UserId,
        tag: StateTag,
        data: StateData,
    ) {
        let mut state = PendingState::new(chat_id, prompt_message_id, user_id, tag, data);
        state.expires_at = self
            .ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| state.created_at + ttl);

        debug!(chat_id = chat_id.0, user_id = user_id.0, tag = %tag,
               prompt_message_id = prompt_message_id.0, "Setting conversation state");

        if let Some(previous) = self.states().insert((chat_id, user_id), state) {
            debug!(chat_id = chat_id.0, user_id = user_id.0, previous = %previous.tag,
                   "Replaced pending conversation state");
        }
    }

    /// Whether the pair is currently awaiting input for `tag`
    pub fn check_state(&self, chat_id: ChatId, user_id: UserId, tag: StateTag) -> bool {
        self.states()
            .get(&(chat_id, user_id))
            .map_or(false, |state| state.is(tag) && !state.is_expired())
    }

    /// Full pending state for the pair, if any
    pub fn get_state(&self, chat_id: ChatId, user_id: UserId) -> Option<PendingState> {
        self.states()
            .get(&(chat_id, user_id))
            .filter(|state| !state.is_expired())
            .cloned()
    }

    /// Remove the pending state without touching the prompt message
    pub fn take_state(&self, chat_id: ChatId, user_id: UserId) -> Option<PendingState> {
        self.states().remove(&(chat_id, user_id))
    }

    /// Remove the pending state and optionally delete its prompt message.
    ///
    /// Deleting is best effort: the prompt may already be gone, so failures are only logged.
    pub async fn clear_state(
        &self,
        bot: &Bot,
        chat_id: ChatId,
        user_id: UserId,
        delete_prompt: bool,
    ) -> Option<PendingState> {
        let state = self.take_state(chat_id, user_id);

        match &state {
            Some(state) => {
                debug!(chat_id = chat_id.0, user_id = user_id.0, tag = %state.tag, "Cleared conversation state");
                if delete_prompt {
                    if let Err(e) = bot.delete_message(chat_id, state.prompt_message_id).await {
                        warn!(chat_id = chat_id.0, message_id = state.prompt_message_id.0, error = %e,
                              "Failed to delete prompt message");
                    }
                }
            }
            None => debug!(chat_id = chat_id.0, user_id = user_id.0, "No conversation state to clear"),
        }

        state
    }

    /// Drop every expired state, returning how many were removed
    pub fn cleanup_expired(&self) -> usize {
        let mut states = self.states();
        let before = states.len();
        states.retain(|_, state| !state.is_expired());
        let removed = before - states.len();

        if removed > 0 {
            info!("Cleaned up {} expired conversation states", removed);
        }

        removed
    }

    /// Number of pending states that still gate messages
    pub fn active_count(&self) -> usize {
        self.states().values().filter(|state| !state.is_expired()).count()
    }

    /// Get tracker statistics
    pub fn stats(&self) -> TrackerStats {
        let states = self.states();
        let now = Utc::now();
        let mut tags_count = HashMap::new();
        let mut expired_states = 0;

        for state in states.values() {
            if state.expires_at.map_or(false, |expires_at| now > expires_at) {
                expired_states += 1;
            } else {
                *tags_count.entry(state.tag).or_insert(0) += 1;
            }
        }

        TrackerStats {
            total_states: states.len(),
            active_states: states.len() - expired_states,
            expired_states,
            tags_count,
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

impl std::fmt::Debug for StateTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTracker")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Tracker statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrackerStats {
    pub total_states: usize,
    pub active_states: usize,
    pub expired_states: usize,
    pub tags_count: HashMap<StateTag, u32>,
}

/// State tracker with automatic cleanup of abandoned prompts
#[derive(Debug)]
pub struct StateTrackerManager {
    tracker: StateTracker,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl StateTrackerManager {
    pub fn new(tracker: StateTracker, cleanup_interval: Duration) -> Self {
        Self {
            tracker,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start automatic cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        if self.tracker.ttl().is_none() {
            info!("Conversation states never expire, cleanup task not started");
            return;
        }

        let tracker = self.tracker.clone();
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;
                let removed = tracker.cleanup_expired();
                if removed > 0 {
                    info!("Cleanup task removed {} expired states", removed);
                }
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started automatic cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop automatic cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped automatic cleanup task");
        }
    }

    pub fn is_running(&self) -> bool {
        self.cleanup_handle.as_ref().map_or(false, |handle| !handle.is_finished())
    }

    /// Get reference to the tracker
    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }
}

impl Drop for StateTrackerManager {
    fn drop(&mut self) {
        if self.cleanup_handle.is_some() {
            self.stop_cleanup();
        } else {
            debug!("State tracker manager dropped without cleanup task");
        }
    }
}
