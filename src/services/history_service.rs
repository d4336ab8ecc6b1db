use std::collections::{HashMap, VecDeque};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::HistoryEntry,
};

/// In-memory log of generated batches, one bounded list per session, with a
/// bounded number of sessions.
pub struct SessionHistory {
    state: RwLock<Sessions>,
    limit: usize,
    max_sessions: usize,
}

#[derive(Default)]
struct Sessions {
    logs: HashMap<String, SessionLog>,
    // Monotonic counter stamped on a session each time it records a batch.
    clock: u64,
}

struct SessionLog {
    entries: VecDeque<HistoryEntry>,
    last_recorded: u64,
}

impl Sessions {
    /// Drops the session whose newest batch is the oldest one overall.
    fn evict_stalest(&mut self) {
        let stalest = self
            .logs
            .iter()
            .min_by_key(|(_, session_log)| session_log.last_recorded)
            .map(|(session, _)| session.clone());

        if let Some(session) = stalest {
            self.logs.remove(&session);
            log::debug!("Evicted history of session {}", session);
        }
    }
}

impl SessionHistory {
    pub fn new(limit: usize, max_sessions: usize) -> Self {
        Self {
            state: RwLock::new(Sessions::default()),
            limit: limit.max(1),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Appends a batch, dropping the oldest ones once the limit is reached.
    /// A new session past the session cap evicts the stalest session first.
    pub async fn record(&self, session: &str, entry: HistoryEntry) {
        let mut state = self.state.write().await;
        state.clock += 1;
        let stamp = state.clock;

        if !state.logs.contains_key(session) {
            while state.logs.len() >= self.max_sessions {
                state.evict_stalest();
            }
        }

        let session_log = state
            .logs
            .entry(session.to_string())
            .or_insert_with(|| SessionLog {
                entries: VecDeque::new(),
                last_recorded: stamp,
            });
        session_log.last_recorded = stamp;
        session_log.entries.push_back(entry);

        while session_log.entries.len() > self.limit {
            if let Some(dropped) = session_log.entries.pop_front() {
                log::debug!("Dropped batch {} from session {} history", dropped.id, session);
            }
        }
    }

    /// Oldest first.
    pub async fn list(&self, session: &str) -> Vec<HistoryEntry> {
        let state = self.state.read().await;
        state
            .logs
            .get(session)
            .map(|session_log| session_log.entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn get(&self, session: &str, id: &Uuid) -> AppResult<HistoryEntry> {
        let state = self.state.read().await;
        state
            .logs
            .get(session)
            .and_then(|session_log| session_log.entries.iter().find(|e| e.id == *id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Batch with id '{}' not found", id)))
    }

    /// Returns how many batches were removed.
    pub async fn clear(&self, session: &str) -> usize {
        let mut state = self.state.write().await;
        state.logs.remove(session).map_or(0, |session_log| session_log.entries.len())
    }

    pub async fn session_count(&self) -> usize {
        self.state.read().await.logs.len()
    }
}
