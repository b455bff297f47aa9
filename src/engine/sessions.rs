// Session management for concurrent conversations

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use uuid::Uuid;

use super::Session;

/// Per-conversation state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Unique session identifier
    pub id: String,
    /// The conversation itself (guided or curhat)
    pub session: Session,
    /// Last activity timestamp
    pub last_activity: DateTime<Utc>,
    /// Session creation time
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(session: Session) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session,
            last_activity: Utc::now(),
            created_at: Utc::now(),
        }
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Check if session has expired
    pub fn is_expired(&self, timeout_minutes: u64) -> bool {
        let now = Utc::now();
        let elapsed = now.signed_duration_since(self.last_activity);
        elapsed.num_minutes() >= timeout_minutes as i64
    }
}

/// Concurrent session store using DashMap
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionState>>,
    max_sessions: usize,
    timeout_minutes: u64,
}

impl SessionManager {
    pub fn new(max_sessions: usize, timeout_minutes: u64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            timeout_minutes,
        }
    }

    /// Insert a fresh conversation; returns its id.
    pub fn create(&self, session: Session) -> anyhow::Result<String> {
        if self.sessions.len() >= self.max_sessions {
            anyhow::bail!(
                "Maximum session limit reached ({}/{})",
                self.sessions.len(),
                self.max_sessions
            );
        }

        let state = SessionState::new(session);
        let id = state.id.clone();
        self.sessions.insert(id.clone(), state);

        tracing::info!(session_id = %id, "Created new session");
        Ok(id)
    }

    /// Fetch a conversation by id, refreshing its activity timestamp.
    pub fn get(&self, session_id: &str) -> Option<SessionState> {
        self.sessions.get_mut(session_id).map(|mut entry| {
            entry.touch();
            entry.clone()
        })
    }

    /// Write back a mutated conversation.
    pub fn update(&self, session_id: &str, session: Session) -> anyhow::Result<()> {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.session = session;
            entry.touch();
            Ok(())
        } else {
            anyhow::bail!("Session not found: {}", session_id)
        }
    }

    pub fn delete(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Start the background task that evicts idle sessions.
    pub fn start_cleanup_task(&self) {
        let sessions = Arc::clone(&self.sessions);
        let timeout_minutes = self.timeout_minutes;

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(60));

            loop {
                interval.tick().await;

                let mut removed_count = 0;
                let expired_sessions: Vec<String> = sessions
                    .iter()
                    .filter(|entry| entry.value().is_expired(timeout_minutes))
                    .map(|entry| entry.key().clone())
                    .collect();

                for session_id in expired_sessions {
                    if sessions.remove(&session_id).is_some() {
                        removed_count += 1;
                        tracing::debug!(session_id = %session_id, "Removed expired session");
                    }
                }

                if removed_count > 0 {
                    tracing::info!(
                        removed = removed_count,
                        active = sessions.len(),
                        "Cleaned up expired sessions"
                    );
                }
            }
        });
    }
}
