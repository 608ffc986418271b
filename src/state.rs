//! Application State Management
//!
//! The process-wide state behind the router: the catalog client, the
//! configuration and one session context per browser.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::catalog::{CatalogClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::session::{new_session_id, Session, SharedSession};

/// Upper bound on the pause between two idle-session sweeps
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
#[derive(Debug)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub config: StorefrontConfig,

    /// Live sessions, keyed by session id.
    /// DashMap allows concurrent access without external Mutexes.
    pub sessions: DashMap<String, SharedSession>,
}

impl AppState {
    pub fn new(config: StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog_url)?;
        Ok(Self {
            catalog,
            config,
            sessions: DashMap::new(),
        })
    }

    /// Looks up a live session and marks it as used.
    pub fn find_session(&self, id: &str) -> Option<SharedSession> {
        let session = self.sessions.get(id).map(|s| Arc::clone(s.value()))?;
        session.touch();
        Some(session)
    }

    /// Registers a session under a freshly minted id.
    pub fn create_session(&self) -> SharedSession {
        let session = Arc::new(Session::new(new_session_id(), &self.config));
        debug!(session = %session.id, n_sessions = self.sessions.len() + 1, "new session");
        self.sessions
            .insert(session.id.clone(), Arc::clone(&session));
        session
    }

    /// An empty session that is never registered.
    ///
    /// Serves read-only requests from clients without a session, so browsing
    /// does not allocate server-side state.
    pub fn transient_session(&self) -> SharedSession {
        Arc::new(Session::new(new_session_id(), &self.config))
    }

    /// Drops every session idle for at least the configured timeout.
    /// Returns how many were removed.
    pub fn evict_idle_sessions(&self) -> usize {
        let before = self.sessions.len();
        let timeout = self.config.session_idle_timeout;
        self.sessions
            .retain(|_, session| session.idle_for() < timeout);
        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            debug!(evicted, n_sessions = self.sessions.len(), "evicted idle sessions");
        }
        evicted
    }

    /// Periodically evicts idle sessions until the state is dropped.
    pub fn spawn_session_sweeper(state: &SharedState) -> JoinHandle<()> {
        let period = state
            .config
            .session_idle_timeout
            .min(MAX_SWEEP_INTERVAL);
        let state = Arc::downgrade(state);

        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticks.tick().await;
            loop {
                ticks.tick().await;
                let Some(state) = state.upgrade() else {
                    break;
                };
                state.evict_idle_sessions();
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(idle: Duration) -> SharedState {
        let config = StorefrontConfig {
            session_idle_timeout: idle,
            ..Default::default()
        };
        Arc::new(AppState::new(config).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted() {
        let state = state(Duration::from_secs(60));
        let stale = state.create_session();
        let active = state.create_session();

        tokio::time::sleep(Duration::from_secs(45)).await;
        assert!(state.find_session(&active.id).is_some());

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(state.evict_idle_sessions(), 1);
        assert!(state.find_session(&stale.id).is_none());
        assert!(state.find_session(&active.id).is_some());
    }

    #[tokio::test]
    async fn transient_sessions_are_not_registered() {
        let state = state(Duration::from_secs(60));
        let session = state.transient_session();
        assert!(state.sessions.is_empty());
        assert!(state.find_session(&session.id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_runs_until_state_is_dropped() {
        let state = state(Duration::from_secs(10));
        let sweeper = AppState::spawn_session_sweeper(&state);
        state.create_session();
        state.create_session();

        tokio::time::sleep(Duration::from_secs(25)).await;
        assert!(state.sessions.is_empty());

        drop(state);
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert!(sweeper.is_finished());
    }
}
