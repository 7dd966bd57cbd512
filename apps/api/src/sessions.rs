//! In-memory session registry. Each session's state is isolated; nothing
//! outlives the process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::wizard::{transition, Action, SessionState, Transition};

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a fresh session on the landing page.
    pub async fn create(&self) -> (Uuid, SessionState) {
        let id = Uuid::new_v4();
        let state = SessionState::new();
        self.sessions.write().await.insert(id, state.clone());
        (id, state)
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionState> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Applies `action` under the write lock. The returned transition carries a
    /// snapshot of the stored state.
    pub async fn apply(&self, id: Uuid, action: Action, catalog: &Catalog) -> Option<Transition> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id)?;
        let t = transition(std::mem::take(slot), action, catalog);
        *slot = t.state.clone();
        Some(t)
    }
}
