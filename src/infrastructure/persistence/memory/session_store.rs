use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::SessionStore;
use crate::domain::auth::value_objects::TokenHash;

/// Process-local session store. Entries are keyed by token hash, expire at
/// a fixed timestamp, and do not survive a restart or span multiple
/// processes.
pub struct InMemorySessionStore {
  sessions: RwLock<HashMap<TokenHash, Session>>,
}

impl InMemorySessionStore {
  /// Creates an empty session store
  pub fn new() -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
    }
  }

  /// Drops every expired entry. Called opportunistically; correctness does
  /// not depend on it because lookups re-check expiry.
  pub async fn purge_expired(&self) -> usize {
    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, session| session.is_valid());
    before - sessions.len()
  }

  /// Number of live entries, expired or not
  pub async fn len(&self) -> usize {
    self.sessions.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.sessions.read().await.is_empty()
  }
}

impl Default for InMemorySessionStore {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
  async fn insert(&self, session: Session) -> Result<(), AuthError> {
    self
      .sessions
      .write()
      .await
      .insert(session.token_hash.clone(), session);
    Ok(())
  }

  async fn find_by_token_hash(&self, token_hash: &TokenHash) -> Result<Option<Session>, AuthError> {
    Ok(self.sessions.read().await.get(token_hash).cloned())
  }

  async fn remove(&self, token_hash: &TokenHash) -> Result<(), AuthError> {
    self.sessions.write().await.remove(token_hash);
    Ok(())
  }
}
