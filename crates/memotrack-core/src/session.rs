use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Keyed store of opaque session tokens.
///
/// Tokens grant access to the protected endpoints from login until they are
/// revoked, expire, or the backing store is dropped.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Mint a new token and return it.
    async fn create(&self) -> String;
    /// Whether `token` identifies a live session.
    async fn validate(&self, token: &str) -> bool;
    /// Invalidate `token`. A no-op if the token is unknown.
    async fn revoke(&self, token: &str);
}

/// Process-local session table. Sessions do not survive a restart.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Instant>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    /// `ttl = None` means sessions live until revoked or the process exits.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_live(&self, created_at: Instant) -> bool {
        match self.ttl {
            Some(ttl) => created_at.elapsed() < ttl,
            None => true,
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), Instant::now());
        token
    }

    async fn validate(&self, token: &str) -> bool {
        let created_at = match self.sessions.read().await.get(token) {
            Some(created_at) => *created_at,
            None => return false,
        };
        if self.is_live(created_at) {
            return true;
        }
        self.sessions.write().await.remove(token);
        false
    }

    async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}
