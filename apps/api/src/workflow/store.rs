use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::workflow::session::Session;

/// In-memory session registry. Nothing is persisted; a restart drops every session.
///
/// Sessions idle for longer than `ttl` are purged whenever a new one is created.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> Session {
        let now = Utc::now();
        let purged = self.purge_expired(now).await;
        if purged > 0 {
            info!(purged, "Purged idle sessions");
        }

        let session = Session::new(now);
        let active = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(session.id(), session.clone());
            sessions.len()
        };

        info!(session_id = %session.id(), active, "Session started");
        session
    }

    /// Returns a copy of the session, or NotFound if it never existed or has expired.
    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|s| !is_idle(s, Utc::now(), self.ttl))
            .cloned()
            .ok_or_else(|| session_not_found(id))
    }

    /// Runs `f` against the live session while holding the write lock.
    ///
    /// Keep `f` synchronous and cheap: extraction and job lookups happen
    /// before calling this, never inside it.
    pub async fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .filter(|s| !is_idle(s, now, self.ttl))
            .ok_or_else(|| session_not_found(id))?;

        session.touch(now);
        f(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(_) => {
                info!(session_id = %id, "Session ended");
                Ok(())
            }
            None => Err(session_not_found(id)),
        }
    }

    /// Drops every session idle since before `now - ttl`. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        purge_idle(&mut sessions, now, self.ttl)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn is_idle(session: &Session, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - session.last_activity() > ttl
}

fn purge_idle(sessions: &mut HashMap<Uuid, Session>, now: DateTime<Utc>, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|id, s| {
        let keep = !is_idle(s, now, ttl);
        if !keep {
            debug!(session_id = %id, "Dropping idle session");
        }
        keep
    });
    before - sessions.len()
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found or expired"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::session::fixtures::resume;
    use crate::workflow::session::WorkflowStep;

    #[tokio::test]
    async fn test_create_and_snapshot() {
        let store = SessionStore::new(Duration::minutes(60));
        let session = store.create().await;
        let snapshot = store.snapshot(session.id()).await.unwrap();
        assert_eq!(snapshot.id(), session.id());
        assert_eq!(snapshot.step(), WorkflowStep::AwaitingResume);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let store = SessionStore::new(Duration::minutes(60));
        let err = store.snapshot(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_with_session_mutates_in_place() {
        let store = SessionStore::new(Duration::minutes(60));
        let id = store.create().await.id();

        let step = store
            .with_session(id, |s| Ok(s.record_resume(resume("Jane Doe"))?))
            .await
            .unwrap();
        assert_eq!(step, WorkflowStep::AwaitingJob);
        assert_eq!(
            store.snapshot(id).await.unwrap().step(),
            WorkflowStep::AwaitingJob
        );
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_session_unchanged() {
        let store = SessionStore::new(Duration::minutes(60));
        let id = store.create().await.id();

        let result = store
            .with_session(id, |s| Ok(s.record_resume(resume(""))?))
            .await;
        assert!(result.is_err());
        assert_eq!(
            store.snapshot(id).await.unwrap().step(),
            WorkflowStep::AwaitingResume
        );
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::minutes(60));
        let a = store.create().await.id();
        let b = store.create().await.id();

        store
            .with_session(a, |s| Ok(s.record_resume(resume("A"))?))
            .await
            .unwrap();

        assert_eq!(store.snapshot(a).await.unwrap().step(), WorkflowStep::AwaitingJob);
        assert_eq!(
            store.snapshot(b).await.unwrap().step(),
            WorkflowStep::AwaitingResume
        );
    }

    #[tokio::test]
    async fn test_remove_discards_session() {
        let store = SessionStore::new(Duration::minutes(60));
        let id = store.create().await.id();
        store.remove(id).await.unwrap();
        assert!(store.snapshot(id).await.is_err());
        assert!(store.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn test_purge_expired_drops_idle_sessions() {
        let store = SessionStore::new(Duration::minutes(30));
        store.create().await;
        store.create().await;
        assert_eq!(store.len().await, 2);

        assert_eq!(store.purge_expired(Utc::now()).await, 0);
        let later = Utc::now() + Duration::minutes(31);
        assert_eq!(store.purge_expired(later).await, 2);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_found() {
        let store = SessionStore::new(Duration::zero());
        let id = store.create().await.id();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert!(matches!(
            store.snapshot(id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
