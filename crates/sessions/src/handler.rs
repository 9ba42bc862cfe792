//! Session-lifecycle facade.
//!
//! [`KvSessionHandler`] is the single concrete type the host framework
//! talks to. Construction resolves the connection descriptor and connects
//! the KV client; the lifecycle methods then compose [`SessionStore`] and
//! [`SessionLock`]. One handler instance serves one logical request at a
//! time — there is no internal synchronization for concurrent calls, the
//! shared LockRecord in the store is the only cross-process exclusion.

use std::sync::Arc;

use async_trait::async_trait;

use skv_client::{resolve, KvClient};
use skv_domain::config::SessionConfig;
use skv_domain::error::Result;

use crate::lock::SessionLock;
use crate::store::SessionStore;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lifecycle contract
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The session-lifecycle capability set required by the host framework.
#[async_trait]
pub trait SessionLifecycle {
    /// Called once per request before the first `read`. Returns `true` on
    /// success.
    async fn open(&mut self, save_path: &str, session_name: &str) -> Result<bool>;

    /// Called at end of request; releases per-request resources.
    async fn close(&mut self) -> Result<bool>;

    /// Fetch session data. Empty bytes mean "no session data available".
    async fn read(&mut self, session_id: &str) -> Result<Vec<u8>>;

    /// Persist session data.
    async fn write(&mut self, session_id: &str, data: &[u8]) -> Result<()>;

    /// Remove the session entirely.
    async fn destroy(&mut self, session_id: &str) -> Result<bool>;

    /// Garbage-collect sessions older than `max_lifetime_seconds`.
    async fn gc(&mut self, max_lifetime_seconds: i64) -> Result<bool>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Handler
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// KV-store-backed implementation of [`SessionLifecycle`].
#[derive(Debug)]
pub struct KvSessionHandler<C> {
    store: SessionStore<C>,
    lock: SessionLock<C>,
    config: SessionConfig,
}

impl<C: KvClient> KvSessionHandler<C> {
    /// Resolve `save_path` and connect the client, failing fast on a
    /// malformed descriptor — the handler never exists half-connected.
    pub async fn connect(client: Arc<C>, config: SessionConfig, save_path: &str) -> Result<Self> {
        let target = resolve(save_path)?;
        client.connect(&target).await?;
        tracing::info!(%target, prefix = %config.prefix, "session KV store connected");

        let lock = SessionLock::new(
            client.clone(),
            config.prefix.clone(),
            config.spin_wait_micros,
            config.lock_max_wait(),
        );

        Ok(Self {
            store: SessionStore::new(client),
            lock,
            config,
        })
    }

    /// Namespaced data key: `prefix:session_id`, or the bare id when the
    /// prefix is empty. (Lock keys use a different, un-separated format;
    /// see [`SessionLock`].)
    fn data_key(&self, session_id: &str) -> String {
        if self.config.prefix.is_empty() {
            session_id.to_owned()
        } else {
            format!("{}:{}", self.config.prefix, session_id)
        }
    }
}

#[async_trait]
impl<C: KvClient> SessionLifecycle for KvSessionHandler<C> {
    async fn open(&mut self, _save_path: &str, _session_name: &str) -> Result<bool> {
        // Connection already established at construction.
        Ok(true)
    }

    async fn close(&mut self) -> Result<bool> {
        if self.config.locking && self.lock.is_locked() {
            self.lock.release().await?;
        }
        Ok(true)
    }

    async fn read(&mut self, session_id: &str) -> Result<Vec<u8>> {
        if self.config.locking && !self.lock.is_locked() {
            // Fail-open: a lock timeout reads as "no session data", it
            // does not raise.
            if !self.lock.acquire(session_id).await? {
                return Ok(Vec::new());
            }
        }
        self.store.read(&self.data_key(session_id)).await
    }

    async fn write(&mut self, session_id: &str, data: &[u8]) -> Result<()> {
        // No lock check: the caller holds the lock from the `read` earlier
        // in the same request lifecycle.
        self.store
            .write(&self.data_key(session_id), data, self.config.ttl_seconds)
            .await
    }

    async fn destroy(&mut self, session_id: &str) -> Result<bool> {
        self.store.delete(&self.data_key(session_id)).await?;
        self.close().await?;
        Ok(true)
    }

    async fn gc(&mut self, _max_lifetime_seconds: i64) -> Result<bool> {
        // Expiry is the store's job: records are written with a TTL.
        Ok(true)
    }
}
