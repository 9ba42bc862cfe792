//! In-memory [`KvClient`] implementation.
//!
//! Backs the whole test suite and works as a single-process dev backend.
//! TTLs are honored via monotonic deadlines checked lazily on access
//! (`tokio::time::Instant`, so paused-clock tests can advance expiry
//! deterministically). Every primitive call is appended to an op log that
//! tests assert against, and `hold_lock` scripts set-if-absent denial to
//! exercise lock contention without a second process.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::{Duration, Instant};

use skv_domain::error::Result;

use crate::client::KvClient;
use crate::target::ConnectionTarget;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Op log
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One recorded primitive call, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvOp {
    Connect { target: ConnectionTarget },
    Get { key: String },
    Set { key: String },
    SetEx { key: String, ttl_seconds: u64 },
    Del { key: String },
    SetNx { key: String },
    Expire { key: String, ttl_seconds: u64 },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if deadline <= now)
    }
}

/// In-memory KV store with TTL support and a recorded op log.
#[derive(Debug, Default)]
pub struct MemoryKvClient {
    entries: Mutex<HashMap<String, Entry>>,
    ops: Mutex<Vec<KvOp>>,
    target: Mutex<Option<ConnectionTarget>>,
    /// Keys for which `set_nx` always reports contention.
    held: Mutex<HashSet<String>>,
}

impl MemoryKvClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every primitive call so far.
    pub fn ops(&self) -> Vec<KvOp> {
        self.ops.lock().clone()
    }

    /// Number of recorded calls matching `pred`.
    pub fn op_count(&self, pred: impl Fn(&KvOp) -> bool) -> usize {
        self.ops.lock().iter().filter(|op| pred(op)).count()
    }

    /// The target passed to `connect`, if any.
    pub fn connected_target(&self) -> Option<ConnectionTarget> {
        self.target.lock().clone()
    }

    /// Whether a live (non-expired) entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.lock();
        entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()))
    }

    /// Script permanent contention on `key`: every `set_nx` against it
    /// fails, as if another process held the lock.
    pub fn hold_lock(&self, key: &str) {
        self.held.lock().insert(key.to_owned());
    }

    /// Undo [`hold_lock`](Self::hold_lock).
    pub fn release_held_lock(&self, key: &str) {
        self.held.lock().remove(key);
    }

    fn record(&self, op: KvOp) {
        self.ops.lock().push(op);
    }

    /// Drop the entry for `key` if its deadline has passed.
    fn evict_if_expired(entries: &mut HashMap<String, Entry>, key: &str) {
        let now = Instant::now();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl KvClient for MemoryKvClient {
    async fn connect(&self, target: &ConnectionTarget) -> Result<()> {
        *self.target.lock() = Some(target.clone());
        self.record(KvOp::Connect {
            target: target.clone(),
        });
        tracing::debug!(%target, "memory KV client connected");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.record(KvOp::Get { key: key.to_owned() });
        let mut entries = self.entries.lock();
        Self::evict_if_expired(&mut entries, key);
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.record(KvOp::Set { key: key.to_owned() });
        self.entries.lock().insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()> {
        self.record(KvOp::SetEx {
            key: key.to_owned(),
            ttl_seconds,
        });
        self.entries.lock().insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_seconds)),
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.record(KvOp::Del { key: key.to_owned() });
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &[u8]) -> Result<bool> {
        self.record(KvOp::SetNx { key: key.to_owned() });
        if self.held.lock().contains(key) {
            return Ok(false);
        }
        let mut entries = self.entries.lock();
        Self::evict_if_expired(&mut entries, key);
        if entries.contains_key(key) {
            return Ok(false);
        }
        entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_vec(),
                expires_at: None,
            },
        );
        Ok(true)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool> {
        self.record(KvOp::Expire {
            key: key.to_owned(),
            ttl_seconds,
        });
        let mut entries = self.entries.lock();
        Self::evict_if_expired(&mut entries, key);
        match entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + Duration::from_secs(ttl_seconds));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_none_for_absent_key() {
        let client = MemoryKvClient::new();
        assert_eq!(client.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let client = MemoryKvClient::new();
        client.set("k", b"v").await.unwrap();
        assert_eq!(client.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn del_is_idempotent() {
        let client = MemoryKvClient::new();
        client.set("k", b"v").await.unwrap();
        client.del("k").await.unwrap();
        client.del("k").await.unwrap();
        assert_eq!(client.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_nx_reports_existing_key() {
        let client = MemoryKvClient::new();
        assert!(client.set_nx("k", b"1").await.unwrap());
        assert!(!client.set_nx("k", b"1").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn set_ex_expires_after_ttl() {
        let client = MemoryKvClient::new();
        client.set_ex("k", b"v", 2).await.unwrap();
        assert!(client.contains("k"));

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(client.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_key_is_free_for_set_nx() {
        let client = MemoryKvClient::new();
        assert!(client.set_nx("k", b"1").await.unwrap());
        assert!(client.expire("k", 1).await.unwrap());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(client.set_nx("k", b"1").await.unwrap());
    }

    #[tokio::test]
    async fn expire_on_absent_key_is_false() {
        let client = MemoryKvClient::new();
        assert!(!client.expire("nope", 5).await.unwrap());
    }

    #[tokio::test]
    async fn held_key_denies_set_nx_until_released() {
        let client = MemoryKvClient::new();
        client.hold_lock("k");
        assert!(!client.set_nx("k", b"1").await.unwrap());

        client.release_held_lock("k");
        assert!(client.set_nx("k", b"1").await.unwrap());
    }

    #[tokio::test]
    async fn op_log_records_invocation_order() {
        let client = MemoryKvClient::new();
        client.set("a", b"1").await.unwrap();
        client.get("a").await.unwrap();
        client.del("a").await.unwrap();

        assert_eq!(
            client.ops(),
            vec![
                KvOp::Set { key: "a".into() },
                KvOp::Get { key: "a".into() },
                KvOp::Del { key: "a".into() },
            ]
        );
    }
}
