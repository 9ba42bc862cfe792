//! Distributed per-session spin lock.
//!
//! Mutual exclusion across processes and hosts with no coordinator: the
//! lock is a single KV key created with atomic set-if-absent. Contenders
//! poll at a fixed interval until an attempt budget — `lock_max_wait`
//! seconds' worth of polls — runs out. The key carries a TTL one second
//! longer than that budget, so a holder that crashes without releasing
//! stalls contenders for a bounded time only.
//!
//! Two deliberate limitations of the protocol (see DESIGN.md):
//! - no owner token: `release` deletes the key without checking who
//!   created it;
//! - acquisition timeout is not an error — callers degrade to "no session
//!   data" instead.

use std::sync::Arc;

use tokio::time::Duration;

use skv_client::KvClient;
use skv_domain::error::Result;

/// Value stored under the lock key. Presence of the key is the signal;
/// the value itself is never inspected.
const LOCK_SENTINEL: &[u8] = b"1";

/// One session's lock handle. Tracks whether this instance currently
/// holds the lock and which key it used.
#[derive(Debug)]
pub struct SessionLock<C> {
    client: Arc<C>,
    prefix: String,
    spin_wait_micros: u64,
    lock_max_wait_seconds: u64,
    locked: bool,
    lock_key: Option<String>,
}

impl<C: KvClient> SessionLock<C> {
    /// `spin_wait_micros` is clamped to at least 1 µs; the attempt budget
    /// divides by it.
    pub fn new(
        client: Arc<C>,
        prefix: impl Into<String>,
        spin_wait_micros: u64,
        lock_max_wait_seconds: u64,
    ) -> Self {
        Self {
            client,
            prefix: prefix.into(),
            spin_wait_micros: spin_wait_micros.max(1),
            lock_max_wait_seconds,
            locked: false,
            lock_key: None,
        }
    }

    /// Whether this handle currently holds its lock.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Try to take the lock for `session_id`.
    ///
    /// Polls set-if-absent up to `(1s / spin_wait) * lock_max_wait` times,
    /// sleeping `spin_wait` between attempts. `Ok(true)` means the lock is
    /// held and carries a TTL of `lock_max_wait + 1` seconds. `Ok(false)`
    /// means the budget ran out — not an error by design.
    pub async fn acquire(&mut self, session_id: &str) -> Result<bool> {
        let attempts = (1_000_000 / self.spin_wait_micros) * self.lock_max_wait_seconds;
        let lock_key = format!("{session_id}.lock");
        let full_key = format!("{}{}", self.prefix, lock_key);
        self.lock_key = Some(lock_key);

        for _ in 0..attempts {
            if self.client.set_nx(&full_key, LOCK_SENTINEL).await? {
                let _ = self
                    .client
                    .expire(&full_key, self.lock_max_wait_seconds + 1)
                    .await?;
                self.locked = true;
                tracing::debug!(key = %full_key, "session lock acquired");
                return Ok(true);
            }
            tokio::time::sleep(Duration::from_micros(self.spin_wait_micros)).await;
        }

        tracing::warn!(key = %full_key, attempts, "session lock wait exhausted");
        Ok(false)
    }

    /// Drop the lock key and clear the held flag. Unconditional: there is
    /// no ownership check, and releasing without holding is a no-op-shaped
    /// delete.
    pub async fn release(&mut self) -> Result<()> {
        if let Some(ref lock_key) = self.lock_key {
            let full_key = format!("{}{}", self.prefix, lock_key);
            self.client.del(&full_key).await?;
            tracing::debug!(key = %full_key, "session lock released");
        }
        self.locked = false;
        Ok(())
    }
}
