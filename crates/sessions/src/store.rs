//! Session record persistence.
//!
//! Thin mapping from namespaced keys to the KV primitives, applying the
//! TTL policy on write. No retries and no backoff here: transport failures
//! are the caller's problem, and absent keys read as empty bytes because
//! the host contract has no "no session" signal distinct from "empty
//! session".

use std::sync::Arc;

use skv_client::KvClient;
use skv_domain::error::Result;

/// Session record access over a connected KV client.
#[derive(Debug)]
pub struct SessionStore<C> {
    client: Arc<C>,
}

impl<C: KvClient> SessionStore<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Read a session record; absent keys come back as empty bytes.
    pub async fn read(&self, key: &str) -> Result<Vec<u8>> {
        let value = self.client.get(key).await?.unwrap_or_default();
        tracing::debug!(key, bytes = value.len(), "session read");
        Ok(value)
    }

    /// Overwrite a session record unconditionally. A positive TTL writes an
    /// expiring record; zero or negative writes a permanent one.
    pub async fn write(&self, key: &str, value: &[u8], ttl_seconds: i64) -> Result<()> {
        if ttl_seconds > 0 {
            self.client.set_ex(key, value, ttl_seconds as u64).await?;
        } else {
            self.client.set(key, value).await?;
        }
        tracing::debug!(key, bytes = value.len(), ttl_seconds, "session written");
        Ok(())
    }

    /// Remove a session record. Idempotent.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client.del(key).await?;
        tracing::debug!(key, "session deleted");
        Ok(())
    }
}
