//! The `KvClient` trait defines the store primitives the session layer
//! needs. Implementations may talk to a real server over TCP or a unix
//! socket, or to the in-memory test double.

use async_trait::async_trait;

use skv_domain::error::Result;

use crate::target::ConnectionTarget;

/// Capability set required of the backing key-value store.
///
/// All methods are fallible; transport failures surface as
/// `Error::Transport` and are never retried at this layer.
#[async_trait]
pub trait KvClient: Send + Sync {
    /// Establish the connection described by `target`. Called exactly once,
    /// at handler construction.
    async fn connect(&self, target: &ConnectionTarget) -> Result<()>;

    /// Fetch a value. `None` means the key is absent (or expired).
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Unconditional, non-expiring set.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Unconditional set with a TTL in seconds.
    async fn set_ex(&self, key: &str, value: &[u8], ttl_seconds: u64) -> Result<()>;

    /// Idempotent delete; absent keys are not an error.
    async fn del(&self, key: &str) -> Result<()>;

    /// Atomic set-if-absent. Returns `true` when this caller created the
    /// key, `false` when it already existed.
    async fn set_nx(&self, key: &str, value: &[u8]) -> Result<bool>;

    /// Attach a TTL to an existing key. Returns `false` if the key does
    /// not exist.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool>;
}
