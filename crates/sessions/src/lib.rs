//! Session persistence for SessionKV.
//!
//! Implements the host framework's session-lifecycle contract on top of an
//! external KV store: namespaced read/write/delete with TTL policy
//! ([`SessionStore`]), a cooperative TTL-bounded spin lock that serializes
//! cross-process access per session id ([`SessionLock`]), and the
//! [`KvSessionHandler`] facade that wires both behind the
//! [`SessionLifecycle`] trait.

pub mod handler;
pub mod lock;
pub mod store;

pub use handler::{KvSessionHandler, SessionLifecycle};
pub use lock::SessionLock;
pub use store::SessionStore;
