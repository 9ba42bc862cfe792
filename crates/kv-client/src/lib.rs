//! `skv-client` — KV store client surface for SessionKV.
//!
//! Provides the [`KvClient`] trait that abstracts over the key-value store
//! primitives the session layer needs (get, set, expiring set, delete,
//! set-if-absent, expire, connect), the [`ConnectionTarget`] resolver that
//! classifies a connection descriptor into a TCP endpoint or a local socket
//! path, and an in-memory implementation ([`MemoryKvClient`]) that doubles
//! as the test client for the whole workspace.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use skv_client::{resolve, KvClient, MemoryKvClient};
//!
//! # async fn example() -> skv_domain::error::Result<()> {
//! let target = resolve("tcp://127.0.0.1:6379")?;
//! let client = Arc::new(MemoryKvClient::new());
//! client.connect(&target).await?;
//!
//! client.set("greeting", b"hello").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod memory;
pub mod target;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use client::KvClient;
pub use memory::{KvOp, MemoryKvClient};
pub use target::{resolve, ConnectionTarget};
