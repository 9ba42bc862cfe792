use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Top-level configuration for one session handler instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection descriptor for the KV store, e.g. `tcp://127.0.0.1:6379`
    /// or `unix:///var/run/redis/redis.sock`.
    #[serde(default = "default_save_path")]
    pub save_path: String,

    #[serde(default)]
    pub session: SessionConfig,
}

// ── Session handler ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key namespace. Data keys are `prefix:session_id`; lock keys are
    /// `prefix` + `session_id` + `.lock` with no separator.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Session record TTL in seconds. Zero or negative writes a
    /// non-expiring record.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,

    /// Serialize concurrent access to the same session id via the
    /// distributed spin lock.
    #[serde(default = "default_locking")]
    pub locking: bool,

    /// Sleep between lock attempts, in microseconds.
    #[serde(default = "default_spin_wait_micros")]
    pub spin_wait_micros: u64,

    /// Upper bound on the total time one acquire may spin, in seconds.
    /// Zero means "unset" and falls back to the 30 s default.
    #[serde(default = "default_lock_max_wait_seconds")]
    pub lock_max_wait_seconds: u64,
}

impl SessionConfig {
    /// Effective lock wait bound: a configured zero falls back to the
    /// default, mirroring the host framework's max-execution-time setting.
    pub fn lock_max_wait(&self) -> u64 {
        if self.lock_max_wait_seconds == 0 {
            default_lock_max_wait_seconds()
        } else {
            self.lock_max_wait_seconds
        }
    }
}

// ── Defaults ───────────────────────────────────────────────────────

fn default_save_path() -> String {
    "tcp://127.0.0.1:6379".into()
}
fn default_prefix() -> String {
    "PHPREDIS_SESSION".into()
}
fn default_ttl_seconds() -> i64 {
    1440
}
fn default_locking() -> bool {
    true
}
fn default_spin_wait_micros() -> u64 {
    150_000
}
fn default_lock_max_wait_seconds() -> u64 {
    30
}

// ── Default impls ──────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            ttl_seconds: default_ttl_seconds(),
            locking: default_locking(),
            spin_wait_micros: default_spin_wait_micros(),
            lock_max_wait_seconds: default_lock_max_wait_seconds(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for missing keys.
    pub fn load(path: &str) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &str) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
