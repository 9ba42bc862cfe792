/// Shared error type used across all SessionKV crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),

    /// KV client transport failure. Never retried or masked by this layer;
    /// it carries whatever the underlying client reported.
    #[error("transport: {0}")]
    Transport(String),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
