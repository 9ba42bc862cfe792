//! Connection-descriptor resolution.
//!
//! The host framework hands over an opaque descriptor string (its
//! `save_path` setting). Before any connection is made it must be
//! classified into a TCP endpoint or a local socket path; connecting to an
//! undefined target is never acceptable, so classification failures are
//! fatal [`Error::Config`] at construction time.

use url::Url;

use skv_domain::error::{Error, Result};

/// Port used when a `tcp` descriptor omits one.
pub const DEFAULT_TCP_PORT: u16 = 6379;

/// Where the KV store lives. Produced once by [`resolve`], immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    Tcp { host: String, port: u16 },
    UnixSocket { path: String },
}

impl std::fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "tcp://{host}:{port}"),
            Self::UnixSocket { path } => write!(f, "unix://{path}"),
        }
    }
}

/// Classify a connection descriptor into a [`ConnectionTarget`].
///
/// Accepted forms: `tcp://host:port` and `unix:///absolute/path`. The
/// `unix:` scheme is rewritten to the generic `file:` grammar before
/// parsing, so socket descriptors ride on the standard URL parser.
///
/// Pure function; no side effects.
pub fn resolve(descriptor: &str) -> Result<ConnectionTarget> {
    let normalized = match descriptor.strip_prefix("unix:") {
        Some(rest) => format!("file:{rest}"),
        None => descriptor.to_owned(),
    };

    let url = Url::parse(&normalized).map_err(|_| malformed())?;

    // A bare port also classifies as TCP, even without a `tcp` scheme or
    // host. Deliberately literal; see DESIGN.md before tightening.
    if (url.scheme() == "tcp" && url.host_str().is_some()) || url.port().is_some() {
        return Ok(ConnectionTarget::Tcp {
            host: url.host_str().unwrap_or_default().to_owned(),
            port: url.port().unwrap_or(DEFAULT_TCP_PORT),
        });
    }

    if url.scheme() == "file" && !url.path().is_empty() {
        return Ok(ConnectionTarget::UnixSocket {
            path: url.path().to_owned(),
        });
    }

    Err(malformed())
}

fn malformed() -> Error {
    Error::Config("malformed connection string".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tcp_descriptor_resolves_host_and_port() {
        let target = resolve("tcp://127.0.0.1:6379").unwrap();
        assert_eq!(
            target,
            ConnectionTarget::Tcp {
                host: "127.0.0.1".into(),
                port: 6379,
            }
        );
    }

    #[test]
    fn tcp_descriptor_without_port_uses_default() {
        let target = resolve("tcp://redis.internal").unwrap();
        assert_eq!(
            target,
            ConnectionTarget::Tcp {
                host: "redis.internal".into(),
                port: DEFAULT_TCP_PORT,
            }
        );
    }

    #[test]
    fn unix_descriptor_resolves_socket_path() {
        let target = resolve("unix:///var/run/redis/redis.sock").unwrap();
        assert_eq!(
            target,
            ConnectionTarget::UnixSocket {
                path: "/var/run/redis/redis.sock".into(),
            }
        );
    }

    #[test]
    fn bare_path_is_rejected() {
        let err = resolve("/tmp").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg == "malformed connection string"));
    }

    #[test]
    fn port_alone_classifies_as_tcp() {
        // Not a tcp scheme, but the port is present: classifies as TCP.
        let target = resolve("redis://10.0.0.5:6380").unwrap();
        assert_eq!(
            target,
            ConnectionTarget::Tcp {
                host: "10.0.0.5".into(),
                port: 6380,
            }
        );
    }

    #[test]
    fn unrecognized_scheme_without_port_is_rejected() {
        assert!(resolve("http://example.com").is_err());
    }

    #[test]
    fn display_round_trips_the_flavor() {
        let tcp = resolve("tcp://127.0.0.1:6379").unwrap();
        assert_eq!(tcp.to_string(), "tcp://127.0.0.1:6379");

        let sock = resolve("unix:///tmp/redis.sock").unwrap();
        assert_eq!(sock.to_string(), "unix:///tmp/redis.sock");
    }
}
