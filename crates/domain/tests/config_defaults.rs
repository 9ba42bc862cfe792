use skv_domain::config::Config;

#[test]
fn default_save_path_is_local_tcp() {
    let config = Config::default();
    assert_eq!(config.save_path, "tcp://127.0.0.1:6379");
}

#[test]
fn default_session_settings() {
    let config = Config::default();
    assert_eq!(config.session.prefix, "PHPREDIS_SESSION");
    assert_eq!(config.session.ttl_seconds, 1440);
    assert!(config.session.locking);
    assert_eq!(config.session.spin_wait_micros, 150_000);
    assert_eq!(config.session.lock_max_wait_seconds, 30);
}

#[test]
fn explicit_socket_save_path_parses() {
    let toml_str = r#"
save_path = "unix:///var/run/redis/redis.sock"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.save_path, "unix:///var/run/redis/redis.sock");
    // Untouched sections keep their defaults.
    assert!(config.session.locking);
}

#[test]
fn session_section_parses_custom_values() {
    let toml_str = r#"
[session]
prefix = "session"
ttl_seconds = 0
locking = false
spin_wait_micros = 1000
lock_max_wait_seconds = 5
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.session.prefix, "session");
    assert_eq!(config.session.ttl_seconds, 0);
    assert!(!config.session.locking);
    assert_eq!(config.session.spin_wait_micros, 1000);
    assert_eq!(config.session.lock_max_wait_seconds, 5);
}

#[test]
fn zero_lock_wait_falls_back_to_default() {
    let toml_str = r#"
[session]
lock_max_wait_seconds = 0
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.session.lock_max_wait_seconds, 0);
    assert_eq!(config.session.lock_max_wait(), 30);
}
