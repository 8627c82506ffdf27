//! Integration tests for layered resolution through the public API.
//!
//! Documents are written to temp files or passed as bytes; environments
//! are supplied with `Env::from_pairs` except where the real process
//! environment is the point of the test.

use std::path::Path;
use std::time::Duration;

use confset::{ConfigError, ConfigSet, Env, ErrorHandling};
use pretty_assertions::assert_eq;
use serial_test::serial;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/submit.conf");

// ---------------------------------------------------------------------------
// documents
// ---------------------------------------------------------------------------

#[test]
fn fixture_populates_startup_settings() {
    let mut config = ConfigSet::new("submit", ErrorHandling::Panic);
    let redis_host = config.string("redis-host", "localhost");
    let session_secret = config.string("session-secret", "");
    let client_id = config.string("google-client-id", "");
    let client_secret = config.string("google-client-secret", "");
    let allowed = config.strings("google-allowed-emails");
    let max_idle = config.uint32("redis-pool-max-idle", 0);
    let idle_timeout = config.duration("redis-pool-idle-timeout", Duration::from_secs(240));

    config.resolve_with_env(FIXTURE, &Env::empty()).unwrap();

    assert_eq!(redis_host.get(), "redis.internal");
    assert_eq!(session_secret.get(), "change-me");
    assert_eq!(client_id.get(), "1234.apps.googleusercontent.com");
    assert_eq!(client_secret.get(), "shh");
    assert_eq!(allowed.get(), vec!["ops@example.com", "dev@example.com"]);
    assert_eq!(max_idle.get(), 3);
    assert_eq!(idle_timeout.get(), Duration::from_secs(300));
}

#[test]
fn document_file_on_disk_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.toml");
    std::fs::write(&path, "my_bool = true\ncities = [\"erie\",\"dayton\"]\n").unwrap();

    let mut config = ConfigSet::default();
    let my_bool = config.bool("my-bool", false);
    let my_int = config.int64("my-int", 0);
    let cities = config.strings("cities");

    config.resolve_with_env(&path, &Env::empty()).unwrap();

    assert!(my_bool.get());
    assert_eq!(my_int.get(), 0);
    assert_eq!(cities.get(), vec!["erie", "dayton"]);
}

#[test]
fn nested_section_and_dashed_root_key_are_equivalent() {
    let resolve = |doc: &str| {
        let mut config = ConfigSet::default();
        let name = config.string("section-name", "");
        config.resolve_bytes_with_env(doc.as_bytes(), &Env::empty()).unwrap();
        name.get()
    };

    assert_eq!(resolve("[section]\nname = \"x\"\n"), "x");
    assert_eq!(resolve("section-name = \"x\"\n"), "x");
    assert_eq!(resolve("section_name = \"x\"\n"), "x");
}

#[test]
fn underscore_and_dash_address_the_same_name() {
    for doc in ["my_bool = true", "my-bool = true"] {
        let mut config = ConfigSet::default();
        let my_bool = config.bool("my-bool", false);
        config.resolve_bytes_with_env(doc.as_bytes(), &Env::empty()).unwrap();
        assert!(my_bool.get(), "{doc}");
    }
}

#[test]
fn malformed_document_leaves_defaults() {
    let mut config = ConfigSet::default();
    let my_bool = config.bool("my-bool", false);
    let cities = config.strings("cities");

    let err = config
        .resolve_bytes_with_env(b"my_bool = true\ncities = [\"erie\"\n[broken", &Env::empty())
        .unwrap_err();

    assert!(matches!(err, ConfigError::ParseDocument { .. }));
    assert!(!my_bool.get());
    assert!(cities.get().is_empty());
}

#[test]
fn array_of_tables_is_rejected_without_writes() {
    let mut config = ConfigSet::default();
    let host = config.string("host", "default");

    let err = config
        .resolve_bytes_with_env(b"host = \"doc\"\n[[servers]]\nname = \"a\"\n", &Env::empty())
        .unwrap_err();

    assert!(err.to_string().contains("servers"), "{err}");
    assert_eq!(host.get(), "default");
}

// ---------------------------------------------------------------------------
// missing documents
// ---------------------------------------------------------------------------

#[test]
fn empty_path_applies_only_defaults_and_environment() {
    let mut config = ConfigSet::default().with_prefix("SUBMIT_");
    let host = config.string("redis-host", "localhost");
    let secret = config.string("session-secret", "");
    let env = Env::from_pairs([("SUBMIT_SESSION_SECRET", "from-env")]);

    let resolution = config.resolve_with_env("", &env).unwrap();

    assert_eq!(host.get(), "localhost");
    assert_eq!(secret.get(), "from-env");
    assert_eq!(resolution.document, 0);
    assert_eq!(resolution.environment, 1);
}

#[test]
fn explicit_missing_path_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let mut config = ConfigSet::default();
    let err = config.resolve_with_env(&missing, &Env::empty()).unwrap_err();

    match err {
        ConfigError::ReadFile { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// environment
// ---------------------------------------------------------------------------

#[test]
fn environment_takes_precedence_over_document() {
    let mut config = ConfigSet::default().with_prefix("PREFIX_");
    let my_string = config.string("my-string", "nope");
    let env = Env::from_pairs([("PREFIX_MY_STRING", "override")]);

    config
        .resolve_bytes_with_env(b"my-string = \"ok\"", &env)
        .unwrap();

    assert_eq!(my_string.get(), "override");
}

#[test]
fn empty_prefix_ignores_every_variable() {
    let mut config = ConfigSet::default();
    let my_string = config.string("my-string", "nope");
    let env = Env::from_pairs([
        ("MY_STRING", "a"),
        ("my-string", "b"),
        ("PREFIX_MY_STRING", "c"),
    ]);

    config.resolve_bytes_with_env(b"", &env).unwrap();
    assert_eq!(my_string.get(), "nope");
}

#[test]
fn list_values_merge_document_then_environment() {
    let mut config = ConfigSet::default().with_prefix("PREFIX_");
    let cities = config.strings("cities");
    let env = Env::from_pairs([("PREFIX_CITIES", "c, d")]);

    config
        .resolve_bytes_with_env(br#"cities = ["a","b"]"#, &env)
        .unwrap();

    assert_eq!(cities.get(), vec!["a", "b", "c", "d"]);
}

#[test]
fn environment_type_errors_abort_resolution() {
    let mut config = ConfigSet::default().with_prefix("APP_");
    let workers = config.int32("workers", 4);
    let env = Env::from_pairs([("APP_WORKERS", "many")]);

    let err = config.resolve_bytes_with_env(b"workers = 8", &env).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "workers"));
    assert_eq!(workers.get(), 4);
}

#[test]
#[serial]
fn real_process_environment_is_consulted() {
    temp_env::with_vars(
        [
            ("CONFSET_IT_REDIS_HOST", Some("redis.from.env")),
            ("CONFSET_IT_POOL_MAX_IDLE", Some("9")),
        ],
        || {
            let mut config = ConfigSet::default().with_prefix("CONFSET_IT_");
            let host = config.string("redis-host", "localhost");
            let max_idle = config.uint32("pool-max-idle", 3);

            config.resolve(Path::new("")).unwrap();

            assert_eq!(host.get(), "redis.from.env");
            assert_eq!(max_idle.get(), 9);
        },
    );
}

// ---------------------------------------------------------------------------
// isolation
// ---------------------------------------------------------------------------

#[test]
fn independent_sets_do_not_share_state() {
    let mut a = ConfigSet::new("a", ErrorHandling::Panic);
    let mut b = ConfigSet::new("b", ErrorHandling::Panic);
    let a_port = a.uint32("port", 1);
    let b_port = b.uint32("port", 2);

    a.resolve_bytes_with_env(b"port = 10", &Env::empty()).unwrap();

    assert_eq!(a_port.get(), 10);
    assert_eq!(b_port.get(), 2);
}

#[test]
fn handles_read_resolved_values_from_other_threads() {
    let mut config = ConfigSet::default();
    let host = config.string("redis-host", "localhost");
    config
        .resolve_bytes_with_env(b"redis_host = \"cache\"", &Env::empty())
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let host = host.clone();
            std::thread::spawn(move || host.get())
        })
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), "cache");
    }
}
