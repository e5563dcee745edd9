use super::*;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(
        settings.server.max_body_bytes.get(),
        6 * 1_000_000 + 64 * 1024
    );
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert!(settings.database.url.is_none());
    assert_eq!(settings.database.max_connections.get(), 8);
    assert!(settings.auth.jwt_secret.is_none());
    assert_eq!(settings.auth.token_ttl, Duration::from_secs(86_400));
    assert_eq!(settings.auth.min_password_chars, 8);
    assert_eq!(settings.posts.max_text_bytes.get(), 1_000_000);
    assert!(settings.cache.enabled);
    assert_eq!(settings.cache.ttl, Duration::from_secs(300));
    assert_eq!(settings.cache.capacity.get(), 100);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.cache.ttl_seconds = Some(60);

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        cache_ttl_seconds: Some(30),
        cache_capacity: Some(7),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.cache.ttl, Duration::from_secs(30));
    assert_eq!(settings.cache.capacity.get(), 7);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn database_url_is_trimmed_and_blank_means_unset() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());
    let settings = Settings::from_raw(raw.clone()).expect("valid settings");
    assert!(settings.database.url.is_none());

    raw.apply_database_override(&DatabaseOverride {
        database_url: Some(" postgres://localhost/tidepost ".to_string()),
    });
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(
        settings.database.url.as_deref(),
        Some("postgres://localhost/tidepost")
    );
}

#[test]
fn short_jwt_secret_is_rejected() {
    let mut raw = RawSettings::default();
    raw.auth.jwt_secret = Some("too-short".to_string());

    let err = Settings::from_raw(raw).expect_err("secret must be rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "auth.jwt_secret",
            ..
        }
    ));
}

#[test]
fn jwt_secret_is_redacted_in_debug_output() {
    let mut raw = RawSettings::default();
    raw.auth.jwt_secret = Some(SECRET.to_string());

    assert!(!format!("{raw:?}").contains(SECRET));

    let settings = Settings::from_raw(raw).expect("valid settings");
    let secret = settings.auth.jwt_secret.as_ref().expect("secret present");
    assert_eq!(secret.expose(), SECRET.as_bytes());
    assert!(!format!("{settings:?}").contains(SECRET));
}

#[test]
fn zero_values_are_rejected() {
    let cases: [(fn(&mut RawSettings), &str); 5] = [
        (|raw| raw.server.port = Some(0), "server.port"),
        (|raw| raw.cache.capacity = Some(0), "cache.capacity"),
        (|raw| raw.cache.ttl_seconds = Some(0), "cache.ttl_seconds"),
        (
            |raw| raw.database.max_connections = Some(0),
            "database.max_connections",
        ),
        (|raw| raw.posts.max_text_bytes = Some(0), "posts.max_text_bytes"),
    ];

    for (mutate, expected_key) in cases {
        let mut raw = RawSettings::default();
        mutate(&mut raw);
        match Settings::from_raw(raw) {
            Err(LoadError::Invalid { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected invalid `{expected_key}`, got {other:?}"),
        }
    }
}

#[test]
fn body_limit_follows_post_text_limit() {
    let mut raw = RawSettings::default();
    raw.posts.max_text_bytes = Some(10);

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.server.max_body_bytes.get(), required_body_bytes(10));
    assert!(settings.server.max_body_bytes.get() >= 6 * 10);
}

#[test]
fn body_limit_below_escaped_post_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.max_body_bytes = Some(4 * 1024 * 1024);

    match Settings::from_raw(raw) {
        Err(LoadError::Invalid { key, reason }) => {
            assert_eq!(key, "server.max_body_bytes");
            assert!(reason.contains("6065536"), "reason: {reason}");
        }
        other => panic!("expected invalid body limit, got {other:?}"),
    }

    let mut raw = RawSettings::default();
    raw.server.max_body_bytes = Some(8 * 1024 * 1024);
    let settings = Settings::from_raw(raw).expect("larger limit is accepted");
    assert_eq!(settings.server.max_body_bytes.get(), 8 * 1024 * 1024);
}

#[test]
fn invalid_log_level_is_reported() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("level must be rejected");
    assert!(err.to_string().contains("logging.level"));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::try_parse_from(["tidepost"]).expect("parse");
    assert!(args.command.is_none());
}

#[test]
fn serve_flags_are_parsed() {
    let args = CliArgs::try_parse_from([
        "tidepost",
        "serve",
        "--server-port",
        "8080",
        "--log-json",
        "yes",
        "--database-url",
        "postgres://db/tidepost",
        "--cache-ttl-seconds",
        "120",
    ])
    .expect("parse");

    let Some(Command::Serve(serve)) = args.command else {
        panic!("expected serve command");
    };
    assert_eq!(serve.overrides.server_port, Some(8080));
    assert_eq!(serve.overrides.log_json, Some(true));
    assert_eq!(
        serve.overrides.database.database_url.as_deref(),
        Some("postgres://db/tidepost")
    );
    assert_eq!(serve.overrides.cache_ttl_seconds, Some(120));
}

#[test]
fn migrate_accepts_database_url() {
    let args = CliArgs::try_parse_from([
        "tidepost",
        "migrate",
        "--database-url",
        "postgres://db/tidepost",
    ])
    .expect("parse");

    let Some(Command::Migrate(migrate)) = args.command else {
        panic!("expected migrate command");
    };
    assert_eq!(
        migrate.database.database_url.as_deref(),
        Some("postgres://db/tidepost")
    );
}
