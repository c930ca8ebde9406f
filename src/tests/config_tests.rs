//! Tests for the configuration module.
//!
//! Each test uses its own environment prefix so that parallel tests do not
//! see each other's overrides.

use crate::config::{ConfigLoader, LogConfig, LookupConfig, RouterConfig, Validate};
use crate::error::config::ConfigError;
use crate::routing::Route;
use crate::tests::TestFixture;

const ROUTES_TOML: &str = r#"
[lookup]
reader_threads = 2

[log]
level = "debug"

[[routes]]
path = "/"
handler = "index"

[[routes]]
path = "/blog"
handler = "blog"
description = "Blog index"
"#;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = RouterConfig::default();
    assert!(config.validate().is_ok());
    assert!(config.routes.is_empty());
    assert!(config.lookup.reader_threads >= 1);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = RouterConfig::default();

    config.lookup.reader_threads = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { .. })
    ));

    config.lookup = LookupConfig::default();
    config.log = LogConfig {
        level: "loud".to_string(),
        ..LogConfig::default()
    };
    assert!(config.validate().is_err());

    config.log = LogConfig::default();
    config.routes.push(Route::new("", "root"));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError(_))
    ));

    config.routes = vec![Route::new("/a", "  ")];
    assert!(config.validate().is_err());

    config.routes = vec![Route::new("/a", "a")];
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a TOML file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.write_file("routes.toml", ROUTES_TOML).unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_FILE").load().unwrap();

    assert_eq!(config.lookup.reader_threads, 2);
    assert_eq!(config.log.level, "debug");
    assert_eq!(
        config.routes,
        vec![
            Route::new("/", "index"),
            Route::new("/blog", "blog").with_description("Blog index"),
        ]
    );
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .write_file(
            "routes.json",
            r#"{ "routes": [ { "path": "/feed", "handler": "feed" } ] }"#,
        )
        .unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_JSON").load().unwrap();
    assert_eq!(config.routes, vec![Route::new("/feed", "feed")]);
    assert_eq!(config.log.level, "info");
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let path = fixture.write_file("routes.toml", ROUTES_TOML).unwrap();

    fixture.set_env("TEST_ENV__LOOKUP__READER_THREADS", "3");
    fixture.set_env("TEST_ENV__LOG__LEVEL", "warn");

    let config = ConfigLoader::new(Some(&path), "TEST_ENV").load().unwrap();

    assert_eq!(config.lookup.reader_threads, 3);
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.routes.len(), 2);
}

/// Test that loading without a file yields the defaults.
#[test]
fn test_load_without_file() {
    let config = ConfigLoader::new(None::<&str>, "TEST_NO_FILE")
        .load()
        .unwrap();
    assert!(config.routes.is_empty());
    assert_eq!(config.log.level, "info");
}

#[test]
fn test_missing_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.temp_dir.path().join("absent.toml");

    let err = ConfigLoader::new(Some(&path), "TEST_MISSING")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(p) if p == path));
}

#[test]
fn test_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.write_file("routes.ini", "[routes]").unwrap();

    let err = ConfigLoader::new(Some(&path), "TEST_EXT")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .write_file("invalid.toml", "[[routes]\npath = \"/\"")
        .unwrap();

    let result = ConfigLoader::new(Some(&path), "TEST_INVALID").load();
    assert!(result.is_err());
}

/// Validation runs on the merged result, so a bad file value is rejected.
#[test]
fn test_load_rejects_invalid_values() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture
        .write_file("zero.toml", "[lookup]\nreader_threads = 0\n")
        .unwrap();

    let err = ConfigLoader::new(Some(&path), "TEST_ZERO")
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ValueOutOfRange { .. }));
}

/// The generated default configuration loads back unchanged.
#[test]
fn test_default_config_toml_round_trip() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&RouterConfig::default()).unwrap();
    let path = fixture.write_file("default.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&path), "TEST_DEFAULT")
        .load()
        .unwrap();
    assert_eq!(
        config.lookup.reader_threads,
        LookupConfig::default().reader_threads
    );
    assert!(config.routes.is_empty());
}
