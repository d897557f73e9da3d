use super::*;

use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn normalizes_api_url() {
    assert_eq!(normalize_api_url(" https://api.savepets.dev/ "), "https://api.savepets.dev");
    assert_eq!(normalize_api_url("localhost:9000"), "http://localhost:9000");
    assert_eq!(normalize_api_url("   "), DEFAULT_API_URL);
}

#[test]
fn missing_file_and_empty_env_yield_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings =
        load_settings_from(&dir.path().join("absent.toml"), env_from(&[])).expect("settings");
    assert_eq!(settings, EnrollmentSettings::default());
    assert_eq!(settings.request_timeout(), Duration::from_secs(30));
}

#[test]
fn file_values_are_overridden_by_environment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("enrollment.toml");
    fs::write(
        &path,
        "api_url = \"https://file.example/\"\nrequest_timeout_secs = 12\nlog_level = \"debug\"\n",
    )
    .expect("write settings");

    let from_file = load_settings_from(&path, env_from(&[])).expect("settings");
    assert_eq!(from_file.api_url, "https://file.example");
    assert_eq!(from_file.request_timeout_secs, 12);
    assert_eq!(from_file.log_level, "debug");

    let overridden = load_settings_from(
        &path,
        env_from(&[
            ("SAVEPETS_API_URL", "https://legacy.example"),
            ("APP__API_URL", "https://env.example/"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
        ]),
    )
    .expect("settings");
    assert_eq!(overridden.api_url, "https://env.example");
    assert_eq!(overridden.request_timeout_secs, 5);
    assert_eq!(overridden.log_level, "debug");
}

#[test]
fn rejects_invalid_timeouts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_settings_from(
        &dir.path().join("absent.toml"),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    )
    .expect_err("invalid timeout");
    assert!(matches!(err, ConfigError::InvalidTimeout(ref raw) if raw == "soon"));

    let path = dir.path().join("enrollment.toml");
    fs::write(&path, "request_timeout_secs = 0\n").expect("write settings");
    assert!(matches!(
        load_settings_from(&path, env_from(&[])),
        Err(ConfigError::InvalidTimeout(_))
    ));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("enrollment.toml");
    fs::write(&path, "api_url = ").expect("write settings");
    assert!(matches!(
        load_settings_from(&path, env_from(&[])),
        Err(ConfigError::Parse { .. })
    ));
}
