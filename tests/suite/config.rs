//! Config file loading and settings resolution.

use std::time::Duration;

use tempfile::tempdir;

use reel_engine::{ConfigError, FormSettings, ReelConfig};

#[test]
fn config_file_drives_settings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[app]
high_contrast = true
reduced_motion = true

[endpoint]
url = "https://contact.example.test/submit"
timeout_secs = 12
"#,
    )
    .unwrap();

    let config = ReelConfig::load_from(&path).unwrap();
    assert!(config.is_some());
    let config = config.unwrap();
    let endpoint = config.endpoint.as_ref().unwrap();
    assert_eq!(endpoint.timeout_secs, Some(12));

    let app = config.app.as_ref().unwrap();
    assert!(app.high_contrast);
    assert!(app.reduced_motion);
    assert!(!app.ascii_only);
}

#[test]
fn unreadable_config_reports_its_path() {
    let dir = tempdir().unwrap();
    // A directory cannot be read as a file.
    let err = ReelConfig::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert_eq!(err.path(), &dir.path().to_path_buf());
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn explicit_endpoint_uses_default_timeout() {
    let settings = FormSettings::for_endpoint("http://127.0.0.1:8080/api/contact-us/").unwrap();
    assert_eq!(settings.timeout, Duration::from_secs(30));
    assert_eq!(settings.endpoint.port(), Some(8080));
}
