//! Settings tests

use std::time::Duration;

use rundeploy::deploy::PolicyFailureMode;
use rundeploy::errors::DeployError;
use rundeploy::logs::LogLevel;
use rundeploy::settings::Settings;

async fn load_str(body: &str) -> Result<Settings, DeployError> {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rundeploy.json");
    std::fs::write(&path, body).unwrap();
    Settings::load(Some(&path)).await
}

#[tokio::test]
async fn test_defaults_without_file() {
    let settings = Settings::load(None).await.unwrap();

    assert_eq!(settings, Settings::default());
    assert!(settings.api.endpoint.is_none());
    assert_eq!(settings.operation.poll_interval(), Duration::from_secs(2));
    assert_eq!(settings.policy_failure, PolicyFailureMode::KeepService);
    assert_eq!(settings.log_level, LogLevel::Info);
}

#[tokio::test]
async fn test_poll_interval_secs_is_read() {
    let settings = load_str(r#"{ "operation": { "poll_interval_secs": 5 } }"#)
        .await
        .unwrap();

    assert_eq!(settings.operation.poll_interval(), Duration::from_secs(5));
}

#[tokio::test]
async fn test_partial_file_keeps_defaults() {
    let settings = load_str(
        r#"{
            "log_level": "debug",
            "api": { "endpoint": "https://us-central1-run.googleapis.com" },
            "policy_failure": "delete_service"
        }"#,
    )
    .await
    .unwrap();

    assert_eq!(settings.log_level, LogLevel::Debug);
    assert_eq!(
        settings.api.endpoint.as_deref(),
        Some("https://us-central1-run.googleapis.com")
    );
    assert_eq!(settings.operation.poll_interval(), Duration::from_secs(2));
    assert_eq!(settings.policy_failure, PolicyFailureMode::DeleteService);
    assert!(!settings.json_logs);
}

#[tokio::test]
async fn test_unknown_keys_rejected() {
    for body in [
        r#"{ "operation": { "poll_interval_ms": 250 } }"#,
        r#"{ "api": { "base_url": "https://run.googleapis.com" } }"#,
        r#"{ "policy": "delete_service" }"#,
    ] {
        let result = load_str(body).await;
        assert!(
            matches!(result, Err(DeployError::ConfigError(_))),
            "{body} -> {result:?}"
        );
    }
}

#[tokio::test]
async fn test_invalid_values_rejected() {
    for body in [
        r#"{ "api": { "endpoint": "not a url" } }"#,
        r#"{ "api": { "endpoint": "ftp://run.googleapis.com" } }"#,
        r#"{ "operation": { "poll_interval_secs": 0 } }"#,
        r#"{ "log_level": "loud" }"#,
    ] {
        let result = load_str(body).await;
        assert!(
            matches!(result, Err(DeployError::ConfigError(_))),
            "{body} -> {result:?}"
        );
    }
}

#[tokio::test]
async fn test_missing_file_is_config_error() {
    let result = Settings::load(Some(std::path::Path::new("/nonexistent/rundeploy.json"))).await;
    assert!(matches!(result, Err(DeployError::ConfigError(_))));
}
