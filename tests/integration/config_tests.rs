//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use o2ims_gateway::config::{Config, LogFormat};
    use o2ims_gateway::utils::error::GatewayError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_full_file() {
        let file = write_config(
            r#"
server:
  host: 127.0.0.1
  port: 9090
  workers: 4
  timeout: 12
  max_body_size: 2097152
logging:
  level: debug
  format: json
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().address(), "127.0.0.1:9090");
        assert_eq!(config.server().worker_count(), 4);
        assert_eq!(config.server().request_timeout().as_secs(), 12);
        assert_eq!(config.server().max_body_size, 2_097_152);
        assert_eq!(config.logging().level, "debug");
        assert_eq!(config.logging().format, LogFormat::Json);
    }

    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let file = write_config("server:\n  port: 8443\n");
        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().port, 8443);
        assert_eq!(config.server().host, "0.0.0.0");
        assert_eq!(config.server().timeout, 30);
        assert_eq!(config.logging().format, LogFormat::Text);
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let file = write_config("server:\n  timeout: 0\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().contains("Timeout"));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("server: [not, a, map");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.yaml")).await.unwrap();
        assert_eq!(config.server().max_body_size, 1024 * 1024);
    }

    #[tokio::test]
    async fn test_yaml_round_trip() {
        let file = write_config("logging:\n  level: warn\n");
        let config = Config::from_file(file.path()).await.unwrap();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("level: warn"));
    }
}
