use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::audit::AuditConfig;
use crate::config::config_spec::ConfigSpec;
use crate::config::errors::ApplicationError;
use crate::config::EnvironmentProvider;

/// Process settings: database, HTTP listener and audit recorder tuning
pub struct Settings {
    database_url: String,
    server_host: String,
    server_port: u16,
    audit_buffer_size: usize,
    audit_worker_count: usize,
    audit_shutdown_timeout: Duration,
}

impl Settings {
    /// Load settings from the given environment provider using ConfigSpec
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ApplicationError> {
        let database_url_spec = ConfigSpec::new(env_provider.clone())
            .env_override("DATABASE_URL")
            .default_value("sqlite://audit.db?mode=rwc")
            .min_length(1);

        let host_spec = ConfigSpec::new(env_provider.clone())
            .env_override("HOST")
            .default_value("0.0.0.0")
            .validator(ConfigSpec::validate_host_address);

        let port_spec = ConfigSpec::new(env_provider.clone())
            .env_override("PORT")
            .default_value("3000")
            .validator(|value| ConfigSpec::validate_port_range(value, 1, 65535));

        // Zero is accepted here; AuditConfig substitutes the defaults
        let buffer_size_spec = ConfigSpec::new(env_provider.clone())
            .env_override("AUDIT_BUFFER_SIZE")
            .default_value("1000");

        let worker_count_spec = ConfigSpec::new(env_provider.clone())
            .env_override("AUDIT_WORKER_COUNT")
            .default_value("3");

        let shutdown_timeout_spec = ConfigSpec::new(env_provider)
            .env_override("AUDIT_SHUTDOWN_TIMEOUT")
            .default_value("10s");

        let database_url = database_url_spec.load_setting_with_source()?.value;
        let server_host = host_spec.load_setting_with_source()?.value;

        let port_value = port_spec.load_setting_with_source()?.value;
        let server_port = ConfigSpec::parse_port(&port_value, "PORT")?;

        let buffer_value = buffer_size_spec.load_setting_with_source()?.value;
        let audit_buffer_size = ConfigSpec::parse_count(&buffer_value, "AUDIT_BUFFER_SIZE")?;

        let worker_value = worker_count_spec.load_setting_with_source()?.value;
        let audit_worker_count = ConfigSpec::parse_count(&worker_value, "AUDIT_WORKER_COUNT")?;

        let timeout_value = shutdown_timeout_spec.load_setting_with_source()?.value;
        let audit_shutdown_timeout =
            ConfigSpec::parse_duration_human(&timeout_value, "AUDIT_SHUTDOWN_TIMEOUT")?;

        Ok(Self {
            database_url,
            server_host,
            server_port,
            audit_buffer_size,
            audit_worker_count,
            audit_shutdown_timeout,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ApplicationError> {
        use crate::config::SystemEnvironment;
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn audit_config(&self) -> AuditConfig {
        AuditConfig::new(self.audit_buffer_size, self.audit_worker_count).normalized()
    }

    pub fn audit_shutdown_timeout(&self) -> Duration {
        self.audit_shutdown_timeout
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("audit_buffer_size", &self.audit_buffer_size)
            .field("audit_worker_count", &self.audit_worker_count)
            .field("audit_shutdown_timeout", &self.audit_shutdown_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    fn settings_with(vars: &[(&str, &str)]) -> Result<Settings, ApplicationError> {
        Settings::from_env_provider(Arc::new(MockEnvironment::empty().with_vars(vars)))
    }

    #[test]
    fn test_settings_with_defaults() {
        let settings = settings_with(&[]).unwrap();

        assert_eq!(settings.database_url(), "sqlite://audit.db?mode=rwc");
        assert_eq!(settings.server_address(), "0.0.0.0:3000");
        assert_eq!(settings.audit_config().buffer_size, 1000);
        assert_eq!(settings.audit_config().worker_count, 3);
        assert_eq!(settings.audit_shutdown_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_settings_from_env_vars() {
        let settings = settings_with(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("AUDIT_BUFFER_SIZE", "16"),
            ("AUDIT_WORKER_COUNT", "2"),
            ("AUDIT_SHUTDOWN_TIMEOUT", "500ms"),
        ])
        .unwrap();

        assert_eq!(settings.database_url(), "sqlite::memory:");
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.audit_config().buffer_size, 16);
        assert_eq!(settings.audit_config().worker_count, 2);
        assert_eq!(settings.audit_shutdown_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_zero_audit_sizes_fall_back_to_defaults() {
        let settings = settings_with(&[
            ("AUDIT_BUFFER_SIZE", "0"),
            ("AUDIT_WORKER_COUNT", "0"),
        ])
        .unwrap();

        let config = settings.audit_config();
        assert_eq!(config.buffer_size, 1000);
        assert_eq!(config.worker_count, 3);
    }

    #[test]
    fn test_empty_database_url_fails_validation() {
        match settings_with(&[("DATABASE_URL", "")]).unwrap_err() {
            ApplicationError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "DATABASE_URL");
                assert!(reason.contains("must be at least 1 characters long"));
            }
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_worker_count_fails_parse() {
        let result = settings_with(&[("AUDIT_WORKER_COUNT", "many")]);
        assert!(matches!(result, Err(ApplicationError::ParseError { .. })));
    }

    #[test]
    fn test_invalid_shutdown_timeout_fails_parse() {
        let result = settings_with(&[("AUDIT_SHUTDOWN_TIMEOUT", "10 fortnights")]);
        assert!(matches!(result, Err(ApplicationError::ParseError { .. })));
    }
}
