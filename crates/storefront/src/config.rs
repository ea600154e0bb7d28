//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TINDAHAN_BACKEND_URL` - Base URL of the hosted document store
//! - `TINDAHAN_PROJECT_ID` - Backend project identifier
//! - `TINDAHAN_API_KEY` - Backend API key (static service credential)
//!
//! ## Optional
//! - `TINDAHAN_CACHE_TTL_SECS` - Product cache TTL (default: 300)

use secrecy::SecretString;
use thiserror::Error;

/// Minimum plausible API key length; anything shorter is a typo or a stub.
const MIN_API_KEY_LENGTH: usize = 16;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Hosted document store configuration.
    pub backend: BackendConfig,
}

/// Hosted document store configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the hosted store (e.g. `https://store-api.example.com`).
    pub base_url: String,
    /// Backend project identifier.
    pub project_id: String,
    /// Static API key sent with every request.
    pub api_key: SecretString,
    /// Product cache time-to-live in seconds.
    pub cache_ttl_secs: u64,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("api_key", &"[REDACTED]")
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the API key fails placeholder/length validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            backend: BackendConfig::from_env()?,
        })
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("TINDAHAN_BACKEND_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("TINDAHAN_BACKEND_URL".to_owned(), e.to_string())
        })?;

        let cache_ttl_secs = get_env_or_default("TINDAHAN_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TINDAHAN_CACHE_TTL_SECS".to_owned(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            project_id: get_required_env("TINDAHAN_PROJECT_ID")?,
            api_key: get_validated_secret("TINDAHAN_API_KEY")?,
            cache_ttl_secs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate that a secret is long enough and not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_API_KEY_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "must be at least {MIN_API_KEY_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_owned(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_placeholder() {
        let result = validate_secret_strength("your-api-key-here-please", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_too_short() {
        let result = validate_secret_strength("tk_short", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_valid() {
        assert!(validate_secret_strength("tk_9f2m3x8q1z7w4v5b6n0c", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_backend_config_debug_redacts_api_key() {
        let config = BackendConfig {
            base_url: "https://store-api.example.com".to_owned(),
            project_id: "tindahan-prod".to_owned(),
            api_key: SecretString::from("super_secret_api_key_value"),
            cache_ttl_secs: 300,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("tindahan-prod"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key_value"));
    }
}
