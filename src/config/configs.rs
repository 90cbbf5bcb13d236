use std::{collections::HashMap, path::PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{defaults, validate};

const ENV_PREFIX: &str = "APP";
/// Points at an alternative dotenv file. Unset means `.env` in the working directory.
pub const ENV_FILE_VAR: &str = "APP_ENV_FILE";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: Option<DatabaseConfig>,
    pub auth: Option<AuthConfig>,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Reads `APP_*` variables, e.g. `APP_DATABASE__URL` for `database.url`.
    pub fn from_env() -> Result<Self> {
        load_dotenv()?;
        Self::from_source(None)
    }

    /// Same parsing as [`AppConfig::from_env`] over an explicit variable set.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let env = config_rs::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars);
        let cfg: Self = config_rs::Config::builder()
            .add_source(env)
            .build()
            .context("failed to read environment variables for config")?
            .try_deserialize()
            .context("failed to deserialize environment into config")?;

        validate::validate(&cfg)?;
        Ok(cfg)
    }
}

/// An explicitly named file must exist; the implicit `.env` is optional.
fn load_dotenv() -> Result<()> {
    match std::env::var_os(ENV_FILE_VAR) {
        Some(path) => {
            dotenvy::from_path(&path)
                .with_context(|| format!("failed to load {}", PathBuf::from(&path).display()))?;
        }
        None => match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err).context("failed to load .env"),
        },
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_db_min_idle")]
    pub min_idle: u32,
}

/// Token signing plus the admin account seeded at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_access_ttl_secs")]
    pub access_ttl_secs: usize,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    #[serde(default = "default_admin_name")]
    pub admin_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub max_photo_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(defaults::DEFAULT_UPLOAD_DIR),
            public_base_url: defaults::DEFAULT_PUBLIC_BASE_URL.to_string(),
            max_photo_bytes: defaults::DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

fn default_db_max_connections() -> u32 {
    defaults::DEFAULT_DB_MAX_CONNECTIONS
}

fn default_db_min_idle() -> u32 {
    defaults::DEFAULT_DB_MIN_IDLE
}

fn default_access_ttl_secs() -> usize {
    defaults::DEFAULT_ACCESS_TTL_SECS
}

fn default_admin_name() -> String {
    defaults::DEFAULT_ADMIN_NAME.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::AppConfig;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = AppConfig::from_vars(HashMap::new()).expect("defaults should load");
        assert_eq!(cfg.general.port, 3000);
        assert!(cfg.database.is_none());
        assert!(cfg.auth.is_none());
    }

    #[test]
    fn nested_sections_use_double_underscore() {
        let cfg = AppConfig::from_vars(vars(&[
            ("APP_GENERAL__PORT", "8080"),
            ("APP_DATABASE__URL", "postgres://localhost/bikes"),
            ("APP_DATABASE__MAX_CONNECTIONS", "4"),
            ("APP_DATABASE__MIN_IDLE", "1"),
            ("APP_STORAGE__MAX_PHOTO_BYTES", "2048"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.general.port, 8080);
        let database = cfg.database.expect("database section");
        assert_eq!(database.url, "postgres://localhost/bikes");
        assert_eq!(database.max_connections, 4);
        assert_eq!(cfg.storage.max_photo_bytes, 2048);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = AppConfig::from_vars(vars(&[
            ("APP_DATABASE__URL", "postgres://localhost/bikes"),
            ("APP_DATABASE__MAX_CONNECTIONS", "1"),
            ("APP_DATABASE__MIN_IDLE", "5"),
        ]))
        .expect_err("min_idle above max should fail");
        assert!(err.to_string().contains("database.min_idle"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        AppConfig::from_vars(vars(&[("APP_GENERAL__HOSTNAME", "x")]))
            .expect_err("typo should not be ignored");
    }
}
