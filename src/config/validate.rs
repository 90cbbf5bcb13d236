use anyhow::{Result, bail};

use super::AppConfig;
use crate::validation::is_valid_email;

const MIN_ADMIN_PASSWORD_LEN: usize = 8;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if let Some(auth) = cfg.auth.as_ref() {
        if auth.jwt_secret.trim().is_empty() {
            errors.push("auth.jwt_secret must not be empty".to_string());
        }

        if auth.access_ttl_secs == 0 {
            errors.push("auth.access_ttl_secs must be > 0".to_string());
        }

        if auth.admin_username.trim().len() < 3 {
            errors.push("auth.admin_username must be at least 3 characters".to_string());
        }

        if auth.admin_password.len() < MIN_ADMIN_PASSWORD_LEN {
            errors.push(format!(
                "auth.admin_password must be at least {MIN_ADMIN_PASSWORD_LEN} characters"
            ));
        }

        if !is_valid_email(&auth.admin_email) {
            errors.push("auth.admin_email must be a valid email".to_string());
        }
    }

    if cfg.storage.max_photo_bytes == 0 {
        errors.push("storage.max_photo_bytes must be > 0".to_string());
    }

    if cfg.storage.upload_dir.as_os_str().is_empty() {
        errors.push("storage.upload_dir must not be empty".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, AuthConfig, DatabaseConfig};

    fn auth() -> AuthConfig {
        AuthConfig {
            jwt_secret: "secret".to_string(),
            access_ttl_secs: 3600,
            admin_username: "admin".to_string(),
            admin_password: "adminpassword".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_name: "Administrator".to_string(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.database = Some(DatabaseConfig {
            url: " ".to_string(),
            max_connections: 1,
            min_idle: 4,
        });
        cfg.auth = Some(AuthConfig {
            admin_password: "short".to_string(),
            admin_email: "not-an-email".to_string(),
            ..auth()
        });

        let message = validate(&cfg).expect_err("config should fail").to_string();
        assert!(message.contains("database.url"));
        assert!(message.contains("database.min_idle"));
        assert!(message.contains("auth.admin_password"));
        assert!(message.contains("auth.admin_email"));
    }

    #[test]
    fn accepts_complete_auth_section() {
        let mut cfg = AppConfig::default();
        cfg.auth = Some(auth());
        validate(&cfg).expect("auth config should validate");
    }
}
