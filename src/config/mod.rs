pub mod configs;
pub mod defaults;
pub mod validate;

pub use configs::{
    AppConfig, AuthConfig, DatabaseConfig, ENV_FILE_VAR, GeneralConfig, LoggingConfig,
    StorageConfig,
};
