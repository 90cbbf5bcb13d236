pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;
pub const DEFAULT_ACCESS_TTL_SECS: usize = 60 * 60;
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "/uploads";
pub const DEFAULT_MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
