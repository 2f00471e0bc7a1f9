use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_expiry_secs: i64,
    pub host: IpAddr,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let token_expiry_secs: i64 = env_or("DOCVERIFY_TOKEN_EXPIRY", "7200")
            .parse()
            .map_err(|e| format!("Invalid DOCVERIFY_TOKEN_EXPIRY: {e}"))?;

        let host: IpAddr = env_or("DOCVERIFY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid DOCVERIFY_HOST: {e}"))?;

        let port: u16 = env_or("DOCVERIFY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid DOCVERIFY_PORT: {e}"))?;

        let upload_dir = PathBuf::from(env_or("DOCVERIFY_UPLOAD_DIR", "uploads"));

        let max_upload_size: usize = env_or("DOCVERIFY_MAX_UPLOAD_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid DOCVERIFY_MAX_UPLOAD_SIZE: {e}"))?;

        let log_level = env_or("DOCVERIFY_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            token_expiry_secs,
            host,
            port,
            upload_dir,
            max_upload_size,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
