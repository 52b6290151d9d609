//! Server settings read from the environment

use platform::config::{
    CloudinaryConfig, ConfigError, SmtpConfig, env_or, parse_env_or, require_env, require_secret,
};
use secrecy::SecretString;

const DEFAULT_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Everything `main` needs to wire the server
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub jwt_secret: SecretString,
    pub smtp: SmtpConfig,
    pub cloudinary: CloudinaryConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require_env("DATABASE_URL")?,
            database_max_connections: parse_env_or("DATABASE_MAX_CONNECTIONS", 5)?,
            port: parse_env_or("PORT", 5000)?,
            frontend_origins: split_origins(&env_or("FRONTEND_ORIGINS", DEFAULT_ORIGINS)),
            jwt_secret: require_secret("JWT_SECRET")?,
            smtp: SmtpConfig::from_env()?,
            cloudinary: CloudinaryConfig::from_env()?,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_origins("").is_empty());
    }
}
