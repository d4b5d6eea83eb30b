use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: parse_max_upload_bytes(std::env::var("MAX_UPLOAD_BYTES").ok())?,
            cors_allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
        })
    }

    /// Database URL with the credentials part stripped, for logging
    pub fn database_host(&self) -> &str {
        self.database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    }
}

fn parse_max_upload_bytes(raw: Option<String>) -> Result<usize> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_UPLOAD_BYTES),
        Some(value) => value
            .parse()
            .with_context(|| format!("MAX_UPLOAD_BYTES must be a number, got {:?}", value)),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins(" http://a.test, ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_max_upload_bytes_default_and_override() {
        assert_eq!(parse_max_upload_bytes(None).unwrap(), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(parse_max_upload_bytes(Some(" ".into())).unwrap(), DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(parse_max_upload_bytes(Some("1024".into())).unwrap(), 1024);
        assert!(parse_max_upload_bytes(Some("lots".into())).is_err());
    }

    #[test]
    fn test_database_host_hides_credentials() {
        let config = Config {
            host: "0.0.0.0".into(),
            port: 8000,
            database_url: "postgres://judge:secret@db:5432/judging".into(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_allowed_origins: Vec::new(),
        };
        assert_eq!(config.database_host(), "db:5432/judging");
    }
}
