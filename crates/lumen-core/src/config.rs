//! Configuration module
//!
//! Env-driven configuration for the API: server, directories, upload limits,
//! and the file retention window.

use std::env;

// Default limits
const MAX_FILE_SIZE_MB: usize = 16;
const MAX_IMAGE_DIMENSION: u32 = 10_000;
const RETENTION_SECS: u64 = 3600;
const JPEG_QUALITY: u8 = 95;
const SERVER_PORT: u16 = 4000;

/// Application configuration.
///
/// Built once at startup from the environment and passed into the
/// orchestrator; nothing reads process-wide globals after that.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub upload_dir: String,
    pub processed_dir: String,
    pub max_file_size_bytes: usize,
    pub max_image_dimension: u32,
    pub retention_secs: u64,
    pub jpeg_quality: u8,
    pub allowed_extensions: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| "png,jpg,jpeg,gif,bmp,tiff,webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            processed_dir: env::var("PROCESSED_DIR").unwrap_or_else(|_| "processed".to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_image_dimension: env::var("MAX_IMAGE_DIMENSION")
                .unwrap_or_else(|_| MAX_IMAGE_DIMENSION.to_string())
                .parse()
                .unwrap_or(MAX_IMAGE_DIMENSION),
            retention_secs: env::var("RETENTION_SECS")
                .unwrap_or_else(|_| RETENTION_SECS.to_string())
                .parse()
                .unwrap_or(RETENTION_SECS),
            jpeg_quality: env::var("JPEG_QUALITY")
                .unwrap_or_else(|_| JPEG_QUALITY.to_string())
                .parse()
                .unwrap_or(JPEG_QUALITY),
            allowed_extensions,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.max_file_size_bytes / 1024 / 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            upload_dir: "uploads".to_string(),
            processed_dir: "processed".to_string(),
            max_file_size_bytes: MAX_FILE_SIZE_MB * 1024 * 1024,
            max_image_dimension: MAX_IMAGE_DIMENSION,
            retention_secs: RETENTION_SECS,
            jpeg_quality: JPEG_QUALITY,
            allowed_extensions: ["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_limits() {
        let config = Config::default();
        assert_eq!(config.max_file_size_bytes, 16 * 1024 * 1024);
        assert_eq!(config.max_file_size_mb(), 16);
        assert_eq!(config.max_image_dimension, 10_000);
        assert_eq!(config.retention_secs, 3600);
        assert_eq!(config.jpeg_quality, 95);
        assert!(!config.is_production());
    }

    #[test]
    fn test_default_allowed_extensions() {
        let config = Config::default();
        for ext in ["png", "jpg", "jpeg", "gif", "bmp", "tiff", "webp"] {
            assert!(config.allowed_extensions.iter().any(|e| e == ext));
        }
        assert!(!config.allowed_extensions.iter().any(|e| e == "txt"));
    }
}
