//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STICKERCRAFT_STORAGE_DIR` - Directory for device-local durable storage
//!   (the persisted cart lives here)
//!
//! ## Optional
//! - `STICKERCRAFT_CART_NAMESPACE` - Storage key for the cart
//!   (default: `sticker-craft-cart`)
//! - `STICKERCRAFT_STUDIO_API_URL` - Base URL of the studio image-processing
//!   service (default: `http://localhost:8000`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::cart::DEFAULT_CART_NAMESPACE;

const DEFAULT_STUDIO_API_URL: &str = "http://localhost:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding device-local durable storage
    pub storage_dir: PathBuf,
    /// Storage key the cart persists under
    pub cart_namespace: String,
    /// Base URL of the studio image-processing service
    pub studio_api_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_dir = PathBuf::from(get_required_env("STICKERCRAFT_STORAGE_DIR")?);
        let cart_namespace =
            get_env_or_default("STICKERCRAFT_CART_NAMESPACE", DEFAULT_CART_NAMESPACE);
        let studio_api_url = get_env_or_default("STICKERCRAFT_STUDIO_API_URL", DEFAULT_STUDIO_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STICKERCRAFT_STUDIO_API_URL".to_string(), e.to_string())
            })?;

        Ok(Self {
            storage_dir,
            cart_namespace,
            studio_api_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(unsafe_code)]
mod tests {
    use super::*;

    // One test covers the whole surface: the variables are process-global,
    // so splitting these cases across parallel test threads would race.
    #[test]
    fn test_from_env() {
        unsafe {
            std::env::remove_var("STICKERCRAFT_STORAGE_DIR");
            std::env::remove_var("STICKERCRAFT_CART_NAMESPACE");
            std::env::remove_var("STICKERCRAFT_STUDIO_API_URL");
        }
        assert!(matches!(
            StorefrontConfig::from_env(),
            Err(ConfigError::MissingEnvVar(var)) if var == "STICKERCRAFT_STORAGE_DIR"
        ));

        unsafe {
            std::env::set_var("STICKERCRAFT_STORAGE_DIR", "/tmp/sticker-craft");
        }
        let config = StorefrontConfig::from_env().unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/sticker-craft"));
        assert_eq!(config.cart_namespace, DEFAULT_CART_NAMESPACE);
        assert_eq!(config.studio_api_url.as_str(), "http://localhost:8000/");

        unsafe {
            std::env::set_var("STICKERCRAFT_STUDIO_API_URL", "not a url");
        }
        assert!(matches!(
            StorefrontConfig::from_env(),
            Err(ConfigError::InvalidEnvVar(var, _)) if var == "STICKERCRAFT_STUDIO_API_URL"
        ));

        unsafe {
            std::env::set_var("STICKERCRAFT_STUDIO_API_URL", "https://studio.example/api/");
            std::env::set_var("STICKERCRAFT_CART_NAMESPACE", "test-cart");
        }
        let config = StorefrontConfig::from_env().unwrap();
        assert_eq!(config.cart_namespace, "test-cart");
        assert_eq!(config.studio_api_url.as_str(), "https://studio.example/api/");

        unsafe {
            std::env::remove_var("STICKERCRAFT_STORAGE_DIR");
            std::env::remove_var("STICKERCRAFT_CART_NAMESPACE");
            std::env::remove_var("STICKERCRAFT_STUDIO_API_URL");
        }
    }
}
