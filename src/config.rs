//! Configuration management for the tour guide service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TourGuideError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the tour guide service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourGuideConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Routing provider settings
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Geocoding and hotel lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the built browser client, served for non-API paths
    #[serde(default)]
    pub static_dir: Option<String>,
    /// JSON file replacing the embedded place catalog
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// Routing provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL of the OSRM server (primary provider)
    #[serde(default = "default_osrm_base_url")]
    pub osrm_base_url: String,
    /// Base URL of OpenRouteService (fallback provider)
    #[serde(default = "default_ors_base_url")]
    pub ors_base_url: String,
    /// OpenRouteService API key; without it the fallback is disabled
    #[serde(default)]
    pub ors_api_key: Option<String>,
}

/// Geocoding and hotel lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_nominatim_base_url")]
    pub nominatim_base_url: String,
    #[serde(default = "default_overpass_base_url")]
    pub overpass_base_url: String,
    /// Search radius around a place for hotel lookups, in meters
    #[serde(default = "default_hotel_radius")]
    pub hotel_radius_m: u32,
    /// Maximum number of retries for transient lookup failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_osrm_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_ors_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_overpass_base_url() -> String {
    "https://overpass-api.de".to_string()
}

fn default_hotel_radius() -> u32 {
    5000
}

fn default_max_retries() -> u32 {
    2
}

fn default_user_agent() -> String {
    format!("TourGuide/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            catalog_path: None,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            osrm_base_url: default_osrm_base_url(),
            ors_base_url: default_ors_base_url(),
            ors_api_key: None,
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            nominatim_base_url: default_nominatim_base_url(),
            overpass_base_url: default_overpass_base_url(),
            hotel_radius_m: default_hotel_radius(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TourGuideConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TOURGUIDE_ROUTING__ORS_API_KEY -> routing.ors_api_key
        builder = builder.add_source(
            Environment::with_prefix("TOURGUIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TourGuideConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tourguide").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.routing.osrm_base_url.is_empty() {
            self.routing.osrm_base_url = default_osrm_base_url();
        }
        if self.routing.ors_base_url.is_empty() {
            self.routing.ors_base_url = default_ors_base_url();
        }
        if self.lookup.nominatim_base_url.is_empty() {
            self.lookup.nominatim_base_url = default_nominatim_base_url();
        }
        if self.lookup.overpass_base_url.is_empty() {
            self.lookup.overpass_base_url = default_overpass_base_url();
        }
        if self.lookup.hotel_radius_m == 0 {
            self.lookup.hotel_radius_m = default_hotel_radius();
        }
        if self.lookup.user_agent.is_empty() {
            self.lookup.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if let Some(api_key) = &self.routing.ors_api_key {
            if api_key.trim().is_empty() {
                return Err(TourGuideError::config(
                    "OpenRouteService API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.lookup.max_retries > 10 {
            return Err(TourGuideError::config("Lookup max retries cannot exceed 10").into());
        }

        if self.lookup.hotel_radius_m > 50_000 {
            return Err(TourGuideError::config(
                "Hotel search radius cannot exceed 50000 meters",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TourGuideError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TourGuideError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Routing OSRM", &self.routing.osrm_base_url),
            ("Routing ORS", &self.routing.ors_base_url),
            ("Nominatim", &self.lookup.nominatim_base_url),
            ("Overpass", &self.lookup.overpass_base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TourGuideError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
