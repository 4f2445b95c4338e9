use crate::error::{CanopyError, Result};
use crate::models::map::{DEFAULT_CENTER, DEFAULT_ZOOM, OSM_ATTRIBUTION, OSM_TILE_URL};
use crate::models::{Endpoints, LatLng, MapView, TileLayer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Canopy
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub server_url: ConfigValue<String>,
    pub confidence: ConfigValue<f64>,
    pub map_center: ConfigValue<[f64; 2]>,
    pub map_zoom: ConfigValue<u8>,
    pub tile_url: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            server_url: ConfigValue::new(DEFAULT_SERVER_URL.to_string(), ConfigSource::Default),
            confidence: ConfigValue::new(DEFAULT_CONFIDENCE, ConfigSource::Default),
            map_center: ConfigValue::new(
                [DEFAULT_CENTER.lat, DEFAULT_CENTER.lng],
                ConfigSource::Default,
            ),
            map_zoom: ConfigValue::new(DEFAULT_ZOOM, ConfigSource::Default),
            tile_url: ConfigValue::new(OSM_TILE_URL.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CanopyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CanopyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(server_url) = file_config.server_url {
            self.server_url.update(parse_server_url(&server_url)?, ConfigSource::File);
        }

        if let Some(confidence) = file_config.confidence {
            self.confidence.update(validate_confidence(confidence)?, ConfigSource::File);
        }

        if let Some(center) = file_config.map_center {
            self.map_center.update(validate_center(center)?, ConfigSource::File);
        }

        if let Some(zoom) = file_config.map_zoom {
            self.map_zoom.update(zoom, ConfigSource::File);
        }

        if let Some(tile_url) = file_config.tile_url {
            self.tile_url.update(tile_url, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CANOPY_SERVER_URL
        if let Ok(url) = env::var("CANOPY_SERVER_URL") {
            match parse_server_url(&url) {
                Ok(url) => self.server_url.update(url, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CANOPY_SERVER_URL value '{}': expected http:// or https:// URL",
                    url
                ),
            }
        }

        // CANOPY_CONFIDENCE
        if let Ok(conf_str) = env::var("CANOPY_CONFIDENCE") {
            match parse_confidence(&conf_str) {
                Ok(conf) => self.confidence.update(conf, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CANOPY_CONFIDENCE value '{}': expected a number between 0 and 1",
                    conf_str
                ),
            }
        }

        // CANOPY_MAP_ZOOM
        if let Ok(zoom_str) = env::var("CANOPY_MAP_ZOOM") {
            match zoom_str.parse::<u8>() {
                Ok(zoom) => self.map_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CANOPY_MAP_ZOOM value '{}': expected integer zoom level",
                    zoom_str
                ),
            }
        }

        // CANOPY_TILE_URL
        if let Ok(tile_url) = env::var("CANOPY_TILE_URL") {
            self.tile_url.update(tile_url, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(server_url) = overrides.server_url {
            self.server_url.update(server_url, ConfigSource::Cli);
        }

        if let Some(confidence) = overrides.confidence {
            self.confidence.update(confidence, ConfigSource::Cli);
        }
    }

    /// Backend routes for the configured server
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.server_url.value.clone())
    }

    /// Initial map viewport
    pub fn map_view(&self) -> MapView {
        let [lat, lng] = self.map_center.value;
        MapView {
            center: LatLng::new(lat, lng),
            zoom: self.map_zoom.value,
        }
    }

    /// Base tile layer
    pub fn tile_layer(&self) -> TileLayer {
        TileLayer {
            url_template: self.tile_url.value.clone(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "server_url".to_string(),
            (self.server_url.value.clone(), self.server_url.source),
        );

        map.insert(
            "confidence".to_string(),
            (self.confidence.value.to_string(), self.confidence.source),
        );

        let [lat, lng] = self.map_center.value;
        map.insert(
            "map_center".to_string(),
            (format!("{}, {}", lat, lng), self.map_center.source),
        );

        map.insert(
            "map_zoom".to_string(),
            (self.map_zoom.value.to_string(), self.map_zoom.source),
        );

        map.insert("tile_url".to_string(), (self.tile_url.value.clone(), self.tile_url.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    server_url: Option<String>,
    confidence: Option<f64>,
    map_center: Option<[f64; 2]>,
    map_zoom: Option<u8>,
    tile_url: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub server_url: Option<String>,
    pub confidence: Option<f64>,
}

/// Parse a confidence threshold from string
pub fn parse_confidence(s: &str) -> Result<f64> {
    let value = s.trim().parse::<f64>().map_err(|_| CanopyError::ConfigInvalid {
        key: "confidence".to_string(),
        reason: format!("Invalid confidence: {}. Use a number between 0 and 1", s),
    })?;
    validate_confidence(value)
}

fn validate_confidence(value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CanopyError::ConfigInvalid {
            key: "confidence".to_string(),
            reason: format!("Confidence {} is outside 0..1", value),
        })
    }
}

fn validate_center(center: [f64; 2]) -> Result<[f64; 2]> {
    let [lat, lng] = center;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Ok(center)
    } else {
        Err(CanopyError::ConfigInvalid {
            key: "map_center".to_string(),
            reason: format!("Center [{}, {}] is not a valid latitude/longitude", lat, lng),
        })
    }
}

/// Parse a backend base URL from string
pub fn parse_server_url(s: &str) -> Result<String> {
    let trimmed = s.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(CanopyError::ConfigInvalid {
            key: "server_url".to_string(),
            reason: format!("Invalid server URL: {}. Use an http:// or https:// URL", s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.server_url.value, DEFAULT_SERVER_URL);
        assert_eq!(config.server_url.source, ConfigSource::Default);
        assert_eq!(config.confidence.value, 0.5);
        assert_eq!(config.map_center.value, [51.505, -0.09]);
        assert_eq!(config.map_zoom.value, 13);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server_url = "http://detector.local:8080/"
confidence = 0.35
map_center = [-8.5069, 115.2625]
map_zoom = 16
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.server_url.value, "http://detector.local:8080");
        assert_eq!(config.server_url.source, ConfigSource::File);
        assert_eq!(config.confidence.value, 0.35);
        assert_eq!(config.map_center.value, [-8.5069, 115.2625]);
        assert_eq!(config.map_zoom.value, 16);
        assert_eq!(config.tile_url.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_with_out_of_range_confidence_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "confidence = 1.5").unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(CanopyError::ConfigInvalid { key, .. }) if key == "confidence"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        config.update_from_cli(CliConfigOverrides {
            server_url: Some("https://trees.example.org".to_string()),
            confidence: None,
        });

        assert_eq!(config.server_url.value, "https://trees.example.org");
        assert_eq!(config.server_url.source, ConfigSource::Cli);
        assert_eq!(config.confidence.source, ConfigSource::Default);
        assert_eq!(config.endpoints().base(), "https://trees.example.org");
    }

    #[test]
    fn test_parse_confidence() {
        assert_eq!(parse_confidence("0.42").unwrap(), 0.42);
        assert_eq!(parse_confidence(" 1 ").unwrap(), 1.0);
        assert!(parse_confidence("1.01").is_err());
        assert!(parse_confidence("-0.1").is_err());
        assert!(parse_confidence("high").is_err());
    }

    #[test]
    fn test_parse_server_url() {
        assert_eq!(parse_server_url("http://localhost:5000/").unwrap(), "http://localhost:5000");
        assert!(parse_server_url("localhost:5000").is_err());
    }

    #[test]
    fn test_map_view_from_config() {
        let config = LayeredConfig::with_defaults();
        let view = config.map_view();
        assert_eq!(view.center, LatLng::new(51.505, -0.09));
        assert_eq!(view.zoom, 13);
        assert_eq!(config.tile_layer().attribution, "© OpenStreetMap contributors");
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("server_url"));
        assert!(map.contains_key("confidence"));
        assert!(map.contains_key("map_center"));
        assert!(map.contains_key("map_zoom"));
        assert!(map.contains_key("tile_url"));

        let (conf_value, conf_source) = &map["confidence"];
        assert_eq!(conf_value, "0.5");
        assert_eq!(*conf_source, ConfigSource::Default);
    }
}
