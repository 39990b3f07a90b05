use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::algorithms::layout::{DemoLayoutParams, SceneLayoutEngine};
use crate::algorithms::projection::ProjectionOptions;
use crate::core::{GeoPoint, DEFAULT_DISPLAY_RADIUS_M};
use crate::validation::{PlacementError, PositionValidator};

/// Placement configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Live-mode projection settings
    #[serde(default)]
    pub projection: ProjectionOptions,
    /// Demo-mode spiral settings
    #[serde(default)]
    pub demo: DemoLayoutParams,
    /// Interaction radius for records that carry none (meters)
    #[serde(default = "default_display_radius")]
    pub default_display_radius_m: f64,
    /// Static location the application may substitute when geolocation fails
    #[serde(default)]
    pub fallback_location: Option<GeoPoint>,
    /// Enable debug logging
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_display_radius() -> f64 {
    DEFAULT_DISPLAY_RADIUS_M
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionOptions::default(),
            demo: DemoLayoutParams::default(),
            default_display_radius_m: DEFAULT_DISPLAY_RADIUS_M,
            fallback_location: None,
            debug_logging: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid parameter value
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },
    /// Configuration file I/O error
    #[error("I/O error: {message}")]
    Io { message: String },
    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ConfigError {
    fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Configuration validation result
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Whether configuration is valid
    pub is_valid: bool,
    /// Validation errors
    pub errors: Vec<ConfigError>,
    /// Validation warnings
    pub warnings: Vec<String>,
}

/// Main configuration manager
pub struct ConfigurationManager {
    config: LayoutConfig,
    /// Configuration file path
    config_file_path: Option<String>,
    /// Whether configuration has been modified
    is_modified: bool,
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationManager {
    /// Create a new configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Update configuration with validation
    pub fn update_config(&mut self, config: LayoutConfig) -> Result<(), ConfigError> {
        Self::first_error(self.validate_config(&config))?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Build a layout engine from the current settings
    pub fn build_engine(&self) -> Result<SceneLayoutEngine, ConfigError> {
        SceneLayoutEngine::new(self.config.projection, self.config.demo).map_err(|e| match e {
            PlacementError::InvalidOptions { parameter, value, reason } => {
                ConfigError::InvalidParameter { parameter, value, reason }
            }
            other => ConfigError::InvalidParameter {
                parameter: "layout".to_string(),
                value: String::new(),
                reason: other.to_string(),
            },
        })
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let config: LayoutConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })?;

        // Validate before applying
        Self::first_error(self.validate_config(&config))?;

        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Serialization {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::Io {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::Io {
                message: "No file path set for saving configuration".to_string(),
            }),
        }
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    // Runtime parameter adjustment, each returns the previous value

    pub fn set_max_scene_distance(&mut self, max_scene_distance: f64) -> Result<f64, ConfigError> {
        if !max_scene_distance.is_finite() || max_scene_distance < 0.0 {
            return Err(ConfigError::invalid(
                "max_scene_distance",
                max_scene_distance,
                "Scene distance ceiling must be finite and non-negative",
            ));
        }

        let old_value = self.config.projection.max_scene_distance;
        self.config.projection.max_scene_distance = max_scene_distance;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_distance_divisor(&mut self, distance_divisor: f64) -> Result<f64, ConfigError> {
        if !distance_divisor.is_finite() || distance_divisor <= 0.0 {
            return Err(ConfigError::invalid(
                "distance_divisor",
                distance_divisor,
                "Distance divisor must be finite and positive",
            ));
        }

        let old_value = self.config.projection.distance_divisor;
        self.config.projection.distance_divisor = distance_divisor;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_eye_height(&mut self, eye_height_m: f64) -> Result<f64, ConfigError> {
        if !eye_height_m.is_finite() {
            return Err(ConfigError::invalid("eye_height_m", eye_height_m, "Eye height must be finite"));
        }

        let old_value = self.config.projection.eye_height_m;
        self.config.projection.eye_height_m = eye_height_m;
        self.is_modified = true;
        Ok(old_value)
    }

    /// Validate a configuration without applying it
    pub fn validate_config(&self, config: &LayoutConfig) -> ValidationResult {
        let mut result = ValidationResult {
            is_valid: true,
            ..Default::default()
        };

        if let Err(e) = config.projection.validate() {
            result.errors.push(ConfigError::invalid("projection", format!("{:?}", config.projection), &e.to_string()));
        }

        let demo = &config.demo;
        if let Err(e) = demo.validate() {
            result.errors.push(ConfigError::invalid("demo", format!("{:?}", demo), &e.to_string()));
        }

        if demo.base_radius <= 0.0 {
            result.warnings.push("Demo base radius places the first target on the viewer".to_string());
        }

        if demo.angle_step_deg.rem_euclid(360.0) == 0.0 {
            result
                .warnings
                .push("Demo angle step stacks every target on the same bearing".to_string());
        }

        if !config.default_display_radius_m.is_finite() || config.default_display_radius_m < 0.0 {
            result.errors.push(ConfigError::invalid(
                "default_display_radius_m",
                config.default_display_radius_m,
                "Display radius must be finite and non-negative",
            ));
        }

        if let Some(fallback) = &config.fallback_location {
            if let Err(reason) = PositionValidator::check_point(fallback) {
                result.errors.push(ConfigError::invalid(
                    "fallback_location",
                    format!("{}, {}", fallback.latitude_deg, fallback.longitude_deg),
                    reason,
                ));
            }
        }

        result.is_valid = result.errors.is_empty();
        result
    }

    fn first_error(validation: ValidationResult) -> Result<(), ConfigError> {
        match validation.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
