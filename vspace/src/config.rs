use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use vspace_noise::{BandTable, Easing, OctaveParameters, RenderState};

pub const DEFAULT_CONFIG_PATH: &str = "vspace.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Screen pixels per field pixel along each axis.
    pub pixel_size: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "vspace".to_string(),
            width: 640,
            height: 480,
            pixel_size: 2,
        }
    }
}

/// Startup configuration. Every section is optional in the JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub octaves: OctaveParameters,
    pub easing: Easing,
    pub render: RenderState,
    pub bands: BandTable,
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, Box<dyn Error>> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the parts serde cannot; octaves and bands validate while parsing.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        self.render.validate()?;
        if self.window.pixel_size == 0 {
            return Err("window.pixel_size must be at least 1".into());
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err("window size must be non-zero".into());
        }
        Ok(())
    }
}

/// Field resolution for a surface, never smaller than 1x1.
pub fn field_size(surface: (u32, u32), pixel_size: u32) -> (u32, u32) {
    let pixel_size = pixel_size.max(1);
    (
        (surface.0 / pixel_size).max(1),
        (surface.1 / pixel_size).max(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vspace_noise::ColorMode;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.octaves.count(), 4);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.render.mode, ColorMode::Grayscale);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_json(
            r#"{
                "window": { "title": "noise", "pixel_size": 4 },
                "octaves": { "count": 6 },
                "easing": "quintic",
                "render": { "mode": "banded", "speed": -5.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.window.title, "noise");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.pixel_size, 4);
        assert_eq!(config.octaves.count(), 6);
        assert_eq!(config.octaves.persistence(), 0.5);
        assert_eq!(config.easing, Easing::Quintic);
        assert_eq!(config.render.mode, ColorMode::Banded);
        assert_eq!(config.render.speed, -5.0);
        assert_eq!(config.render.scale, 64.0);
    }

    #[test]
    fn test_rejects_invalid_sections() {
        assert!(Config::from_json(r#"{ "octaves": { "count": 0 } }"#).is_err());
        assert!(Config::from_json(r#"{ "octaves": { "lacunarity": 0.5 } }"#).is_err());
        assert!(Config::from_json(r#"{ "render": { "scale": 0.0 } }"#).is_err());
        assert!(Config::from_json(r#"{ "render": { "scale": 1e6 } }"#).is_err());
        assert!(Config::from_json(r#"{ "window": { "pixel_size": 0 } }"#).is_err());
        assert!(Config::from_json(r#"{ "easing": "cubic" }"#).is_err());
        assert!(Config::from_json(
            r#"{ "bands": { "bands": [ { "upper_bound": 0.6, "color": [0, 0, 0] }, { "upper_bound": 0.2, "color": [0, 0, 0] } ], "ceiling": [1, 1, 1] } }"#
        )
        .is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load(Path::new("/nonexistent/vspace-test-config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_round_trips_through_json() {
        let text = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(Config::from_json(&text).unwrap(), Config::default());
    }

    #[test]
    fn test_field_size() {
        assert_eq!(field_size((640, 480), 2), (320, 240));
        assert_eq!(field_size((641, 481), 2), (320, 240));
        assert_eq!(field_size((640, 480), 1), (640, 480));
        assert_eq!(field_size((1, 1), 8), (1, 1));
        assert_eq!(field_size((100, 100), 0), (100, 100));
    }
}
