use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::{constants::Tolerances, error::Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples: usize,
    pub depth: u32,
    pub tile_size: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            width: 512,
            height: 512,
            samples: 4,
            depth: 4,
            tile_size: 16,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TexturePaths {
    pub floor: Option<PathBuf>,
    pub environment: Option<PathBuf>,
}

/// Everything read from the optional TOML config file. Missing sections
/// take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tolerances: Tolerances,
    pub render: RenderSettings,
    pub textures: TexturePaths,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        config.tolerances.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Config::from_toml_str(&source)?;
        info!("Loaded config \"{}\"", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TracerError;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn sections_override_fields() {
        let config = Config::from_toml_str(
            r#"
            [tolerances]
            epsilon = 0.005
            max_dist = 50.0

            [render]
            width = 320
            samples = 16

            [textures]
            floor = "floor.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.tolerances.epsilon, 0.005);
        assert_eq!(config.tolerances.max_dist, 50.0);
        assert_eq!(config.render.width, 320);
        assert_eq!(config.render.height, 512);
        assert_eq!(config.render.samples, 16);
        assert_eq!(config.textures.floor, Some(PathBuf::from("floor.png")));
        assert_eq!(config.textures.environment, None);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(
            Config::from_toml_str("[render]\nwidth = \"wide\""),
            Err(TracerError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[tolerances]\nepsilon = -1.0"),
            Err(TracerError::InvalidTolerances(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(err, Err(TracerError::Io(_))));
    }
}
