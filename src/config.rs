// Application configuration loaded from config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use winit::keyboard::KeyCode;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV: &str = "SPRITE_ANIM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub playback: PlaybackConfig,
    pub animations: AnimationsConfig,
    pub input: InputBindingsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sprite Anim".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Root holding `textures/` and `sounds/`
    pub base_path: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("assets"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Render ticks per animation frame
    pub ticks_per_frame: u32,
    /// On-screen magnification of the sprite
    pub scale: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            ticks_per_frame: 10,
            scale: 4.0,
        }
    }
}

/// Key overrides per action, by winit key code name (`"KeyD"`, `"ArrowUp"`).
/// An absent action keeps its default keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputBindingsConfig {
    pub run: Option<Vec<KeyCode>>,
    pub attack: Option<Vec<KeyCode>>,
    pub jump: Option<Vec<KeyCode>>,
}

/// One sprite sheet and its optional sound clip
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SheetConfig {
    pub sheet: String,
    pub columns: u32,
    pub frames: u32,
    #[serde(default)]
    pub sound: Option<String>,
}

impl SheetConfig {
    fn new(sheet: &str, columns: u32, frames: u32, sound: Option<&str>) -> Self {
        Self {
            sheet: sheet.to_string(),
            columns,
            frames,
            sound: sound.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationsConfig {
    pub idle: SheetConfig,
    pub run: SheetConfig,
    pub attack: SheetConfig,
    pub jump: SheetConfig,
}

impl Default for AnimationsConfig {
    fn default() -> Self {
        Self {
            idle: SheetConfig::new("Idle.png", 10, 10, None),
            run: SheetConfig::new("Run.png", 10, 10, Some("run.wav")),
            attack: SheetConfig::new("Attack.png", 4, 4, Some("attack.wav")),
            jump: SheetConfig::new("Jump.png", 3, 3, Some("jump.mp3")),
        }
    }
}

impl AppConfig {
    /// Load from `$SPRITE_ANIM_CONFIG`, or `config.toml` in the working directory.
    /// A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playback.ticks_per_frame == 0 {
            return Err(ConfigError::Invalid(
                "playback.ticks_per_frame must be at least 1".to_string(),
            ));
        }
        if !(self.playback.scale > 0.0) {
            return Err(ConfigError::Invalid(
                "playback.scale must be positive".to_string(),
            ));
        }

        let sheets = [
            ("idle", &self.animations.idle),
            ("run", &self.animations.run),
            ("attack", &self.animations.attack),
            ("jump", &self.animations.jump),
        ];
        for (name, sheet) in sheets {
            if sheet.columns == 0 || sheet.frames == 0 {
                return Err(ConfigError::Invalid(format!(
                    "animations.{} needs at least one column and one frame",
                    name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.playback.ticks_per_frame, 10);
        assert_eq!(config.playback.scale, 4.0);
        assert_eq!(config.animations.idle.frames, 10);
        assert_eq!(config.animations.run.columns, 10);
        assert_eq!(config.animations.attack.frames, 4);
        assert_eq!(config.animations.jump.frames, 3);
        assert!(config.animations.idle.sound.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.assets.base_path, PathBuf::from("assets"));
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml_str(
            r#"
            [playback]
            ticks_per_frame = 6

            [animations.attack]
            sheet = "Slash.png"
            columns = 6
            frames = 5
            sound = "slash.ogg"
            "#,
        )
        .unwrap();

        assert_eq!(config.playback.ticks_per_frame, 6);
        assert_eq!(config.playback.scale, 4.0);
        assert_eq!(config.animations.attack.sheet, "Slash.png");
        assert_eq!(config.animations.attack.frames, 5);
        assert_eq!(config.animations.attack.sound.as_deref(), Some("slash.ogg"));
        assert_eq!(config.animations.jump.frames, 3);
    }

    #[test]
    fn test_zero_frames_rejected() {
        let err = AppConfig::from_toml_str(
            r#"
            [animations.jump]
            sheet = "Jump.png"
            columns = 3
            frames = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_ticks_rejected() {
        let err = AppConfig::from_toml_str("[playback]\nticks_per_frame = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_input_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            [input]
            run = ["KeyD"]
            jump = ["KeyW", "ArrowUp"]
            "#,
        )
        .unwrap();

        assert_eq!(config.input.run, Some(vec![KeyCode::KeyD]));
        assert_eq!(config.input.jump, Some(vec![KeyCode::KeyW, KeyCode::ArrowUp]));
        assert!(config.input.attack.is_none());
    }

    #[test]
    fn test_unknown_key_name_rejected() {
        let err = AppConfig::from_toml_str("[input]\nattack = [\"NotAKey\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::from_toml_str("[playback\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load_from(Path::new("/no/such/config.toml")).unwrap();
        assert_eq!(config.window.height, 720);
    }
}
