//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CappyError, CappyResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window placement and initial crop.
    pub window: WindowConfig,

    /// Camera zoom/pan tuning.
    pub view: ViewConfig,

    /// Spotlight overlay settings.
    pub flashlight: FlashlightConfig,

    /// Colors and the pixel grid.
    pub appearance: AppearanceConfig,

    /// Key bindings.
    pub keys: KeyBindings,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Open the viewer fullscreen.
    pub fullscreen: bool,

    /// Initial crop as a corner pair `[x1, y1, x2, y2]` in capture pixels.
    /// A non-positive far corner means "to the edge of the capture".
    pub pre_crop: [i32; 4],
}

/// Camera tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Fraction of scale added by one zoom-in ramp.
    pub zoom_in_amount: f64,
    pub zoom_in_ms: u64,

    /// Fraction of scale removed by one zoom-out ramp. Must stay below 1.
    pub zoom_out_amount: f64,
    pub zoom_out_ms: u64,

    /// Zoom-out is refused below this scale.
    pub min_scale: f64,
    /// Zoom-in is refused above this scale.
    pub max_scale: f64,

    /// Multiplier from the last drag delta (screen px) to fling velocity.
    pub fling_gain: f64,
    /// Velocity multiplier applied once per fling tick, in `(0, 1]`.
    pub fling_damping: f64,
    pub fling_tick_ms: u64,
    /// A fling stops once its speed drops below this (screen px per tick).
    pub pan_stop_epsilon: f64,

    /// Side of the square resize handles on a crop selection (screen px).
    pub handle_size: f64,
}

/// Spotlight settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashlightConfig {
    /// Initial spotlight radius (screen px).
    pub size: f64,
    /// Radius change per shift+wheel notch.
    pub resize_amount: f64,
    pub resize_ms: u64,
    pub center_inner_color: [u8; 4],
    pub center_outer_color: [u8; 4],
    pub outer_color: [u8; 4],
}

/// Colors and grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub background_color: [u8; 3],
    pub grid_color: [u8; 3],
    /// The pixel grid is only drawn at or above this scale.
    pub grid_min_scale: f64,
    /// Every n-th grid line is drawn heavier.
    pub grid_major_every: u32,
    /// Grid starts enabled.
    pub grid_enabled: bool,
}

/// Key bindings. Values are key names compared case-insensitively
/// (`"c"`, `"escape"`, `"space"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub color_pick: String,
    pub flashlight: String,
    pub commit: String,
    pub cancel: String,
    pub reset: String,
    pub quit: String,
    /// Requires ctrl.
    pub save: String,
    pub grid: String,
    /// Requires ctrl; shift selects the separated form.
    pub copy_decimal: String,
    pub copy_hex: String,
    pub copy_binary: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cappy_view_core=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            fullscreen: false,
            pre_crop: [0, 0, 0, 0],
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_in_amount: 0.2,
            zoom_in_ms: 150,
            zoom_out_amount: 0.2,
            zoom_out_ms: 100,
            min_scale: 0.25,
            max_scale: 100.0,
            fling_gain: 1.0,
            fling_damping: 0.92,
            fling_tick_ms: 10,
            pan_stop_epsilon: 0.05,
            handle_size: 15.0,
        }
    }
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            size: 150.0,
            resize_amount: 150.0,
            resize_ms: 25,
            center_inner_color: [255, 255, 204, 25],
            center_outer_color: [255, 255, 204, 25],
            outer_color: [51, 51, 0, 50],
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            background_color: [50, 50, 50],
            grid_color: [200, 200, 200],
            grid_min_scale: 8.0,
            grid_major_every: 10,
            grid_enabled: true,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            color_pick: "c".to_string(),
            flashlight: "f".to_string(),
            commit: "x".to_string(),
            cancel: "escape".to_string(),
            reset: "r".to_string(),
            quit: "q".to_string(),
            save: "s".to_string(),
            grid: "g".to_string(),
            copy_decimal: "d".to_string(),
            copy_hex: "h".to_string(),
            copy_binary: "b".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> CappyResult<Self> {
        if !path.exists() {
            return Err(CappyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> CappyResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> CappyResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that would break the camera contract.
    pub fn validate(&self) -> CappyResult<()> {
        let view = &self.view;
        if !(view.min_scale > 0.0 && view.min_scale <= view.max_scale) {
            return Err(CappyError::config(format!(
                "view.min_scale must be positive and not above max_scale (got {} / {})",
                view.min_scale, view.max_scale
            )));
        }
        if !(0.0..1.0).contains(&view.zoom_out_amount) {
            return Err(CappyError::config(format!(
                "view.zoom_out_amount must be in [0, 1) (got {})",
                view.zoom_out_amount
            )));
        }
        if view.zoom_in_amount < 0.0 {
            return Err(CappyError::config(format!(
                "view.zoom_in_amount must not be negative (got {})",
                view.zoom_in_amount
            )));
        }
        if !(view.fling_damping > 0.0 && view.fling_damping <= 1.0) {
            return Err(CappyError::config(format!(
                "view.fling_damping must be in (0, 1] (got {})",
                view.fling_damping
            )));
        }
        if view.fling_tick_ms == 0 {
            return Err(CappyError::config("view.fling_tick_ms must be at least 1"));
        }
        if view.handle_size <= 0.0 {
            return Err(CappyError::config("view.handle_size must be positive"));
        }
        if self.flashlight.size < 0.0 {
            return Err(CappyError::config("flashlight.size must not be negative"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cappy").join("config.json")
}
