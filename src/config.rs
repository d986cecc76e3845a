//! Configuration file support for the album.
//!
//! The media host account, upload preset, tag and folder are fixed per
//! deployment. They live in a versioned JSON config so a deployment can
//! override them without rebuilding.

use serde::{Deserialize, Serialize};

/// Verbosity written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name such as `debug` or `WARN`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Config format version. Files with a higher version are rejected.
pub const CONFIG_VERSION: u32 = 1;

/// Deployment settings for the album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Media host settings
    #[serde(default)]
    pub cloud: CloudSettings,

    /// Local photo cache settings
    #[serde(default)]
    pub cache: CacheSettings,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,
}

fn default_app_name() -> String {
    "flipalbum".to_string()
}

/// Media host account settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudSettings {
    /// Account identifier on the media host
    pub cloud_name: String,
    /// Unsigned upload preset
    pub upload_preset: String,
    /// Tag attached to every upload; also names the listing
    pub upload_tag: String,
    /// Destination folder for uploads
    pub upload_folder: String,
}

impl Default for CloudSettings {
    fn default() -> Self {
        Self {
            cloud_name: "demo".to_string(),
            upload_preset: "flipalbum_unsigned".to_string(),
            upload_tag: "flipalbum-photobook".to_string(),
            upload_folder: "flipalbum-photobook".to_string(),
        }
    }
}

impl CloudSettings {
    /// Endpoint that accepts multipart image uploads.
    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }

    /// Per-tag listing endpoint (without the cache-busting query).
    pub fn list_url(&self) -> String {
        format!(
            "https://res.cloudinary.com/{}/image/list/{}.json",
            self.cloud_name, self.upload_tag
        )
    }

    /// Delivery URL for an uploaded image.
    pub fn image_url(&self, public_id: &str, format: &str) -> String {
        format!(
            "https://res.cloudinary.com/{}/image/upload/{}.{}",
            self.cloud_name, public_id, format
        )
    }
}

/// Local photo cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Storage slot holding the serialized photo sequence
    pub key: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            key: "flipalbum_photos_v2".to_string(),
        }
    }
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl AppConfig {
    /// File name inside the per-user config directory.
    pub const FILE_NAME: &'static str = "flipalbum-config.json";

    /// Parse a config document, rejecting versions this build cannot read.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    /// `<config dir>/flipalbum/flipalbum-config.json`, falling back to `~/.config`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join("flipalbum").join(Self::FILE_NAME))
    }

    /// Load configuration from an explicit file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the per-user config if there is one.
    ///
    /// A missing file is normal; an unreadable one is logged and skipped.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return None;
        }

        Self::load_from_path(&path)
            .inspect_err(|e| log::warn!("Ignoring config {}: {}", path.display(), e))
            .ok()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            cloud: CloudSettings::default(),
            cache: CacheSettings::default(),
            preferences: UserPreferences::default(),
        }
    }
}

/// Errors loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration version {file_version} is newer than supported version {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
