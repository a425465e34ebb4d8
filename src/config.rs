use anyhow::{Context, Result};
use config::{Config, Environment, File};
use gradecal_core::{EventConfig, GridConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

static DEFAULT_PROVIDER: &str = "google";
static DEFAULT_PROVIDER_TIMEOUT: &str = "30s";

/// Everything read from ~/.config/gradecal/config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

/// How the tesseract binary is invoked
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub binary: String,
    /// Tesseract language code(s), e.g. "por" or "por+eng"
    pub language: String,
    /// Page segmentation mode; 6 reads the grid as one uniform block of text
    pub psm: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            binary: "tesseract".to_string(),
            language: "por".to_string(),
            psm: 6,
        }
    }
}

/// Calendar provider settings. Keys other than `name` and `timeout` are
/// passed through to the provider untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider")]
    pub name: String,

    #[serde(default = "default_provider_timeout")]
    pub timeout: String,

    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_provider_timeout() -> String {
    DEFAULT_PROVIDER_TIMEOUT.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            name: default_provider(),
            timeout: default_provider_timeout(),
            params: serde_json::Map::new(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Result<Duration> {
        humantime::parse_duration(&self.timeout)
            .with_context(|| format!("Invalid provider timeout '{}'", self.timeout))
    }
}

/// Get the config directory path (~/.config/gradecal)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("gradecal");
    Ok(config_dir)
}

/// Get the config file path (~/.config/gradecal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl AppConfig {
    /// Load the config file (if any) with GRADECAL_* environment overrides,
    /// e.g. GRADECAL_EVENT__TIMEZONE=Europe/Lisbon
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: AppConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("GRADECAL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config file at {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        config
            .grid
            .validate()
            .with_context(|| format!("Invalid [grid] section in {}", path.display()))?;
        config.provider.timeout()?;

        Ok(config)
    }
}

/// Create a default config file with all options commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    let contents = format!(
        "\
# gradecal configuration

[grid]
# Weekday of each grid column, left to right:
# columns = [\"Sun\", \"Mon\", \"Tue\", \"Wed\", \"Thu\", \"Fri\", \"Sat\"]
# How cells are separated: \"whitespace\" (2+ spaces) or \"separator\" (dashes)
# split = \"whitespace\"
# Cell values meaning \"no class\":
# placeholders = [\"---\"]
# code_length = 3

[event]
# timezone = \"America/Sao_Paulo\"
# location = \"IFSC\"
# description_prefix = \"Aula\"

[ocr]
# binary = \"tesseract\"
# language = \"por\"
# psm = 6

[provider]
# name = \"{}\"
# timeout = \"{}\"
# Any other key is passed to gradecal-provider-<name>, e.g.:
# google_account = \"you@example.com\"
# google_calendar_id = \"primary\"
",
        DEFAULT_PROVIDER, DEFAULT_PROVIDER_TIMEOUT
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}

/// Expand ~ in user-supplied paths
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
