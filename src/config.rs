// Configuration for countryscope
//
// Configuration is loaded in order of precedence:
// 1. Environment variables (highest priority)
// 2. Config file (~/.config/countryscope/config.toml)
// 3. Built-in defaults (lowest priority)

use crate::sort::SortKey;
use serde::Deserialize;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default endpoint - returns the full country set in one response
pub const DEFAULT_API_URL: &str = "https://restcountries.com/v3.1/all";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Also write logs to rotating files (in addition to the TUI buffer)
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,

    /// Log file name prefix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_prefix: "countryscope".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Country list endpoint
    pub api_url: String,

    /// Initial sort key ("regiao", "nome", "capital")
    pub sort: SortKey,

    /// Theme name: "dark", "light", "nord"
    pub theme: String,

    /// Whether to run the TUI (disable for a one-shot table on stdout)
    pub enable_tui: bool,

    /// Demo mode: use the embedded sample dataset instead of the network
    pub demo_mode: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging settings as loaded from the config file
#[derive(Debug, Deserialize, Default)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<String>,
    file_prefix: Option<String>,
}

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    sort: Option<String>,
    theme: Option<String>,

    /// Optional [logging] section
    logging: Option<FileLogging>,
}

impl Config {
    /// Config file path: ~/.config/countryscope/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("countryscope").join("config.toml"))
    }

    /// Create a commented config template if none exists
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let template = r#"# countryscope configuration
# Uncomment and modify options as needed

# Country list endpoint (default: https://restcountries.com/v3.1/all)
# api_url = "https://restcountries.com/v3.1/all"

# Initial sort key: "regiao", "nome", or "capital" (default: capital)
# sort = "capital"

# Theme: "dark", "light", or "nord"
# theme = "dark"

# Logging configuration
# [logging]
# level = "info"            # trace, debug, info, warn, error (RUST_LOG overrides)
# file_enabled = false      # also write logs to rotating files
# file_dir = "./logs"
# file_prefix = "countryscope"
"#;

        // Write template (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load the file config if it exists
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                FileConfig::default()
            }),
            Err(_) => FileConfig::default(), // File doesn't exist, use defaults
        }
    }

    /// Serialize config to a TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# countryscope configuration

# Country list endpoint
api_url = "{api_url}"

# Initial sort key: "regiao", "nome", or "capital"
sort = "{sort}"

# Theme: "dark", "light", or "nord"
theme = "{theme}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
file_enabled = {file_enabled}
file_dir = "{file_dir}"
file_prefix = "{file_prefix}"
"#,
            api_url = self.api_url,
            sort = self.sort.as_str(),
            theme = self.theme,
            log_level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_prefix = self.logging.file_prefix,
        )
    }

    /// Save the current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Endpoint: env > file > default
        let api_url = std::env::var("COUNTRYSCOPE_API_URL")
            .ok()
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Sort key: env > file > default (capital)
        // Unrecognized values fall back to the default with a warning
        let sort = std::env::var("COUNTRYSCOPE_SORT")
            .ok()
            .or(file.sort)
            .map(|v| {
                SortKey::parse(&v).unwrap_or_else(|| {
                    eprintln!("Warning: unknown sort key {:?}, using default", v);
                    SortKey::default()
                })
            })
            .unwrap_or_default();

        // Theme: env > file > default
        let theme = std::env::var("COUNTRYSCOPE_THEME")
            .ok()
            .or(file.theme)
            .unwrap_or_else(|| "dark".to_string());

        // TUI toggle: env only (runtime flag)
        let enable_tui = std::env::var("COUNTRYSCOPE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Demo mode: env only (runtime flag)
        let demo_mode = std::env::var("COUNTRYSCOPE_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        // Logging settings: file config only (RUST_LOG handled in main.rs)
        let file_logging = file.logging.unwrap_or_default();
        let defaults = LoggingConfig::default();
        let logging = LoggingConfig {
            level: file_logging.level.unwrap_or(defaults.level),
            file_enabled: file_logging.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file_logging
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_prefix: file_logging.file_prefix.unwrap_or(defaults.file_prefix),
        };

        Self {
            api_url,
            sort,
            theme,
            enable_tui,
            demo_mode,
            logging,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            sort: SortKey::default(),
            theme: "dark".to_string(),
            enable_tui: true,
            demo_mode: false,
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that serialized config can be parsed back.
    /// Catches TOML syntax errors in the to_toml template.
    #[test]
    fn default_config_round_trips() {
        let config = Config::default();
        let toml_str = config.to_toml();

        let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
        assert!(
            parsed.is_ok(),
            "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
            toml_str,
            parsed.err()
        );

        let file = parsed.unwrap();
        assert_eq!(file.api_url.as_deref(), Some(DEFAULT_API_URL));
        assert_eq!(file.sort.as_deref(), Some("capital"));
        let logging = file.logging.expect("logging section should be present");
        assert_eq!(logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn template_parses_as_file_config() {
        // The commented template must stay valid TOML
        let template = r#"
api_url = "https://restcountries.com/v3.1/all"
sort = "nome"

[logging]
level = "debug"
file_enabled = true
"#;
        let file: FileConfig = toml::from_str(template).unwrap();
        assert_eq!(file.sort.as_deref(), Some("nome"));
        assert_eq!(file.logging.unwrap().file_enabled, Some(true));
    }

    #[test]
    fn default_sort_is_capital() {
        assert_eq!(Config::default().sort, SortKey::Capital);
    }
}
