//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shellpane/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShellpaneConfig {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShellConfig {
    pub program: Option<String>,
    pub flag: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub placeholder: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StyleConfig {
    pub separator_color: Option<u8>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SHELL_PROGRAM: &str = "sh";
pub const DEFAULT_SHELL_FLAG: &str = "-c";
pub const DEFAULT_PLACEHOLDER: &str = "enter a command...";
pub const DEFAULT_SEPARATOR_COLOR: u8 = 240;
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_LOG_FILE: &str = "shellpane.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub shell_program: String,
    pub shell_flag: String,
    pub placeholder: String,
    pub separator_color: u8,
    pub log_level: String,
    /// None when no home directory can be found and no file is configured
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.shellpane/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shellpane"))
}

/// Returns the path to `~/.shellpane/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Where the loaded config came from. Loading happens before the logger
/// exists, so the outcome is reported through [`ConfigOrigin::log`] afterwards.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// No file existed; a commented default was written (or writing failed).
    Generated { path: PathBuf, error: Option<String> },
    /// No home directory, so no default location.
    NoHome,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "Loaded config from {}", path.display()),
            ConfigOrigin::Generated { path, error: None } => {
                write!(f, "No config file found, generated default at {}", path.display())
            }
            ConfigOrigin::Generated { path, error: Some(e) } => {
                write!(f, "No config file found, failed to write default at {}: {e}", path.display())
            }
            ConfigOrigin::NoHome => {
                write!(f, "Could not determine home directory, using default config")
            }
        }
    }
}

impl ConfigOrigin {
    pub fn log(&self) {
        match self {
            ConfigOrigin::File(_) | ConfigOrigin::Generated { error: None, .. } => info!("{self}"),
            ConfigOrigin::Generated { .. } | ConfigOrigin::NoHome => warn!("{self}"),
        }
    }
}

/// Load config from `path`, or from `~/.shellpane/config.toml` when `None`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `ShellpaneConfig::default()`. An explicit path that doesn't exist
/// is an I/O error. A malformed file returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<(ShellpaneConfig, ConfigOrigin), ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if !p.exists() => {
                let error = generate_default_config(&p).err().map(|e| e.to_string());
                return Ok((ShellpaneConfig::default(), ConfigOrigin::Generated { path: p, error }));
            }
            Some(p) => p,
            None => return Ok((ShellpaneConfig::default(), ConfigOrigin::NoHome)),
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    Ok((config, ConfigOrigin::File(path)))
}

pub fn parse_config(contents: &str) -> Result<ShellpaneConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# shellpane configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [shell]
# program = "sh"                    # Or set SHELLPANE_SHELL env var
# flag = "-c"

# [input]
# placeholder = "enter a command..."

# [style]
# separator_color = 240             # ANSI 256-color index

# [log]
# level = "debug"                   # "off", "error", "warn", "info", "debug", "trace"
# file = "shellpane.log"            # Relative to ~/.shellpane/
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &ShellpaneConfig) -> ResolvedConfig {
    // Shell: env → config → default
    let shell_program = std::env::var("SHELLPANE_SHELL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| config.shell.program.clone())
        .unwrap_or_else(|| DEFAULT_SHELL_PROGRAM.to_string());

    let log_level = std::env::var("SHELLPANE_LOG_LEVEL")
        .ok()
        .or_else(|| config.log.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    // Log file: absolute paths are used as-is, relative ones live in ~/.shellpane/
    let log_file_name = config.log.file.as_deref().unwrap_or(DEFAULT_LOG_FILE);
    let log_file = if Path::new(log_file_name).is_absolute() {
        Some(PathBuf::from(log_file_name))
    } else {
        config_dir().map(|d| d.join(log_file_name))
    };

    ResolvedConfig {
        shell_program,
        shell_flag: config
            .shell
            .flag
            .clone()
            .unwrap_or_else(|| DEFAULT_SHELL_FLAG.to_string()),
        placeholder: config
            .input
            .placeholder
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        separator_color: config
            .style
            .separator_color
            .unwrap_or(DEFAULT_SEPARATOR_COLOR),
        log_level,
        log_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = ShellpaneConfig::default();
        assert!(config.shell.program.is_none());
        assert!(config.style.separator_color.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&ShellpaneConfig::default());
        assert_eq!(resolved.shell_flag, DEFAULT_SHELL_FLAG);
        assert_eq!(resolved.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(resolved.separator_color, DEFAULT_SEPARATOR_COLOR);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ShellpaneConfig {
            shell: ShellConfig {
                program: Some("bash".to_string()),
                flag: Some("-lc".to_string()),
            },
            input: InputConfig {
                placeholder: Some("$".to_string()),
            },
            style: StyleConfig {
                separator_color: Some(33),
            },
            log: LogConfig {
                level: None,
                file: Some("/tmp/shellpane-test.log".to_string()),
            },
        };
        let resolved = resolve(&config);
        assert_eq!(resolved.shell_flag, "-lc");
        assert_eq!(resolved.placeholder, "$");
        assert_eq!(resolved.separator_color, 33);
        assert_eq!(
            resolved.log_file,
            Some(PathBuf::from("/tmp/shellpane-test.log"))
        );
    }

    #[test]
    fn test_toml_parses_all_sections() {
        let toml_str = r#"
[shell]
program = "zsh"
flag = "-c"

[input]
placeholder = "type here"

[style]
separator_color = 8

[log]
level = "info"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.shell.program.as_deref(), Some("zsh"));
        assert_eq!(config.input.placeholder.as_deref(), Some("type here"));
        assert_eq!(config.style.separator_color, Some(8));
        assert_eq!(config.log.level.as_deref(), Some("info"));
        assert!(config.log.file.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config = parse_config("[style]\nseparator_color = 240\n").unwrap();
        assert_eq!(config.style.separator_color, Some(240));
        assert!(config.shell.program.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_config("[style]\nseparator_color = \"grey\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn test_explicit_path_reports_file_origin() {
        let path = std::env::temp_dir().join(format!("shellpane-config-{}.toml", std::process::id()));
        fs::write(&path, "[shell]\nprogram = \"bash\"\n").unwrap();

        let (config, origin) = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.shell.program.as_deref(), Some("bash"));
        assert_eq!(origin, ConfigOrigin::File(path.clone()));
        assert_eq!(origin.to_string(), format!("Loaded config from {}", path.display()));
    }

    #[test]
    fn test_origin_messages() {
        let generated = ConfigOrigin::Generated {
            path: PathBuf::from("/home/u/.shellpane/config.toml"),
            error: None,
        };
        assert_eq!(
            generated.to_string(),
            "No config file found, generated default at /home/u/.shellpane/config.toml"
        );

        let failed = ConfigOrigin::Generated {
            path: PathBuf::from("/ro/config.toml"),
            error: Some("Read-only file system".to_string()),
        };
        assert!(failed.to_string().ends_with("/ro/config.toml: Read-only file system"));
        assert!(ConfigOrigin::NoHome.to_string().contains("home directory"));
    }

    #[test]
    fn test_missing_explicit_path_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/shellpane/config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
