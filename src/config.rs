//! Configuration for libris paths.
//!
//! Configuration sources (highest priority first):
//! 1. `--catalog` flag / `LIBRIS_CATALOG` (handled by the CLI)
//! 2. Environment variable `LIBRIS_HOME`
//! 3. Config file (.libris/config.yaml)
//! 4. Defaults (~/.libris/catalog.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .libris/config.yaml
//! - `home` is relative to the .libris/ directory, `catalog` to the project root

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Name of the catalog file inside the home directory
pub const CATALOG_FILE_NAME: &str = "catalog.json";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .libris/)
    pub home: Option<String>,
    /// Catalog file (relative to the project root)
    pub catalog: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory holding libris state
    pub home: PathBuf,
    /// Catalog file
    pub catalog: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Inputs to configuration resolution, gathered from the process environment
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// The user's home directory
    pub user_home: Option<PathBuf>,
    /// Value of LIBRIS_HOME
    pub env_home: Option<String>,
    /// Discovered config file and its parsed contents
    pub config_file: Option<(PathBuf, ConfigFile)>,
}

impl ConfigSources {
    /// Gather sources from the environment and the working directory
    pub fn from_env() -> Result<Self> {
        let config_file = match find_config_file() {
            Some(path) => {
                let parsed = load_config_file(&path)?;
                Some((path, parsed))
            }
            None => None,
        };

        Ok(Self {
            user_home: dirs::home_dir(),
            env_home: std::env::var("LIBRIS_HOME").ok(),
            config_file,
        })
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".libris").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Resolve configuration from its sources
pub fn resolve(sources: ConfigSources) -> Result<ResolvedConfig> {
    let default_home = || -> Result<PathBuf> {
        Ok(sources
            .user_home
            .clone()
            .context("Failed to determine home directory")?
            .join(".libris"))
    };

    let Some((config_path, config)) = sources.config_file else {
        let home = match sources.env_home {
            Some(env_home) => PathBuf::from(env_home),
            None => default_home()?,
        };
        let catalog = home.join(CATALOG_FILE_NAME);

        return Ok(ResolvedConfig {
            home,
            catalog,
            config_file: None,
        });
    };

    // .libris/ directory and the project root above it
    let libris_dir = config_path.parent().unwrap_or(Path::new("."));
    let base_dir = libris_dir.parent().unwrap_or(Path::new("."));
    let env_home_set = sources.env_home.is_some();

    let home = if let Some(env_home) = sources.env_home {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = config.paths.home {
        resolve_path(libris_dir, home_path)
    } else {
        default_home()?
    };

    // An explicit LIBRIS_HOME wins over a catalog path from the file
    let catalog = match config.paths.catalog {
        Some(ref catalog_path) if !env_home_set => {
            resolve_path(base_dir, catalog_path)
        }
        _ => home.join(CATALOG_FILE_NAME),
    };

    Ok(ResolvedConfig {
        home,
        catalog,
        config_file: Some(config_path),
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(ConfigSources::from_env()?)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the catalog path
pub fn catalog_path() -> Result<PathBuf> {
    Ok(config()?.catalog.clone())
}
