use crate::domain::{config::TermBridgeConfig, error::{TermBridgeError, TermBridgeResult}};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".termbridge";
const CONFIG_FILE: &str = "config.toml";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> TermBridgeResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_config_path(&dir));

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Manager with explicit paths
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration from files
    ///
    /// Project configuration replaces global configuration wholesale.
    pub fn load_config(&self) -> TermBridgeResult<TermBridgeConfig> {
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                return self.load_config_from_path(project_path);
            }
        }

        if self.global_config_path.exists() {
            return self.load_config_from_path(&self.global_config_path);
        }

        Ok(TermBridgeConfig::default())
    }

    /// Get global configuration path
    fn get_global_config_path() -> TermBridgeResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| TermBridgeError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("termbridge").join(CONFIG_FILE))
    }

    /// Find project configuration path by walking up directory tree
    pub fn find_project_config_path(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
            .find(|path| path.exists())
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> TermBridgeResult<TermBridgeConfig> {
        let content = fs::read_to_string(path).map_err(|e| TermBridgeError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| TermBridgeError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(
        &self,
        path: &Path,
        config: &TermBridgeConfig,
    ) -> TermBridgeResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TermBridgeError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| TermBridgeError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| TermBridgeError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration under `path`
    pub fn init_project_config(&self, path: &Path) -> TermBridgeResult<PathBuf> {
        let config_file = path.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_file.exists() {
            return Err(TermBridgeError::Config {
                message: format!("Project configuration already exists: {}", config_file.display()),
            });
        }

        self.save_config_to_path(&config_file, &TermBridgeConfig::default())?;
        Ok(config_file)
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}
