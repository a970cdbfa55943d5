//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the values it needs.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the command handlers)
//! 2. Environment variables: `EBPACK_` prefix, `__` between sections, e.g.
//!    `EBPACK_TOOL__VERSION=4.5.0` or `EBPACK_DOCKER__BUILD_IMAGE=true`
//! 3. Config file: `--config FILE`, else the platform config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use ebpack_adapters::builtin_templates::DEFAULT_TEMPLATE;
use ebpack_core::domain::{DEFAULT_MODULE_INSTALL_ROOT, DOCKER_EXECUTABLE};

/// Release pinned into images when nothing else is configured.
pub const DEFAULT_TOOL_VERSION: &str = "2.8.0";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tool: ToolConfig,
    pub docker: DockerConfig,
    pub modules: ModulesConfig,
    pub scratch: ScratchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// EasyBuild release installed inside generated images.
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    pub executable: String,
    pub template: String,
    pub build_image: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub install_root: String,
    pub naming_scheme: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchConfig {
    /// Parent of scratch directories; the system temp dir when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_TOOL_VERSION.into(),
        }
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            executable: DOCKER_EXECUTABLE.into(),
            template: DEFAULT_TEMPLATE.into(),
            build_image: false,
        }
    }
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            install_root: DEFAULT_MODULE_INSTALL_ROOT.into(),
            naming_scheme: "easybuild".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the file and the process environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        Self::from_sources(file, Environment::with_prefix("EBPACK"))
    }

    fn from_sources<S>(file: S, env: Environment) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(file)
            .add_source(env.prefix_separator("_").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.ebpack.toml` in the
    /// current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "easybuilders", "ebpack")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".ebpack.toml"))
    }

    /// Value of a dotted key, formatted for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "tool.version" => self.tool.version.clone(),
            "docker.executable" => self.docker.executable.clone(),
            "docker.template" => self.docker.template.clone(),
            "docker.build_image" => self.docker.build_image.to_string(),
            "modules.install_root" => self.modules.install_root.clone(),
            "modules.naming_scheme" => self.modules.naming_scheme.clone(),
            "scratch.base_dir" => self
                .scratch
                .base_dir
                .as_deref()
                .map(Path::display)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

/// Every key understood by [`AppConfig::get`].
pub const CONFIG_KEYS: [&str; 8] = [
    "tool.version",
    "docker.executable",
    "docker.template",
    "docker.build_image",
    "modules.install_root",
    "modules.naming_scheme",
    "scratch.base_dir",
    "output.no_color",
];
