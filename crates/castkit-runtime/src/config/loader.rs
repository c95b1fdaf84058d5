//! Layered configuration loading.
//!
//! Later sources override earlier ones:
//!
//! 1. [`CastkitConfig::default`]
//! 2. values passed to [`ConfigLoader::merge`] or [`ConfigLoader::resolver`]
//! 3. `castkit.<profile>.<ext>`, then `castkit.<ext>`, from the first search
//!    directory holding a base file (or the one file given to
//!    [`ConfigLoader::file`])
//! 4. `CASTKIT_*` environment variables, with `__` between nested keys, e.g.
//!    `CASTKIT_RESOLVER__PARTIAL_MATCHING=false`
//!
//! Which extensions are searched depends on the `toml-config` and
//! `yaml-config` features.

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "toml-config", feature = "yaml-config"))]
use figment::providers::Format as _;
use figment::providers::{Env, Serialized};
use tracing::{debug, info};

use super::error::{ConfigError, ConfigResult};
use super::schema::{CastkitConfig, ResolverConfig};
use super::validation::validate_config;

const ENV_PREFIX: &str = "CASTKIT_";
const FILE_STEM: &str = "castkit";

/// Deployment profile; selects `castkit.<profile>.<ext>` overlays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Development,
    Production,
    Custom(String),
}

impl Profile {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name; `dev` and `prod` are accepted as short forms.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads `CASTKIT_PROFILE`.
    pub fn from_env() -> Self {
        std::env::var("CASTKIT_PROFILE")
            .map(|name| Self::parse(&name))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration file syntax compiled into this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    #[cfg(feature = "toml-config")]
    Toml,
    #[cfg(feature = "yaml-config")]
    Yaml,
}

impl FileFormat {
    const ENABLED: &'static [FileFormat] = &[
        #[cfg(feature = "toml-config")]
        FileFormat::Toml,
        #[cfg(feature = "yaml-config")]
        FileFormat::Yaml,
    ];

    fn extensions(self) -> &'static [&'static str] {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => &["toml"],
            #[cfg(feature = "yaml-config")]
            Self::Yaml => &["yaml", "yml"],
        }
    }

    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ENABLED
            .iter()
            .copied()
            .find(|format| format.extensions().contains(&ext))
    }

    fn merge(self, figment: Figment, path: &Path) -> Figment {
        match self {
            #[cfg(feature = "toml-config")]
            Self::Toml => figment.merge(figment::providers::Toml::file(path)),
            #[cfg(feature = "yaml-config")]
            Self::Yaml => figment.merge(figment::providers::Yaml::file(path)),
        }
    }
}

/// Builder over the configuration sources.
#[derive(Debug)]
pub struct ConfigLoader {
    overrides: Figment,
    profile: Profile,
    dirs: Vec<PathBuf>,
    file: Option<PathBuf>,
    env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Reads the profile from `CASTKIT_PROFILE` and enables env overrides.
    pub fn new() -> Self {
        Self {
            overrides: Figment::new(),
            profile: Profile::from_env(),
            dirs: Vec::new(),
            file: None,
            env: true,
        }
    }

    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a directory to search. Without any, the working directory and
    /// the user config directory (`<config>/castkit`) are searched.
    pub fn search_path(mut self, dir: impl AsRef<Path>) -> Self {
        self.dirs.push(dir.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching. It must exist.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Layers a whole configuration under files and env.
    pub fn merge(mut self, config: CastkitConfig) -> Self {
        self.overrides = self.overrides.merge(Serialized::defaults(config));
        self
    }

    /// Layers a `[resolver]` section under files and env.
    pub fn resolver(mut self, resolver: ResolverConfig) -> Self {
        self.overrides = self
            .overrides
            .merge(Serialized::default("resolver", resolver));
        self
    }

    /// Extracts the configuration without validating it.
    pub fn load(self) -> ConfigResult<CastkitConfig> {
        let profile = self.profile.clone();
        let config: CastkitConfig = self
            .figment()?
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!(
            %profile,
            partial_matching = config.resolver.partial_matching,
            disabled_types = ?config.resolver.disabled_types,
            log_level = %config.logging.level,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Extracts the configuration and runs [`validate_config`] on it.
    pub fn load_validated(self) -> ConfigResult<CastkitConfig> {
        let config = self.load()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(CastkitConfig::default()))
            .merge(self.overrides.clone());

        for path in self.files()? {
            info!(path = %path.display(), "Reading configuration file");
            // `files` only yields paths with an enabled extension.
            if let Some(format) = FileFormat::from_path(&path) {
                figment = format.merge(figment, &path);
            }
        }

        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["PROFILE"]).split("__"));
        }
        Ok(figment)
    }

    /// The files to merge, lowest precedence first.
    fn files(&self) -> ConfigResult<Vec<PathBuf>> {
        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            if FileFormat::from_path(path).is_none() {
                return Err(ConfigError::ParseError(format!(
                    "{} has no enabled configuration format",
                    path.display()
                )));
            }
            return Ok(vec![path.clone()]);
        }

        for dir in self.search_dirs() {
            for format in FileFormat::ENABLED {
                for ext in format.extensions() {
                    let base = dir.join(format!("{FILE_STEM}.{ext}"));
                    if !base.exists() {
                        continue;
                    }
                    let overlay = dir.join(format!("{FILE_STEM}.{}.{ext}", self.profile));
                    return Ok(if overlay.exists() {
                        vec![overlay, base]
                    } else {
                        vec![base]
                    });
                }
            }
        }

        debug!("No configuration file found");
        Ok(Vec::new())
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        if !self.dirs.is_empty() {
            return self.dirs.clone();
        }
        std::env::current_dir()
            .ok()
            .into_iter()
            .chain(dirs::config_dir().map(|dir| dir.join(FILE_STEM)))
            .collect()
    }
}

/// Loads and validates the configuration from the default locations.
pub fn load_config() -> ConfigResult<CastkitConfig> {
    ConfigLoader::new().load_validated()
}

/// Loads and validates the configuration from one file.
pub fn load_config_from_file(path: impl AsRef<Path>) -> ConfigResult<CastkitConfig> {
    ConfigLoader::new().file(path).load_validated()
}
