//! Configuration management for page-render
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `PAGE_RENDER_` prefix, `__`
//!    separates nested keys)
//! 2. `./config.toml` (development)
//! 3. `~/.config/page-render/{service}/config.toml` (user config, XDG)
//! 4. `/etc/page-render/{service}/config.toml` (system config)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # config.toml
//! env = "production"       # anything else recompiles on every render
//!
//! [templates]
//! cache = "enabled"          # omit to follow `env`
//! template_dir = "./web"     # omit to use the embedded bundle
//! strict_undefined = true
//! html_escape = true
//! trim_blocks = true
//!
//! [assets]
//! api = "https://api.example.com"
//! css_version = "2024-05-01"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use page_render::config::PageRenderConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = PageRenderConfig::load_for_service("my-app")?;
//! let mode = config.cache_mode();
//! # Ok(())
//! # }
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

use crate::compiler::EngineSettings;
use crate::renderer::CacheMode;

/// Runtime environment of the application
///
/// Only `production` enables cache reads. Any other value, such as `staging`
/// or `test`, is treated as [`AppEnv::Development`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    /// Deployed build; compiled templates are reused
    Production,
    /// Any other environment; templates are recompiled on every render
    Development,
}

impl<'de> Deserialize<'de> for AppEnv {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(if value == "production" {
            Self::Production
        } else {
            Self::Development
        })
    }
}

impl AppEnv {
    /// Cache mode implied by the environment
    #[must_use]
    pub const fn cache_mode(self) -> CacheMode {
        match self {
            Self::Production => CacheMode::Enabled,
            Self::Development => CacheMode::Disabled,
        }
    }
}

impl Default for AppEnv {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Explicit cache mode; follows [`AppEnv`] when unset
    pub cache: Option<CacheMode>,

    /// Directory containing `templates/`; the embedded bundle is used when unset
    pub template_dir: Option<PathBuf>,

    /// Fail rendering when a template references a missing value
    pub strict_undefined: bool,

    /// HTML-escape interpolated values
    pub html_escape: bool,

    /// Trim whitespace around block tags
    pub trim_blocks: bool,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        let engine = EngineSettings::default();
        Self {
            cache: None,
            template_dir: None,
            strict_undefined: engine.strict_undefined,
            html_escape: engine.html_escape,
            trim_blocks: engine.trim_blocks,
        }
    }
}

impl TemplateSettings {
    /// Engine options for the compiler
    #[must_use]
    pub const fn engine(&self) -> EngineSettings {
        EngineSettings {
            strict_undefined: self.strict_undefined,
            html_escape: self.html_escape,
            trim_blocks: self.trim_blocks,
        }
    }
}

/// Values injected into every page by the static defaults hook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Base URL of the backend API
    pub api: String,

    /// Version appended to stylesheet URLs
    pub css_version: String,
}

/// Complete page-render configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageRenderConfig {
    /// Runtime environment
    #[serde(default)]
    pub env: AppEnv,

    /// Template engine settings
    #[serde(default)]
    pub templates: TemplateSettings,

    /// Asset and API settings
    #[serde(default)]
    pub assets: AssetSettings,
}

impl PageRenderConfig {
    /// Effective cache mode: the explicit setting, else the one implied by `env`
    #[must_use]
    pub fn cache_mode(&self) -> CacheMode {
        self.templates
            .cache
            .unwrap_or_else(|| self.env.cache_mode())
    }

    /// Load configuration for a specific service
    ///
    /// Searches for configuration in XDG-compliant locations with precedence:
    /// 1. Environment variables (`PAGE_RENDER_*`)
    /// 2. `./config.toml`
    /// 3. `~/.config/page-render/{service_name}/config.toml`
    /// 4. `/etc/page-render/{service_name}/config.toml`
    /// 5. Defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value
    /// has the wrong type.
    pub fn load_for_service(service_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 5. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 4. System config: /etc/page-render/{service_name}/config.toml
        let system_config = PathBuf::from("/etc/page-render")
            .join(service_name)
            .join("config.toml");
        if system_config.exists() {
            figment = figment.merge(Toml::file(&system_config));
        }

        // 3. User config: ~/.config/page-render/{service_name}/config.toml
        let user_config = Self::recommended_path(service_name);
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        // 2. Local config: ./config.toml
        let local_config = PathBuf::from("./config.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        // 1. Environment variables (highest priority, double underscore for nesting)
        figment = figment.merge(Env::prefixed("PAGE_RENDER_").split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// A missing file yields the defaults (plus environment overrides).
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or a value has the
    /// wrong type.
    pub fn load_from(path: &str) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PAGE_RENDER_").split("__").lowercase(true))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path for a service
    ///
    /// # Example
    ///
    /// ```rust
    /// use page_render::config::PageRenderConfig;
    ///
    /// let path = PageRenderConfig::recommended_path("my-app");
    /// assert!(path.ends_with("config.toml"));
    /// ```
    #[must_use]
    pub fn recommended_path(service_name: &str) -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./config.toml"),
            |config_dir| {
                config_dir
                    .join("page-render")
                    .join(service_name)
                    .join("config.toml")
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = PageRenderConfig::default();
        assert!(config.templates.cache.is_none());
        assert!(config.templates.template_dir.is_none());
        assert!(config.templates.strict_undefined);
        assert!(config.templates.html_escape);
        assert!(config.assets.api.is_empty());

        #[cfg(debug_assertions)]
        assert_eq!(config.cache_mode(), CacheMode::Disabled);

        #[cfg(not(debug_assertions))]
        assert_eq!(config.cache_mode(), CacheMode::Enabled);
    }

    #[test]
    fn test_explicit_cache_overrides_env() {
        let mut config = PageRenderConfig {
            env: AppEnv::Production,
            ..PageRenderConfig::default()
        };
        assert_eq!(config.cache_mode(), CacheMode::Enabled);

        config.templates.cache = Some(CacheMode::Disabled);
        assert_eq!(config.cache_mode(), CacheMode::Disabled);
    }

    #[test]
    fn test_env_cache_mode() {
        assert_eq!(AppEnv::Production.cache_mode(), CacheMode::Enabled);
        assert_eq!(AppEnv::Development.cache_mode(), CacheMode::Disabled);
    }

    #[test]
    fn test_engine_settings_from_templates() {
        let settings = TemplateSettings {
            html_escape: false,
            ..TemplateSettings::default()
        };
        let engine = settings.engine();
        assert!(!engine.html_escape);
        assert!(engine.strict_undefined);
        assert!(engine.trim_blocks);
    }

    #[test]
    fn test_recommended_path() {
        let path = PageRenderConfig::recommended_path("test-app");
        let path = path.to_str().unwrap();
        assert!(path.contains("test-app"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let config = PageRenderConfig::load_from("/nonexistent/path/config.toml").unwrap();
        assert!(config.templates.strict_undefined);
        assert!(config.templates.template_dir.is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        let toml_content = r#"
env = "production"

[templates]
cache = "disabled"
template_dir = "/srv/web"
html_escape = false

[assets]
api = "https://api.example.com"
css_version = "42"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = PageRenderConfig::load_from(config_path.to_str().unwrap()).unwrap();

        assert_eq!(config.env, AppEnv::Production);
        assert_eq!(config.cache_mode(), CacheMode::Disabled);
        assert_eq!(config.templates.template_dir, Some(PathBuf::from("/srv/web")));
        assert!(!config.templates.html_escape);
        assert!(config.templates.strict_undefined);
        assert_eq!(config.assets.api, "https://api.example.com");
        assert_eq!(config.assets.css_version, "42");
    }

    #[test]
    fn test_non_production_env_disables_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "env = \"staging\"\n").unwrap();

        let config = PageRenderConfig::load_from(config_path.to_str().unwrap()).unwrap();

        assert_eq!(config.env, AppEnv::Development);
        assert_eq!(config.cache_mode(), CacheMode::Disabled);
    }

    #[test]
    fn test_env_marker_is_exact() {
        let parse = |value: &str| -> AppEnv {
            toml::from_str::<PageRenderConfig>(&format!("env = \"{value}\"\n"))
                .unwrap()
                .env
        };

        assert_eq!(parse("production"), AppEnv::Production);
        assert_eq!(parse("development"), AppEnv::Development);
        assert_eq!(parse("Production"), AppEnv::Development);
        assert_eq!(parse(""), AppEnv::Development);
    }

    #[test]
    fn test_load_from_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[templates]\nstrict_undefined = \"yes\"\n").unwrap();

        assert!(PageRenderConfig::load_from(config_path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_for_service_with_defaults() {
        let config = PageRenderConfig::load_for_service("nonexistent-service-123").unwrap();
        assert!(config.templates.html_escape);
    }
}
