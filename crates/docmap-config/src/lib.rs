//! Site configuration for docmap.
//!
//! Parses `site.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The configuration is loaded once at process startup and passed by
//! reference to whatever needs it; there is no mutable global.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `navbar.items[].href`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "site.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity and deployment URLs.
    pub site: SiteConfig,
    /// Navbar structure.
    pub navbar: NavbarConfig,
    /// Broken-link handling policies.
    pub links: LinkPolicyConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            navbar: NavbarConfig::default(),
            links: LinkPolicyConfig::default(),
            config_path: None,
        }
    }
}

/// Site identity and deployment configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Short tagline shown alongside the title.
    pub tagline: String,
    /// Absolute URL the site is deployed to.
    pub url: String,
    /// Path prefix the site is served under. Starts and ends with `/`.
    pub base_url: String,
    /// Favicon path relative to the static assets root.
    pub favicon: Option<String>,
    /// Hosting organization or user name.
    pub organization_name: Option<String>,
    /// Repository name.
    pub project_name: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: String::new(),
            url: "http://localhost:3000".to_owned(),
            base_url: "/".to_owned(),
            favicon: None,
            organization_name: None,
            project_name: None,
        }
    }
}

/// Navbar configuration.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavbarConfig {
    /// Navbar title. Falls back to the site title when empty.
    pub title: String,
    /// Optional logo.
    pub logo: Option<NavbarLogo>,
    /// Navbar items in display order.
    pub items: Vec<NavbarItem>,
}

/// Navbar logo.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct NavbarLogo {
    /// Alt text.
    pub alt: String,
    /// Image path relative to the static assets root.
    pub src: String,
}

/// A single navbar item.
///
/// Carries exactly one link target: `to` for an internal path or `href`
/// for an external URL. Enforced by [`Config::validate`] rather than the
/// type so that config errors name the offending item.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NavbarItem {
    /// Display label.
    pub label: String,
    /// Internal path target.
    pub to: Option<String>,
    /// External URL target.
    pub href: Option<String>,
    /// Base path that marks this item active when the current page is
    /// under it.
    pub active_base_path: Option<String>,
    /// Which side of the navbar the item sits on.
    pub position: NavbarPosition,
}

impl Default for NavbarItem {
    fn default() -> Self {
        Self {
            label: String::new(),
            to: None,
            href: None,
            active_base_path: None,
            position: NavbarPosition::Left,
        }
    }
}

/// Navbar item placement.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    /// Left side of the navbar.
    #[default]
    Left,
    /// Right side of the navbar.
    Right,
}

/// Broken-link handling policies.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinkPolicyConfig {
    /// Policy for broken internal links.
    pub on_broken_links: LinkPolicy,
    /// Policy for broken markdown links.
    pub on_broken_markdown_links: LinkPolicy,
}

impl Default for LinkPolicyConfig {
    fn default() -> Self {
        Self {
            on_broken_links: LinkPolicy::Throw,
            on_broken_markdown_links: LinkPolicy::Warn,
        }
    }
}

/// What the build does when it finds a broken link.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Fail the build.
    Throw,
    /// Emit a warning and continue.
    Warn,
    /// Silently continue.
    Ignore,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `site.toml` in current directory and
    /// parents, falling back to defaults when nothing is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing
    /// or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        if let Some(discovered) = Self::discover_config() {
            return Self::load_from_file(&discovered);
        }
        Ok(Self::default())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Navbar title, falling back to the site title.
    #[must_use]
    pub fn navbar_title(&self) -> &str {
        if self.navbar.title.is_empty() {
            &self.site.title
        } else {
            &self.navbar.title
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_navbar()?;
        Ok(())
    }

    /// Validate site identity configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.url, "site.url")?;
        require_http_url(&self.site.url, "site.url")?;

        if !self.site.base_url.starts_with('/') || !self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must start and end with /".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate navbar configuration.
    fn validate_navbar(&self) -> Result<(), ConfigError> {
        for (i, item) in self.navbar.items.iter().enumerate() {
            require_non_empty(&item.label, &format!("navbar.items[{i}].label"))?;

            match (&item.to, &item.href) {
                (Some(_), Some(_)) => {
                    return Err(ConfigError::Validation(format!(
                        "navbar.items[{i}] cannot set both to and href"
                    )));
                }
                (None, None) => {
                    return Err(ConfigError::Validation(format!(
                        "navbar.items[{i}] must set either to or href"
                    )));
                }
                (None, Some(href)) => {
                    require_http_url(href, &format!("navbar.items[{i}].href"))?;
                }
                (Some(_), None) => {}
            }
        }

        if let Some(logo) = &self.navbar.logo {
            require_non_empty(&logo.src, "navbar.logo.src")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;

        for (i, item) in self.navbar.items.iter_mut().enumerate() {
            if let Some(ref href) = item.href {
                item.href = Some(expand::expand_env(
                    href,
                    &format!("navbar.items[{i}].href"),
                )?);
            }
        }

        Ok(())
    }
}
