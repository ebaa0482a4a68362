//! Renderer configuration: debug switch, bundle naming and bundle locations.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TagError};
use crate::models::ResourceType;
use crate::tag::ResourceHtmlTag;

/// File searched for by [`TagProperties::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "bundle-tags.config.json";

/// Environment variable overriding the configured debug flag.
pub const DEBUG_ENV_VAR: &str = "BUNDLE_TAGS_DEBUG";

const DEFAULT_NAME_TEMPLATE: &str = r"^{group}(-[0-9A-Za-z]+)?\.{ext}$";

/// Regular expression template used to recognise a group's compressed bundle file.
///
/// `{group}` expands to the regex-escaped group name and `{ext}` to the bundle extension of
/// the tag's resource type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct NameTemplate(String);

impl NameTemplate {
  /// Wrap a raw template string.
  pub fn new(template: impl Into<String>) -> Self {
    Self(template.into())
  }

  /// Expand the template into the file name pattern for `group_name` and `tag`.
  pub fn for_group(&self, group_name: &str, tag: ResourceHtmlTag) -> String {
    self
      .0
      .replace("{group}", &regex::escape(group_name))
      .replace("{ext}", tag.resource_type().extension())
  }

  /// Raw template string.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for NameTemplate {
  fn default() -> Self {
    Self::new(DEFAULT_NAME_TEMPLATE)
  }
}

/// Base web paths holding the compressed bundles for each resource type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
  /// Directory holding JavaScript bundles.
  pub js: String,
  /// Directory holding stylesheet bundles.
  pub css: String,
}

impl Default for ResourcePaths {
  fn default() -> Self {
    Self {
      js: "/bundles/js".into(),
      css: "/bundles/css".into(),
    }
  }
}

/// Configuration consumed by [`crate::TagRenderer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagProperties {
  /// Serve individual uncompressed sources instead of bundles.
  pub debug: bool,
  /// Pattern used to locate compressed bundles.
  pub name_template: NameTemplate,
  /// Bundle directories per resource type.
  pub resource_paths: ResourcePaths,
}

impl TagProperties {
  /// Load configuration from `dir`, falling back to defaults when the file is absent or
  /// cannot be parsed.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Ok(properties) => properties,
      Err(err) => {
        if candidate.exists() {
          log::warn!("{err}; using default configuration");
        }
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|err| TagError::Config {
      path: path.to_path_buf(),
      message: err.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|err| TagError::Config {
      path: path.to_path_buf(),
      message: err.to_string(),
    })
  }

  /// Apply [`DEBUG_ENV_VAR`] when it is set to a recognised boolean.
  pub fn with_env_overrides(self) -> Self {
    let value = std::env::var(DEBUG_ENV_VAR).ok();
    self.with_debug_override(value.as_deref())
  }

  fn with_debug_override(mut self, value: Option<&str>) -> Self {
    if let Some(raw) = value {
      match parse_flag(raw) {
        Some(debug) => self.debug = debug,
        None => log::warn!("ignoring {DEBUG_ENV_VAR}={raw}: expected a boolean"),
      }
    }
    self
  }

  /// Whether individual sources should be served.
  pub fn is_debug_on(&self) -> bool {
    self.debug
  }

  /// Base web path of the bundles for `resource_type`.
  pub fn resource_path(&self, resource_type: ResourceType) -> &str {
    match resource_type {
      ResourceType::Js => &self.resource_paths.js,
      ResourceType::Css => &self.resource_paths.css,
    }
  }
}

fn parse_flag(raw: &str) -> Option<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "on" | "yes" => Some(true),
    "0" | "false" | "off" | "no" => Some(false),
    _ => None,
  }
}
