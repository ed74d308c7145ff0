//! Lightbox configuration: role selectors, content type and durations.
//!
//! [`LightboxConfig`] is plain data, built in code or read from TOML. It is
//! compiled into a [`CompiledConfig`] (parsed selectors, resolved durations)
//! when a lightbox is registered, so malformed selectors fail up front.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::css::model::SelectorList;
use crate::css::parser::{parse_selector_list, ParseError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors registering a lightbox.
#[derive(Debug, thiserror::Error)]
pub enum LightboxError {
    #[error("invalid {role} selector '{selector}': {source}")]
    Selector {
        role: &'static str,
        selector: String,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// What a container expands into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// The full-size image the anchor links to.
    #[default]
    Image,
    /// The container's existing child content, as-is.
    Html,
}

impl ContentType {
    /// Container class that forces this content type.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Html => "html",
        }
    }
}

// ---------------------------------------------------------------------------
// LightboxConfig
// ---------------------------------------------------------------------------

/// User-facing lightbox configuration. Every key is optional in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub container_selector: String,
    pub anchor_selector: String,
    pub image_selector: String,
    pub child_selector: String,
    pub child_anchor_selector: String,
    pub child_image_selector: String,
    pub close_selector: String,
    pub background_selector: String,
    /// Base animation duration in milliseconds.
    pub duration: u64,
    /// Open duration in milliseconds; `duration` when unset.
    pub open_duration: Option<u64>,
    /// Close duration in milliseconds; `duration` when unset.
    pub close_duration: Option<u64>,
    /// Fade duration in milliseconds.
    pub secondary_duration: u64,
    pub content_type: ContentType,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            container_selector: ".lighthouse".into(),
            anchor_selector: "a".into(),
            image_selector: "img".into(),
            child_selector: ".content".into(),
            child_anchor_selector: "a".into(),
            child_image_selector: "img".into(),
            close_selector: ".close".into(),
            background_selector: ".background".into(),
            duration: 350,
            open_duration: None,
            close_duration: None,
            secondary_duration: 200,
            content_type: ContentType::Image,
        }
    }
}

impl LightboxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Set the container selector (builder).
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Set the child-content selector (builder).
    pub fn with_child_selector(mut self, selector: impl Into<String>) -> Self {
        self.child_selector = selector.into();
        self
    }

    /// Set the close control selector (builder).
    pub fn with_close_selector(mut self, selector: impl Into<String>) -> Self {
        self.close_selector = selector.into();
        self
    }

    /// Set the default content type (builder).
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Set the base duration in milliseconds (builder).
    pub fn with_duration(mut self, ms: u64) -> Self {
        self.duration = ms;
        self
    }

    /// Set the open duration in milliseconds (builder).
    pub fn with_open_duration(mut self, ms: u64) -> Self {
        self.open_duration = Some(ms);
        self
    }

    /// Set the close duration in milliseconds (builder).
    pub fn with_close_duration(mut self, ms: u64) -> Self {
        self.close_duration = Some(ms);
        self
    }

    /// Set the fade duration in milliseconds (builder).
    pub fn with_secondary_duration(mut self, ms: u64) -> Self {
        self.secondary_duration = ms;
        self
    }

    /// Effective open duration. An explicit zero is honored.
    pub fn open_duration(&self) -> Duration {
        Duration::from_millis(self.open_duration.unwrap_or(self.duration))
    }

    /// Effective close duration. An explicit zero is honored.
    pub fn close_duration(&self) -> Duration {
        Duration::from_millis(self.close_duration.unwrap_or(self.duration))
    }

    pub fn secondary_duration(&self) -> Duration {
        Duration::from_millis(self.secondary_duration)
    }

    /// Parse every selector and resolve durations.
    pub fn compile(&self) -> Result<CompiledConfig, LightboxError> {
        let parse = |role: &'static str, selector: &str| {
            parse_selector_list(selector).map_err(|source| LightboxError::Selector {
                role,
                selector: selector.to_string(),
                source,
            })
        };
        Ok(CompiledConfig {
            container: parse("container", &self.container_selector)?,
            anchor: parse("anchor", &self.anchor_selector)?,
            image: parse("image", &self.image_selector)?,
            child: parse("child", &self.child_selector)?,
            child_anchor: parse("child anchor", &self.child_anchor_selector)?,
            child_image: parse("child image", &self.child_image_selector)?,
            close: parse("close", &self.close_selector)?,
            background: parse("background", &self.background_selector)?,
            content_type: self.content_type,
            open_duration: self.open_duration(),
            close_duration: self.close_duration(),
            secondary_duration: self.secondary_duration(),
        })
    }
}

// ---------------------------------------------------------------------------
// CompiledConfig
// ---------------------------------------------------------------------------

/// Validated configuration used by a running controller.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledConfig {
    pub container: SelectorList,
    pub anchor: SelectorList,
    pub image: SelectorList,
    pub child: SelectorList,
    pub child_anchor: SelectorList,
    pub child_image: SelectorList,
    pub close: SelectorList,
    pub background: SelectorList,
    pub content_type: ContentType,
    pub open_duration: Duration,
    pub close_duration: Duration,
    pub secondary_duration: Duration,
}

// ===========================================================================
// Tests
// ===========================================================================
