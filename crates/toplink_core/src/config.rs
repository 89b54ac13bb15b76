//! Widget configuration
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! link_id = "top-link"
//! scroll_speed = 10.0
//! sync_on_ready = true
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Document is not valid TOML for this schema
    #[error("Failed to parse widget config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid widget config: {0}")]
    Invalid(String),
}

/// Scroll-to-top widget configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    /// `id` of the link element
    #[serde(default = "default_link_id")]
    pub link_id: String,
    /// Class marking the link as shown
    #[serde(default = "default_shown_class")]
    pub shown_class: String,
    /// One-shot class removed when the first transition finishes
    #[serde(default = "default_transition_class")]
    pub transition_class: String,
    /// Inline `display` value that keeps the link from being shown
    #[serde(default = "default_suppressed_display")]
    pub suppressed_display: String,
    /// Each frame removes `offset / scroll_speed` pixels
    #[serde(default = "default_scroll_speed")]
    pub scroll_speed: f64,
    /// Offsets below this snap to the top
    #[serde(default = "default_min_step")]
    pub min_step: f64,
    /// Drift between the written and observed offset tolerated before the
    /// animation yields to the user
    #[serde(default = "default_takeover_tolerance")]
    pub takeover_tolerance: f64,
    /// Sync visibility once when the document becomes ready
    #[serde(default)]
    pub sync_on_ready: bool,
    /// `tracing` filter directive used by the browser entry point
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_link_id() -> String {
    "top-link".to_string()
}

fn default_shown_class() -> String {
    "shown".to_string()
}

fn default_transition_class() -> String {
    "top-link-transition".to_string()
}

fn default_suppressed_display() -> String {
    "inline".to_string()
}

fn default_scroll_speed() -> f64 {
    10.0
}

fn default_min_step() -> f64 {
    1.0
}

fn default_takeover_tolerance() -> f64 {
    1.0
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            link_id: default_link_id(),
            shown_class: default_shown_class(),
            transition_class: default_transition_class(),
            suppressed_display: default_suppressed_display(),
            scroll_speed: default_scroll_speed(),
            min_step: default_min_step(),
            takeover_tolerance: default_takeover_tolerance(),
            sync_on_ready: false,
            log_filter: default_log_filter(),
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: WidgetConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("link_id", &self.link_id),
            ("shown_class", &self.shown_class),
            ("transition_class", &self.transition_class),
        ] {
            if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "{field} must be a single non-empty token, got {value:?}"
                )));
            }
        }

        // Below 1 the step would overshoot past the top.
        if !self.scroll_speed.is_finite() || self.scroll_speed < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "scroll_speed must be a finite number >= 1, got {}",
                self.scroll_speed
            )));
        }
        if !self.min_step.is_finite() || self.min_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_step must be a finite number > 0, got {}",
                self.min_step
            )));
        }
        if !self.takeover_tolerance.is_finite() || self.takeover_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "takeover_tolerance must be a finite number >= 0, got {}",
                self.takeover_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = WidgetConfig::from_toml_str("").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.link_id, "top-link");
        assert_eq!(config.scroll_speed, 10.0);
        assert!(!config.sync_on_ready);
    }

    #[test]
    fn test_partial_override() {
        let config = WidgetConfig::from_toml_str(
            r#"
            link_id = "back-to-top"
            scroll_speed = 4.0
            sync_on_ready = true
            "#,
        )
        .unwrap();

        assert_eq!(config.link_id, "back-to-top");
        assert_eq!(config.scroll_speed, 4.0);
        assert!(config.sync_on_ready);
        assert_eq!(config.shown_class, "shown");
    }

    #[test]
    fn test_rejects_slow_speed() {
        let err = WidgetConfig::from_toml_str("scroll_speed = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("scroll_speed"));
    }

    #[test]
    fn test_rejects_bad_names_and_steps() {
        assert!(WidgetConfig::from_toml_str("link_id = \"\"").is_err());
        assert!(WidgetConfig::from_toml_str("shown_class = \"a b\"").is_err());
        assert!(WidgetConfig::from_toml_str("min_step = 0.0").is_err());
        assert!(WidgetConfig::from_toml_str("takeover_tolerance = -1.0").is_err());
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = WidgetConfig::from_toml_str("scrol_speed = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
