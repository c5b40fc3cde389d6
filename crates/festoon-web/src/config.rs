#![forbid(unsafe_code)]

//! Page-level configuration.

use std::time::Duration;

use festoon_fx::{ConfigError, EffectsConfig};
use serde::{Deserialize, Serialize};

/// Everything the celebration page can be tuned with.
///
/// Deserializes with `#[serde(default)]`; missing keys keep the stock values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub effects: EffectsConfig,
    /// Pieces showered by the celebrate button.
    pub celebrate_count: usize,
    /// Pieces showered when the key sequence completes.
    pub birthday_count: usize,
    /// Vibration pattern handed back by the celebrate button, in ms.
    pub vibration_ms: Vec<u32>,
    /// How long a pressed button stays shrunk.
    pub press_release_ms: u64,
    /// Lifetime of the birthday flash overlay.
    pub flash_ms: u64,
    /// Delay before the welcome greeting is logged.
    pub welcome_delay_ms: u64,
    /// Background offset per pixel scrolled.
    pub parallax_factor: f64,
    /// Section opacity before it first scrolls into view.
    pub section_rest_opacity: f64,
    /// BCP 47 tag; detected from the host when absent.
    pub locale: Option<String>,
    /// Seed for a reproducible page; host randomness when absent.
    pub seed: Option<u64>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            effects: EffectsConfig::default(),
            celebrate_count: 150,
            birthday_count: 300,
            vibration_ms: vec![50, 30, 50],
            press_release_ms: 100,
            flash_ms: 500,
            welcome_delay_ms: 1000,
            parallax_factor: 0.5,
            section_rest_opacity: 0.8,
            locale: None,
            seed: None,
        }
    }
}

impl PageConfig {
    /// Parse a (possibly partial) JSON object and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.effects.validate()?;
        if self.flash_ms == 0 {
            return Err(ConfigError::ZeroDuration("flash_ms"));
        }
        if self.press_release_ms == 0 {
            return Err(ConfigError::ZeroDuration("press_release_ms"));
        }
        if !self.parallax_factor.is_finite() {
            return Err(ConfigError::InvalidRange {
                field: "parallax_factor",
                min: self.parallax_factor,
                max: self.parallax_factor,
            });
        }
        if !(0.0..=1.0).contains(&self.section_rest_opacity) {
            return Err(ConfigError::InvalidRange {
                field: "section_rest_opacity",
                min: self.section_rest_opacity,
                max: self.section_rest_opacity,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn press_release(&self) -> Duration {
        Duration::from_millis(self.press_release_ms)
    }

    #[must_use]
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    #[must_use]
    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.welcome_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(PageConfig::from_json("{}"), Ok(PageConfig::default()));
    }

    #[test]
    fn partial_override_keeps_the_rest() {
        let cfg = PageConfig::from_json(
            r#"{"celebrate_count": 20, "locale": "fr-FR", "effects": {"counter": {"duration_ms": 500}}}"#,
        )
        .unwrap();
        assert_eq!(cfg.celebrate_count, 20);
        assert_eq!(cfg.locale.as_deref(), Some("fr-FR"));
        assert_eq!(cfg.effects.counter.duration_ms, 500);
        assert_eq!(cfg.birthday_count, 300);
        assert_eq!(cfg.vibration_ms, vec![50, 30, 50]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(PageConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            PageConfig::from_json(r#"{"celebrate_count": -1}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn invalid_effects_are_rejected() {
        let err = PageConfig::from_json(r#"{"effects": {"burst": {"palette": []}}}"#);
        assert_eq!(err, Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn zero_flash_is_rejected() {
        assert_eq!(
            PageConfig::from_json(r#"{"flash_ms": 0}"#),
            Err(ConfigError::ZeroDuration("flash_ms"))
        );
    }

    #[test]
    fn opacity_outside_unit_interval_is_rejected() {
        let cfg = PageConfig {
            section_rest_opacity: 1.5,
            ..PageConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
