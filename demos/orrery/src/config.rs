/// Application settings, loaded from JSON through `orrery_configure`.
///
/// Every field has a default, so `{}` is a valid configuration.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Base of the planet description endpoint; the planet name is appended.
    pub info_base: String,
    pub feed: FeedConfig,
    pub zoom: ZoomConfig,
    pub gesture: GestureConfig,
    /// Non-blank lines per info panel page.
    pub page_size: usize,
    /// Multiplier on frame time for orbital motion.
    pub time_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enabled: bool,
    pub base_url: String,
    pub start_date: String,
    pub end_date: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub initial: f32,
    pub min: f32,
    pub max: f32,
    /// Fraction of the remaining distance covered each frame.
    pub smoothing: f32,
    /// Target change per wheel notch.
    pub wheel_step: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch distance below which the target zoom decreases.
    pub near_threshold: f32,
    /// Spread distance above which the target zoom increases.
    pub far_threshold: f32,
    pub step: f32,
    pub interval_ms: u32,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            info_base: "/api/v1/get_info".into(),
            feed: FeedConfig::default(),
            zoom: ZoomConfig::default(),
            gesture: GestureConfig::default(),
            page_size: 5,
            time_scale: 1.0,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.nasa.gov/neo/rest/v1/feed".into(),
            start_date: "2024-09-22".into(),
            end_date: "2024-09-23".into(),
            api_key: "DEMO_KEY".into(),
        }
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            initial: 100.0,
            min: 20.0,
            max: 100.0,
            smoothing: 0.1,
            wheel_step: 5.0,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            near_threshold: 50.0,
            far_threshold: 100.0,
            step: 5.0,
            interval_ms: 100,
        }
    }
}

impl OrreryConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let z = &self.zoom;
        if !(z.min > 0.0 && z.min <= z.max) {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] must be positive and ordered",
                z.min, z.max
            )));
        }
        if !(z.smoothing > 0.0 && z.smoothing <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom smoothing {} must be in (0, 1]",
                z.smoothing
            )));
        }
        let g = &self.gesture;
        if !(g.near_threshold < g.far_threshold) {
            return Err(ConfigError::Invalid(format!(
                "gesture thresholds ({}, {}) leave no dead zone",
                g.near_threshold, g.far_threshold
            )));
        }
        if !(g.step > 0.0) || g.interval_ms == 0 {
            return Err(ConfigError::Invalid("gesture step and interval must be positive".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page size must be at least 1".into()));
        }
        if !(self.time_scale >= 0.0) {
            return Err(ConfigError::Invalid(format!("time scale {} is negative", self.time_scale)));
        }
        Ok(())
    }

    /// NEO feed URL for the configured date range.
    pub fn feed_url(&self) -> String {
        let f = &self.feed;
        format!(
            "{}?start_date={}&end_date={}&api_key={}",
            f.base_url, f.start_date, f.end_date, f.api_key
        )
    }

    /// Description endpoint for one body.
    pub fn info_url(&self, body_name: &str) -> String {
        format!("{}/{}", self.info_base.trim_end_matches('/'), body_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = OrreryConfig::from_json("{}").unwrap();
        assert_eq!(config, OrreryConfig::default());
        assert_eq!(config.zoom.min, 20.0);
        assert_eq!(config.zoom.max, 100.0);
        assert_eq!(config.gesture.step, 5.0);
        assert_eq!(config.gesture.interval_ms, 100);
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = OrreryConfig::from_json(r#"{ "zoom": { "min": 50 }, "page_size": 3 }"#).unwrap();
        assert_eq!(config.zoom.min, 50.0);
        assert_eq!(config.zoom.max, 100.0);
        assert_eq!(config.zoom.smoothing, 0.1);
        assert_eq!(config.page_size, 3);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = OrreryConfig::from_json(r#"{ "zoom": { "min": 200 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = OrreryConfig::from_json(
            r#"{ "gesture": { "near_threshold": 100, "far_threshold": 50 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            OrreryConfig::from_json("{ nope").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }

    #[test]
    fn urls() {
        let config = OrreryConfig::default();
        assert_eq!(config.info_url("Mars"), "/api/v1/get_info/Mars");
        assert_eq!(
            config.feed_url(),
            "https://api.nasa.gov/neo/rest/v1/feed?start_date=2024-09-22&end_date=2024-09-23&api_key=DEMO_KEY"
        );
    }
}
