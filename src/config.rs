use log::Level;
use serde::Deserialize;
use thiserror::Error;

/// Id of the optional JSON block in `index.html` that overrides defaults.
const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running `trunk serve`
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Timings and thresholds of the scroll engine, in ms and px.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub scroll_throttle_ms: u32,
    pub resize_debounce_ms: u32,
    /// A section becomes active this far before its top reaches the viewport top.
    pub activation_offset: f64,
    pub bottom_slack: f64,
    pub header_threshold: f64,
    pub scroll_top_threshold: f64,
    /// Height of the fixed header, subtracted from anchor scroll targets.
    pub header_compensation: f64,
    pub anchor_guard_ms: u32,
    pub paging_guard_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: 16,
            resize_debounce_ms: 250,
            activation_offset: 150.0,
            bottom_slack: 10.0,
            header_threshold: 100.0,
            scroll_top_threshold: 300.0,
            header_compensation: 80.0,
            anchor_guard_ms: 1000,
            paging_guard_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scroll: ScrollConfig,
    pub popup_delay_ms: u32,
    pub toast_lifetime_ms: u32,
    pub toast_exit_ms: u32,
    pub mobile_breakpoint: f64,
    pub counter_duration_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            popup_delay_ms: 3000,
            toast_lifetime_ms: 5000,
            toast_exit_ms: 400,
            mobile_breakpoint: 768.0,
            counter_duration_ms: 2000,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the overrides embedded in the host page, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("{}, using defaults", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{"popup_delay_ms": 1500, "scroll": {"header_threshold": 64}}"#)
            .unwrap();

        assert_eq!(config.popup_delay_ms, 1500);
        assert_eq!(config.scroll.header_threshold, 64.0);
        assert_eq!(config.scroll.scroll_throttle_ms, 16);
        assert_eq!(config.toast_lifetime_ms, 5000);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SiteConfig::from_json("{popup_delay_ms: }").unwrap_err();
        assert!(err.to_string().starts_with("invalid site config"));
    }
}
