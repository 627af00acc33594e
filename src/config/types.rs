use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::effect::{
    default_gradient, Color, GradientStop, LayoutDirection, ShimmerAnimation, ShimmerConfig,
    TimingCurve, DEFAULT_BAND_SIZE,
};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub shimmer: ShimmerSection,
}

/// Canvas the preview renders into
#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    /// Frame width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Frame height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
    /// Backdrop color in hex format (#RRGGBB or #RRGGBBAA)
    #[serde(default = "default_bg_color")]
    pub background: String,
    /// Placeholder fill color in hex format
    #[serde(default = "default_content_color")]
    pub content_color: String,
    /// Layout direction: "ltr" or "rtl"
    #[serde(default = "default_direction")]
    pub direction: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_bg_color(),
            content_color: default_content_color(),
            direction: default_direction(),
        }
    }
}

fn default_width() -> u32 {
    320
}

fn default_height() -> u32 {
    96
}

fn default_bg_color() -> String {
    "#1e1e2e".to_string()
}

fn default_content_color() -> String {
    "#cdd6f4".to_string()
}

fn default_direction() -> String {
    "ltr".to_string()
}

/// The `[shimmer]` table, mirroring `ShimmerConfig`
#[derive(Debug, Deserialize, Clone)]
pub struct ShimmerSection {
    /// Cycle duration in seconds
    #[serde(default = "default_duration")]
    pub duration: f64,
    /// Start delay in seconds
    #[serde(default = "default_delay")]
    pub delay: f64,
    /// Play every other cycle backwards
    #[serde(default)]
    pub bounce: bool,
    /// Repeat forever (false plays a single run)
    #[serde(default = "default_repeat")]
    pub repeat: bool,
    /// Timing curve: "linear", "ease_in", "ease_out", "ease_in_out"
    #[serde(default = "default_curve")]
    pub curve: String,
    /// Band size as a fraction of the content
    #[serde(default = "default_band_size")]
    pub band_size: f32,
    /// Mask stops; the built-in dim/bright/dim ramp when omitted
    pub gradient: Option<Vec<StopConfig>>,
}

impl Default for ShimmerSection {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            delay: default_delay(),
            bounce: false,
            repeat: default_repeat(),
            curve: default_curve(),
            band_size: default_band_size(),
            gradient: None,
        }
    }
}

fn default_duration() -> f64 {
    1.5
}

fn default_delay() -> f64 {
    0.25
}

fn default_repeat() -> bool {
    true
}

fn default_curve() -> String {
    "linear".to_string()
}

fn default_band_size() -> f32 {
    DEFAULT_BAND_SIZE
}

/// A single gradient stop
#[derive(Debug, Deserialize, Clone)]
pub struct StopConfig {
    #[serde(default = "default_stop_color")]
    pub color: String,
    pub opacity: f32,
}

fn default_stop_color() -> String {
    "#000000".to_string()
}

/// A problem found while validating a config.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub message: String,
    /// Errors make the loader fall back to defaults; warnings are only logged.
    pub is_error: bool,
}

impl ConfigIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{}: {}", level, self.message)
    }
}

impl Config {
    /// Checks values that would otherwise silently fall back or render oddly.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let preview = &self.preview;
        let shimmer = &self.shimmer;

        if preview.width == 0 || preview.height == 0 {
            issues.push(ConfigIssue::error(format!(
                "preview size {}x{} must be non-zero",
                preview.width, preview.height
            )));
        }
        for (key, value) in [
            ("preview.background", &preview.background),
            ("preview.content_color", &preview.content_color),
        ] {
            if parse_hex_color(value).is_none() {
                issues.push(ConfigIssue::error(format!("{} '{}' is not a hex color", key, value)));
            }
        }
        if LayoutDirection::parse(&preview.direction).is_none() {
            issues.push(ConfigIssue::error(format!(
                "preview.direction '{}' must be 'ltr' or 'rtl'",
                preview.direction
            )));
        }

        if TimingCurve::parse(&shimmer.curve).is_none() {
            issues.push(ConfigIssue::error(format!(
                "shimmer.curve '{}' is not a known curve",
                shimmer.curve
            )));
        }
        if !(shimmer.duration > 0.0) {
            issues.push(ConfigIssue::warning(format!(
                "shimmer.duration {} jumps straight to the end",
                shimmer.duration
            )));
        }
        if !(shimmer.delay >= 0.0) {
            issues.push(ConfigIssue::warning(format!(
                "shimmer.delay {} is treated as 0",
                shimmer.delay
            )));
        }
        let animation = ShimmerAnimation::from_seconds(shimmer.duration, shimmer.bounce, shimmer.delay);
        if animation.cycle_length().is_none() {
            issues.push(ConfigIssue::error(format!(
                "shimmer.duration {} with delay {} is too long to play",
                shimmer.duration, shimmer.delay
            )));
        }
        if shimmer.band_size < 0.0 {
            issues.push(ConfigIssue::warning(format!(
                "shimmer.band_size {} is negative; the band stays inside the content",
                shimmer.band_size
            )));
        }

        if let Some(stops) = &shimmer.gradient {
            if stops.is_empty() {
                issues.push(ConfigIssue::warning("shimmer.gradient is empty; no mask is drawn"));
            }
            for (i, stop) in stops.iter().enumerate() {
                if parse_hex_color(&stop.color).is_none() {
                    issues.push(ConfigIssue::error(format!(
                        "shimmer.gradient[{}].color '{}' is not a hex color",
                        i, stop.color
                    )));
                }
                if !(0.0..=1.0).contains(&stop.opacity) {
                    issues.push(ConfigIssue::warning(format!(
                        "shimmer.gradient[{}].opacity {} is outside 0-1 and will be clamped",
                        i, stop.opacity
                    )));
                }
            }
        }

        issues
    }

    /// Builds the effect config. Unparseable values fall back to defaults.
    pub fn shimmer_config(&self) -> ShimmerConfig {
        let shimmer = &self.shimmer;

        let animation = ShimmerAnimation::from_seconds(shimmer.duration, shimmer.bounce, shimmer.delay)
            .repeat_forever(shimmer.repeat)
            .curve(TimingCurve::parse(&shimmer.curve).unwrap_or_default());

        let gradient = match &shimmer.gradient {
            Some(stops) => stops
                .iter()
                .map(|stop| {
                    let color = parse_hex_color(&stop.color).unwrap_or((0.0, 0.0, 0.0, 1.0));
                    GradientStop::new(color, stop.opacity)
                })
                .collect(),
            None => default_gradient(),
        };

        ShimmerConfig::new(animation, gradient, shimmer.band_size)
    }

    pub fn direction(&self) -> LayoutDirection {
        LayoutDirection::parse(&self.preview.direction).unwrap_or_default()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.preview.width, self.preview.height)
    }

    pub fn background(&self) -> Color {
        parse_hex_color(&self.preview.background).unwrap_or((0.12, 0.12, 0.18, 1.0))
    }

    pub fn content_color(&self) -> Color {
        parse_hex_color(&self.preview.content_color).unwrap_or((0.80, 0.84, 0.96, 1.0))
    }

    /// Length of one full animation cycle including the delay.
    ///
    /// Saturates at `Duration::MAX`; `validate` reports such values.
    pub fn cycle_length(&self) -> Duration {
        self.shimmer_config()
            .animation
            .cycle_length()
            .unwrap_or(Duration::MAX)
    }
}

/// Parse a hex color string into RGBA components (0.0-1.0)
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    let component = |i: usize| -> Option<f32> {
        let pair = hex.get(i..i + 2)?;
        Some(u8::from_str_radix(pair, 16).ok()? as f32 / 255.0)
    };

    match hex.len() {
        6 => Some((component(0)?, component(2)?, component(4)?, 1.0)),
        8 => Some((component(0)?, component(2)?, component(4)?, component(6)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some((1.0, 1.0, 1.0, 1.0)));
        assert_eq!(parse_hex_color("#000000"), Some((0.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_hex_color("#ff0000"), Some((1.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_hex_color("00ff00ff"), Some((0.0, 1.0, 0.0, 1.0)));
        assert_eq!(parse_hex_color("invalid"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.size(), (320, 96));
        assert_eq!(config.direction(), LayoutDirection::LeftToRight);
        assert_eq!(config.shimmer_config(), ShimmerConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r##"
            [preview]
            width = 200
            height = 50
            direction = "rtl"

            [shimmer]
            duration = 2.0
            delay = 0.0
            bounce = true
            curve = "ease_in_out"
            band_size = 0.5
            gradient = [
              { opacity = 0.2 },
              { color = "#ffffff", opacity = 1.0 },
            ]
            "##,
        )
        .unwrap();

        assert_eq!(config.size(), (200, 50));
        assert_eq!(config.direction(), LayoutDirection::RightToLeft);

        let shimmer = config.shimmer_config();
        assert_eq!(shimmer.animation.duration, Duration::from_secs(2));
        assert_eq!(shimmer.animation.delay, Duration::ZERO);
        assert!(shimmer.animation.auto_reverses);
        assert_eq!(shimmer.animation.curve, TimingCurve::EaseInOut);
        assert_eq!(shimmer.band_size, 0.5);
        assert_eq!(shimmer.gradient.len(), 2);
        assert_eq!(shimmer.gradient[0].color, (0.0, 0.0, 0.0, 1.0));
        assert_eq!(shimmer.gradient[1].color, (1.0, 1.0, 1.0, 1.0));
        assert_eq!(config.cycle_length(), Duration::from_secs(4));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validation_errors() {
        let config: Config = toml::from_str(
            r##"
            [preview]
            width = 0
            background = "blue"
            direction = "up"

            [shimmer]
            curve = "spring"
            "##,
        )
        .unwrap();

        let errors: Vec<_> = config.validate().into_iter().filter(|i| i.is_error).collect();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_overflowing_cycle_is_an_error() {
        let config: Config = toml::from_str(
            r##"
            [shimmer]
            duration = 1.0e19
            bounce = true
            "##,
        )
        .unwrap();

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert!(issues[0].message.contains("shimmer.duration"));
        assert_eq!(config.cycle_length(), Duration::MAX);
    }

    #[test]
    fn test_validation_warnings_keep_values() {
        let config: Config = toml::from_str(
            r##"
            [shimmer]
            duration = 0.0
            band_size = -0.1
            gradient = [{ opacity = 1.5 }]
            "##,
        )
        .unwrap();

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| !i.is_error));
        assert_eq!(config.shimmer_config().band_size, -0.1);
    }

    #[test]
    fn test_issue_display() {
        let issue = ConfigIssue::warning("careful");
        assert_eq!(issue.to_string(), "warning: careful");
    }
}
