//! Construction-time configuration for the ring.
//!
//! [`RingConfig`] carries every option the ring understands together with its
//! default. Hosts that describe widgets with string attributes (markup, theme
//! files, command-line flags) can build one with
//! [`RingConfig::from_attributes`], which never fails: unknown keys are ignored
//! and values that do not parse keep their default.
//!
//! ```rust
//! use bubbletea_ring::config::RingConfig;
//! use bubbletea_ring::canvas::StrokeCap;
//!
//! let config = RingConfig::from_attributes([
//!     ("strokeWidth", "6"),
//!     ("max", "200"),
//!     ("progressDuration", "100"),
//!     ("strokeCap", "0"),
//! ]);
//! assert_eq!(config.stroke_width, 6.0);
//! assert_eq!(config.maximum, 200);
//! assert_eq!(config.duration_ms, 500); // floored
//! assert_eq!(config.stroke_cap, StrokeCap::Butt);
//! ```

use crate::canvas::StrokeCap;
use crate::color::{Color, ColorParseError};
use thiserror::Error;

/// Shortest allowed animation, in milliseconds. Shorter requests are raised to it.
pub const DEFAULT_DURATION_MS: u32 = 500;
/// Default ring thickness.
pub const DEFAULT_STROKE_WIDTH: f32 = 3.0;
/// Default range maximum.
pub const DEFAULT_MAXIMUM: i32 = 100;

/// Errors reported by [`RingConfig::try_from_attributes`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A float attribute that does not parse or is not finite.
    #[error("attribute {key}: expected a number, got {value:?}")]
    InvalidFloat {
        /// Attribute name.
        key: String,
        /// Rejected text.
        value: String,
    },

    /// An integer attribute that does not parse.
    #[error("attribute {key}: expected an integer, got {value:?}")]
    InvalidInt {
        /// Attribute name.
        key: String,
        /// Rejected text.
        value: String,
    },

    /// A color attribute that is neither a color string nor a packed integer.
    #[error("attribute {key}: {source}")]
    InvalidColor {
        /// Attribute name.
        key: String,
        /// Why the text form was rejected.
        #[source]
        source: ColorParseError,
    },

    /// A stroke cap that is not an integer or a known name.
    #[error("attribute strokeCap: unknown cap {0:?}")]
    InvalidStrokeCap(String),
}

/// All options of a ring, with their defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    /// Ring thickness. Attribute `strokeWidth`.
    pub stroke_width: f32,
    /// End shape of the foreground arc. Attribute `strokeCap`.
    pub stroke_cap: StrokeCap,
    /// Initial raw progress. Attribute `progress`.
    pub progress: f32,
    /// Foreground arc color. Attribute `progressbarColor`.
    pub color: Color,
    /// Background ring color. Attribute `backgroundColor`.
    pub background_color: Color,
    /// Stored for callers; the sweep only depends on `maximum`.
    pub minimum: i32,
    /// Value a full turn represents. Attribute `max`.
    pub maximum: i32,
    /// Animation duration in milliseconds. Attribute `progressDuration`.
    pub duration_ms: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_cap: StrokeCap::Round,
            progress: 0.0,
            color: Color::DARK_GRAY,
            background_color: Color::LIGHT_GRAY,
            minimum: 0,
            maximum: DEFAULT_MAXIMUM,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Raises `ms` to [`DEFAULT_DURATION_MS`] when it is shorter.
pub fn floor_duration(ms: i64) -> u32 {
    ms.clamp(DEFAULT_DURATION_MS as i64, u32::MAX as i64) as u32
}

impl RingConfig {
    /// Builds a config from `(key, value)` pairs, falling back to defaults.
    ///
    /// Recognized keys: `strokeWidth`, `progress`, `progressbarColor`,
    /// `backgroundColor`, `min`, `max`, `progressDuration`, `strokeCap`.
    /// Rejected values are logged at warn level and otherwise ignored.
    pub fn from_attributes<'a, I>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in attrs {
            if let Err(err) = config.apply_attribute(key, value) {
                tracing::warn!(%err, "ignoring ring attribute");
            }
        }
        config
    }

    /// Like [`from_attributes`](Self::from_attributes) but stops at the first
    /// value that does not parse.
    pub fn try_from_attributes<'a, I>(attrs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();
        for (key, value) in attrs {
            config.apply_attribute(key, value)?;
        }
        Ok(config)
    }

    /// Applies a single attribute. Unknown keys are accepted and ignored.
    pub fn apply_attribute(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "strokeWidth" => self.stroke_width = parse_float(key, value)?,
            "progress" => self.progress = parse_float(key, value)?,
            "progressbarColor" => self.color = parse_color(key, value)?,
            "backgroundColor" => self.background_color = parse_color(key, value)?,
            "min" => self.minimum = parse_int(key, value)?,
            "max" => self.maximum = parse_int(key, value)?,
            "progressDuration" => {
                let ms: i64 = value.parse().map_err(|_| ConfigError::InvalidInt {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                self.duration_ms = floor_duration(ms);
            }
            "strokeCap" => self.stroke_cap = parse_stroke_cap(value)?,
            _ => tracing::debug!(key, "unknown ring attribute"),
        }
        Ok(())
    }
}

fn parse_float(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidFloat {
            key: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_int(key: &str, value: &str) -> Result<i32, ConfigError> {
    value.parse::<i32>().map_err(|_| ConfigError::InvalidInt {
        key: key.to_string(),
        value: value.to_string(),
    })
}

// Colors may be given as text (`#RRGGBB`, names) or as a packed ARGB integer,
// signed or `0x`-prefixed.
fn parse_color(key: &str, value: &str) -> Result<Color, ConfigError> {
    match Color::parse(value) {
        Ok(color) => Ok(color),
        Err(source) => {
            if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
                // from_str_radix tolerates a leading sign
                if hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    if let Ok(v) = u32::from_str_radix(hex, 16) {
                        return Ok(Color(v));
                    }
                }
            } else if let Ok(v) = value.parse::<i64>() {
                if (i32::MIN as i64..=u32::MAX as i64).contains(&v) {
                    return Ok(Color(v as u32));
                }
            }
            Err(ConfigError::InvalidColor {
                key: key.to_string(),
                source,
            })
        }
    }
}

// Integer indices outside 0..=2 map to round, names are accepted as well.
fn parse_stroke_cap(value: &str) -> Result<StrokeCap, ConfigError> {
    if let Ok(index) = value.parse::<i32>() {
        return Ok(StrokeCap::from_index(index).unwrap_or(StrokeCap::Round));
    }
    match value.to_ascii_lowercase().as_str() {
        "butt" => Ok(StrokeCap::Butt),
        "round" => Ok(StrokeCap::Round),
        "square" => Ok(StrokeCap::Square),
        _ => Err(ConfigError::InvalidStrokeCap(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RingConfig::default();
        assert_eq!(config.stroke_width, 3.0);
        assert_eq!(config.stroke_cap, StrokeCap::Round);
        assert_eq!(config.progress, 0.0);
        assert_eq!(config.color, Color::DARK_GRAY);
        assert_eq!(config.background_color, Color::LIGHT_GRAY);
        assert_eq!(config.minimum, 0);
        assert_eq!(config.maximum, 100);
        assert_eq!(config.duration_ms, 500);
    }

    #[test]
    fn test_floor_duration() {
        for d in [-1000_i64, -1, 0, 1, 250, 499, 500, 501, 10_000] {
            assert_eq!(floor_duration(d) as i64, d.max(500));
        }
    }

    #[test]
    fn test_from_attributes_all_keys() {
        let config = RingConfig::from_attributes([
            ("strokeWidth", "10.5"),
            ("progress", "42"),
            ("progressbarColor", "#ff0000"),
            ("backgroundColor", "0xFF00FF00"),
            ("min", "-5"),
            ("max", "200"),
            ("progressDuration", "1200"),
            ("strokeCap", "2"),
        ]);
        assert_eq!(config.stroke_width, 10.5);
        assert_eq!(config.progress, 42.0);
        assert_eq!(config.color, Color::rgb(0xFF, 0, 0));
        assert_eq!(config.background_color, Color::rgb(0, 0xFF, 0));
        assert_eq!(config.minimum, -5);
        assert_eq!(config.maximum, 200);
        assert_eq!(config.duration_ms, 1200);
        assert_eq!(config.stroke_cap, StrokeCap::Square);
    }

    #[test]
    fn test_from_attributes_falls_back() {
        let config = RingConfig::from_attributes([
            ("strokeWidth", "thick"),
            ("progressbarColor", "not-a-color"),
            ("max", "1e3"),
            ("progressDuration", "soon"),
            ("strokeCap", "pointy"),
            ("elevation", "4"),
        ]);
        assert_eq!(config, RingConfig::default());
    }

    #[test]
    fn test_unknown_stroke_cap_index_is_round() {
        let config = RingConfig::from_attributes([("strokeCap", "7")]);
        assert_eq!(config.stroke_cap, StrokeCap::Round);
        let config = RingConfig::from_attributes([("strokeCap", "Butt")]);
        assert_eq!(config.stroke_cap, StrokeCap::Butt);
    }

    #[test]
    fn test_signed_integer_color() {
        // 0xFF000000 written as a signed 32-bit integer
        let config = RingConfig::from_attributes([("progressbarColor", "-16777216")]);
        assert_eq!(config.color, Color::BLACK);
    }

    #[test]
    fn test_prefixed_color_rejects_sign() {
        let config = RingConfig::from_attributes([("progressbarColor", "0x+FF00FF0")]);
        assert_eq!(config.color, Color::DARK_GRAY);

        let err = RingConfig::try_from_attributes([("backgroundColor", "0x-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { .. }));

        let config = RingConfig::from_attributes([("progressbarColor", "0Xff00ff00")]);
        assert_eq!(config.color, Color::rgb(0, 0xFF, 0));
    }

    #[test]
    fn test_try_from_attributes_reports_errors() {
        let err = RingConfig::try_from_attributes([("min", "zero")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidInt {
                key: "min".to_string(),
                value: "zero".to_string()
            }
        );

        let err = RingConfig::try_from_attributes([("strokeWidth", "NaN")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFloat { .. }));

        let err = RingConfig::try_from_attributes([("backgroundColor", "#12")]).unwrap_err();
        assert!(err.to_string().contains("backgroundColor"));

        let err = RingConfig::try_from_attributes([("strokeCap", "pointy")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidStrokeCap("pointy".to_string()));

        assert!(RingConfig::try_from_attributes([("max", "50"), ("unknown", "x")]).is_ok());
    }
}
