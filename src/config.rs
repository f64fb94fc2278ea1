//! Tuning settings and file-based configuration.
//!
//! [`Settings`] is the record a host tweaks per gesture.  [`Config`] wraps
//! it together with everything the `jelly-trace` tool needs to set up a
//! control, and is loaded from a JSON file whose path is passed on the
//! command line (`--config <path>`).
//!
//! # Example
//!
//! ```json
//! {
//!   "edge": "left",
//!   "container": { "width": 375.0, "height": 667.0 },
//!   "settings": {
//!     "trigger_threshold": 0.4,
//!     "flexibility": 0.7,
//!     "inner_view_offset": 0.0
//!   },
//!   "palette": ["#2c3136", "#f25f5c", "#ffe066"],
//!   "driver": { "settle_frames": 36, "fire_frames": 24 }
//! }
//! ```

use crate::edge::EdgeSide;
use crate::geometry::Size;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Tuning knobs for one control.
///
/// Ratios are conceptually in `[0.0, 1.0]` but are not clamped; keeping
/// them sensible is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fraction of the stretch extent a pull must cross to fire.  Default: `0.4`.
    pub trigger_threshold: f64,
    /// How far the inner control points lean towards the edge.  Default: `0.4`.
    pub inner_point_ratio: f64,
    /// How far the outer control points bow out from the tip, as a fraction
    /// of the edge length.  Default: `0.25`.
    pub outer_point_ratio: f64,
    /// Multiplier on finger travel; lower feels stiffer.  Default: `0.7`.
    pub flexibility: f64,
    /// Spring mass handed to the animation driver.  Default: `1.0`.
    pub mass: f64,
    /// Spring stiffness handed to the animation driver.  Default: `400.0`.
    pub stiffness: f64,
    /// Inward shift of the content view along the stretch axis.  Default: `0.0`.
    pub inner_view_offset: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trigger_threshold: 0.4,
            inner_point_ratio: 0.4,
            outer_point_ratio: 0.25,
            flexibility: 0.7,
            mass: 1.0,
            stiffness: 400.0,
            inner_view_offset: 0.0,
        }
    }
}

/// An RGBA color with components in `[0.0, 1.0]`.
///
/// In JSON either an object `{"r":..,"g":..,"b":..,"a":..}` (`a` optional)
/// or a hex string `"#rrggbb"` / `"#rrggbbaa"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: if hex.len() == 8 { channel(6)? } else { 1.0 },
        })
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Color;
            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "object {{r, g, b, a?}} or hex string \"#rrggbb\"")
            }
            fn visit_map<A>(self, mut map: A) -> Result<Color, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut r = None;
                let mut g = None;
                let mut b = None;
                let mut a = None;
                while let Some(k) = map.next_key::<String>()? {
                    match k.as_str() {
                        "r" => r = Some(map.next_value()?),
                        "g" => g = Some(map.next_value()?),
                        "b" => b = Some(map.next_value()?),
                        "a" => a = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }
                Ok(Color {
                    r: r.ok_or_else(|| DeError::missing_field("r"))?,
                    g: g.ok_or_else(|| DeError::missing_field("g"))?,
                    b: b.ok_or_else(|| DeError::missing_field("b"))?,
                    a: a.unwrap_or(1.0),
                })
            }
            fn visit_str<E>(self, s: &str) -> Result<Color, E>
            where
                E: DeError,
            {
                Color::from_hex(s).ok_or_else(|| DeError::custom(format!("invalid color: {:?}", s)))
            }
        }
        deserializer.deserialize_any(V)
    }
}

/// Palette used when none is configured.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0.96, 0.37, 0.36),
        Color::rgb(1.00, 0.88, 0.40),
        Color::rgb(0.44, 0.76, 0.70),
        Color::rgb(0.17, 0.19, 0.21),
    ]
}

/// Frame counts for the built-in [`EasingDriver`](crate::driver::EasingDriver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Display ticks a settle-back transition lasts.  Default: `36`.
    pub settle_frames: u32,
    /// Display ticks a fire transition lasts.  Default: `24`.
    pub fire_frames: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            settle_frames: 36,
            fire_frames: 24,
        }
    }
}

/// Top-level configuration.
///
/// Every field is optional; `{}` is a valid file and yields a left-edge
/// control on a 375×667 container with default settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub edge: EdgeSide,
    pub container: Size,
    pub settings: Settings,
    pub palette: Vec<Color>,
    pub driver: DriverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edge: EdgeSide::Left,
            container: Size::new(375.0, 667.0),
            settings: Settings::default(),
            palette: default_palette(),
            driver: DriverConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
