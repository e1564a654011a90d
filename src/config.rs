//! Configuration for the trail plugins.
//!
//! Options are keyed by plugin id the way a chart's `options.plugins` block
//! is, with camelCase keys:
//!
//! ```json
//! {
//!   "hitRadius": 10,
//!   "plugins": {
//!     "dragTrail": { "trailFillColor": "#c7c7c7", "trailRadius": 4 },
//!     "trail": { "trailBorderColor": "rgba(0, 0, 255, 0.5)" }
//!   }
//! }
//! ```
//!
//! Every option is optional. A missing value, an empty color string or a
//! zero/negative/NaN number falls back to the default look.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::data::trail_look::TrailLook;

/// Pixel radius within which a pointer-down grabs a data point.
pub const DEFAULT_HIT_RADIUS: f32 = 10.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid color {0:?}")]
    InvalidColor(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-plugin options
// ─────────────────────────────────────────────────────────────────────────────

/// Styling options of one plugin, as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_radius: Option<f32>,
}

impl TrailOptions {
    /// Options that reproduce `look` exactly.
    pub fn from_look(look: &TrailLook) -> Self {
        Self {
            trail_fill_color: Some(look.fill.to_hex()),
            trail_border_color: Some(look.border.to_hex()),
            trail_border_width: Some(look.border_width),
            trail_radius: Some(look.radius),
        }
    }

    /// Resolve to a concrete look, falling back to defaults per field.
    pub fn resolve(&self) -> TrailLook {
        let defaults = TrailLook::default();
        TrailLook {
            fill: resolve_color(self.trail_fill_color.as_deref(), defaults.fill, "trailFillColor"),
            border: resolve_color(
                self.trail_border_color.as_deref(),
                defaults.border,
                "trailBorderColor",
            ),
            border_width: positive(self.trail_border_width).unwrap_or(defaults.border_width),
            radius: positive(self.trail_radius).unwrap_or(defaults.radius),
        }
    }
}

fn positive(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn resolve_color(raw: Option<&str>, default: Color32, key: &str) -> Color32 {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => default,
        Some(s) => parse_color(s).unwrap_or_else(|err| {
            tracing::warn!(%err, key, "falling back to default trail color");
            default
        }),
    }
}

/// Options for every plugin, keyed by plugin id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginOptions(pub BTreeMap<String, TrailOptions>);

impl PluginOptions {
    pub fn set(&mut self, plugin_id: impl Into<String>, options: TrailOptions) {
        self.0.insert(plugin_id.into(), options);
    }

    pub fn get(&self, plugin_id: &str) -> Option<&TrailOptions> {
        self.0.get(plugin_id)
    }

    /// Resolved look for a plugin; plugins without options get the default look.
    pub fn look_for(&self, plugin_id: &str) -> TrailLook {
        self.get(plugin_id)
            .map(TrailOptions::resolve)
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Top-level config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailConfig {
    pub plugins: PluginOptions,
    /// Grab radius of the point-drag plugin, in pixels.
    pub hit_radius: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            plugins: PluginOptions::default(),
            hit_radius: DEFAULT_HIT_RADIUS,
        }
    }
}

impl TrailConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Load from a file; `.yaml`/`.yml` files are read as YAML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_str(&text)
        } else {
            Self::from_json_str(&text)
        }
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Grab radius, with non-positive values replaced by the default.
    pub fn effective_hit_radius(&self) -> f32 {
        positive(Some(self.hit_radius)).unwrap_or(DEFAULT_HIT_RADIUS)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a CSS-style color: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
/// `rgb(r, g, b)`, `rgba(r, g, b, a)` or a handful of named colors.
pub fn parse_color(s: &str) -> Result<Color32, ConfigError> {
    let s = s.trim();
    let invalid = || ConfigError::InvalidColor(s.to_string());

    if s.starts_with('#') {
        return Color32::from_hex(s).map_err(|_| invalid());
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb_args(args).ok_or_else(invalid);
    }

    let named = match lower.as_str() {
        "black" => Color32::BLACK,
        "white" => Color32::WHITE,
        "red" => Color32::from_rgb(255, 0, 0),
        "green" => Color32::from_rgb(0, 128, 0),
        "blue" => Color32::from_rgb(0, 0, 255),
        "gray" | "grey" => Color32::from_rgb(128, 128, 128),
        "silver" => Color32::from_rgb(192, 192, 192),
        "orange" => Color32::from_rgb(255, 165, 0),
        "transparent" => Color32::TRANSPARENT,
        _ => return Err(invalid()),
    };
    Ok(named)
}

fn parse_rgb_args(args: &str) -> Option<Color32> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| -> Option<u8> {
        let v: f32 = p.parse().ok()?;
        v.is_finite().then(|| v.round().clamp(0.0, 255.0) as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(p) => {
            let v: f32 = p.parse().ok()?;
            if !v.is_finite() {
                return None;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}
