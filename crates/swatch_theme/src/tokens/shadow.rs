//! Shadow tokens and the `box-shadow` grammar
//!
//! A composite value is split on top-level commas, each layer parsed into a
//! [`Shadow`], and layers serialized back as
//! `[inset ]<h>px <v>px <blur>px <spread>px <color>` joined with `, `.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::color::{CssColor, Rgba};

/// Named colors a shadow layer can be tinted with
pub const SHADOW_COLORS: [(&str, &str); 13] = [
    ("primary", "#3B82F6"),
    ("secondary", "#6B7280"),
    ("accent", "#10B981"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("gray", "#6B7280"),
    ("red", "#EF4444"),
    ("yellow", "#F59E0B"),
    ("green", "#10B981"),
    ("blue", "#3B82F6"),
    ("indigo", "#6366F1"),
    ("purple", "#8B5CF6"),
    ("pink", "#EC4899"),
];

/// Opacity assumed when a layer's color carries none
pub const DEFAULT_OPACITY: f32 = 0.1;

/// Hex value of a named shadow color
pub fn shadow_color_hex(name: &str) -> Option<&'static str> {
    SHADOW_COLORS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, hex)| *hex)
}

/// One layer of a composite box shadow
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub horizontal_offset: i32,
    pub vertical_offset: i32,
    pub blur_radius: i32,
    pub spread_radius: i32,
    pub color: String,
    pub color_name: String,
    pub opacity: f32,
    pub is_inset: bool,
}

impl Shadow {
    /// Shape of a freshly added editor layer
    pub fn layer_default() -> Self {
        Self {
            horizontal_offset: 2,
            vertical_offset: 4,
            blur_radius: 6,
            spread_radius: 0,
            ..Self::default()
        }
    }

    /// Set color name and opacity, regenerating the color text
    pub fn set_tint(&mut self, color_name: &str, opacity: f32) {
        let hex = shadow_color_hex(color_name).unwrap_or("#000000");
        self.color_name = color_name.to_string();
        self.opacity = opacity.clamp(0.0, 1.0);
        self.color = generate_rgba_color(hex, self.opacity);
    }

    pub fn to_css(&self) -> String {
        format!(
            "{}{}px {}px {}px {}px {}",
            if self.is_inset { "inset " } else { "" },
            self.horizontal_offset,
            self.vertical_offset,
            self.blur_radius,
            self.spread_radius,
            self.color
        )
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            horizontal_offset: 0,
            vertical_offset: 0,
            blur_radius: 0,
            spread_radius: 0,
            color: "rgba(0, 0, 0, 0.1)".to_string(),
            color_name: "black".to_string(),
            opacity: DEFAULT_OPACITY,
            is_inset: false,
        }
    }
}

impl fmt::Display for Shadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn color_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"rgba?\([^)]+\)").expect("valid rgb pattern"),
            Regex::new(r"hsla?\([^)]+\)").expect("valid hsl pattern"),
            Regex::new(r"#[0-9a-fA-F]{3,8}").expect("valid hex pattern"),
        ]
    })
}

fn inset_pattern() -> &'static Regex {
    static INSET: OnceLock<Regex> = OnceLock::new();
    INSET.get_or_init(|| Regex::new(r"\binset\b").expect("valid inset pattern"))
}

fn alpha_pattern() -> &'static Regex {
    static ALPHA: OnceLock<Regex> = OnceLock::new();
    ALPHA.get_or_init(|| {
        Regex::new(r"rgba\([^,]+,[^,]+,[^,]+,\s*([0-9.]+)\s*\)").expect("valid alpha pattern")
    })
}

/// Split a composite shadow on commas outside parentheses
///
/// Empty input yields a single empty layer.
pub fn split_shadows(composite: &str) -> Vec<String> {
    let mut layers = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for ch in composite.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if ch == ',' && depth == 0 {
            layers.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }

    if !current.trim().is_empty() {
        layers.push(current.trim().to_string());
    }

    if layers.is_empty() {
        layers.push(String::new());
    }
    layers
}

/// Leading integer of a CSS dimension, 0 when there is none
fn parse_dimension(token: &str) -> i32 {
    let digits_start = usize::from(token.starts_with('-'));
    let digits = token[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return 0;
    }
    token[..digits_start + digits].parse().unwrap_or(0)
}

/// Name of the shadow color whose channels match `color`, if any
fn color_name_for(color: &str) -> Option<&'static str> {
    let rgba = CssColor::parse(color)?.to_rgba()?;
    SHADOW_COLORS
        .iter()
        .find(|(_, hex)| Rgba::from_hex(hex).is_some_and(|candidate| candidate.same_channels(&rgba)))
        .map(|(name, _)| *name)
}

/// Parse one shadow layer; malformed input degrades to defaults field by field
pub fn parse_shadow(layer: &str) -> Shadow {
    let trimmed = layer.trim();
    if trimmed.is_empty() {
        return Shadow::default();
    }

    let is_inset = inset_pattern().is_match(trimmed);
    let mut remaining = if is_inset {
        inset_pattern().replace(trimmed, "").trim().to_string()
    } else {
        trimmed.to_string()
    };

    let mut color = Shadow::default().color;
    let mut opacity = DEFAULT_OPACITY;

    for pattern in color_patterns() {
        let Some(found) = pattern.find(&remaining) else {
            continue;
        };
        let range = found.range();
        color = found.as_str().to_string();

        if color.starts_with("rgba") {
            if let Some(alpha) = alpha_pattern()
                .captures(&color)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f32>().ok())
            {
                opacity = alpha.clamp(0.0, 1.0);
            }
        }

        remaining.replace_range(range, "");
        break;
    }

    let mut dims = remaining.split_whitespace().map(parse_dimension);
    let color_name = color_name_for(&color).unwrap_or("black").to_string();

    Shadow {
        horizontal_offset: dims.next().unwrap_or(0),
        vertical_offset: dims.next().unwrap_or(0),
        blur_radius: dims.next().unwrap_or(0),
        spread_radius: dims.next().unwrap_or(0),
        color,
        color_name,
        opacity,
        is_inset,
    }
}

/// Join layers into a composite `box-shadow` value
pub fn serialize_shadows<'a>(layers: impl IntoIterator<Item = &'a Shadow>) -> String {
    layers
        .into_iter()
        .map(Shadow::to_css)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `rgba(r, g, b, a)` from a hex color and opacity (2 decimals)
///
/// Unparseable hex falls back to black.
pub fn generate_rgba_color(hex: &str, opacity: f32) -> String {
    let rgb = Rgba::from_hex(hex).unwrap_or(Rgba::rgb(0, 0, 0));
    format!(
        "rgba({}, {}, {}, {:.2})",
        rgb.r,
        rgb.g,
        rgb.b,
        opacity.clamp(0.0, 1.0)
    )
}

/// `#rrggbb` for an rgb/hex/hsl color, for color inputs
pub fn convert_to_hex(color: &str) -> Option<String> {
    let rgba = CssColor::parse(color)?.to_rgba()?;
    Some(format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b))
}
