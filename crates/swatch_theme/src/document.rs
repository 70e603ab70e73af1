//! The theme document
//!
//! The single durable owner of every color, shadow, typography and animation
//! value. Everything else in the engine is a derived, re-computable copy.
//! The JSON shape is the persisted format.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;
use crate::tokens::{ShadeKey, ShadeShifts, ShiftDirection};

/// The 8 palettes that carry an 11-step shade ramp, in CSS output order
pub const PALETTES: [&str; 8] = [
    "primary",
    "secondary",
    "tertiary",
    "neutral",
    "success",
    "attention",
    "error",
    "promotion",
];

/// Site colors that never get a shade ramp
pub const SIMPLE_COLORS: [&str; 2] = ["white", "black"];

pub fn is_simple_color(name: &str) -> bool {
    SIMPLE_COLORS.contains(&name)
}

pub fn is_palette(name: &str) -> bool {
    PALETTES.contains(&name)
}

/// `var(--color-<palette>)`
pub fn site_var(palette: &str) -> String {
    format!("var(--color-{palette})")
}

/// `var(--color-<palette>-<shade>)`
pub fn shade_var(palette: &str, shade: ShadeKey) -> String {
    format!("var(--color-{palette}-{shade})")
}

/// Formula binding a palette's base shade to its site color
pub fn anchor_formula(palette: &str) -> String {
    format!("oklch(from {} l c h)", site_var(palette))
}

pub type ShadeMap = IndexMap<ShadeKey, String>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeDocument {
    pub colours: Colours,
    pub typography: Typography,
    pub radius: String,
    pub shadow: String,
    pub animation: IndexMap<String, f32>,
    #[serde(default)]
    pub skins: IndexMap<String, Skin>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colours {
    pub site: IndexMap<String, String>,
    pub shades: IndexMap<String, ShadeMap>,
    #[serde(default, rename = "baseShades")]
    pub base_shades: IndexMap<String, ShadeKey>,
    pub alias: IndexMap<String, Alias>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub shifts: IndexMap<String, IndexMap<ShadeKey, ShadeShifts>>,
}

impl Colours {
    /// Configured base shade of a palette, 500 when unset
    pub fn base_shade(&self, palette: &str) -> ShadeKey {
        self.base_shades
            .get(palette)
            .copied()
            .unwrap_or(ShadeKey::BASE)
    }
}

/// Semantic role mapped to a shade of a palette
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum AliasRole {
    Light,
    HoverLight,
    Default,
    Hover,
    Dark,
}

impl AliasRole {
    pub const ALL: [AliasRole; 5] = [
        AliasRole::Light,
        AliasRole::HoverLight,
        AliasRole::Default,
        AliasRole::Hover,
        AliasRole::Dark,
    ];

    /// Key used in the document (`hover_light`)
    pub fn as_str(self) -> &'static str {
        match self {
            AliasRole::Light => "light",
            AliasRole::HoverLight => "hover_light",
            AliasRole::Default => "default",
            AliasRole::Hover => "hover",
            AliasRole::Dark => "dark",
        }
    }

    /// Name used in CSS variables (`hover-light`)
    pub fn css_name(self) -> String {
        self.as_str().replace('_', "-")
    }
}

impl fmt::Display for AliasRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AliasRole {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        AliasRole::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| ThemeError::UnknownAlias(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub light: ShadeKey,
    pub hover_light: ShadeKey,
    pub default: ShadeKey,
    pub hover: ShadeKey,
    pub dark: ShadeKey,
}

impl Alias {
    pub fn get(&self, role: AliasRole) -> ShadeKey {
        match role {
            AliasRole::Light => self.light,
            AliasRole::HoverLight => self.hover_light,
            AliasRole::Default => self.default,
            AliasRole::Hover => self.hover,
            AliasRole::Dark => self.dark,
        }
    }

    pub fn set(&mut self, role: AliasRole, shade: ShadeKey) {
        match role {
            AliasRole::Light => self.light = shade,
            AliasRole::HoverLight => self.hover_light = shade,
            AliasRole::Default => self.default = shade,
            AliasRole::Hover => self.hover = shade,
            AliasRole::Dark => self.dark = shade,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AliasRole, ShadeKey)> + '_ {
        AliasRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

impl Default for Alias {
    fn default() -> Self {
        Self {
            light: ShadeKey::S50,
            hover_light: ShadeKey::S400,
            default: ShadeKey::S500,
            hover: ShadeKey::S600,
            dark: ShadeKey::S950,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSize {
    pub line_height: u32,
    pub font_size: u32,
}

impl TypeSize {
    pub const fn new(font_size: u32, line_height: u32) -> Self {
        Self {
            line_height,
            font_size,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    pub desktop: IndexMap<String, TypeSize>,
    pub mobile: IndexMap<String, TypeSize>,
    pub weights: IndexMap<String, u16>,
}

/// Breakpoints carried by the typography scale
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Device {
    Desktop,
    Mobile,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Desktop, Device::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Mobile => "mobile",
        }
    }
}

impl Typography {
    pub fn sizes(&self, device: Device) -> &IndexMap<String, TypeSize> {
        match device {
            Device::Desktop => &self.desktop,
            Device::Mobile => &self.mobile,
        }
    }

    pub fn sizes_mut(&mut self, device: Device) -> &mut IndexMap<String, TypeSize> {
        match device {
            Device::Desktop => &mut self.desktop,
            Device::Mobile => &mut self.mobile,
        }
    }
}

/// Color references for one skin category across interaction states
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateColors {
    pub default: String,
    pub hover: String,
    pub focus: String,
    pub active: String,
    pub disabled: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub background: StateColors,
    pub foreground: StateColors,
    pub border: StateColors,
}

fn state_colors(default: &str, hover: &str, focus: &str, active: &str, disabled: &str) -> StateColors {
    let var = |name: &str| {
        if name == "transparent" {
            name.to_string()
        } else {
            format!("var(--color-{name})")
        }
    };
    StateColors {
        default: var(default),
        hover: var(hover),
        focus: var(focus),
        active: var(active),
        disabled: var(disabled),
    }
}

impl Default for Skin {
    fn default() -> Self {
        Self {
            background: state_colors("white", "neutral-50", "neutral-50", "neutral-200", "neutral-50"),
            foreground: state_colors(
                "black",
                "neutral-700",
                "neutral-700",
                "neutral-600",
                "neutral-400",
            ),
            border: state_colors(
                "black",
                "neutral-300",
                "neutral-400",
                "neutral-500",
                "neutral-200",
            ),
        }
    }
}

impl Skin {
    /// The muted preset shipped with the default document
    pub fn muted() -> Self {
        Self {
            background: state_colors(
                "neutral-200",
                "neutral-300",
                "neutral-300",
                "neutral-400",
                "neutral-100",
            ),
            foreground: state_colors(
                "neutral-700",
                "neutral-700",
                "neutral-700",
                "neutral-700",
                "neutral-400",
            ),
            border: state_colors(
                "transparent",
                "transparent",
                "transparent",
                "transparent",
                "transparent",
            ),
        }
    }
}

/// Default formula ramp for a palette anchored at 500
pub fn default_ramp(palette: &str) -> ShadeMap {
    let mut ramp = ShadeMap::new();
    for key in ShadeKey::ALL {
        let formula = match key.cmp(&ShadeKey::BASE) {
            std::cmp::Ordering::Equal => anchor_formula(palette),
            std::cmp::Ordering::Less => {
                let reference = key.darker().unwrap_or(ShadeKey::BASE);
                ShadeShifts::LIGHTER.formula(&shade_var(palette, reference), ShiftDirection::Lighter)
            }
            std::cmp::Ordering::Greater => {
                let reference = key.lighter().unwrap_or(ShadeKey::BASE);
                ShadeShifts::DARKER.formula(&shade_var(palette, reference), ShiftDirection::Darker)
            }
        };
        ramp.insert(key, formula);
    }
    ramp
}

fn sizes(entries: [(&str, u32, u32); 8]) -> IndexMap<String, TypeSize> {
    entries
        .into_iter()
        .map(|(name, font, line)| (name.to_string(), TypeSize::new(font, line)))
        .collect()
}

impl Default for ThemeDocument {
    fn default() -> Self {
        let site = [
            ("primary", "oklch(0.43 0.0147 248.17)"),
            ("secondary", "oklch(0.67 0.15 250)"),
            ("tertiary", "oklch(0.65 0.2 300)"),
            ("neutral", "oklch(0.64 0 0)"),
            ("attention", "oklch(0.55 0.12 250)"),
            ("success", "oklch(0.5 0.15 150)"),
            ("error", "oklch(0.55 0.2 30)"),
            ("promotion", "oklch(0.6 0.25 30)"),
            ("white", "#ffffff"),
            ("black", "#000000"),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_string(), color.to_string()))
        .collect();

        let shades = PALETTES
            .iter()
            .map(|palette| (palette.to_string(), default_ramp(palette)))
            .collect();
        let alias = PALETTES
            .iter()
            .map(|palette| (palette.to_string(), Alias::default()))
            .collect();

        let weights = [
            ("thin", 100),
            ("extra_light", 200),
            ("light", 300),
            ("regular", 400),
            ("medium", 500),
            ("semi_bold", 600),
            ("bold", 700),
            ("extra_bold", 800),
            ("black", 900),
        ]
        .into_iter()
        .map(|(name, weight)| (name.to_string(), weight))
        .collect();

        let animation = [("none", 0.0), ("quick", 0.1), ("default", 0.2), ("slow", 0.3)]
            .into_iter()
            .map(|(name, seconds)| (name.to_string(), seconds))
            .collect();

        let mut skins = IndexMap::new();
        skins.insert("skin".to_string(), Skin::default());
        skins.insert("skinMuted".to_string(), Skin::muted());

        Self {
            colours: Colours {
                site,
                shades,
                base_shades: IndexMap::new(),
                alias,
                shifts: IndexMap::new(),
            },
            typography: Typography {
                desktop: sizes([
                    ("2xl", 45, 56),
                    ("xl", 37, 48),
                    ("2lg", 30, 40),
                    ("lg", 24, 32),
                    ("md", 20, 28),
                    ("body", 16, 24),
                    ("sm", 14, 20),
                    ("xs", 13, 20),
                ]),
                mobile: sizes([
                    ("2xl", 32, 40),
                    ("xl", 28, 36),
                    ("2lg", 24, 32),
                    ("lg", 21, 28),
                    ("md", 18, 24),
                    ("body", 16, 24),
                    ("sm", 14, 20),
                    ("xs", 13, 20),
                ]),
                weights,
            },
            radius: "0.5rem".to_string(),
            shadow: "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06), 0 2px 8px 0 rgba(0, 0, 0, 0.1)".to_string(),
            animation,
            skins,
        }
    }
}

impl ThemeDocument {
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON used by the live preview
    pub fn to_json_pretty(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ramp_chain() {
        let ramp = default_ramp("primary");
        assert_eq!(ramp.len(), 11);
        assert_eq!(ramp[&ShadeKey::S500], "oklch(from var(--color-primary) l c h)");
        assert_eq!(
            ramp[&ShadeKey::S50],
            "oklch(from var(--color-primary-100) calc(1 - (1 - l) * 0.6) calc(c * 0.8) calc(h + 0))"
        );
        assert_eq!(
            ramp[&ShadeKey::S950],
            "oklch(from var(--color-primary-900) calc(l * 0.8) calc(c * 1.1) calc(h + 0))"
        );
    }

    #[test]
    fn test_default_document_shape() {
        let doc = ThemeDocument::default();
        assert_eq!(doc.colours.site.len(), 10);
        assert_eq!(doc.colours.shades.len(), PALETTES.len());
        assert_eq!(doc.colours.base_shade("primary"), ShadeKey::S500);
        assert_eq!(doc.typography.desktop["2xl"], TypeSize::new(45, 56));
        assert_eq!(doc.typography.weights["semi_bold"], 600);
        assert_eq!(doc.animation["slow"], 0.3);
        assert_eq!(doc.skins["skin"].background.default, "var(--color-white)");
        assert_eq!(doc.skins["skinMuted"].border.hover, "transparent");
    }

    #[test]
    fn test_alias_role_parsing() {
        assert_eq!("hover_light".parse::<AliasRole>().unwrap(), AliasRole::HoverLight);
        assert_eq!("hover-light".parse::<AliasRole>().unwrap(), AliasRole::HoverLight);
        assert!("shadow".parse::<AliasRole>().is_err());
        assert_eq!(AliasRole::HoverLight.css_name(), "hover-light");
    }

    #[test]
    fn test_reads_legacy_json() {
        let json = r#"{
            "colours": {
                "site": {"primary": "oklch(0.5 0.1 250)"},
                "shades": {"primary": {"500": "oklch(from var(--color-primary) l c h)"}},
                "alias": {"primary": {"light": "50", "hover_light": "400", "default": "500", "hover": "600", "dark": "950"}}
            },
            "typography": {"desktop": {}, "mobile": {}, "weights": {"bold": 700}},
            "radius": "4px",
            "shadow": "none",
            "animation": {"quick": 0.1}
        }"#;

        let doc = ThemeDocument::from_json(json).unwrap();
        assert!(doc.colours.base_shades.is_empty());
        assert!(doc.skins.is_empty());
        assert_eq!(doc.colours.alias["primary"].hover, ShadeKey::S600);
    }
}
