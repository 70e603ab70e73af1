//! Skin storage and color reference resolution
//!
//! Skins map category x interaction state to a color reference, usually a
//! `var(--color-<palette>-<shade>)`. References resolve against the theme
//! document by evaluating the shade formula chain.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::document::{AliasRole, Skin, StateColors, ThemeDocument};
use crate::error::ThemeError;
use crate::tokens::{CssColor, RelativeColor, ShadeKey};

/// Reference chains longer than this are treated as cycles
const MAX_REFERENCE_DEPTH: usize = 16;

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SkinCategory {
    Background,
    Foreground,
    Border,
}

impl SkinCategory {
    pub const ALL: [SkinCategory; 3] = [
        SkinCategory::Background,
        SkinCategory::Foreground,
        SkinCategory::Border,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkinCategory::Background => "background",
            SkinCategory::Foreground => "foreground",
            SkinCategory::Border => "border",
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum InteractionState {
    Default,
    Hover,
    Focus,
    Active,
    Disabled,
}

impl InteractionState {
    pub const ALL: [InteractionState; 5] = [
        InteractionState::Default,
        InteractionState::Hover,
        InteractionState::Focus,
        InteractionState::Active,
        InteractionState::Disabled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionState::Default => "default",
            InteractionState::Hover => "hover",
            InteractionState::Focus => "focus",
            InteractionState::Active => "active",
            InteractionState::Disabled => "disabled",
        }
    }
}

impl fmt::Display for SkinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinCategory {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkinCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| ThemeError::Skin {
                kind: "category",
                value: s.to_string(),
            })
    }
}

impl FromStr for InteractionState {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InteractionState::ALL
            .into_iter()
            .find(|state| state.as_str() == s.trim())
            .ok_or_else(|| ThemeError::Skin {
                kind: "state",
                value: s.to_string(),
            })
    }
}

impl StateColors {
    pub fn get(&self, state: InteractionState) -> &str {
        match state {
            InteractionState::Default => &self.default,
            InteractionState::Hover => &self.hover,
            InteractionState::Focus => &self.focus,
            InteractionState::Active => &self.active,
            InteractionState::Disabled => &self.disabled,
        }
    }

    pub fn set(&mut self, state: InteractionState, value: String) {
        match state {
            InteractionState::Default => self.default = value,
            InteractionState::Hover => self.hover = value,
            InteractionState::Focus => self.focus = value,
            InteractionState::Active => self.active = value,
            InteractionState::Disabled => self.disabled = value,
        }
    }
}

impl Skin {
    pub fn category(&self, category: SkinCategory) -> &StateColors {
        match category {
            SkinCategory::Background => &self.background,
            SkinCategory::Foreground => &self.foreground,
            SkinCategory::Border => &self.border,
        }
    }

    pub fn category_mut(&mut self, category: SkinCategory) -> &mut StateColors {
        match category {
            SkinCategory::Background => &mut self.background,
            SkinCategory::Foreground => &mut self.foreground,
            SkinCategory::Border => &mut self.border,
        }
    }
}

/// The named skin, or the default skin shape when absent
pub fn get_skin(doc: &ThemeDocument, name: &str) -> Skin {
    doc.skins.get(name).cloned().unwrap_or_default()
}

/// Write one skin color, creating the skin from defaults if needed
///
/// Returns true when the stored value changed.
pub fn set_skin_color(
    doc: &mut ThemeDocument,
    name: &str,
    category: SkinCategory,
    state: InteractionState,
    value: &str,
) -> bool {
    let skin = doc.skins.entry(name.to_string()).or_default();
    let colors = skin.category_mut(category);
    if colors.get(state) == value {
        return false;
    }
    colors.set(state, value.to_string());
    true
}

fn fallback_pattern() -> &'static Regex {
    static FALLBACK: OnceLock<Regex> = OnceLock::new();
    FALLBACK.get_or_init(|| {
        Regex::new(r"var\([^,]+,\s*(var\(--color-[^)]+\))\)").expect("valid fallback pattern")
    })
}

fn color_var_pattern() -> &'static Regex {
    static COLOR_VAR: OnceLock<Regex> = OnceLock::new();
    COLOR_VAR.get_or_init(|| Regex::new(r"var\(--color-([^)]+)\)").expect("valid color var pattern"))
}

/// `var(--x, var(--color-white))` becomes `var(--color-white)`
pub fn simplify_color_value(value: &str) -> &str {
    fallback_pattern()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(value)
}

/// The `<name>` in `var(--color-<name>)`, empty when there is none
pub fn parse_color_value(value: &str) -> &str {
    color_var_pattern()
        .captures(simplify_color_value(value))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Resolve a color reference to a concrete color
///
/// Plain values are returned as-is. Unresolvable references become
/// `transparent`.
pub fn resolve_color_reference(doc: &ThemeDocument, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "transparent".to_string();
    }
    if !value.starts_with("var(") {
        return value.to_string();
    }

    let name = parse_color_value(value);
    if name.is_empty() {
        return "transparent".to_string();
    }

    resolve_color_name(doc, name, 0).unwrap_or_else(|| "transparent".to_string())
}

fn resolve_color_name(doc: &ThemeDocument, name: &str, depth: usize) -> Option<String> {
    if depth > MAX_REFERENCE_DEPTH {
        tracing::warn!("color reference chain too deep at --color-{}", name);
        return None;
    }

    match name {
        "white" => return Some("#ffffff".to_string()),
        "black" => return Some("#000000".to_string()),
        _ => {}
    }

    if let Some(site) = doc.colours.site.get(name) {
        return Some(site.clone());
    }

    let (palette, suffix) = name.split_once('-')?;
    let shade = match suffix.parse::<ShadeKey>() {
        Ok(shade) => shade,
        Err(_) => {
            let role = suffix.parse::<AliasRole>().ok()?;
            doc.colours.alias.get(palette)?.get(role)
        }
    };
    resolve_shade(doc, palette, shade, depth)
}

/// Evaluate a stored shade to a concrete color
fn resolve_shade(doc: &ThemeDocument, palette: &str, shade: ShadeKey, depth: usize) -> Option<String> {
    let stored = doc.colours.shades.get(palette)?.get(&shade)?;

    if CssColor::parse(stored).is_some() {
        return Some(stored.clone());
    }

    let relative = RelativeColor::parse(stored)?;
    let reference = match relative.reference_var() {
        Some(var) => {
            let name = var.strip_prefix("--color-")?;
            resolve_color_name(doc, name, depth + 1)?
        }
        None => relative.reference.clone(),
    };

    let base = CssColor::parse(&reference)?.to_oklch();
    Some(relative.resolve(base).to_css())
}
