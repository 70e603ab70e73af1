//! Theme event vocabulary
//!
//! Every change between editor widgets and the engine travels as one of
//! these variants over the [`EventQueue`].

use swatch_core::EventBus;

use crate::document::AliasRole;
use crate::skins::{InteractionState, SkinCategory};
use crate::tokens::ShadeKey;
use crate::typography::TypographyPath;

/// Id prefix used by site color pickers
pub const SITE_COLOR_PREFIX: &str = "site-color-";

/// What caused a generic document refresh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StylesSource {
    SimpleColor,
    Skins,
    Document,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ThemeEvent {
    /// A site color picker changed; `id` is `site-color-<name>`
    ColorSelected { id: String, color: String },
    /// A palette ramp was recomputed
    ShadesUpdated { palette: String },
    AliasChanged {
        palette: String,
        role: AliasRole,
        shade: ShadeKey,
    },
    BorderRadiusChanged { value: String },
    ShadowChanged { value: String },
    AnimationTimingChanged { name: String, seconds: f32 },
    TypographyChanged { path: TypographyPath, value: u32 },
    FontWeightChanged { weight: String, value: u16 },
    SkinColorUpdated {
        skin: String,
        category: SkinCategory,
        state: InteractionState,
        value: String,
    },
    StylesUpdated { source: StylesSource },
    ResetShades { palette: String },
    RefreshAllShades,
    ExportCss,
    ResetThemeStyles,
}

impl ThemeEvent {
    pub fn color_selected(name: &str, color: impl Into<String>) -> Self {
        ThemeEvent::ColorSelected {
            id: format!("{SITE_COLOR_PREFIX}{name}"),
            color: color.into(),
        }
    }

    /// Site color name addressed by a `ColorSelected` event
    pub fn site_color_name(&self) -> Option<&str> {
        match self {
            ThemeEvent::ColorSelected { id, .. } => id.strip_prefix(SITE_COLOR_PREFIX),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ThemeEvent::ColorSelected { .. } => "colorSelected",
            ThemeEvent::ShadesUpdated { .. } => "shadesUpdated",
            ThemeEvent::AliasChanged { .. } => "aliasChanged",
            ThemeEvent::BorderRadiusChanged { .. } => "borderRadiusChanged",
            ThemeEvent::ShadowChanged { .. } => "shadowChanged",
            ThemeEvent::AnimationTimingChanged { .. } => "animationTimingChanged",
            ThemeEvent::TypographyChanged { .. } => "typographyChanged",
            ThemeEvent::FontWeightChanged { .. } => "fontWeightChanged",
            ThemeEvent::SkinColorUpdated { .. } => "skinColorUpdated",
            ThemeEvent::StylesUpdated { .. } => "stylesUpdated",
            ThemeEvent::ResetShades { .. } => "resetShades",
            ThemeEvent::RefreshAllShades => "refreshAllShades",
            ThemeEvent::ExportCss => "exportThemeCSS",
            ThemeEvent::ResetThemeStyles => "resetThemeStyles",
        }
    }
}

pub type EventQueue = EventBus<ThemeEvent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_color_name() {
        let event = ThemeEvent::color_selected("primary", "#ff0000");
        assert_eq!(event.site_color_name(), Some("primary"));

        let foreign = ThemeEvent::ColorSelected {
            id: "brand-picker".to_string(),
            color: "#ff0000".to_string(),
        };
        assert_eq!(foreign.site_color_name(), None);
        assert_eq!(ThemeEvent::RefreshAllShades.site_color_name(), None);
    }
}
