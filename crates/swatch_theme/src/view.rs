//! Presentation seam
//!
//! Controllers push their derived state through [`ThemeView`] for immediate
//! feedback. Every method has a no-op default, so a view that has not
//! rendered a given control simply ignores the update.

use crate::document::{AliasRole, Device, TypeSize};
use crate::tokens::{ShadeKey, ShadeShifts, Shadow};

/// UI-facing attributes of one shadow layer row
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRow {
    pub index: usize,
    /// Displayed ordinal, `Layer N` with N starting at 1
    pub heading: String,
    /// Index the row's remove control targets
    pub remove_target: usize,
    /// Index the row's visibility toggle targets
    pub visibility_target: usize,
    pub shadow: Shadow,
    pub visible: bool,
}

impl LayerRow {
    pub fn new(index: usize, shadow: &Shadow, visible: bool) -> Self {
        Self {
            index,
            heading: format!("Layer {}", index + 1),
            remove_target: index,
            visibility_target: index,
            shadow: shadow.clone(),
            visible,
        }
    }
}

#[allow(unused_variables)]
pub trait ThemeView {
    // Shade ramps
    fn paint_shade(&mut self, palette: &str, shade: ShadeKey, color: &str) {}
    fn mark_base_shade(&mut self, palette: &str, shade: ShadeKey, is_base: bool) {}
    fn set_shift_controls(&mut self, palette: &str, shade: ShadeKey, enabled: bool) {}
    fn set_shift_values(&mut self, palette: &str, shade: ShadeKey, shifts: ShadeShifts) {}
    fn close_shade_panels(&mut self, palette: &str) {}

    // Shadow layers
    fn render_layer(&mut self, row: &LayerRow) {}
    fn remove_layer_row(&mut self, index: usize) {}
    fn set_layer_enabled(&mut self, index: usize, enabled: bool) {}
    fn set_shadow_preview(&mut self, composite: &str) {}
    fn set_shadow_field(&mut self, composite: &str) {}

    // Document controls
    fn set_color_control(&mut self, name: &str, color: &str) {}
    fn set_radius(&mut self, radius: &str) {}
    fn set_alias(&mut self, palette: &str, role: AliasRole, shade: ShadeKey) {}
    fn set_alias_swatch(&mut self, palette: &str, role: AliasRole, color: &str) {}
    fn set_typography(&mut self, device: Device, size: &str, value: TypeSize) {}
    fn set_weight(&mut self, name: &str, weight: u16) {}
    fn set_animation(&mut self, name: &str, seconds: f32) {}
    fn set_json_preview(&mut self, json: &str) {}
}

/// A view with nothing rendered
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl ThemeView for NullView {}

/// One presentation update captured by [`RecordedView`]
#[derive(Clone, Debug, PartialEq)]
pub enum ViewUpdate {
    PaintShade { palette: String, shade: ShadeKey, color: String },
    MarkBase { palette: String, shade: ShadeKey, is_base: bool },
    ShiftControls { palette: String, shade: ShadeKey, enabled: bool },
    ShiftValues { palette: String, shade: ShadeKey, shifts: ShadeShifts },
    ClosePanels { palette: String },
    Layer(LayerRow),
    RemoveLayerRow(usize),
    LayerEnabled { index: usize, enabled: bool },
    ShadowPreview(String),
    ShadowField(String),
    ColorControl { name: String, color: String },
    Radius(String),
    Alias { palette: String, role: AliasRole, shade: ShadeKey },
    AliasSwatch { palette: String, role: AliasRole, color: String },
    Typography { device: Device, size: String, value: TypeSize },
    Weight { name: String, weight: u16 },
    Animation { name: String, seconds: f32 },
    JsonPreview(String),
}

/// Headless view that records every update in order
#[derive(Debug, Default)]
pub struct RecordedView {
    updates: Vec<ViewUpdate>,
}

impl RecordedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[ViewUpdate] {
        &self.updates
    }

    pub fn clear(&mut self) {
        self.updates.clear();
    }

    /// Latest color painted for a shade
    pub fn shade_color(&self, palette: &str, shade: ShadeKey) -> Option<&str> {
        self.updates.iter().rev().find_map(|update| match update {
            ViewUpdate::PaintShade {
                palette: p,
                shade: s,
                color,
            } if p == palette && *s == shade => Some(color.as_str()),
            _ => None,
        })
    }

    /// Latest rendered row for each index below `count`
    pub fn layer_rows(&self, count: usize) -> Vec<Option<&LayerRow>> {
        (0..count)
            .map(|index| {
                self.updates.iter().rev().find_map(|update| match update {
                    ViewUpdate::Layer(row) if row.index == index => Some(row),
                    _ => None,
                })
            })
            .collect()
    }

    pub fn last_shadow_preview(&self) -> Option<&str> {
        self.updates.iter().rev().find_map(|update| match update {
            ViewUpdate::ShadowPreview(value) => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn last_json_preview(&self) -> Option<&str> {
        self.updates.iter().rev().find_map(|update| match update {
            ViewUpdate::JsonPreview(value) => Some(value.as_str()),
            _ => None,
        })
    }

    fn push(&mut self, update: ViewUpdate) {
        self.updates.push(update);
    }
}

impl ThemeView for RecordedView {
    fn paint_shade(&mut self, palette: &str, shade: ShadeKey, color: &str) {
        self.push(ViewUpdate::PaintShade {
            palette: palette.to_string(),
            shade,
            color: color.to_string(),
        });
    }

    fn mark_base_shade(&mut self, palette: &str, shade: ShadeKey, is_base: bool) {
        self.push(ViewUpdate::MarkBase {
            palette: palette.to_string(),
            shade,
            is_base,
        });
    }

    fn set_shift_controls(&mut self, palette: &str, shade: ShadeKey, enabled: bool) {
        self.push(ViewUpdate::ShiftControls {
            palette: palette.to_string(),
            shade,
            enabled,
        });
    }

    fn set_shift_values(&mut self, palette: &str, shade: ShadeKey, shifts: ShadeShifts) {
        self.push(ViewUpdate::ShiftValues {
            palette: palette.to_string(),
            shade,
            shifts,
        });
    }

    fn close_shade_panels(&mut self, palette: &str) {
        self.push(ViewUpdate::ClosePanels {
            palette: palette.to_string(),
        });
    }

    fn render_layer(&mut self, row: &LayerRow) {
        self.push(ViewUpdate::Layer(row.clone()));
    }

    fn remove_layer_row(&mut self, index: usize) {
        self.push(ViewUpdate::RemoveLayerRow(index));
    }

    fn set_layer_enabled(&mut self, index: usize, enabled: bool) {
        self.push(ViewUpdate::LayerEnabled { index, enabled });
    }

    fn set_shadow_preview(&mut self, composite: &str) {
        self.push(ViewUpdate::ShadowPreview(composite.to_string()));
    }

    fn set_shadow_field(&mut self, composite: &str) {
        self.push(ViewUpdate::ShadowField(composite.to_string()));
    }

    fn set_color_control(&mut self, name: &str, color: &str) {
        self.push(ViewUpdate::ColorControl {
            name: name.to_string(),
            color: color.to_string(),
        });
    }

    fn set_radius(&mut self, radius: &str) {
        self.push(ViewUpdate::Radius(radius.to_string()));
    }

    fn set_alias(&mut self, palette: &str, role: AliasRole, shade: ShadeKey) {
        self.push(ViewUpdate::Alias {
            palette: palette.to_string(),
            role,
            shade,
        });
    }

    fn set_alias_swatch(&mut self, palette: &str, role: AliasRole, color: &str) {
        self.push(ViewUpdate::AliasSwatch {
            palette: palette.to_string(),
            role,
            color: color.to_string(),
        });
    }

    fn set_typography(&mut self, device: Device, size: &str, value: TypeSize) {
        self.push(ViewUpdate::Typography {
            device,
            size: size.to_string(),
            value,
        });
    }

    fn set_weight(&mut self, name: &str, weight: u16) {
        self.push(ViewUpdate::Weight {
            name: name.to_string(),
            weight,
        });
    }

    fn set_animation(&mut self, name: &str, seconds: f32) {
        self.push(ViewUpdate::Animation {
            name: name.to_string(),
            seconds,
        });
    }

    fn set_json_preview(&mut self, json: &str) {
        self.push(ViewUpdate::JsonPreview(json.to_string()));
    }
}
