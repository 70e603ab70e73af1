//! Shadow-layer editor state
//!
//! [`ShadowLayers`] holds the ordered layer stack behind the shadow editor.
//! Layer indices are always contiguous from zero; every structural change
//! re-renders the affected rows so headings and control targets never go
//! stale. Edits schedule a debounced recompute of the composite value, which
//! is announced as `ShadowChanged` for the style manager to store.

use std::time::{Duration, Instant};
use swatch_core::Debouncer;

use crate::context::ThemeContext;
use crate::error::{Result, ThemeError};
use crate::events::ThemeEvent;
use crate::tokens::{parse_shadow, serialize_shadows, split_shadows, Shadow};
use crate::view::LayerRow;

/// Quiet window before layer edits recompute the composite
pub const DEFAULT_SHADOW_DEBOUNCE: Duration = Duration::from_millis(50);

/// Readiness id of the shadow editor
pub const SHADOW_LAYERS_COMPONENT: &str = "shadow-layers";

/// Composite value of a stack with nothing visible
pub const NO_SHADOW: &str = "none";

#[derive(Clone, Debug, PartialEq)]
pub struct ShadowLayer {
    pub shadow: Shadow,
    pub visible: bool,
}

impl ShadowLayer {
    pub fn new(shadow: Shadow) -> Self {
        Self {
            shadow,
            visible: true,
        }
    }
}

/// A single control edit on one layer
#[derive(Clone, Debug, PartialEq)]
pub enum LayerField {
    HorizontalOffset(i32),
    VerticalOffset(i32),
    BlurRadius(i32),
    SpreadRadius(i32),
    ColorName(String),
    Opacity(f32),
    Inset(bool),
}

impl LayerField {
    fn apply(self, shadow: &mut Shadow) {
        match self {
            LayerField::HorizontalOffset(v) => shadow.horizontal_offset = v,
            LayerField::VerticalOffset(v) => shadow.vertical_offset = v,
            LayerField::BlurRadius(v) => shadow.blur_radius = v.max(0),
            LayerField::SpreadRadius(v) => shadow.spread_radius = v,
            LayerField::ColorName(name) => {
                let opacity = shadow.opacity;
                shadow.set_tint(&name, opacity);
            }
            LayerField::Opacity(opacity) => {
                let name = shadow.color_name.clone();
                shadow.set_tint(&name, opacity);
            }
            LayerField::Inset(inset) => shadow.is_inset = inset,
        }
    }
}

pub struct ShadowLayers {
    layers: Vec<ShadowLayer>,
    /// Text of the composite shadow field
    field: String,
    recompute: Debouncer,
}

impl Default for ShadowLayers {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowLayers {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            field: String::new(),
            recompute: Debouncer::new(DEFAULT_SHADOW_DEBOUNCE),
        }
    }

    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.recompute = Debouncer::new(window);
        self
    }

    pub fn layers(&self) -> &[ShadowLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&ShadowLayer> {
        self.layers.get(index)
    }

    pub fn field_text(&self) -> &str {
        &self.field
    }

    pub fn has_pending(&self) -> bool {
        self.recompute.is_pending()
    }

    /// Append a default layer and return its index
    pub fn add_layer(&mut self, ctx: &mut ThemeContext<'_>, now: Instant) -> usize {
        let index = self.push_layer(Shadow::layer_default(), ctx);
        tracing::debug!("ShadowLayers::add_layer - layer {}", index);
        self.recompute.schedule(now);
        index
    }

    /// Delete a layer and renumber the rows after it
    pub fn remove_layer(
        &mut self,
        index: usize,
        ctx: &mut ThemeContext<'_>,
        now: Instant,
    ) -> Result<ShadowLayer> {
        self.check_index(index)?;
        let removed = self.layers.remove(index);
        let old_last = self.layers.len();

        for (i, layer) in self.layers.iter().enumerate().skip(index) {
            ctx.view.render_layer(&LayerRow::new(i, &layer.shadow, layer.visible));
        }
        ctx.view.remove_layer_row(old_last);

        tracing::debug!("ShadowLayers::remove_layer - layer {}, {} left", index, self.layers.len());
        self.recompute.schedule(now);
        Ok(removed)
    }

    /// Flip a layer's visibility; returns the new state
    pub fn toggle_visibility(
        &mut self,
        index: usize,
        ctx: &mut ThemeContext<'_>,
        now: Instant,
    ) -> Result<bool> {
        self.check_index(index)?;
        let layer = &mut self.layers[index];
        layer.visible = !layer.visible;
        ctx.view.set_layer_enabled(index, layer.visible);

        self.recompute.schedule(now);
        Ok(layer.visible)
    }

    /// Edit one field of a visible layer
    pub fn set_field(
        &mut self,
        index: usize,
        field: LayerField,
        ctx: &mut ThemeContext<'_>,
        now: Instant,
    ) -> Result<()> {
        self.check_index(index)?;
        let layer = &mut self.layers[index];
        if !layer.visible {
            return Err(ThemeError::LayerHidden(index));
        }
        field.apply(&mut layer.shadow);
        ctx.view.render_layer(&LayerRow::new(index, &layer.shadow, layer.visible));

        self.recompute.schedule(now);
        Ok(())
    }

    /// Composite of the visible layers in index order
    pub fn composite(&self) -> String {
        let visible: Vec<&Shadow> = self
            .layers
            .iter()
            .filter(|layer| layer.visible)
            .map(|layer| &layer.shadow)
            .collect();
        if visible.is_empty() {
            return NO_SHADOW.to_string();
        }
        serialize_shadows(visible)
    }

    /// Rebuild the composite, show it, and announce it
    pub fn recompute_composite(&mut self, ctx: &mut ThemeContext<'_>) -> String {
        self.recompute.cancel();
        let composite = self.composite();
        self.field = composite.clone();
        ctx.view.set_shadow_preview(&composite);
        ctx.view.set_shadow_field(&composite);
        ctx.emit(ThemeEvent::ShadowChanged {
            value: composite.clone(),
        });
        composite
    }

    pub fn poll(&mut self, now: Instant, ctx: &mut ThemeContext<'_>) -> bool {
        if self.recompute.fire_if_due(now) {
            self.recompute_composite(ctx);
            return true;
        }
        false
    }

    pub fn flush(&mut self, ctx: &mut ThemeContext<'_>) -> bool {
        if self.recompute.flush() {
            self.recompute_composite(ctx);
            return true;
        }
        false
    }

    /// Show a stored composite in the preview and field without touching layers
    pub fn show_stored(&mut self, composite: &str, ctx: &mut ThemeContext<'_>) {
        self.field = composite.to_string();
        ctx.view.set_shadow_preview(composite);
        ctx.view.set_shadow_field(composite);
    }

    /// Record text typed into the composite field
    pub fn set_field_text(&mut self, text: &str) {
        self.field = text.to_string();
    }

    /// Replace every layer with the layers parsed from `composite`
    ///
    /// Empty input or `none` yields one default layer.
    pub fn rebuild_from_string(&mut self, composite: &str, ctx: &mut ThemeContext<'_>, now: Instant) {
        for index in (0..self.layers.len()).rev() {
            ctx.view.remove_layer_row(index);
        }
        self.layers.clear();

        let trimmed = composite.trim();
        let parts: Vec<String> = if trimmed.is_empty() || trimmed == NO_SHADOW {
            Vec::new()
        } else {
            split_shadows(trimmed)
                .into_iter()
                .filter(|part| !part.trim().is_empty())
                .collect()
        };

        if parts.is_empty() {
            self.push_layer(Shadow::layer_default(), ctx);
        } else {
            for part in &parts {
                self.push_layer(parse_shadow(part), ctx);
            }
        }

        tracing::debug!("ShadowLayers::rebuild_from_string - {} layers", self.layers.len());
        self.recompute.schedule(now);
    }

    /// Rebuild only if the field still shows `stored`
    pub fn rebuild_if_current(&mut self, stored: &str, ctx: &mut ThemeContext<'_>, now: Instant) -> bool {
        if self.field != stored {
            tracing::warn!(
                "ShadowLayers: field changed to {:?} since restore, keeping current layers",
                self.field
            );
            return false;
        }
        self.rebuild_from_string(stored, ctx, now);
        true
    }

    fn push_layer(&mut self, shadow: Shadow, ctx: &mut ThemeContext<'_>) -> usize {
        let index = self.layers.len();
        let layer = ShadowLayer::new(shadow);
        ctx.view.render_layer(&LayerRow::new(index, &layer.shadow, layer.visible));
        self.layers.push(layer);
        index
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.layers.len() {
            return Err(ThemeError::LayerOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        Ok(())
    }
}
