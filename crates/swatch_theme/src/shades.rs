//! Per-palette shade ramp management
//!
//! A [`ShadeManager`] owns one palette's 11-step ramp. The base shade holds
//! the palette's absolute color; every other shade is a formula deriving from
//! its neighbour one step closer to the base, so the reference chain always
//! terminates at the base without cycles.

use indexmap::IndexMap;
use std::time::{Duration, Instant};
use swatch_core::Debouncer;

use crate::context::ThemeContext;
use crate::document::{shade_var, ShadeMap, ThemeDocument};
use crate::error::{Result, ThemeError};
use crate::events::ThemeEvent;
use crate::tokens::{preview_shade, ShadeKey, ShadeShifts, ShiftDirection};

/// Quiet window before shift slider edits recompute the ramp
pub const DEFAULT_SHIFT_DEBOUNCE: Duration = Duration::from_millis(10);

/// One shade of a ramp
#[derive(Clone, Debug, PartialEq)]
pub struct ShadeData {
    /// Concrete preview color (absolute for the base shade)
    pub color: String,
    pub shifts: ShadeShifts,
}

/// Which coefficient a shift slider edits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftAxis {
    Lightness,
    Chroma,
    Hue,
}

impl ShadeShifts {
    pub fn with(mut self, axis: ShiftAxis, value: f32) -> Self {
        match axis {
            ShiftAxis::Lightness => self.l = value,
            ShiftAxis::Chroma => self.c = value,
            ShiftAxis::Hue => self.h = value,
        }
        self
    }
}

/// Default shifts by position on the scale: lighter below 500, darker above
fn captured_defaults() -> [ShadeShifts; 11] {
    ShadeKey::ALL.map(|key| {
        if key < ShadeKey::BASE {
            ShadeShifts::LIGHTER
        } else {
            ShadeShifts::DARKER
        }
    })
}

pub struct ShadeManager {
    palette: String,
    base_shade: ShadeKey,
    base_color: String,
    shades: [ShadeData; 11],
    default_shifts: [ShadeShifts; 11],
    shift_debounce: Debouncer,
}

impl ShadeManager {
    pub fn new(palette: impl Into<String>, base_color: impl Into<String>) -> Self {
        let base_color = base_color.into();
        let default_shifts = captured_defaults();
        let mut shades = default_shifts.map(|shifts| ShadeData {
            color: String::new(),
            shifts,
        });
        shades[ShadeKey::BASE.index()].color = base_color.clone();

        Self {
            palette: palette.into(),
            base_shade: ShadeKey::BASE,
            base_color,
            shades,
            default_shifts,
            shift_debounce: Debouncer::new(DEFAULT_SHIFT_DEBOUNCE),
        }
    }

    /// Build from the persisted base shade, shade colors and shifts
    pub fn from_document(palette: &str, doc: &ThemeDocument) -> Result<Self> {
        let base_color = doc
            .colours
            .site
            .get(palette)
            .ok_or_else(|| ThemeError::UnknownPalette(palette.to_string()))?;

        let mut manager = Self::new(palette, base_color.clone());
        manager.base_shade = doc.colours.base_shade(palette);

        if let Some(stored) = doc.colours.shades.get(palette) {
            for (key, color) in stored {
                manager.shades[key.index()].color = color.clone();
            }
        }
        if let Some(stored) = doc.colours.shifts.get(palette) {
            for (key, shifts) in stored {
                manager.shades[key.index()].shifts = *shifts;
            }
        }

        manager.shades[manager.base_shade.index()].color = base_color.clone();
        tracing::debug!(
            "ShadeManager::from_document - {} anchored at {}",
            palette,
            manager.base_shade
        );
        Ok(manager)
    }

    pub fn with_shift_debounce(mut self, window: Duration) -> Self {
        self.shift_debounce = Debouncer::new(window);
        self
    }

    /// Readiness id for this controller
    pub fn component_id(&self) -> String {
        format!("shades:{}", self.palette)
    }

    pub fn palette(&self) -> &str {
        &self.palette
    }

    pub fn base_shade(&self) -> ShadeKey {
        self.base_shade
    }

    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    pub fn shade(&self, key: ShadeKey) -> &ShadeData {
        &self.shades[key.index()]
    }

    /// Concrete preview colors, lightest first
    pub fn colors(&self) -> IndexMap<ShadeKey, String> {
        ShadeKey::ALL
            .into_iter()
            .map(|key| (key, self.shades[key.index()].color.clone()))
            .collect()
    }

    /// Recompute the whole ramp from the base outward
    ///
    /// Writes formulas, base shade and shifts into the document, paints every
    /// shade, then announces `ShadesUpdated`.
    pub fn update_shades(&mut self, ctx: &mut ThemeContext<'_>) {
        let palette = self.palette.clone();
        let base = self.base_shade;

        let base_color = match self.shades[base.index()].color.as_str() {
            "" => self.base_color.clone(),
            color => color.to_string(),
        };
        self.shades[base.index()].color = base_color.clone();
        ctx.view.paint_shade(&palette, base, &base_color);

        let mut formulas: [String; 11] = Default::default();
        formulas[base.index()] = base_color;

        let walks = [
            (ShiftDirection::Lighter, base.walk_lighter()),
            (ShiftDirection::Darker, base.walk_darker()),
        ];
        for (direction, walk) in walks {
            let mut previous = base;
            for key in walk {
                let shifts = self.shades[key.index()].shifts;
                let preview = preview_shade(&self.shades[previous.index()].color, shifts, direction);

                formulas[key.index()] = shifts.formula(&shade_var(&palette, previous), direction);
                ctx.view.paint_shade(&palette, key, &preview);
                self.shades[key.index()].color = preview;
                previous = key;
            }
        }

        let ramp: ShadeMap = ShadeKey::ALL
            .into_iter()
            .zip(formulas)
            .collect();
        ctx.doc.colours.shades.insert(palette.clone(), ramp);
        ctx.doc.colours.base_shades.insert(palette.clone(), base);

        let custom: IndexMap<ShadeKey, ShadeShifts> = ShadeKey::ALL
            .into_iter()
            .filter(|key| *key != base)
            .map(|key| (key, self.shades[key.index()].shifts))
            .collect();
        let all_default = custom
            .iter()
            .all(|(key, shifts)| *shifts == self.default_shifts[key.index()]);
        if all_default {
            ctx.doc.colours.shifts.shift_remove(&palette);
        } else {
            ctx.doc.colours.shifts.insert(palette.clone(), custom);
        }

        tracing::debug!("ShadeManager::update_shades - {} recomputed from {}", palette, base);
        ctx.emit(ThemeEvent::ShadesUpdated { palette });
    }

    /// Move the anchor to another shade and recompute
    pub fn set_base_shade(&mut self, shade: ShadeKey, ctx: &mut ThemeContext<'_>) {
        if shade == self.base_shade {
            return;
        }
        let old = self.base_shade;
        tracing::debug!(
            "ShadeManager::set_base_shade - {} from {} to {}",
            self.palette,
            old,
            shade
        );

        ctx.view.mark_base_shade(&self.palette, old, false);
        ctx.view.set_shift_controls(&self.palette, old, true);
        ctx.view.mark_base_shade(&self.palette, shade, true);
        ctx.view.set_shift_controls(&self.palette, shade, false);

        if let Some(site) = ctx.doc.colours.site.get(&self.palette) {
            self.base_color = site.clone();
        }
        self.base_shade = shade;
        self.shades[shade.index()].color = self.base_color.clone();
        ctx.doc
            .colours
            .base_shades
            .insert(self.palette.clone(), shade);

        self.update_shades(ctx);
    }

    /// Restore captured default shifts and the 500 anchor
    pub fn reset(&mut self, ctx: &mut ThemeContext<'_>) {
        self.shift_debounce.cancel();
        for key in ShadeKey::ALL {
            let defaults = self.default_shifts[key.index()];
            self.shades[key.index()].shifts = defaults;
            ctx.view.set_shift_values(&self.palette, key, defaults);
        }

        if self.base_shade != ShadeKey::BASE {
            self.set_base_shade(ShadeKey::BASE, ctx);
        } else {
            self.update_shades(ctx);
        }
        ctx.view.close_shade_panels(&self.palette);
    }

    /// Direct edit of one shade's color input
    ///
    /// Editing the base re-anchors the whole ramp; any other shade only
    /// changes its own preview until the next recompute.
    pub fn edit_shade(&mut self, shade: ShadeKey, value: &str, ctx: &mut ThemeContext<'_>) {
        let value = value.trim();
        if shade == self.base_shade {
            self.base_color = value.to_string();
            self.shades[shade.index()].color = value.to_string();
            ctx.doc
                .colours
                .site
                .insert(self.palette.clone(), value.to_string());
            ctx.view.set_color_control(&self.palette, value);
            self.update_shades(ctx);
        } else {
            self.shades[shade.index()].color = value.to_string();
            ctx.view.paint_shade(&self.palette, shade, value);
        }
    }

    /// Change one shift coefficient; the recompute is debounced
    ///
    /// Returns false for the base shade, which has no shifts.
    pub fn set_shift(&mut self, shade: ShadeKey, axis: ShiftAxis, value: f32, now: Instant) -> bool {
        let shifts = self.shades[shade.index()].shifts.with(axis, value);
        self.set_shifts(shade, shifts, now)
    }

    pub fn set_shifts(&mut self, shade: ShadeKey, shifts: ShadeShifts, now: Instant) -> bool {
        if shade == self.base_shade {
            tracing::debug!("ShadeManager: {} {} is the base shade, shifts ignored", self.palette, shade);
            return false;
        }
        self.shades[shade.index()].shifts = shifts;
        self.shift_debounce.schedule(now);
        true
    }

    pub fn has_pending(&self) -> bool {
        self.shift_debounce.is_pending()
    }

    /// Run a debounced recompute if its quiet window has passed
    pub fn poll(&mut self, now: Instant, ctx: &mut ThemeContext<'_>) -> bool {
        if self.shift_debounce.fire_if_due(now) {
            self.update_shades(ctx);
            return true;
        }
        false
    }

    /// Run a pending recompute immediately
    pub fn flush(&mut self, ctx: &mut ThemeContext<'_>) -> bool {
        if self.shift_debounce.flush() {
            self.update_shades(ctx);
            return true;
        }
        false
    }

    pub fn handle(&mut self, event: &ThemeEvent, ctx: &mut ThemeContext<'_>) {
        match event {
            ThemeEvent::ColorSelected { color, .. }
                if event.site_color_name() == Some(self.palette.as_str()) =>
            {
                self.base_color = color.clone();
                self.shades[self.base_shade.index()].color = color.clone();
                self.update_shades(ctx);
            }
            ThemeEvent::ResetShades { palette } if *palette == self.palette => self.reset(ctx),
            ThemeEvent::RefreshAllShades => self.update_shades(ctx),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventQueue;
    use crate::tokens::{CssColor, RelativeColor};
    use crate::view::RecordedView;

    struct Harness {
        doc: ThemeDocument,
        events: EventQueue,
        view: RecordedView,
    }

    impl Harness {
        fn new() -> Self {
            let mut doc = ThemeDocument::default();
            doc.colours
                .site
                .insert("primary".to_string(), "oklch(0.5 0.1 250)".to_string());
            Self {
                doc,
                events: EventQueue::new(),
                view: RecordedView::new(),
            }
        }

        fn ctx(&mut self) -> ThemeContext<'_> {
            ThemeContext::new(&mut self.doc, &mut self.events, &mut self.view)
        }
    }

    #[test]
    fn test_update_is_deterministic() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();

        manager.update_shades(&mut h.ctx());
        let first_doc = h.doc.colours.shades["primary"].clone();
        let first_colors = manager.colors();

        manager.update_shades(&mut h.ctx());
        assert_eq!(h.doc.colours.shades["primary"], first_doc);
        assert_eq!(manager.colors(), first_colors);
    }

    #[test]
    fn test_darker_chain_uses_each_shade_shifts() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();
        manager.set_shifts(ShadeKey::S700, ShadeShifts::new(0.5, 1.0, 10.0), Instant::now());
        manager.update_shades(&mut h.ctx());

        assert_eq!(manager.shade(ShadeKey::S500).color, "oklch(0.5 0.1 250)");
        assert_eq!(manager.shade(ShadeKey::S600).color, "oklch(0.4 0.11 250)");
        assert_eq!(manager.shade(ShadeKey::S700).color, "oklch(0.2 0.11 260)");
        assert_eq!(
            h.doc.colours.shades["primary"][&ShadeKey::S700],
            "oklch(from var(--color-primary-600) calc(l * 0.5) calc(c * 1) calc(h + 10))"
        );
        assert_eq!(
            h.doc.colours.shifts["primary"][&ShadeKey::S700],
            ShadeShifts::new(0.5, 1.0, 10.0)
        );
        assert_eq!(h.events.pop(), Some(ThemeEvent::ShadesUpdated { palette: "primary".to_string() }));
    }

    #[test]
    fn test_set_base_shade_reanchors() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();
        manager.update_shades(&mut h.ctx());
        manager.set_base_shade(ShadeKey::S300, &mut h.ctx());

        let ramp = &h.doc.colours.shades["primary"];
        let absolute: Vec<ShadeKey> = ramp
            .iter()
            .filter(|(_, value)| CssColor::parse(value).is_some())
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(absolute, vec![ShadeKey::S300]);
        assert_eq!(h.doc.colours.base_shades["primary"], ShadeKey::S300);

        for key in ShadeKey::ALL.into_iter().filter(|key| *key != ShadeKey::S300) {
            let mut current = key;
            let mut steps = 0;
            while current != ShadeKey::S300 {
                let formula = RelativeColor::parse(&ramp[&current]).unwrap();
                let var = formula.reference_var().unwrap();
                current = var.rsplit('-').next().unwrap().parse().unwrap();
                steps += 1;
                assert!(steps <= 10, "cycle from {key}");
            }
        }

        assert!(h.view.updates().contains(&crate::view::ViewUpdate::ShiftControls {
            palette: "primary".to_string(),
            shade: ShadeKey::S300,
            enabled: false,
        }));
    }

    #[test]
    fn test_set_base_shade_same_is_noop() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();
        manager.set_base_shade(ShadeKey::S500, &mut h.ctx());

        assert!(h.view.updates().is_empty());
        assert!(h.events.is_idle());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();
        manager.set_shifts(ShadeKey::S200, ShadeShifts::new(0.1, 0.1, 90.0), Instant::now());
        manager.set_base_shade(ShadeKey::S700, &mut h.ctx());
        manager.reset(&mut h.ctx());

        assert_eq!(manager.base_shade(), ShadeKey::S500);
        assert_eq!(manager.shade(ShadeKey::S200).shifts, ShadeShifts::LIGHTER);
        assert!(!manager.has_pending());
        assert!(!h.doc.colours.shifts.contains_key("primary"));
        assert_eq!(
            h.view.updates().last(),
            Some(&crate::view::ViewUpdate::ClosePanels { palette: "primary".to_string() })
        );
    }

    #[test]
    fn test_edit_non_base_is_local() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();
        manager.update_shades(&mut h.ctx());
        let before = h.doc.clone();

        manager.edit_shade(ShadeKey::S200, "#ff0000", &mut h.ctx());
        assert_eq!(manager.shade(ShadeKey::S200).color, "#ff0000");
        assert_eq!(h.doc, before);

        manager.update_shades(&mut h.ctx());
        assert_ne!(manager.shade(ShadeKey::S200).color, "#ff0000");
    }

    #[test]
    fn test_edit_base_reanchors() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();
        manager.edit_shade(ShadeKey::S500, "oklch(0.6 0.2 120)", &mut h.ctx());

        assert_eq!(h.doc.colours.site["primary"], "oklch(0.6 0.2 120)");
        assert_eq!(manager.shade(ShadeKey::S600).color, "oklch(0.48 0.22 120)");
    }

    #[test]
    fn test_shift_on_base_rejected() {
        let mut manager = ShadeManager::new("primary", "oklch(0.5 0.1 250)");
        assert!(!manager.set_shift(ShadeKey::S500, ShiftAxis::Lightness, 0.2, Instant::now()));
        assert!(!manager.has_pending());
    }

    #[test]
    fn test_shift_debounce() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc)
            .unwrap()
            .with_shift_debounce(Duration::from_millis(10));
        let start = Instant::now();

        manager.set_shift(ShadeKey::S600, ShiftAxis::Hue, 5.0, start);
        manager.set_shift(ShadeKey::S600, ShiftAxis::Hue, 8.0, start + Duration::from_millis(5));
        assert!(!manager.poll(start + Duration::from_millis(12), &mut h.ctx()));
        assert!(manager.poll(start + Duration::from_millis(15), &mut h.ctx()));
        assert_eq!(manager.shade(ShadeKey::S600).color, "oklch(0.4 0.11 258)");
    }

    #[test]
    fn test_handle_ignores_other_palettes() {
        let mut h = Harness::new();
        let mut manager = ShadeManager::from_document("primary", &h.doc).unwrap();

        manager.handle(&ThemeEvent::color_selected("secondary", "#fff"), &mut h.ctx());
        manager.handle(&ThemeEvent::ResetShades { palette: "error".to_string() }, &mut h.ctx());
        assert!(h.events.is_idle());

        manager.handle(&ThemeEvent::color_selected("primary", "oklch(0.7 0.1 100)"), &mut h.ctx());
        assert_eq!(manager.base_color(), "oklch(0.7 0.1 100)");
        assert_eq!(h.events.pending(), 1);
    }

    #[test]
    fn test_unknown_palette() {
        let doc = ThemeDocument::default();
        assert!(matches!(
            ShadeManager::from_document("brand", &doc),
            Err(ThemeError::UnknownPalette(_))
        ));
    }
}
