//! Theme builder orchestration
//!
//! [`ThemeBuilder`] wires the style manager, one shade manager per palette,
//! and the shadow-layer editor to a single event queue and view. Events are
//! dispatched in FIFO order to every controller and then to external
//! subscribers.
//!
//! Startup is gated on readiness rather than timers: every controller is
//! registered with a [`ReadinessGate`], and the document is replayed into
//! the UI exactly once, when the last required component reports ready.

use indexmap::IndexMap;
use std::time::Instant;
use swatch_core::{ReadinessGate, SubscriptionId};

use crate::config::{EngineConfig, TimingConfig};
use crate::context::ThemeContext;
use crate::css::generate_theme_css;
use crate::document::{AliasRole, Device, ThemeDocument, PALETTES};
use crate::error::{Result, ThemeError};
use crate::events::{EventQueue, StylesSource, ThemeEvent};
use crate::export::{ExportChain, ExportOutcome};
use crate::layers::{LayerField, ShadowLayers, SHADOW_LAYERS_COMPONENT};
use crate::shades::{ShadeManager, ShiftAxis};
use crate::skins::{InteractionState, SkinCategory};
use crate::state::StyleManager;
use crate::storage::{FileStorage, MemoryStorage, ThemeStorage};
use crate::tokens::{ShadeKey, ShadeShifts};
use crate::typography::{TypeProperty, TypographyPath};
use crate::view::{NullView, ThemeView};

pub struct ThemeBuilder<V: ThemeView = NullView> {
    styles: StyleManager,
    shades: IndexMap<String, ShadeManager>,
    layers: ShadowLayers,
    view: V,
    events: EventQueue,
    readiness: ReadinessGate,
    export: ExportChain,
    timing: TimingConfig,
    started: bool,
    synchronized: bool,
    /// Stored shadow awaiting a guarded layer rebuild once the queue drains
    pending_settle: Option<String>,
}

impl<V: ThemeView> ThemeBuilder<V> {
    pub fn new(storage: Box<dyn ThemeStorage>, view: V) -> Self {
        Self::with_timing(storage, view, TimingConfig::default())
    }

    pub fn with_timing(storage: Box<dyn ThemeStorage>, view: V, timing: TimingConfig) -> Self {
        let styles = StyleManager::new(storage);
        let mut builder = Self {
            styles,
            shades: IndexMap::new(),
            layers: ShadowLayers::new().with_debounce(timing.shadow_debounce()),
            view,
            events: EventQueue::new(),
            readiness: ReadinessGate::new(),
            export: ExportChain::default(),
            timing,
            started: false,
            synchronized: false,
            pending_settle: None,
        };
        builder.build_controllers();
        builder
    }

    /// Storage, export chain and debounce windows from configuration
    pub fn from_config(config: &EngineConfig, view: V) -> Self {
        let storage: Box<dyn ThemeStorage> = match &config.storage.path {
            Some(path) => Box::new(FileStorage::new(path)),
            None => Box::new(MemoryStorage::new()),
        };
        Self::with_timing(storage, view, config.timing.clone()).with_export(ExportChain::standard(
            config.export.dir.clone(),
            config.export.filename.clone(),
        ))
    }

    pub fn with_export(mut self, export: ExportChain) -> Self {
        self.export = export;
        self
    }

    fn build_controllers(&mut self) {
        self.shades.clear();
        let doc = self.styles.document();
        for palette in PALETTES {
            match ShadeManager::from_document(palette, doc) {
                Ok(manager) => {
                    let manager = manager.with_shift_debounce(self.timing.shade_debounce());
                    self.readiness.require(manager.component_id());
                    self.shades.insert(palette.to_string(), manager);
                }
                Err(e) => tracing::warn!("ThemeBuilder: skipping shade ramp: {}", e),
            }
        }
        self.readiness.require(SHADOW_LAYERS_COMPONENT);
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Register an extra component the UI replay must wait for
    pub fn require(&mut self, component: &str) {
        self.readiness.require(component);
    }

    /// Initialize every controller and signal them ready
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let palettes: Vec<String> = self.shades.keys().cloned().collect();
        for palette in palettes {
            if let Some(manager) = self.shades.get_mut(&palette) {
                let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
                manager.update_shades(&mut ctx);
                let id = manager.component_id();
                self.component_ready(&id);
            }
        }
        self.component_ready(SHADOW_LAYERS_COMPONENT);
        self.dispatch();
    }

    /// Report a component initialized; returns true if this opened the gate
    pub fn component_ready(&mut self, component: &str) -> bool {
        if !self.readiness.mark_ready(component) {
            return false;
        }
        tracing::debug!("ThemeBuilder: all components ready, synchronizing UI");
        self.synchronize_ui();
        self.dispatch();
        true
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    pub fn readiness(&self) -> &ReadinessGate {
        &self.readiness
    }

    /// Replay the document into the view and re-fire change events
    fn synchronize_ui(&mut self) {
        if self.synchronized {
            return;
        }
        self.synchronized = true;
        let doc = self.styles.document();

        for (name, color) in &doc.colours.site {
            self.view.set_color_control(name, color);
            self.events.emit(ThemeEvent::color_selected(name, color.clone()));
        }

        self.view.set_radius(&doc.radius);

        let stored_shadow = doc.shadow.clone();
        {
            let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
            self.layers.show_stored(&stored_shadow, &mut ctx);
        }
        self.pending_settle = Some(stored_shadow);

        let doc = self.styles.document();
        for (palette, alias) in &doc.colours.alias {
            for (role, shade) in alias.iter() {
                self.view.set_alias(palette, role, shade);
            }
        }

        for device in Device::ALL {
            for (size, value) in doc.typography.sizes(device) {
                self.view.set_typography(device, size, *value);
                for (property, px) in [
                    (TypeProperty::FontSize, value.font_size),
                    (TypeProperty::LineHeight, value.line_height),
                ] {
                    self.events.emit(ThemeEvent::TypographyChanged {
                        path: TypographyPath::size(device, size, property),
                        value: px,
                    });
                }
            }
        }
        for (name, weight) in &doc.typography.weights {
            self.view.set_weight(name, *weight);
        }

        for (name, seconds) in &doc.animation {
            self.view.set_animation(name, *seconds);
            self.events.emit(ThemeEvent::AnimationTimingChanged {
                name: name.clone(),
                seconds: *seconds,
            });
        }

        self.events.emit(ThemeEvent::RefreshAllShades);
    }

    /// Rebuild shadow layers and alias swatches from settled state
    fn settle(&mut self) {
        let Some(stored) = self.pending_settle.take() else {
            return;
        };
        let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
        self.layers.rebuild_if_current(&stored, &mut ctx, Instant::now());
        self.paint_alias_swatches();
    }

    fn paint_alias_swatches(&mut self) {
        let doc = self.styles.document();
        for (palette, alias) in &doc.colours.alias {
            let Some(manager) = self.shades.get(palette) else {
                continue;
            };
            for (role, shade) in alias.iter() {
                self.view
                    .set_alias_swatch(palette, role, &manager.shade(shade).color);
            }
        }
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Drain the queue; returns the number of events handled
    pub fn dispatch(&mut self) -> usize {
        let limit = self.events.limit();
        let mut handled = 0;

        while let Some(event) = self.events.pop() {
            if handled >= limit {
                tracing::warn!(
                    "ThemeBuilder: dispatch limit {} reached at {}, dropping {} queued events",
                    limit,
                    event.kind(),
                    self.events.pending()
                );
                self.events.clear();
                break;
            }
            handled += 1;
            self.route(&event);
            self.events.notify(&event);
        }

        if self.events.is_idle() {
            self.settle();
        }
        self.styles.save_if_dirty();
        handled
    }

    fn route(&mut self, event: &ThemeEvent) {
        tracing::trace!("ThemeBuilder: dispatching {}", event.kind());

        for manager in self.shades.values_mut() {
            let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
            manager.handle(event, &mut ctx);
        }
        self.styles.handle(event, &mut self.events, &mut self.view);

        match event {
            ThemeEvent::AliasChanged {
                palette,
                role,
                shade,
            } => {
                if let Some(manager) = self.shades.get(palette) {
                    self.view
                        .set_alias_swatch(palette, *role, &manager.shade(*shade).color);
                }
            }
            ThemeEvent::ExportCss => {
                self.export_css();
            }
            ThemeEvent::ResetThemeStyles => self.reload(),
            _ => {}
        }
    }

    /// Rebuild controllers from the freshly reset document
    fn reload(&mut self) {
        self.readiness = ReadinessGate::new();
        self.layers = ShadowLayers::new().with_debounce(self.timing.shadow_debounce());
        self.synchronized = false;
        self.build_controllers();
        self.started = false;
        self.events.emit(ThemeEvent::StylesUpdated {
            source: StylesSource::Document,
        });
        self.start_queued();
    }

    /// `start` without a nested dispatch; the running dispatch drains the queue
    fn start_queued(&mut self) {
        self.started = true;
        let ids: Vec<String> = self.shades.values().map(ShadeManager::component_id).collect();
        for id in ids {
            self.readiness.mark_ready(&id);
        }
        if self.readiness.mark_ready(SHADOW_LAYERS_COMPONENT) {
            self.synchronize_ui();
        }
    }

    /// Run debounced work whose quiet window has elapsed
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut fired = false;
        for manager in self.shades.values_mut() {
            let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
            fired |= manager.poll(now, &mut ctx);
        }
        {
            let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
            fired |= self.layers.poll(now, &mut ctx);
        }
        self.dispatch();
        fired
    }

    /// Run all pending debounced work now
    pub fn flush(&mut self) -> bool {
        let mut fired = false;
        for manager in self.shades.values_mut() {
            let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
            fired |= manager.flush(&mut ctx);
        }
        {
            let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
            fired |= self.layers.flush(&mut ctx);
        }
        self.dispatch();
        fired
    }

    /// Queue an event from outside and dispatch it
    pub fn emit(&mut self, event: ThemeEvent) {
        self.events.emit(event);
        self.dispatch();
    }

    /// Observe every event after the engine has handled it
    pub fn subscribe<F: FnMut(&ThemeEvent) + 'static>(&mut self, listener: F) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn document(&self) -> &ThemeDocument {
        self.styles.document()
    }

    pub fn styles(&self) -> &StyleManager {
        &self.styles
    }

    pub fn shade_manager(&self, palette: &str) -> Option<&ShadeManager> {
        self.shades.get(palette)
    }

    pub fn shadow_layers(&self) -> &ShadowLayers {
        &self.layers
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn css(&self) -> String {
        generate_theme_css(self.styles.document())
    }

    // ========================================================================
    // Editor operations
    // ========================================================================

    fn with_shades<R>(
        &mut self,
        palette: &str,
        f: impl FnOnce(&mut ShadeManager, &mut ThemeContext<'_>) -> R,
    ) -> Result<R> {
        let manager = self
            .shades
            .get_mut(palette)
            .ok_or_else(|| ThemeError::UnknownPalette(palette.to_string()))?;
        let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
        let result = f(manager, &mut ctx);
        self.dispatch();
        Ok(result)
    }

    fn with_layers<R>(&mut self, f: impl FnOnce(&mut ShadowLayers, &mut ThemeContext<'_>) -> R) -> R {
        let mut ctx = ThemeContext::new(self.styles.document_mut(), &mut self.events, &mut self.view);
        let result = f(&mut self.layers, &mut ctx);
        self.dispatch();
        result
    }

    /// A site color picker changed
    pub fn select_color(&mut self, name: &str, color: &str) {
        self.view.set_color_control(name, color);
        self.emit(ThemeEvent::color_selected(name, color));
    }

    pub fn set_base_shade(&mut self, palette: &str, shade: ShadeKey) -> Result<()> {
        self.with_shades(palette, |manager, ctx| manager.set_base_shade(shade, ctx))
    }

    pub fn edit_shade(&mut self, palette: &str, shade: ShadeKey, value: &str) -> Result<()> {
        self.with_shades(palette, |manager, ctx| manager.edit_shade(shade, value, ctx))
    }

    /// Debounced; returns false when `shade` is the base shade
    pub fn set_shift(
        &mut self,
        palette: &str,
        shade: ShadeKey,
        axis: ShiftAxis,
        value: f32,
        now: Instant,
    ) -> Result<bool> {
        self.with_shades(palette, |manager, _| manager.set_shift(shade, axis, value, now))
    }

    pub fn set_shifts(
        &mut self,
        palette: &str,
        shade: ShadeKey,
        shifts: ShadeShifts,
        now: Instant,
    ) -> Result<bool> {
        self.with_shades(palette, |manager, _| manager.set_shifts(shade, shifts, now))
    }

    pub fn reset_shades(&mut self, palette: &str) -> Result<()> {
        if !self.shades.contains_key(palette) {
            return Err(ThemeError::UnknownPalette(palette.to_string()));
        }
        self.emit(ThemeEvent::ResetShades {
            palette: palette.to_string(),
        });
        Ok(())
    }

    pub fn set_alias(&mut self, palette: &str, role: AliasRole, shade: ShadeKey) -> Result<()> {
        if !self.shades.contains_key(palette) {
            return Err(ThemeError::UnknownPalette(palette.to_string()));
        }
        self.view.set_alias(palette, role, shade);
        self.emit(ThemeEvent::AliasChanged {
            palette: palette.to_string(),
            role,
            shade,
        });
        Ok(())
    }

    pub fn set_radius(&mut self, value: &str) {
        self.view.set_radius(value);
        self.emit(ThemeEvent::BorderRadiusChanged {
            value: value.to_string(),
        });
    }

    pub fn set_animation(&mut self, name: &str, seconds: f32) {
        self.view.set_animation(name, seconds);
        self.emit(ThemeEvent::AnimationTimingChanged {
            name: name.to_string(),
            seconds,
        });
    }

    pub fn set_typography(&mut self, path: TypographyPath, value: u32) {
        self.emit(ThemeEvent::TypographyChanged { path, value });
    }

    pub fn set_font_weight(&mut self, weight: &str, value: u16) {
        self.view.set_weight(weight, value);
        self.emit(ThemeEvent::FontWeightChanged {
            weight: weight.to_string(),
            value,
        });
    }

    pub fn add_shadow_layer(&mut self, now: Instant) -> usize {
        self.with_layers(|layers, ctx| layers.add_layer(ctx, now))
    }

    pub fn remove_shadow_layer(&mut self, index: usize, now: Instant) -> Result<()> {
        self.with_layers(|layers, ctx| layers.remove_layer(index, ctx, now).map(|_| ()))
    }

    pub fn toggle_shadow_layer(&mut self, index: usize, now: Instant) -> Result<bool> {
        self.with_layers(|layers, ctx| layers.toggle_visibility(index, ctx, now))
    }

    pub fn set_shadow_field(&mut self, index: usize, field: LayerField, now: Instant) -> Result<()> {
        self.with_layers(|layers, ctx| layers.set_field(index, field, ctx, now))
    }

    /// Replace the layer stack with a typed composite value
    pub fn set_shadow(&mut self, composite: &str, now: Instant) {
        self.with_layers(|layers, ctx| {
            layers.set_field_text(composite);
            layers.rebuild_from_string(composite, ctx, now);
        });
    }

    pub fn set_skin_color(
        &mut self,
        skin: &str,
        category: SkinCategory,
        state: InteractionState,
        value: &str,
    ) {
        self.styles
            .set_skin_color(skin, category, state, value, &mut self.events, &mut self.view);
        self.dispatch();
    }

    /// Generate the CSS and send it down the export chain
    pub fn export_css(&mut self) -> ExportOutcome {
        let css = self.css();
        self.export.export(&css)
    }

    /// Clear storage and rebuild everything from the defaults
    pub fn reset_theme(&mut self) {
        self.emit(ThemeEvent::ResetThemeStyles);
    }
}

impl ThemeBuilder<NullView> {
    /// A headless builder over in-memory storage
    pub fn headless() -> Self {
        Self::new(Box::new(MemoryStorage::new()), NullView)
    }
}
