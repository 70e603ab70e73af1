//! The style manager
//!
//! Owns the live [`ThemeDocument`] and its storage. Change events are folded
//! into the document, the JSON preview is regenerated, and the document is
//! marked for persistence. Shade managers and the shadow-layer editor write
//! through a [`ThemeContext`](crate::context::ThemeContext) borrowed from here.

use crate::document::{is_simple_color, ThemeDocument};
use crate::events::{EventQueue, StylesSource, ThemeEvent};
use crate::skins::{self, InteractionState, SkinCategory};
use crate::storage::{persist, restore, ThemeStorage, STORAGE_KEY};
use crate::typography::TypographyPath;
use crate::view::ThemeView;

pub struct StyleManager {
    doc: ThemeDocument,
    storage: Box<dyn ThemeStorage>,
    preview: String,
    /// Changed since the last successful write
    dirty: bool,
}

impl StyleManager {
    /// Restore the persisted document, or start from the defaults
    pub fn new(storage: Box<dyn ThemeStorage>) -> Self {
        let doc = restore(storage.as_ref());
        Self::with_document(doc, storage)
    }

    pub fn with_document(doc: ThemeDocument, storage: Box<dyn ThemeStorage>) -> Self {
        Self {
            doc,
            storage,
            preview: String::new(),
            dirty: false,
        }
    }

    pub fn document(&self) -> &ThemeDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut ThemeDocument {
        &mut self.doc
    }

    pub fn storage(&self) -> &dyn ThemeStorage {
        self.storage.as_ref()
    }

    /// Last generated JSON preview
    pub fn json_preview(&self) -> &str {
        &self.preview
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Regenerate the preview and mark the document for persistence
    pub fn refresh(&mut self, view: &mut dyn ThemeView) {
        match self.doc.to_json_pretty() {
            Ok(json) => {
                view.set_json_preview(&json);
                self.preview = json;
            }
            Err(e) => tracing::error!("Failed to render theme preview: {}", e),
        }
        self.dirty = true;
    }

    /// Write the document if it changed; returns true when written
    pub fn save_if_dirty(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        if persist(&self.doc, self.storage.as_mut()) {
            self.dirty = false;
            return true;
        }
        false
    }

    /// Write a skin color now and announce it
    pub fn set_skin_color(
        &mut self,
        skin: &str,
        category: SkinCategory,
        state: InteractionState,
        value: &str,
        events: &mut EventQueue,
        view: &mut dyn ThemeView,
    ) {
        skins::set_skin_color(&mut self.doc, skin, category, state, value);
        self.refresh(view);
        self.save_if_dirty();

        events.emit(ThemeEvent::SkinColorUpdated {
            skin: skin.to_string(),
            category,
            state,
            value: value.to_string(),
        });
        events.emit(ThemeEvent::StylesUpdated {
            source: StylesSource::Skins,
        });
    }

    /// Drop the persisted document and start over from the defaults
    pub fn clear(&mut self, view: &mut dyn ThemeView) {
        if let Err(e) = self.storage.remove(STORAGE_KEY) {
            tracing::error!("Failed to clear stored theme: {}", e);
        }
        self.doc = ThemeDocument::default();
        self.dirty = false;
        if let Ok(json) = self.doc.to_json_pretty() {
            view.set_json_preview(&json);
            self.preview = json;
        }
    }

    pub fn handle(&mut self, event: &ThemeEvent, events: &mut EventQueue, view: &mut dyn ThemeView) {
        match event {
            ThemeEvent::ColorSelected { color, .. } => {
                let Some(name) = event.site_color_name() else {
                    return;
                };
                self.doc
                    .colours
                    .site
                    .insert(name.to_string(), color.clone());
                self.refresh(view);
                if is_simple_color(name) {
                    events.emit(ThemeEvent::StylesUpdated {
                        source: StylesSource::SimpleColor,
                    });
                }
            }
            ThemeEvent::ShadesUpdated { palette } => {
                if !is_simple_color(palette) {
                    self.refresh(view);
                }
            }
            ThemeEvent::AliasChanged {
                palette,
                role,
                shade,
            } => {
                if is_simple_color(palette) {
                    return;
                }
                self.doc
                    .colours
                    .alias
                    .entry(palette.clone())
                    .or_default()
                    .set(*role, *shade);
                self.refresh(view);
            }
            ThemeEvent::BorderRadiusChanged { value } => {
                self.doc.radius = value.clone();
                self.refresh(view);
            }
            ThemeEvent::ShadowChanged { value } => {
                if self.doc.shadow == *value {
                    return;
                }
                self.doc.shadow = value.clone();
                self.refresh(view);
            }
            ThemeEvent::AnimationTimingChanged { name, seconds } => {
                self.doc.animation.insert(name.clone(), *seconds);
                self.refresh(view);
            }
            ThemeEvent::TypographyChanged { path, value } => {
                path.apply(&mut self.doc, *value);
                self.refresh(view);
            }
            ThemeEvent::FontWeightChanged { weight, value } => {
                events.emit(ThemeEvent::TypographyChanged {
                    path: TypographyPath::weight(weight),
                    value: u32::from(*value),
                });
            }
            ThemeEvent::SkinColorUpdated {
                skin,
                category,
                state,
                value,
            } => {
                if skins::set_skin_color(&mut self.doc, skin, *category, *state, value) {
                    self.refresh(view);
                }
            }
            ThemeEvent::ResetThemeStyles => self.clear(view),
            ThemeEvent::StylesUpdated { .. }
            | ThemeEvent::ResetShades { .. }
            | ThemeEvent::RefreshAllShades
            | ThemeEvent::ExportCss => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AliasRole;
    use crate::storage::MemoryStorage;
    use crate::tokens::ShadeKey;
    use crate::view::RecordedView;

    fn manager() -> StyleManager {
        StyleManager::new(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn test_restores_defaults_when_empty() {
        let styles = manager();
        assert_eq!(styles.document(), &ThemeDocument::default());
        assert!(!styles.is_dirty());
    }

    #[test]
    fn test_restores_persisted_document() {
        let mut doc = ThemeDocument::default();
        doc.radius = "2px".to_string();
        let storage = MemoryStorage::new().with_entry(STORAGE_KEY, &doc.to_json().unwrap());

        let styles = StyleManager::new(Box::new(storage));
        assert_eq!(styles.document().radius, "2px");
    }

    #[test]
    fn test_radius_refreshes_and_persists() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();

        styles.handle(
            &ThemeEvent::BorderRadiusChanged {
                value: "12px".to_string(),
            },
            &mut events,
            &mut view,
        );
        assert!(styles.is_dirty());
        assert!(view.last_json_preview().unwrap().contains("\"radius\": \"12px\""));
        assert!(styles.save_if_dirty());
        assert!(!styles.save_if_dirty());

        let restored = crate::storage::restore(styles.storage());
        assert_eq!(restored.radius, "12px");
    }

    #[test]
    fn test_identical_shadow_is_ignored() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();
        let current = styles.document().shadow.clone();

        styles.handle(&ThemeEvent::ShadowChanged { value: current }, &mut events, &mut view);
        assert!(!styles.is_dirty());
        assert!(view.updates().is_empty());
    }

    #[test]
    fn test_simple_color_bypasses_shades() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();
        let shades_before = styles.document().colours.shades.clone();

        styles.handle(&ThemeEvent::color_selected("white", "#fafafa"), &mut events, &mut view);
        assert_eq!(styles.document().colours.site["white"], "#fafafa");
        assert_eq!(styles.document().colours.shades, shades_before);
        assert_eq!(
            events.pop(),
            Some(ThemeEvent::StylesUpdated {
                source: StylesSource::SimpleColor
            })
        );
    }

    #[test]
    fn test_font_weight_reemits_as_typography() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();

        styles.handle(
            &ThemeEvent::FontWeightChanged {
                weight: "bold".to_string(),
                value: 650,
            },
            &mut events,
            &mut view,
        );
        let reemitted = events.pop().unwrap();
        assert_eq!(
            reemitted,
            ThemeEvent::TypographyChanged {
                path: TypographyPath::weight("bold"),
                value: 650
            }
        );

        styles.handle(&reemitted, &mut events, &mut view);
        assert_eq!(styles.document().typography.weights["bold"], 650);
    }

    #[test]
    fn test_alias_change() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();

        styles.handle(
            &ThemeEvent::AliasChanged {
                palette: "primary".to_string(),
                role: AliasRole::Hover,
                shade: ShadeKey::S700,
            },
            &mut events,
            &mut view,
        );
        assert_eq!(styles.document().colours.alias["primary"].hover, ShadeKey::S700);
    }

    #[test]
    fn test_set_skin_color_emits_both() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();

        styles.set_skin_color(
            "brand",
            SkinCategory::Foreground,
            InteractionState::Hover,
            "var(--color-primary-700)",
            &mut events,
            &mut view,
        );
        assert!(matches!(events.pop(), Some(ThemeEvent::SkinColorUpdated { .. })));
        assert_eq!(
            events.pop(),
            Some(ThemeEvent::StylesUpdated {
                source: StylesSource::Skins
            })
        );

        let restored = crate::storage::restore(styles.storage());
        assert_eq!(restored.skins["brand"].foreground.hover, "var(--color-primary-700)");
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let mut styles = StyleManager::new(Box::new(MemoryStorage::read_only()));
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();

        styles.handle(
            &ThemeEvent::AnimationTimingChanged {
                name: "slow".to_string(),
                seconds: 0.45,
            },
            &mut events,
            &mut view,
        );
        assert!(!styles.save_if_dirty());
        assert_eq!(styles.document().animation["slow"], 0.45);
    }

    #[test]
    fn test_reset_clears_storage() {
        let mut styles = manager();
        let mut events = EventQueue::new();
        let mut view = RecordedView::new();

        styles.handle(
            &ThemeEvent::BorderRadiusChanged {
                value: "1px".to_string(),
            },
            &mut events,
            &mut view,
        );
        styles.save_if_dirty();
        styles.handle(&ThemeEvent::ResetThemeStyles, &mut events, &mut view);

        assert_eq!(styles.storage().load(STORAGE_KEY).unwrap(), None);
        assert_eq!(styles.document(), &ThemeDocument::default());
    }
}
