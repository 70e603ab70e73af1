//! Handles passed to controllers while they run

use crate::document::ThemeDocument;
use crate::events::{EventQueue, ThemeEvent};
use crate::view::ThemeView;

/// The document, outgoing event queue and view a controller may touch
pub struct ThemeContext<'a> {
    pub doc: &'a mut ThemeDocument,
    pub events: &'a mut EventQueue,
    pub view: &'a mut dyn ThemeView,
}

impl<'a> ThemeContext<'a> {
    pub fn new(
        doc: &'a mut ThemeDocument,
        events: &'a mut EventQueue,
        view: &'a mut dyn ThemeView,
    ) -> Self {
        Self { doc, events, view }
    }

    pub fn emit(&mut self, event: ThemeEvent) {
        self.events.emit(event);
    }
}
