//! Swatch Theme Engine
//!
//! Derives a complete design-token set from a handful of base values and
//! keeps it in step with an editing UI.
//!
//! # Overview
//!
//! The engine provides:
//! - **Shade ramps**: 11-step OKLCH ramps per palette, stored as relative-color
//!   formulas chained outward from a movable base shade
//! - **Shadow stacks**: parsing and serialization of layered `box-shadow` values
//! - **Theme document**: the single persisted source of truth
//! - **CSS generation**: a deterministic `@theme { ... }` block of custom properties
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use swatch_theme::{ThemeBuilder, ShadeKey};
//!
//! let mut builder = ThemeBuilder::headless();
//! builder.start();
//!
//! builder.select_color("primary", "oklch(0.5 0.1 250)");
//! builder.set_base_shade("primary", ShadeKey::S300)?;
//!
//! println!("{}", builder.css());
//! ```
//!
//! # Architecture
//!
//! Controllers never share state directly. Each receives a
//! [`ThemeContext`] holding the document, the outgoing event queue, and the
//! [`ThemeView`] it paints into:
//!
//! - [`ShadeManager`]: one palette's ramp
//! - [`ShadowLayers`]: the shadow layer editor
//! - [`StyleManager`]: owns the document and its storage, folds events into it
//!
//! [`ThemeBuilder`] routes every [`ThemeEvent`] to all of them in FIFO order,
//! drives debounced work through `tick`, and replays the document into the
//! view once every registered component has reported ready.

pub mod builder;
pub mod config;
pub mod context;
pub mod css;
pub mod document;
pub mod error;
pub mod events;
pub mod export;
pub mod layers;
pub mod shades;
pub mod skins;
pub mod state;
pub mod storage;
pub mod tokens;
pub mod typography;
pub mod view;

// Re-export commonly used types
pub use builder::ThemeBuilder;
pub use config::EngineConfig;
pub use context::ThemeContext;
pub use css::{find_base_shade, generate_theme_css};
pub use document::{AliasRole, Device, ThemeDocument, PALETTES};
pub use error::{Result, StorageError, ThemeError};
pub use events::{EventQueue, StylesSource, ThemeEvent};
pub use export::{ExportChain, ExportOutcome, ExportTarget};
pub use layers::{LayerField, ShadowLayer, ShadowLayers};
pub use shades::{ShadeManager, ShiftAxis};
pub use skins::{resolve_color_reference, InteractionState, SkinCategory};
pub use state::StyleManager;
pub use storage::{FileStorage, MemoryStorage, ThemeStorage};
pub use tokens::{ShadeKey, ShadeShifts, Shadow, ShiftDirection};
pub use typography::{validate_typography, TypographyPath, TypographyWarning};
pub use view::{NullView, RecordedView, ThemeView};
