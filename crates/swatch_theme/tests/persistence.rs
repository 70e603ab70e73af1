use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Instant;

use swatch_theme::storage::{persist, restore, STORAGE_KEY};
use swatch_theme::{
    FileStorage, MemoryStorage, NullView, ShadeKey, ShadeShifts, ThemeBuilder, ThemeDocument,
    ThemeStorage, TypographyPath,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("swatch-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn customized() -> ThemeDocument {
    let mut doc = ThemeDocument::default();
    doc.colours
        .site
        .insert("primary".to_string(), "oklch(0.5 0.1 250)".to_string());
    doc.colours
        .base_shades
        .insert("primary".to_string(), ShadeKey::S400);
    doc.radius = "3px".to_string();
    doc.shadow = "inset 1px 2px 3px 0px rgba(0, 0, 0, 0.30)".to_string();
    TypographyPath::weight("bold").apply(&mut doc, 750);
    doc.typography.desktop["body"].font_size = 17;
    doc.animation.insert("slow".to_string(), 0.45);
    doc
}

#[test]
fn persisted_document_restores_identically() {
    let doc = customized();
    let mut storage = MemoryStorage::new();
    assert!(persist(&doc, &mut storage));
    assert_eq!(restore(&storage), doc);
}

#[test]
fn file_storage_round_trip() {
    let dir = scratch_dir("file-storage");
    let mut storage = FileStorage::new(&dir);
    let doc = customized();

    assert!(persist(&doc, &mut storage));
    assert!(storage.path_for(STORAGE_KEY).exists());
    assert_eq!(restore(&FileStorage::new(&dir)), doc);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn unavailable_storage_keeps_editing_in_memory() {
    let mut builder = ThemeBuilder::new(Box::new(MemoryStorage::read_only()), NullView);
    builder.start();
    builder.set_radius("9px");

    assert_eq!(builder.document().radius, "9px");
    assert!(builder.styles().is_dirty());
}

#[test]
fn edits_survive_restart() {
    let dir = scratch_dir("restart");
    let now = Instant::now();

    let saved = {
        let mut builder = ThemeBuilder::new(Box::new(FileStorage::new(&dir)), NullView);
        builder.start();
        builder.select_color("secondary", "oklch(0.6 0.12 200)");
        builder.set_base_shade("secondary", ShadeKey::S700).unwrap();
        builder
            .set_shifts("secondary", ShadeKey::S200, ShadeShifts::new(0.5, 0.9, 15.0), now)
            .unwrap();
        builder.set_radius("6px");
        builder.set_animation("quick", 0.12);
        builder.set_font_weight("medium", 550);
        builder.flush();
        builder.document().clone()
    };

    assert_eq!(saved.colours.base_shades["secondary"], ShadeKey::S700);
    assert_eq!(
        saved.colours.shifts["secondary"][&ShadeKey::S200],
        ShadeShifts::new(0.5, 0.9, 15.0)
    );
    assert_eq!(saved.typography.weights["medium"], 550);

    let mut builder = ThemeBuilder::new(Box::new(FileStorage::new(&dir)), NullView);
    assert_eq!(builder.document(), &saved);
    builder.start();
    assert_eq!(builder.document(), &saved);
    assert_eq!(
        builder.shade_manager("secondary").unwrap().base_shade(),
        ShadeKey::S700
    );

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn reset_theme_clears_storage_and_resyncs() {
    let dir = scratch_dir("reset");
    let mut builder = ThemeBuilder::new(Box::new(FileStorage::new(&dir)), NullView);
    builder.start();
    builder.set_radius("20px");
    builder.set_base_shade("error", ShadeKey::S200).unwrap();

    builder.reset_theme();
    assert_eq!(builder.document().radius, ThemeDocument::default().radius);
    assert_eq!(builder.shade_manager("error").unwrap().base_shade(), ShadeKey::S500);
    assert!(builder.is_synchronized());

    let restored = restore(&FileStorage::new(&dir));
    assert_eq!(restored.radius, ThemeDocument::default().radius);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn malformed_storage_falls_back_to_defaults() {
    let storage = MemoryStorage::new().with_entry(STORAGE_KEY, "{\"colours\": 7}");
    let builder = ThemeBuilder::new(Box::new(storage), NullView);
    assert_eq!(builder.document(), &ThemeDocument::default());
}

#[test]
fn removing_missing_key_is_not_an_error() {
    let mut storage = MemoryStorage::new();
    assert!(storage.remove(STORAGE_KEY).is_ok());
}
