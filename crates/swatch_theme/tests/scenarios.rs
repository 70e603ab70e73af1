use std::time::Instant;

use swatch_theme::tokens::{parse_shadow, serialize_shadows, split_shadows, CssColor, RelativeColor};
use swatch_theme::view::ViewUpdate;
use swatch_theme::{
    resolve_color_reference, LayerField, MemoryStorage, RecordedView, ShadeKey, ShadeShifts,
    ThemeBuilder, ThemeDocument, ThemeEvent,
};

fn started() -> ThemeBuilder<RecordedView> {
    let mut builder = ThemeBuilder::new(Box::new(MemoryStorage::new()), RecordedView::new());
    builder.start();
    builder
}

fn shade_of(var: &str) -> ShadeKey {
    var.rsplit('-').next().unwrap().parse().unwrap()
}

/// Follow reference variables from `start` until an absolute entry
fn chain_to_base(doc: &ThemeDocument, palette: &str, start: ShadeKey) -> Vec<ShadeKey> {
    let ramp = &doc.colours.shades[palette];
    let mut chain = vec![start];
    let mut current = start;
    while let Some(formula) = RelativeColor::parse(&ramp[&current]) {
        current = shade_of(formula.reference_var().unwrap());
        assert!(!chain.contains(&current), "cycle through {current} in {palette}");
        chain.push(current);
    }
    chain
}

#[test]
fn primary_ramp_derives_from_selected_color() {
    let mut builder = started();
    builder.select_color("primary", "oklch(0.5 0.1 250)");

    let doc = builder.document();
    let ramp = &doc.colours.shades["primary"];
    assert_eq!(ramp[&ShadeKey::S500], "oklch(0.5 0.1 250)");
    assert_eq!(
        chain_to_base(doc, "primary", ShadeKey::S950),
        vec![
            ShadeKey::S950,
            ShadeKey::S900,
            ShadeKey::S800,
            ShadeKey::S700,
            ShadeKey::S600,
            ShadeKey::S500
        ]
    );
    for shade in [ShadeKey::S600, ShadeKey::S700, ShadeKey::S800, ShadeKey::S900, ShadeKey::S950] {
        let formula = RelativeColor::parse(&ramp[&shade]).unwrap();
        assert_eq!(formula.shifts, ShadeShifts::DARKER);
    }

    let preview = builder.shade_manager("primary").unwrap().shade(ShadeKey::S950).color.clone();
    let lch = CssColor::parse(&preview).unwrap().to_oklch();
    assert!((lch.l - 0.5 * 0.8f32.powi(5)).abs() < 1e-3, "{preview}");
    assert!((lch.h - 250.0).abs() < 1e-3, "{preview}");

    assert!(builder
        .css()
        .contains("--color-primary-500: oklch(from var(--color-primary) l c h);"));
}

#[test]
fn overridden_shift_applies_only_to_its_shade() {
    let mut builder = started();
    builder.select_color("primary", "oklch(0.5 0.1 250)");
    builder
        .set_shifts("primary", ShadeKey::S800, ShadeShifts::new(0.5, 1.0, 20.0), Instant::now())
        .unwrap();
    builder.flush();

    let ramp = &builder.document().colours.shades["primary"];
    assert_eq!(
        ramp[&ShadeKey::S800],
        "oklch(from var(--color-primary-700) calc(l * 0.5) calc(c * 1) calc(h + 20))"
    );
    assert_eq!(
        ramp[&ShadeKey::S900],
        "oklch(from var(--color-primary-800) calc(l * 0.8) calc(c * 1.1) calc(h + 0))"
    );
}

#[test]
fn ramp_recompute_is_deterministic() {
    let mut builder = started();
    builder.select_color("success", "#22c55e");
    let first = builder.document().colours.shades["success"].clone();
    let first_preview = builder.shade_manager("success").unwrap().colors();

    builder.emit(ThemeEvent::RefreshAllShades);
    assert_eq!(builder.document().colours.shades["success"], first);
    assert_eq!(builder.shade_manager("success").unwrap().colors(), first_preview);
}

#[test]
fn moving_base_shade_keeps_single_anchor() {
    let mut builder = started();
    builder.set_base_shade("tertiary", ShadeKey::S300).unwrap();

    let doc = builder.document();
    let ramp = &doc.colours.shades["tertiary"];
    let absolute: Vec<ShadeKey> = ramp
        .iter()
        .filter(|(_, value)| RelativeColor::parse(value).is_none())
        .map(|(key, _)| *key)
        .collect();
    assert_eq!(absolute, vec![ShadeKey::S300]);
    assert_eq!(ramp[&ShadeKey::S300], doc.colours.site["tertiary"]);

    for shade in ShadeKey::ALL {
        let chain = chain_to_base(doc, "tertiary", shade);
        assert_eq!(chain.last(), Some(&ShadeKey::S300));
        let var = format!("var(--color-tertiary-{shade})");
        assert_ne!(resolve_color_reference(doc, &var), "transparent", "{var}");
    }

    let css = builder.css();
    assert!(css.contains("--color-tertiary-300: oklch(from var(--color-tertiary) l c h);"));
    assert!(css.contains("--color-tertiary-500: oklch(from var(--color-tertiary-400) calc(l * 0.8)"));
}

#[test]
fn base_shade_change_updates_markers() {
    let mut builder = started();
    builder.view_mut().clear();
    builder.set_base_shade("error", ShadeKey::S600).unwrap();

    let updates = builder.view().updates();
    assert!(updates.contains(&ViewUpdate::MarkBase {
        palette: "error".to_string(),
        shade: ShadeKey::S500,
        is_base: false,
    }));
    assert!(updates.contains(&ViewUpdate::ShiftControls {
        palette: "error".to_string(),
        shade: ShadeKey::S500,
        enabled: true,
    }));
    assert!(updates.contains(&ViewUpdate::MarkBase {
        palette: "error".to_string(),
        shade: ShadeKey::S600,
        is_base: true,
    }));
}

#[test]
fn reset_shades_returns_to_defaults() {
    let mut builder = started();
    builder.set_base_shade("neutral", ShadeKey::S800).unwrap();
    builder
        .set_shifts("neutral", ShadeKey::S200, ShadeShifts::new(0.1, 0.1, 0.0), Instant::now())
        .unwrap();
    builder.reset_shades("neutral").unwrap();

    let manager = builder.shade_manager("neutral").unwrap();
    assert_eq!(manager.base_shade(), ShadeKey::S500);
    assert_eq!(manager.shade(ShadeKey::S200).shifts, ShadeShifts::LIGHTER);
    assert_eq!(builder.document().colours.base_shades["neutral"], ShadeKey::S500);
}

#[test]
fn shadow_round_trips() {
    for value in [
        "0 0 0 0 rgba(0,0,0,0.1)",
        "inset 2px 4px 6px 0 #000000",
        "1px 2px 3px 0 rgba(10,20,30,0.5), inset 0 0 5px 0 hsl(200,50%,50%)",
    ] {
        let parsed: Vec<_> = split_shadows(value).iter().map(|s| parse_shadow(s)).collect();
        let reparsed: Vec<_> = split_shadows(&serialize_shadows(&parsed))
            .iter()
            .map(|s| parse_shadow(s))
            .collect();

        assert_eq!(parsed.len(), reparsed.len());
        for (a, b) in parsed.iter().zip(&reparsed) {
            assert_eq!(
                (a.horizontal_offset, a.vertical_offset, a.blur_radius, a.spread_radius, a.is_inset),
                (b.horizontal_offset, b.vertical_offset, b.blur_radius, b.spread_radius, b.is_inset),
                "{value}"
            );
            assert_eq!(a.opacity, b.opacity, "{value}");
        }
    }
}

#[test]
fn removing_middle_layer_renumbers() {
    let mut builder = started();
    let now = Instant::now();
    while !builder.shadow_layers().is_empty() {
        builder.remove_shadow_layer(0, now).unwrap();
    }

    for offset in [10, 20, 30] {
        let index = builder.add_shadow_layer(now);
        builder
            .set_shadow_field(index, LayerField::HorizontalOffset(offset), now)
            .unwrap();
    }
    builder.remove_shadow_layer(1, now).unwrap();

    let offsets: Vec<i32> = builder
        .shadow_layers()
        .layers()
        .iter()
        .map(|layer| layer.shadow.horizontal_offset)
        .collect();
    assert_eq!(offsets, vec![10, 30]);

    let rows = builder.view().layer_rows(2);
    for (index, row) in rows.iter().enumerate() {
        let row = row.unwrap();
        assert_eq!(row.index, index);
        assert_eq!(row.heading, format!("Layer {}", index + 1));
        assert_eq!(row.remove_target, index);
        assert_eq!(row.visibility_target, index);
    }
    assert_eq!(rows[1].unwrap().shadow.horizontal_offset, 30);
}

#[test]
fn hidden_layer_leaves_composite_and_returns_unchanged() {
    let mut builder = started();
    let now = Instant::now();
    builder.set_shadow("1px 1px 1px 0 #000000, 9px 9px 9px 0 #000000", now);
    builder.flush();
    let both = builder.document().shadow.clone();

    builder.toggle_shadow_layer(1, now).unwrap();
    builder.flush();
    assert!(!builder.document().shadow.contains("9px"));
    assert!(builder
        .set_shadow_field(1, LayerField::BlurRadius(0), now)
        .is_err());

    builder.toggle_shadow_layer(1, now).unwrap();
    builder.flush();
    assert_eq!(builder.document().shadow, both);
}

#[test]
fn configured_layer_reaches_document() {
    let mut builder = started();
    let now = Instant::now();
    while !builder.shadow_layers().is_empty() {
        builder.remove_shadow_layer(0, now).unwrap();
    }

    let index = builder.add_shadow_layer(now);
    for field in [
        LayerField::HorizontalOffset(3),
        LayerField::VerticalOffset(5),
        LayerField::BlurRadius(8),
        LayerField::SpreadRadius(0),
        LayerField::ColorName("black".to_string()),
        LayerField::Opacity(0.25),
    ] {
        builder.set_shadow_field(index, field, now).unwrap();
    }
    assert!(builder.flush());

    let expected = "3px 5px 8px 0px rgba(0, 0, 0, 0.25)";
    assert_eq!(builder.shadow_layers().field_text(), expected);
    assert_eq!(builder.document().shadow, expected);
    assert_eq!(builder.view().last_shadow_preview(), Some(expected));
}

#[test]
fn alias_swatch_follows_shade_preview() {
    let mut builder = started();
    builder.set_alias("primary", swatch_theme::AliasRole::Dark, ShadeKey::S800).unwrap();

    let expected = builder.shade_manager("primary").unwrap().shade(ShadeKey::S800).color.clone();
    assert!(builder.view().updates().contains(&ViewUpdate::AliasSwatch {
        palette: "primary".to_string(),
        role: swatch_theme::AliasRole::Dark,
        color: expected,
    }));
    assert!(builder
        .css()
        .contains("--color-primary-dark: var(--color-primary-800);"));
}
