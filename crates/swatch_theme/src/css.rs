//! CSS custom-property generation
//!
//! Renders the document as a single `@theme { ... }` block. Output depends
//! only on the document, so the same document always yields the same text.

use std::fmt::Write;

use crate::document::{anchor_formula, site_var, ThemeDocument, PALETTES};
use crate::tokens::ShadeKey;

/// CSS names for weights declared by number or snake_case name
const WEIGHT_NAMES: [(&str, &str); 18] = [
    ("100", "thin"),
    ("200", "extra-light"),
    ("300", "light"),
    ("400", "normal"),
    ("500", "medium"),
    ("600", "semi-bold"),
    ("700", "bold"),
    ("800", "extra-bold"),
    ("900", "black"),
    ("thin", "thin"),
    ("extra_light", "extra-light"),
    ("light", "light"),
    ("normal", "normal"),
    ("medium", "medium"),
    ("semi_bold", "semi-bold"),
    ("bold", "bold"),
    ("extra_bold", "extra-bold"),
    ("black", "black"),
];

fn weight_css_name(name: &str) -> String {
    WEIGHT_NAMES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, css)| css.to_string())
        .unwrap_or_else(|| name.replace('_', "-"))
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shade holding the palette's anchor
///
/// Scans the stored ramp for the entry equal to the site color or bound to
/// the site color variable; 500 when neither is found.
pub fn find_base_shade(doc: &ThemeDocument, palette: &str) -> ShadeKey {
    let (Some(site), Some(shades)) = (
        doc.colours.site.get(palette),
        doc.colours.shades.get(palette),
    ) else {
        return ShadeKey::BASE;
    };

    let anchor = anchor_formula(palette);
    shades
        .iter()
        .find(|(_, value)| *value == site || value.contains(&anchor))
        .map(|(key, _)| *key)
        .unwrap_or(ShadeKey::BASE)
}

pub fn generate_theme_css(doc: &ThemeDocument) -> String {
    let mut css = String::from("@theme {\n");
    // Writing to a String cannot fail
    let _ = write_body(&mut css, doc);
    css.push_str("}\n");
    css
}

fn write_body(css: &mut String, doc: &ThemeDocument) -> std::fmt::Result {
    writeln!(css, "  /* Site Variables */")?;
    for (name, value) in &doc.colours.site {
        writeln!(css, "  --color-{name}: {value};")?;
    }

    if !doc.radius.is_empty() {
        writeln!(css, "\n  --radius-site: {};", doc.radius)?;
    }
    if !doc.shadow.is_empty() {
        writeln!(css, "\n  --shadow-site: {};", doc.shadow)?;
    }

    for palette in PALETTES {
        if !doc.colours.site.contains_key(palette) {
            continue;
        }
        let base = find_base_shade(doc, palette);

        writeln!(css, "\n  /* {} Colors */", title_case(palette))?;
        writeln!(
            css,
            "  --color-{palette}-{base}: oklch(from {} l c h);\n",
            site_var(palette)
        )?;

        let Some(shades) = doc.colours.shades.get(palette) else {
            continue;
        };
        for (shade, formula) in shades {
            if *shade == base || !formula.contains("oklch") {
                continue;
            }
            writeln!(css, "  --color-{palette}-{shade}: {formula};")?;
        }
    }

    writeln!(css, "\n  /* Alias Colors */")?;
    for (palette, alias) in &doc.colours.alias {
        for (role, shade) in alias.iter() {
            writeln!(
                css,
                "  --color-{palette}-{}: var(--color-{palette}-{shade});",
                role.css_name()
            )?;
        }
    }

    writeln!(css, "\n  /* Typography - Desktop */")?;
    for (size, value) in &doc.typography.desktop {
        writeln!(css, "  --text-desktop-{size}: {}px;", value.font_size)?;
        writeln!(css, "  --line-height-desktop-{size}: {}px;", value.line_height)?;
    }

    writeln!(css, "\n  /* Typography - Mobile */")?;
    for (size, value) in &doc.typography.mobile {
        writeln!(css, "  --text-mobile-{size}: {}px;", value.font_size)?;
        writeln!(css, "  --line-height-mobile-{size}: {}px;", value.line_height)?;
    }

    if !doc.typography.weights.is_empty() {
        writeln!(css, "\n  /* Font Weights */")?;
        for (name, weight) in &doc.typography.weights {
            writeln!(css, "  --font-weight-{}: {weight};", weight_css_name(name))?;
        }
    }

    if !doc.animation.is_empty() {
        writeln!(css, "\n  /* Animation Timing */")?;
        for (name, seconds) in &doc.animation {
            writeln!(css, "  --duration-speed-{name}: {seconds}s;")?;
        }
    }

    Ok(())
}
