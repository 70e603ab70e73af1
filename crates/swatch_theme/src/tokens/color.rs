//! Color math for shade derivation
//!
//! Shades are stored as CSS relative-color formulas
//! (`oklch(from <ref> calc(l * 0.8) calc(c * 1.1) calc(h + 0))`) so that a
//! change to an upstream shade re-renders every dependent. The same
//! coefficients are also applied numerically to produce concrete preview
//! colors. L and C are never clamped; gamut mapping is left to the renderer.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::{opt, value},
    error::ParseError as NomParseError,
    number::complete::float,
    sequence::{delimited, preceded, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color in the OKLCH space (lightness 0..1, chroma, hue in degrees)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl Oklch {
    pub const fn new(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// CSS text with L and C to 4 decimals and H to 2
    pub fn to_css(&self) -> String {
        format!(
            "oklch({} {} {})",
            fmt_number(self.l, 4),
            fmt_number(self.c, 4),
            fmt_number(self.h, 2)
        )
    }
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// An 8-bit sRGB color with alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_hex_color::<nom::error::Error<&str>>(hex.trim())
            .ok()
            .filter(|(rest, _)| rest.trim().is_empty())
            .map(|(_, color)| color)
    }

    pub fn same_channels(&self, other: &Rgba) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// sRGB -> linear -> OKLab -> OKLCH
    pub fn to_oklch(&self) -> Oklch {
        let r = srgb_to_linear(self.r as f32 / 255.0);
        let g = srgb_to_linear(self.g as f32 / 255.0);
        let b = srgb_to_linear(self.b as f32 / 255.0);

        let l = 0.412_221_47 * r + 0.536_332_55 * g + 0.051_445_995 * b;
        let m = 0.211_903_5 * r + 0.680_699_5 * g + 0.107_396_96 * b;
        let s = 0.088_302_46 * r + 0.281_718_85 * g + 0.629_978_7 * b;

        let (l, m, s) = (l.cbrt(), m.cbrt(), s.cbrt());

        let lightness = 0.210_454_26 * l + 0.793_617_8 * m - 0.004_072_047 * s;
        let a = 1.977_998_5 * l - 2.428_592_2 * m + 0.450_593_7 * s;
        let bb = 0.025_904_037 * l + 0.782_771_77 * m - 0.808_675_77 * s;

        let chroma = (a * a + bb * bb).sqrt();
        let hue = if chroma < 1e-4 {
            0.0
        } else {
            let degrees = bb.atan2(a).to_degrees();
            if degrees < 0.0 {
                degrees + 360.0
            } else {
                degrees
            }
        };

        Oklch::new(lightness, if chroma < 1e-4 { 0.0 } else { chroma }, hue)
    }
}

fn srgb_to_linear(channel: f32) -> f32 {
    if channel <= 0.040_45 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |mut t: f32| {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// A parsed absolute CSS color
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssColor {
    Oklch(Oklch),
    Rgb(Rgba),
}

impl CssColor {
    /// Parse `oklch()`, `#hex`, `rgb()/rgba()` or `hsl()/hsla()`
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        parse_color::<nom::error::Error<&str>>(input)
            .ok()
            .filter(|(rest, _)| rest.trim().is_empty())
            .map(|(_, color)| color)
    }

    pub fn to_oklch(&self) -> Oklch {
        match self {
            CssColor::Oklch(color) => *color,
            CssColor::Rgb(color) => color.to_oklch(),
        }
    }

    pub fn to_rgba(&self) -> Option<Rgba> {
        match self {
            CssColor::Rgb(color) => Some(*color),
            CssColor::Oklch(_) => None,
        }
    }
}

/// Format with at most `decimals` places, trailing zeros trimmed
pub fn fmt_number(value: f32, decimals: usize) -> String {
    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Which side of the reference shade a derived shade sits on
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Lighter,
    Darker,
}

/// Per-shade lightness/chroma multipliers and hue offset
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadeShifts {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl ShadeShifts {
    /// Default shifts for shades lighter than the base
    pub const LIGHTER: Self = Self::new(0.6, 0.8, 0.0);
    /// Default shifts for shades darker than the base
    pub const DARKER: Self = Self::new(0.8, 1.1, 0.0);

    pub const fn new(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    pub fn default_for(direction: ShiftDirection) -> Self {
        match direction {
            ShiftDirection::Lighter => Self::LIGHTER,
            ShiftDirection::Darker => Self::DARKER,
        }
    }

    /// Apply the shifts to a concrete reference color
    pub fn apply(&self, reference: Oklch, direction: ShiftDirection) -> Oklch {
        let l = match direction {
            ShiftDirection::Lighter => 1.0 - (1.0 - reference.l) * self.l,
            ShiftDirection::Darker => reference.l * self.l,
        };
        Oklch::new(l, reference.c * self.c, reference.h + self.h)
    }

    /// Relative-color formula text deriving from `reference`
    pub fn formula(&self, reference: &str, direction: ShiftDirection) -> String {
        match direction {
            ShiftDirection::Lighter => format!(
                "oklch(from {} calc(1 - (1 - l) * {}) calc(c * {}) calc(h + {}))",
                reference, self.l, self.c, self.h
            ),
            ShiftDirection::Darker => format!(
                "oklch(from {} calc(l * {}) calc(c * {}) calc(h + {}))",
                reference, self.l, self.c, self.h
            ),
        }
    }
}

/// Formula text for a derived shade
pub fn derive_shade(reference: &str, shifts: ShadeShifts, direction: ShiftDirection) -> String {
    shifts.formula(reference, direction)
}

/// Concrete preview for a derived shade
///
/// Falls back to the formula text itself when the reference color can't be
/// resolved to numbers.
pub fn preview_shade(reference_color: &str, shifts: ShadeShifts, direction: ShiftDirection) -> String {
    match CssColor::parse(reference_color) {
        Some(color) => shifts.apply(color.to_oklch(), direction).to_css(),
        None => shifts.formula(reference_color.trim(), direction),
    }
}

/// A parsed `oklch(from <ref> ...)` formula
#[derive(Clone, Debug, PartialEq)]
pub struct RelativeColor {
    pub reference: String,
    pub direction: ShiftDirection,
    pub shifts: ShadeShifts,
}

impl RelativeColor {
    pub fn parse(input: &str) -> Option<Self> {
        parse_relative_color::<nom::error::Error<&str>>(input.trim())
            .ok()
            .filter(|(rest, _)| rest.trim().is_empty())
            .map(|(_, relative)| relative)
    }

    /// The reference variable name when the reference is `var(--name)`
    pub fn reference_var(&self) -> Option<&str> {
        self.reference
            .strip_prefix("var(")
            .and_then(|rest| rest.strip_suffix(')'))
            .map(str::trim)
            .filter(|name| name.starts_with("--"))
    }

    pub fn resolve(&self, reference: Oklch) -> Oklch {
        self.shifts.apply(reference, self.direction)
    }
}

// ============================================================================
// Parsers
// ============================================================================

fn ws<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value((), multispace0)(input)
}

/// Component separator: whitespace, optionally around `,` or `/`
fn sep<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    value((), tuple((ws, opt(alt((char(','), char('/')))), ws)))(input)
}

fn number_with_unit<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (f32, bool), E> {
    let (input, number) = float(input)?;
    let (input, percent) = opt(char('%'))(input)?;
    let (input, _) = opt(tag_no_case("deg"))(input)?;
    Ok((input, (number, percent.is_some())))
}

fn parse_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, CssColor, E> {
    alt((
        parse_oklch_color::<E>,
        |i: &'a str| parse_hex_color::<E>(i).map(|(rest, c)| (rest, CssColor::Rgb(c))),
        |i: &'a str| parse_rgb_color::<E>(i).map(|(rest, c)| (rest, CssColor::Rgb(c))),
        |i: &'a str| parse_hsl_color::<E>(i).map(|(rest, c)| (rest, CssColor::Rgb(c))),
    ))(input)
}

/// Parse hex color: #RGB, #RRGGBB, or #RRGGBBAA
fn parse_hex_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Rgba, E> {
    let (input, _) = char('#')(input)?;
    let (input, hex) = take_while1(|c: char| c.is_ascii_hexdigit())(input)?;

    let channel = |digits: &str| {
        u8::from_str_radix(digits, 16)
            .map_err(|_| nom::Err::Error(E::from_error_kind(input, nom::error::ErrorKind::HexDigit)))
    };

    let color = match hex.len() {
        3 => Rgba::rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        ),
        6 => Rgba::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        8 => Rgba {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
            a: channel(&hex[6..8])? as f32 / 255.0,
        },
        _ => {
            return Err(nom::Err::Error(E::from_error_kind(
                input,
                nom::error::ErrorKind::LengthValue,
            )));
        }
    };

    Ok((input, color))
}

/// Parse rgb()/rgba() with comma or space separated channels
fn parse_rgb_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Rgba, E> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, r) = float(input)?;
    let (input, _) = sep(input)?;
    let (input, g) = float(input)?;
    let (input, _) = sep(input)?;
    let (input, b) = float(input)?;
    let (input, alpha) = opt(preceded(sep, number_with_unit))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;

    let to_u8 = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    let a = match alpha {
        Some((a, true)) => a / 100.0,
        Some((a, false)) => a,
        None => 1.0,
    };

    Ok((
        input,
        Rgba {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: a.clamp(0.0, 1.0),
        },
    ))
}

/// Parse hsl()/hsla()
fn parse_hsl_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Rgba, E> {
    let (input, _) = alt((tag_no_case("hsla"), tag_no_case("hsl")))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, (h, _)) = number_with_unit(input)?;
    let (input, _) = sep(input)?;
    let (input, (s, _)) = number_with_unit(input)?;
    let (input, _) = sep(input)?;
    let (input, (l, _)) = number_with_unit(input)?;
    let (input, alpha) = opt(preceded(sep, number_with_unit))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;

    let (r, g, b) = hsl_to_rgb(h, s / 100.0, l / 100.0);
    let a = match alpha {
        Some((a, true)) => a / 100.0,
        Some((a, false)) => a,
        None => 1.0,
    };

    Ok((input, Rgba { r, g, b, a: a.clamp(0.0, 1.0) }))
}

/// Parse oklch(L C H [/ A]); L may be a percentage
fn parse_oklch_color<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, CssColor, E> {
    let (input, _) = tag_no_case("oklch")(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, (l, percent)) = number_with_unit(input)?;
    let (input, _) = ws(input)?;
    let (input, (c, _)) = number_with_unit(input)?;
    let (input, _) = ws(input)?;
    let (input, (h, _)) = number_with_unit(input)?;
    let (input, _) = opt(preceded(tuple((ws, char('/'), ws)), number_with_unit))(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;

    let l = if percent { l / 100.0 } else { l };
    Ok((input, CssColor::Oklch(Oklch::new(l, c, h))))
}

/// A reference token: `var(...)` or a color function, balanced parentheses
fn reference_token<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    let mut depth = 0usize;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => break,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[i + 1..], &input[..i + 1]));
                }
            }
            c if c.is_whitespace() && depth == 0 => {
                if i == 0 {
                    break;
                }
                return Ok((&input[i..], &input[..i]));
            }
            _ => {}
        }
    }
    Err(nom::Err::Error(E::from_error_kind(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}

/// `calc(1 - (1 - l) * N)`, `calc(l * N)` or a bare `l`
fn lightness_expr<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (ShiftDirection, f32), E> {
    let mut lighter = delimited(
        tuple((tag("calc("), ws, char('1'), ws, char('-'), ws, char('('), ws)),
        preceded(
            tuple((char('1'), ws, char('-'), ws, char('l'), ws, char(')'), ws, char('*'), ws)),
            float,
        ),
        tuple((ws, char(')'))),
    );
    let mut darker = delimited(
        tuple((tag("calc("), ws, char('l'), ws, char('*'), ws)),
        float,
        tuple((ws, char(')'))),
    );

    let result = alt((
        |i: &'a str| lighter(i).map(|(rest, n)| (rest, (ShiftDirection::Lighter, n))),
        |i: &'a str| darker(i).map(|(rest, n)| (rest, (ShiftDirection::Darker, n))),
        value((ShiftDirection::Darker, 1.0), char('l')),
    ))(input);
    result
}

/// `calc(<channel> <op> N)` or the bare channel letter
///
/// Hue also accepts `calc(h - N)`.
fn channel_expr<'a, E: NomParseError<&'a str>>(
    channel: char,
    op: char,
    identity: f32,
) -> impl FnMut(&'a str) -> IResult<&'a str, f32, E> {
    move |input: &'a str| {
        let calc = |i: &'a str| -> IResult<&'a str, f32, E> {
            let (i, _) = tag("calc(")(i)?;
            let (i, _) = ws(i)?;
            let (i, _) = char(channel)(i)?;
            let (i, _) = ws(i)?;
            let (rest, sign) = alt((char(op), char('-')))(i)?;
            if sign == '-' && op != '+' {
                return Err(nom::Err::Error(E::from_error_kind(
                    i,
                    nom::error::ErrorKind::Char,
                )));
            }
            let (i, _) = ws(rest)?;
            let (i, n) = float(i)?;
            let (i, _) = ws(i)?;
            let (i, _) = char(')')(i)?;
            Ok((i, if sign == '-' { -n } else { n }))
        };
        alt((calc, value(identity, char(channel))))(input)
    }
}

fn parse_relative_color<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, RelativeColor, E> {
    let (input, _) = tag_no_case("oklch")(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = tag("from")(input)?;
    let (input, _) = ws(input)?;
    let (input, reference) = reference_token(input)?;
    let (input, _) = ws(input)?;
    let (input, (direction, l)) = lightness_expr(input)?;
    let (input, _) = ws(input)?;
    let (input, c) = channel_expr('c', '*', 1.0)(input)?;
    let (input, _) = ws(input)?;
    let (input, h) = channel_expr('h', '+', 0.0)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = char(')')(input)?;

    Ok((
        input,
        RelativeColor {
            reference: reference.to_string(),
            direction,
            shifts: ShadeShifts::new(l, c, h),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_lighter_formula_text() {
        let formula = derive_shade(
            "var(--color-primary-500)",
            ShadeShifts::LIGHTER,
            ShiftDirection::Lighter,
        );
        assert_eq!(
            formula,
            "oklch(from var(--color-primary-500) calc(1 - (1 - l) * 0.6) calc(c * 0.8) calc(h + 0))"
        );
    }

    #[test]
    fn test_darker_formula_text() {
        let formula = derive_shade(
            "var(--color-error-600)",
            ShadeShifts::new(0.75, 1.2, -5.0),
            ShiftDirection::Darker,
        );
        assert_eq!(
            formula,
            "oklch(from var(--color-error-600) calc(l * 0.75) calc(c * 1.2) calc(h + -5))"
        );
    }

    #[test]
    fn test_apply_does_not_clamp() {
        let base = Oklch::new(0.9, 0.3, 350.0);
        let shifted = ShadeShifts::new(1.5, 2.0, 20.0).apply(base, ShiftDirection::Darker);

        assert!(close(shifted.l, 1.35));
        assert!(close(shifted.c, 0.6));
        assert!(close(shifted.h, 370.0));
    }

    #[test]
    fn test_parse_oklch() {
        let color = CssColor::parse("oklch(0.43 0.0147 248.17)").unwrap();
        assert_eq!(color, CssColor::Oklch(Oklch::new(0.43, 0.0147, 248.17)));

        let percent = CssColor::parse("oklch(50% 0.1 250 / 0.5)").unwrap();
        assert!(close(percent.to_oklch().l, 0.5));
    }

    #[test]
    fn test_parse_hex_and_rgb() {
        assert_eq!(Rgba::from_hex("#3B82F6"), Some(Rgba::rgb(59, 130, 246)));
        assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::rgb(255, 255, 255)));
        assert_eq!(Rgba::from_hex("#12345"), None);

        let rgba = CssColor::parse("rgba(10, 20, 30, 0.5)").unwrap().to_rgba().unwrap();
        assert_eq!((rgba.r, rgba.g, rgba.b), (10, 20, 30));
        assert!(close(rgba.a, 0.5));

        let spaced = CssColor::parse("rgb(10 20 30 / 50%)").unwrap().to_rgba().unwrap();
        assert!(close(spaced.a, 0.5));
    }

    #[test]
    fn test_parse_hsl() {
        let rgb = CssColor::parse("hsl(0, 100%, 50%)").unwrap().to_rgba().unwrap();
        assert_eq!((rgb.r, rgb.g, rgb.b), (255, 0, 0));
    }

    #[test]
    fn test_hex_to_oklch() {
        let white = Rgba::rgb(255, 255, 255).to_oklch();
        assert!(close(white.l, 1.0));
        assert_eq!(white.c, 0.0);

        let black = Rgba::rgb(0, 0, 0).to_oklch();
        assert!(close(black.l, 0.0));

        // #3B82F6 is roughly oklch(0.623 0.188 259.8)
        let blue = Rgba::rgb(0x3b, 0x82, 0xf6).to_oklch();
        assert!((blue.l - 0.623).abs() < 0.01);
        assert!((blue.c - 0.188).abs() < 0.01);
        assert!((blue.h - 259.8).abs() < 1.0);
    }

    #[test]
    fn test_preview_resolves_numerically() {
        let preview = preview_shade(
            "oklch(0.5 0.1 250)",
            ShadeShifts::DARKER,
            ShiftDirection::Darker,
        );
        assert_eq!(preview, "oklch(0.4 0.11 250)");
    }

    #[test]
    fn test_preview_falls_back_to_formula() {
        let preview = preview_shade("var(--brand)", ShadeShifts::LIGHTER, ShiftDirection::Lighter);
        assert_eq!(
            preview,
            "oklch(from var(--brand) calc(1 - (1 - l) * 0.6) calc(c * 0.8) calc(h + 0))"
        );
    }

    #[test]
    fn test_relative_color_round_trip() {
        let text = ShadeShifts::new(0.7, 0.9, 12.5)
            .formula("var(--color-success-300)", ShiftDirection::Lighter);
        let parsed = RelativeColor::parse(&text).unwrap();

        assert_eq!(parsed.reference_var(), Some("--color-success-300"));
        assert_eq!(parsed.direction, ShiftDirection::Lighter);
        assert_eq!(parsed.shifts, ShadeShifts::new(0.7, 0.9, 12.5));
    }

    #[test]
    fn test_relative_color_bare_channels() {
        let parsed = RelativeColor::parse("oklch(from var(--color-primary) l c h)").unwrap();
        let base = Oklch::new(0.43, 0.0147, 248.17);

        assert_eq!(parsed.resolve(base), base);

        let hue_only = RelativeColor::parse("oklch(from var(--color-x-500) calc(l * 0.8) calc(c * 1.1) h)")
            .unwrap();
        assert_eq!(hue_only.shifts, ShadeShifts::new(0.8, 1.1, 0.0));
    }

    #[test]
    fn test_fmt_number() {
        assert_eq!(fmt_number(0.5, 4), "0.5");
        assert_eq!(fmt_number(250.0, 2), "250");
        assert_eq!(fmt_number(0.163_84, 4), "0.1638");
        assert_eq!(fmt_number(-0.00001, 4), "0");
    }
}
