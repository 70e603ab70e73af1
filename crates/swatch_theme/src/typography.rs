//! Typography field paths and scale validation

use std::fmt;
use std::str::FromStr;

use crate::document::{Device, ThemeDocument, TypeSize};
use crate::error::ThemeError;

/// Named sizes from smallest to largest
pub const SIZE_ORDER: [&str; 8] = ["xs", "sm", "body", "md", "lg", "2lg", "xl", "2xl"];

fn size_rank(size: &str) -> usize {
    SIZE_ORDER
        .iter()
        .position(|name| *name == size)
        .unwrap_or(SIZE_ORDER.len())
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum TypeProperty {
    FontSize,
    LineHeight,
}

impl TypeProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeProperty::FontSize => "font_size",
            TypeProperty::LineHeight => "line_height",
        }
    }
}

/// Target of a typography edit: `<device>.<size>.<prop>` or `weights.<name>`
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum TypographyPath {
    Size {
        device: Device,
        size: String,
        property: TypeProperty,
    },
    Weight(String),
}

impl TypographyPath {
    pub fn size(device: Device, size: &str, property: TypeProperty) -> Self {
        TypographyPath::Size {
            device,
            size: size.to_string(),
            property,
        }
    }

    pub fn weight(name: &str) -> Self {
        TypographyPath::Weight(name.to_string())
    }

    /// Write `value` into the document; size entries are created on demand
    pub fn apply(&self, doc: &mut ThemeDocument, value: u32) {
        match self {
            TypographyPath::Size {
                device,
                size,
                property,
            } => {
                let entry = doc
                    .typography
                    .sizes_mut(*device)
                    .entry(size.clone())
                    .or_insert(TypeSize::new(0, 0));
                match property {
                    TypeProperty::FontSize => entry.font_size = value,
                    TypeProperty::LineHeight => entry.line_height = value,
                }
            }
            TypographyPath::Weight(name) => {
                let weight = u16::try_from(value).unwrap_or(u16::MAX).clamp(100, 900);
                doc.typography.weights.insert(name.clone(), weight);
            }
        }
    }
}

impl fmt::Display for TypographyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypographyPath::Size {
                device,
                size,
                property,
            } => write!(f, "{}.{}.{}", device.as_str(), size, property.as_str()),
            TypographyPath::Weight(name) => write!(f, "weights.{name}"),
        }
    }
}

impl FromStr for TypographyPath {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ThemeError::TypographyPath(s.to_string());
        let parts: Vec<&str> = s.trim().split('.').collect();

        match parts.as_slice() {
            ["weights", name] if !name.is_empty() => Ok(TypographyPath::weight(name)),
            [device, size, property] if !size.is_empty() => {
                let device = match *device {
                    "desktop" => Device::Desktop,
                    "mobile" => Device::Mobile,
                    _ => return Err(invalid()),
                };
                let property = match *property {
                    "font_size" => TypeProperty::FontSize,
                    "line_height" => TypeProperty::LineHeight,
                    _ => return Err(invalid()),
                };
                Ok(TypographyPath::size(device, size, property))
            }
            _ => Err(invalid()),
        }
    }
}

/// A suspicious value in the type scale
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypographyWarning {
    SmallerThan {
        device: Device,
        size: String,
        font_size: u32,
        neighbour: String,
        neighbour_size: u32,
    },
    LargerThan {
        device: Device,
        size: String,
        font_size: u32,
        neighbour: String,
        neighbour_size: u32,
    },
    TightLineHeight {
        device: Device,
        size: String,
        font_size: u32,
        line_height: u32,
    },
}

impl fmt::Display for TypographyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypographyWarning::SmallerThan {
                device,
                size,
                font_size,
                neighbour,
                neighbour_size,
            } => write!(
                f,
                "{}.{size} ({font_size}px) is smaller than {neighbour} ({neighbour_size}px)",
                device.as_str()
            ),
            TypographyWarning::LargerThan {
                device,
                size,
                font_size,
                neighbour,
                neighbour_size,
            } => write!(
                f,
                "{}.{size} ({font_size}px) is larger than {neighbour} ({neighbour_size}px)",
                device.as_str()
            ),
            TypographyWarning::TightLineHeight {
                device,
                size,
                font_size,
                line_height,
            } => write!(
                f,
                "{}.{size} line height {line_height}px is below its font size {font_size}px",
                device.as_str()
            ),
        }
    }
}

/// Check that sizes grow with the scale and line heights cover font sizes
pub fn validate_typography(doc: &ThemeDocument) -> Vec<TypographyWarning> {
    let mut warnings = Vec::new();

    for device in Device::ALL {
        let sizes = doc.typography.sizes(device);
        let mut ordered: Vec<(&String, &TypeSize)> = sizes.iter().collect();
        ordered.sort_by_key(|(name, _)| size_rank(name));

        for (i, (name, value)) in ordered.iter().enumerate() {
            if let Some((smaller, smaller_value)) = i.checked_sub(1).map(|j| ordered[j]) {
                if value.font_size < smaller_value.font_size {
                    warnings.push(TypographyWarning::SmallerThan {
                        device,
                        size: name.to_string(),
                        font_size: value.font_size,
                        neighbour: smaller.to_string(),
                        neighbour_size: smaller_value.font_size,
                    });
                    continue;
                }
            }
            if let Some((larger, larger_value)) = ordered.get(i + 1) {
                if value.font_size > larger_value.font_size {
                    warnings.push(TypographyWarning::LargerThan {
                        device,
                        size: name.to_string(),
                        font_size: value.font_size,
                        neighbour: larger.to_string(),
                        neighbour_size: larger_value.font_size,
                    });
                }
            }
        }

        for (name, value) in &ordered {
            if value.line_height < value.font_size {
                warnings.push(TypographyWarning::TightLineHeight {
                    device,
                    size: name.to_string(),
                    font_size: value.font_size,
                    line_height: value.line_height,
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!(
            "desktop.body.font_size".parse::<TypographyPath>().unwrap(),
            TypographyPath::size(Device::Desktop, "body", TypeProperty::FontSize)
        );
        assert_eq!(
            "weights.bold".parse::<TypographyPath>().unwrap(),
            TypographyPath::weight("bold")
        );
        assert!("tablet.body.font_size".parse::<TypographyPath>().is_err());
        assert!("desktop.body".parse::<TypographyPath>().is_err());
        assert_eq!(
            TypographyPath::size(Device::Mobile, "2xl", TypeProperty::LineHeight).to_string(),
            "mobile.2xl.line_height"
        );
    }

    #[test]
    fn test_apply_creates_missing_size() {
        let mut doc = ThemeDocument::default();
        TypographyPath::size(Device::Mobile, "3xl", TypeProperty::FontSize).apply(&mut doc, 40);
        assert_eq!(doc.typography.mobile["3xl"], TypeSize::new(40, 0));
    }

    #[test]
    fn test_weight_clamped() {
        let mut doc = ThemeDocument::default();
        TypographyPath::weight("bold").apply(&mut doc, 1200);
        assert_eq!(doc.typography.weights["bold"], 900);
    }

    #[test]
    fn test_default_scale_is_clean() {
        assert!(validate_typography(&ThemeDocument::default()).is_empty());
    }

    #[test]
    fn test_out_of_order_sizes_warn() {
        let mut doc = ThemeDocument::default();
        doc.typography.desktop["md"].font_size = 12;

        let warnings = validate_typography(&doc);
        assert!(warnings.iter().any(|w| matches!(
            w,
            TypographyWarning::SmallerThan { size, neighbour, .. } if size == "md" && neighbour == "body"
        )));
    }

    #[test]
    fn test_tight_line_height_warns() {
        let mut doc = ThemeDocument::default();
        doc.typography.mobile["lg"].line_height = 10;

        let warnings = validate_typography(&doc);
        assert_eq!(
            warnings,
            vec![TypographyWarning::TightLineHeight {
                device: Device::Mobile,
                size: "lg".to_string(),
                font_size: 21,
                line_height: 10,
            }]
        );
    }
}
