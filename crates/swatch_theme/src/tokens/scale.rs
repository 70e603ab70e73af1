//! The fixed 11-step shade scale

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// One of the 11 shade keys of a palette ramp
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum ShadeKey {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

/// Walk order used by ramp recomputation
pub type ShadeWalk = SmallVec<[ShadeKey; 10]>;

impl ShadeKey {
    /// Every shade, lightest first
    pub const ALL: [ShadeKey; 11] = [
        ShadeKey::S50,
        ShadeKey::S100,
        ShadeKey::S200,
        ShadeKey::S300,
        ShadeKey::S400,
        ShadeKey::S500,
        ShadeKey::S600,
        ShadeKey::S700,
        ShadeKey::S800,
        ShadeKey::S900,
        ShadeKey::S950,
    ];

    /// The default base shade of every palette
    pub const BASE: ShadeKey = ShadeKey::S500;

    pub fn value(self) -> u16 {
        match self {
            ShadeKey::S50 => 50,
            ShadeKey::S100 => 100,
            ShadeKey::S200 => 200,
            ShadeKey::S300 => 300,
            ShadeKey::S400 => 400,
            ShadeKey::S500 => 500,
            ShadeKey::S600 => 600,
            ShadeKey::S700 => 700,
            ShadeKey::S800 => 800,
            ShadeKey::S900 => 900,
            ShadeKey::S950 => 950,
        }
    }

    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.value() == value)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next step toward 50; the 100 to 50 step is half-sized
    pub fn lighter(self) -> Option<Self> {
        match self {
            ShadeKey::S50 => None,
            ShadeKey::S950 => Some(ShadeKey::S900),
            key => Self::from_value(key.value() - if key.value() == 100 { 50 } else { 100 }),
        }
    }

    /// Next step toward 950; the 900 to 950 step is half-sized
    pub fn darker(self) -> Option<Self> {
        match self {
            ShadeKey::S950 => None,
            ShadeKey::S50 => Some(ShadeKey::S100),
            key => Self::from_value(key.value() + if key.value() == 900 { 50 } else { 100 }),
        }
    }

    /// Shades lighter than `self`, nearest first
    pub fn walk_lighter(self) -> ShadeWalk {
        std::iter::successors(self.lighter(), |key| key.lighter()).collect()
    }

    /// Shades darker than `self`, nearest first
    pub fn walk_darker(self) -> ShadeWalk {
        std::iter::successors(self.darker(), |key| key.darker()).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShadeKey::S50 => "50",
            ShadeKey::S100 => "100",
            ShadeKey::S200 => "200",
            ShadeKey::S300 => "300",
            ShadeKey::S400 => "400",
            ShadeKey::S500 => "500",
            ShadeKey::S600 => "600",
            ShadeKey::S700 => "700",
            ShadeKey::S800 => "800",
            ShadeKey::S900 => "900",
            ShadeKey::S950 => "950",
        }
    }
}

impl fmt::Display for ShadeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShadeKey {
    type Err = crate::ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Self::from_value)
            .ok_or_else(|| crate::ThemeError::UnknownShade(s.to_string()))
    }
}

impl Serialize for ShadeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct ShadeKeyVisitor;

impl<'de> Visitor<'de> for ShadeKeyVisitor {
    type Value = ShadeKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a shade key such as 500 or \"500\"")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ShadeKey, E> {
        u16::try_from(v)
            .ok()
            .and_then(ShadeKey::from_value)
            .ok_or_else(|| E::custom(format!("unknown shade {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ShadeKey, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("unknown shade {v}")))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ShadeKey, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ShadeKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ShadeKeyVisitor)
    }
}
