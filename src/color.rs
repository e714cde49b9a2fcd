use std::{fmt, str::FromStr};

use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A 24-bit colour as carried by segments and the configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", WHITE),
    ("black", BLACK),
    ("red", Rgb::new(0xFF, 0x00, 0x00)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("blue", Rgb::new(0x00, 0x00, 0xFF)),
    ("yellow", Rgb::new(0xFF, 0xFF, 0x00)),
    ("cyan", Rgb::new(0x00, 0xFF, 0xFF)),
    ("magenta", Rgb::new(0xFF, 0x00, 0xFF)),
    ("orange", Rgb::new(0xFF, 0xA5, 0x00)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
    ("grey", Rgb::new(0x80, 0x80, 0x80)),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("colour value is empty")]
    Empty,
    #[error("`{0}` is not a hex colour (expected #rgb or #rrggbb)")]
    InvalidHex(String),
    #[error("unknown colour name `{0}`")]
    UnknownName(String),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_ratatui(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut parts = digits
                    .chars()
                    .filter_map(|ch| ch.to_digit(16))
                    .map(|value| (value * 17) as u8);
                Some(Self::new(parts.next()?, parts.next()?, parts.next()?))
            }
            6 => {
                let channel = |idx: usize| u8::from_str_radix(&digits[idx..idx + 2], 16).ok();
                Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
            }
            _ => None,
        }
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(digits) = trimmed.strip_prefix('#') {
            return Self::parse_hex(digits)
                .ok_or_else(|| ColorParseError::InvalidHex(trimmed.to_string()));
        }
        let lowered = trimmed.to_ascii_lowercase();
        if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
            return Ok(*rgb);
        }
        if lowered.len() == 6 {
            if let Some(rgb) = Self::parse_hex(&lowered) {
                return Ok(rgb);
            }
        }
        Err(ColorParseError::UnknownName(trimmed.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!("#FF8000".parse::<Rgb>(), Ok(Rgb::new(0xFF, 0x80, 0x00)));
        assert_eq!("#f80".parse::<Rgb>(), Ok(Rgb::new(0xFF, 0x88, 0x00)));
        assert_eq!("00ff00".parse::<Rgb>(), Ok(Rgb::new(0x00, 0xFF, 0x00)));
    }

    #[test]
    fn parses_named_colours_case_insensitively() {
        assert_eq!("White".parse::<Rgb>(), Ok(WHITE));
        assert_eq!(" orange ".parse::<Rgb>(), Ok(Rgb::new(0xFF, 0xA5, 0x00)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert_eq!("".parse::<Rgb>(), Err(ColorParseError::Empty));
        assert_eq!(
            "#12345".parse::<Rgb>(),
            Err(ColorParseError::InvalidHex("#12345".to_string()))
        );
        assert_eq!(
            "#ggg".parse::<Rgb>(),
            Err(ColorParseError::InvalidHex("#ggg".to_string()))
        );
        assert!(matches!(
            "chartreuse-ish".parse::<Rgb>(),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn displays_as_uppercase_hex() {
        assert_eq!(Rgb::new(1, 171, 255).to_string(), "#01ABFF");
        assert_eq!(WHITE.to_string(), "#FFFFFF");
    }
}
