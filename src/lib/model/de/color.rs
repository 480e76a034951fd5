//! Deserializer for the Color type.

use std::error;
use std::fmt;
use std::str::FromStr;

use css_color_parser::{Color as CssColor, ColorParseError as CssColorParseError};
use serde::de::{self, Deserialize, Visitor};

use super::super::Color;


const FIELDS: &'static [&'static str] = &["r", "g", "b"];
const EXPECTING_MSG: &'static str = "CSS color string or array/map of RGB values";


impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_any(ColorVisitor)
    }
}

struct ColorVisitor;
impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let color = Color::from_str(v).map_err(|e| {
            warn!("Failed to parse color `{}`: {}", v, e);
            E::custom(e)
        })?;
        Ok(color)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where A: de::SeqAccess<'de>
    {
        // Preemptively check for length.
        if let Some(size) = seq.size_hint() {
            if size != FIELDS.len() {
                return Err(de::Error::invalid_length(
                    size, &(&format!("{}", FIELDS.len()) as &str)));
            }
        }

        let mut channels = Vec::with_capacity(FIELDS.len());
        while let Some(elem) = seq.next_element::<u8>()? {
            channels.push(elem);
            if channels.len() > FIELDS.len() {
                return Err(de::Error::invalid_length(
                    channels.len(), &(&format!("{}", FIELDS.len()) as &str)));
            }
        }
        match channels[..] {
            [r, g, b] => Ok(Color(r, g, b)),
            _ => Err(de::Error::invalid_length(
                channels.len(), &(&format!("{}", FIELDS.len()) as &str))),
        }
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where A: de::MapAccess<'de>
    {
        let (mut r, mut g, mut b): (Option<u8>, Option<u8>, Option<u8>) = (None, None, None);
        while let Some(key) = map.next_key::<String>()? {
            let key = key.trim().to_lowercase();
            let (channel, field) = match key.as_str() {
                "r" | "red" => (&mut r, "r"),
                "g" | "green" => (&mut g, "g"),
                "b" | "blue" => (&mut b, "b"),
                key => return Err(de::Error::unknown_field(key, FIELDS)),
            };
            if channel.is_some() {
                return Err(de::Error::duplicate_field(field));
            }
            *channel = Some(map.next_value()?);
        }

        let r = r.ok_or_else(|| de::Error::missing_field("r"))?;
        let g = g.ok_or_else(|| de::Error::missing_field("g"))?;
        let b = b.ok_or_else(|| de::Error::missing_field("b"))?;
        Ok(Color(r, g, b))
    }
}


impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        // Replace all other possible hex prefixes with the standard CSS one.
        let mut s = v.trim().to_lowercase();
        for &prefix in ["#", "0x", "$"].iter() {
            if s.starts_with(prefix) {
                let digits = s[prefix.len()..].to_owned();
                // Other prefixes require the full 24-bit hex number.
                if prefix != "#" && digits.len() != 6 {
                    return Err(ColorParseError::Css(CssColorParseError));
                }
                // The CSS parser lets through a sign before the digits.
                if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(ColorParseError::Css(CssColorParseError));
                }
                s = format!("#{}", digits);
                break;
            }
        }

        let css_color: CssColor = s.parse()?;
        if css_color.a != 1.0 {
            return Err(ColorParseError::Alpha(css_color.a));
        }
        Ok(Color(css_color.r, css_color.g, css_color.b))
    }
}


/// Error that may occur while parsing a Color from a string.
#[derive(Debug)]
pub enum ColorParseError {
    /// Error while trying to parse a string as CSS color.
    Css(CssColorParseError),
    /// The color includes an alpha channel value, which isn't supported.
    Alpha(f32),
}

impl From<CssColorParseError> for ColorParseError {
    fn from(e: CssColorParseError) -> Self {
        ColorParseError::Css(e)
    }
}

// css_color_parser::ColorParseError doesn't impl PartialEq.
impl PartialEq<ColorParseError> for ColorParseError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (&ColorParseError::Css(_), &ColorParseError::Css(_)) => true,
            (&ColorParseError::Alpha(a1), &ColorParseError::Alpha(a2)) => a1 == a2,
            _ => false,
        }
    }
}

impl error::Error for ColorParseError {}

impl fmt::Display for ColorParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ColorParseError::Css(_) => write!(fmt, "invalid CSS color syntax"),
            ColorParseError::Alpha(a) => write!(fmt, "color transparency not supported ({})", a),
        }
    }
}
