use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::ser::Formatter;
use serde_json::value::RawValue;
use std::io;

/// A single typed argument extracted from a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Int(u64),
    /// Digit run wider than `u64`, kept as canonical decimal digits
    BigInt(String),
    Text(String),
}

impl ArgumentValue {
    /// Build an integer from ASCII digits of any width
    ///
    /// Returns `None` unless `digits` is a non-empty run of `0-9`.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        match digits.parse::<u64>() {
            Ok(value) => Some(Self::Int(value)),
            // Only overflow is left; the run has a non-zero digit
            Err(_) => Some(Self::BigInt(digits.trim_start_matches('0').to_string())),
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::BigInt(_) | Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Int(_) | Self::BigInt(_) => None,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int(_) | Self::BigInt(_))
    }
}

impl Serialize for ArgumentValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(value) => serializer.serialize_u64(*value),
            // Emitted as a bare JSON number at full precision
            Self::BigInt(digits) => RawValue::from_string(digits.clone())
                .map_err(S::Error::custom)?
                .serialize(serializer),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}

/// `json.dumps` layout: `", "` and `": "` separators, non-ASCII as `\uXXXX`
struct SpacedAscii;

impl Formatter for SpacedAscii {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Ordered argument map
///
/// Keeps insertion order so that serialized arguments follow the template's
/// field order (`date`, `time`, `meeting_room` rather than alphabetical).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    entries: Vec<(String, ArgumentValue)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgumentValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode as a JSON object string in `json.dumps` layout
    ///
    /// Separators are `", "` and `": "`, and every character outside printable
    /// ASCII is written as a `\uXXXX` escape (surrogate pairs above the BMP).
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedAscii);
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }
}

impl Serialize for Arguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Function-call descriptor produced by a successful match
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IntentDescriptor {
    pub name: String,
    pub arguments: Arguments,
}

impl IntentDescriptor {
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}
