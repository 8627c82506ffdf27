//! Typed slot values.
//!
//! [`Value`] is the tagged variant stored behind every registered name. It
//! has a single parse/assign dispatch ([`Value::set`]) and a single canonical
//! text form ([`fmt::Display`]), so a value can travel from a document or
//! environment variable as text and land in the right representation.

pub mod kind;
pub mod list;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub use kind::Kind;
pub use list::StringList;

/// Raw text could not be coerced into a slot's kind.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
    Bool,

    #[error("{0}")]
    Int(String),

    #[error("{0}")]
    Float(#[from] std::num::ParseFloatError),

    #[error("{0}")]
    Duration(#[from] humantime::DurationError),
}

/// Current contents of a configuration slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Float64(f64),
    String(String),
    Duration(Duration),
    StringList(StringList),
}

impl Value {
    /// The zero value of `kind`.
    pub fn zero(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Value::Bool(false),
            Kind::Int32 => Value::Int32(0),
            Kind::Int64 => Value::Int64(0),
            Kind::Uint32 => Value::Uint32(0),
            Kind::Uint64 => Value::Uint64(0),
            Kind::Float64 => Value::Float64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Duration => Value::Duration(Duration::ZERO),
            Kind::StringList => Value::StringList(StringList::new()),
        }
    }

    /// Parse `raw` as a fresh value of `kind`.
    pub fn parse(kind: Kind, raw: &str) -> Result<Self, ValueError> {
        let mut value = Value::zero(kind);
        value.set(raw)?;
        Ok(value)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int32(_) => Kind::Int32,
            Value::Int64(_) => Kind::Int64,
            Value::Uint32(_) => Kind::Uint32,
            Value::Uint64(_) => Kind::Uint64,
            Value::Float64(_) => Kind::Float64,
            Value::String(_) => Kind::String,
            Value::Duration(_) => Kind::Duration,
            Value::StringList(_) => Kind::StringList,
        }
    }

    /// Coerce `raw` into this value's kind and store it.
    ///
    /// Scalars are overwritten; lists append. On error `self` is unchanged.
    pub fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        match self {
            Value::Bool(v) => *v = parse_bool(raw)?,
            Value::Int32(v) => *v = parse_int(raw, i32::from_str_radix)?,
            Value::Int64(v) => *v = parse_int(raw, i64::from_str_radix)?,
            Value::Uint32(v) => *v = parse_int(raw, u32::from_str_radix)?,
            Value::Uint64(v) => *v = parse_int(raw, u64::from_str_radix)?,
            Value::Float64(v) => *v = raw.parse()?,
            Value::String(v) => *v = raw.to_string(),
            Value::Duration(v) => *v = parse_duration(raw)?,
            Value::StringList(v) => v.set(raw),
        }
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Uint32(v) => write!(f, "{v}"),
            Value::Uint64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
            Value::Duration(v) => write!(f, "{}", humantime::format_duration(*v)),
            Value::StringList(v) => write!(f, "{v}"),
        }
    }
}

/// Scalars serialize natively; durations as their text form.
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int32(v) => serializer.serialize_i32(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::Uint32(v) => serializer.serialize_u32(*v),
            Value::Uint64(v) => serializer.serialize_u64(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Duration(_) => serializer.collect_str(self),
            Value::StringList(v) => serializer.collect_seq(v),
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, ValueError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ValueError::Bool),
    }
}

/// Integer with optional sign and radix prefix: `0x`, `0o`, `0b`, or a bare
/// leading `0` for octal. Single `_` separators may sit between digits or
/// after a prefix. Range is checked by the target type.
fn parse_int<T>(
    raw: &str,
    from_str_radix: fn(&str, u32) -> Result<T, std::num::ParseIntError>,
) -> Result<T, ValueError> {
    let invalid = || ValueError::Int(format!("invalid digit found in string: {raw:?}"));

    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits, prefixed) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..], true),
        Some("0o" | "0O") => (8, &unsigned[2..], true),
        Some("0b" | "0B") => (2, &unsigned[2..], true),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..], true),
        _ => (10, unsigned, false),
    };

    if digits.is_empty()
        || digits.starts_with(['+', '-'])
        || !separators_ok(digits, prefixed)
    {
        return Err(invalid());
    }

    let mut normalized = String::with_capacity(digits.len() + 1);
    if negative {
        normalized.push('-');
    }
    normalized.extend(digits.chars().filter(|&c| c != '_'));

    from_str_radix(&normalized, radix).map_err(|e| ValueError::Int(e.to_string()))
}

/// Every `_` follows a digit (or the radix prefix) and precedes a digit.
fn separators_ok(digits: &str, prefixed: bool) -> bool {
    let bytes = digits.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        if b != b'_' {
            return true;
        }
        let after_digit = match i {
            0 => prefixed,
            _ => bytes[i - 1] != b'_',
        };
        let before_digit = bytes.get(i + 1).is_some_and(|&next| next != b'_');
        after_digit && before_digit
    })
}

fn parse_duration(raw: &str) -> Result<Duration, ValueError> {
    // humantime tolerates trailing blanks; no other kind does.
    if raw.ends_with(char::is_whitespace) {
        let at = raw.trim_end().len();
        return Err(humantime::DurationError::InvalidCharacter(at).into());
    }
    if raw == "0" {
        return Ok(Duration::ZERO);
    }
    Ok(humantime::parse_duration(raw)?)
}

/// Rust types that a [`Value`] can be read back as.
pub trait Typed: Sized {
    const KIND: Kind;

    fn into_value(self) -> Value;

    /// `None` if `value` holds a different kind.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_typed {
    ($ty:ty, $variant:ident) => {
        impl Typed for $ty {
            const KIND: Kind = Kind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_typed!(bool, Bool);
impl_typed!(i32, Int32);
impl_typed!(i64, Int64);
impl_typed!(u32, Uint32);
impl_typed!(u64, Uint64);
impl_typed!(f64, Float64);
impl_typed!(String, String);
impl_typed!(Duration, Duration);

impl Typed for Vec<String> {
    const KIND: Kind = Kind::StringList;

    fn into_value(self) -> Value {
        Value::StringList(StringList::from(self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::StringList(v) => Some(v.as_slice().to_vec()),
            _ => None,
        }
    }
}
