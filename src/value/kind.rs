//! The primitive kinds a configuration slot can hold.

use std::fmt;

/// Declared kind of a registered variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float64,
    String,
    Duration,
    /// Accumulating sequence of strings.
    StringList,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 9] = [
        Kind::Bool,
        Kind::Int32,
        Kind::Int64,
        Kind::Uint32,
        Kind::Uint64,
        Kind::Float64,
        Kind::String,
        Kind::Duration,
        Kind::StringList,
    ];
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => write!(f, "bool"),
            Kind::Int32 => write!(f, "int32"),
            Kind::Int64 => write!(f, "int64"),
            Kind::Uint32 => write!(f, "uint32"),
            Kind::Uint64 => write!(f, "uint64"),
            Kind::Float64 => write!(f, "float64"),
            Kind::String => write!(f, "string"),
            Kind::Duration => write!(f, "duration"),
            Kind::StringList => write!(f, "strings"),
        }
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bool" | "boolean" => Ok(Kind::Bool),
            "int32" | "i32" => Ok(Kind::Int32),
            "int" | "int64" | "i64" => Ok(Kind::Int64),
            "uint32" | "u32" => Ok(Kind::Uint32),
            "uint" | "uint64" | "u64" => Ok(Kind::Uint64),
            "float" | "float64" | "f64" => Ok(Kind::Float64),
            "string" | "str" => Ok(Kind::String),
            "duration" => Ok(Kind::Duration),
            "strings" | "list" => Ok(Kind::StringList),
            other => Err(format!(
                "unknown kind: '{other}'. Supported: bool, int32, int64, uint32, uint64, \
                 float64, string, duration, strings"
            )),
        }
    }
}
