//! Scalar cell values and column dtypes.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Shared null returned for missing cells.
pub(crate) static NULL: Cell = Cell::Null;

/// One value of the table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Nested arrays/objects kept as-is. Not hashable.
    Json(Value),
}

/// Hashable projection of a [`Cell`], used for joins and distinct counts.
///
/// Floats are keyed by their bit pattern, timestamps by whole seconds plus
/// nanoseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Bool(bool),
    Int(i64),
    Float(u64),
    Text(String),
    Timestamp(i64, u32),
}

impl Cell {
    /// Convert a JSON scalar. Integers that fit `i64` stay integral.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| n.as_f64().map_or(Self::Null, Self::Float), Self::Int),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Json(other.clone()),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `None` for nulls and nested JSON, which have no distinct-value key.
    #[must_use]
    pub fn key(&self) -> Option<CellKey> {
        match self {
            Self::Null | Self::Json(_) => None,
            Self::Bool(b) => Some(CellKey::Bool(*b)),
            Self::Int(i) => Some(CellKey::Int(*i)),
            Self::Float(f) => Some(CellKey::Float(f.to_bits())),
            Self::Text(s) => Some(CellKey::Text(s.clone())),
            Self::Timestamp(t) => Some(CellKey::Timestamp(t.timestamp(), t.timestamp_subsec_nanos())),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON form; timestamps become RFC 3339 strings.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::Text(s) => Value::String(s.clone()),
            Self::Timestamp(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Json(v) => v.clone(),
        }
    }
}

/// Empty for null; what a table or CSV cell shows.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Timestamp(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

/// Column dtype, named like the pandas dtypes downstream reports expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Object,
    Int64,
    Float64,
    Bool,
    DatetimeUtc,
    Category,
}

impl DataType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::DatetimeUtc => "datetime64[ns, UTC]",
            Self::Category => "category",
        }
    }

    /// Infer the dtype of plain cells.
    ///
    /// Integers with nulls widen to `float64`; booleans with nulls and
    /// all-null columns are `object`.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let (mut nulls, mut bools, mut ints, mut floats, mut stamps, mut others) =
            (0_usize, 0_usize, 0_usize, 0_usize, 0_usize, 0_usize);
        for cell in cells {
            match cell {
                Cell::Null => nulls += 1,
                Cell::Bool(_) => bools += 1,
                Cell::Int(_) => ints += 1,
                Cell::Float(_) => floats += 1,
                Cell::Timestamp(_) => stamps += 1,
                Cell::Text(_) | Cell::Json(_) => others += 1,
            }
        }

        let typed = bools + ints + floats + stamps + others;
        if typed == 0 || others > 0 {
            return Self::Object;
        }
        if stamps == typed {
            Self::DatetimeUtc
        } else if bools == typed && nulls == 0 {
            Self::Bool
        } else if ints == typed && nulls == 0 {
            Self::Int64
        } else if ints + floats == typed {
            Self::Float64
        } else {
            Self::Object
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
