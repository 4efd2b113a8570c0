//! Declared field types and typed mutable slots into a target.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Semantic type of a target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// `String`, assigned as is.
    String,
    /// `usize`, platform-width unsigned integer.
    Uint,
    /// `u32`.
    Uint32,
    /// `u64`.
    Uint64,
    /// `f32`.
    Float32,
    /// `f64`.
    Float64,
    /// `NaiveDateTime`, needs a format hint.
    DateTime,
    /// `NaiveDate`, needs a format hint.
    Date,
    /// Anything else. Carries the Rust type name for diagnostics.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Whether values of this kind are parsed with a format hint.
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::DateTime | Self::Date)
    }

    /// Short name used in logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::String => "string",
            Self::Uint => "uint",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Unsupported(name) => name,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed mutable reference into one field of a target.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    String(&'a mut String),
    Uint(&'a mut usize),
    Uint32(&'a mut u32),
    Uint64(&'a mut u64),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
    DateTime(&'a mut NaiveDateTime),
    Date(&'a mut NaiveDate),
    /// The field exists but its type can't be populated.
    Unsupported(&'static str),
}

/// A type that can sit behind a field descriptor.
///
/// Implemented for every supported kind and, as
/// [`FieldKind::Unsupported`], for the common scalar types the mapper
/// refuses to populate. Implement it for your own types to register them
/// in a table; returning [`FieldSlot::Unsupported`] keeps them untouched.
pub trait FieldValue {
    /// Declared kind of this type.
    const KIND: FieldKind;

    /// Borrows `self` as a typed slot.
    fn slot(&mut self) -> FieldSlot<'_>;
}

macro_rules! supported {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::$variant;

                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::$variant(self)
                }
            }
        )*
    };
}

macro_rules! unsupported {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Unsupported(stringify!($ty));

                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::Unsupported(stringify!($ty))
                }
            }
        )*
    };
}

supported! {
    String => String,
    usize => Uint,
    u32 => Uint32,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
    NaiveDateTime => DateTime,
    NaiveDate => Date,
}

unsupported!(i8, i16, i32, i64, isize, u8, u16, bool, char);
