//! Populating typed targets from records.
//!
//! A target type declares its shape once, as a [`FieldTable`] of
//! descriptors, by implementing [`Unmarshal`] (by hand or with
//! [`impl_unmarshal!`](crate::impl_unmarshal)). [`populate`] then walks a
//! record, matches names exactly, converts each value to the declared kind
//! and writes it into the target.
//!
//! Populate never fails. A field is left untouched when the target does
//! not declare it, when the value does not parse, when a temporal field has
//! no format hint, or when the declared type is unsupported. Only the last
//! case is logged. [`populate_with_report`] returns the per-field outcomes.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use psv_decoder::{Record, impl_unmarshal, populate};
//!
//! #[derive(Debug, Default)]
//! struct Entry {
//!     name: String,
//!     count: u32,
//!     score: f32,
//!     when: NaiveDate,
//! }
//!
//! impl_unmarshal!(Entry {
//!     "Name" => name,
//!     "Count" => count,
//!     "Score" => score,
//!     "When" => when @ "2006-01-02",
//! });
//!
//! let record: Record =
//!     [("Name", "A"), ("Count", "5"), ("Score", "1.5"), ("When", "2023-01-02")].into_iter().collect();
//! let mut entry = Entry::default();
//! populate(&record, &mut entry);
//!
//! assert_eq!(entry.name, "A");
//! assert_eq!(entry.count, 5);
//! assert_eq!(entry.score, 1.5);
//! assert_eq!(entry.when, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
//! ```

mod convert;
mod layout;
mod report;
mod table;
mod value;

use tracing::warn;

pub use report::{FieldOutcome, PopulateReport, SkipReason};
pub use table::{FieldDescriptor, FieldTable, FieldTableBuilder};
pub use value::{FieldKind, FieldSlot, FieldValue};

use crate::record::Record;

/// A type whose fields can be populated from a [`Record`].
pub trait Unmarshal: Sized + 'static {
    /// The field table of this type. Built once, shared by all calls.
    fn field_table() -> &'static FieldTable<Self>;
}

/// Populates `target` from `record`, field by field.
///
/// Fields the record does not mention keep their values.
pub fn populate<T: Unmarshal>(record: &Record, target: &mut T) {
    let table = T::field_table();
    for (name, value) in record.iter() {
        apply(table, name, value, target);
    }
}

/// Like [`populate`], but returns what happened to every record field.
pub fn populate_with_report<T: Unmarshal>(record: &Record, target: &mut T) -> PopulateReport {
    let table = T::field_table();
    let mut report = PopulateReport::default();
    for (name, value) in record.iter() {
        report.push(name, apply(table, name, value, target));
    }
    report.finish()
}

/// Decodes every record into a fresh `T::default()`.
pub fn decode_all<T: Unmarshal + Default>(records: &[Record]) -> Vec<T> {
    records.iter().map(Record::decode).collect()
}

fn apply<T>(table: &FieldTable<T>, name: &str, value: &str, target: &mut T) -> FieldOutcome {
    let Some(descriptor) = table.get(name) else {
        return FieldOutcome::Skipped(SkipReason::UnknownField);
    };
    let kind = descriptor.kind();
    let format = descriptor.format();

    let assigned = match descriptor.slot(target) {
        FieldSlot::String(slot) => {
            value.clone_into(slot);
            true
        }
        FieldSlot::Uint(slot) => store(slot, convert::parse_unsigned(value)),
        FieldSlot::Uint32(slot) => store(slot, convert::parse_unsigned(value)),
        FieldSlot::Uint64(slot) => store(slot, convert::parse_unsigned(value)),
        FieldSlot::Float32(slot) => store(slot, convert::parse_float(value)),
        FieldSlot::Float64(slot) => store(slot, convert::parse_float(value)),
        FieldSlot::DateTime(slot) => {
            let Some(hint) = format else {
                return FieldOutcome::Skipped(SkipReason::MissingFormat { kind });
            };
            store(slot, convert::parse_datetime(value, hint))
        }
        FieldSlot::Date(slot) => {
            let Some(hint) = format else {
                return FieldOutcome::Skipped(SkipReason::MissingFormat { kind });
            };
            store(slot, convert::parse_date(value, hint))
        }
        FieldSlot::Unsupported(type_name) => {
            warn!(field = name, kind = type_name, "unsupported field type");
            return FieldOutcome::Skipped(SkipReason::Unsupported { kind });
        }
    };

    if assigned {
        FieldOutcome::Assigned
    } else {
        FieldOutcome::Skipped(SkipReason::InvalidValue { kind })
    }
}

fn store<V>(slot: &mut V, parsed: Option<V>) -> bool {
    match parsed {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Implements [`Unmarshal`] for a struct from a list of
/// `"ColumnName" => field` entries. Append `@ "hint"` to give a temporal
/// field its format hint.
///
/// ```
/// use chrono::NaiveDateTime;
/// use psv_decoder::{Unmarshal, impl_unmarshal};
///
/// #[derive(Default)]
/// struct Account {
///     id: String,
///     plan_id: u32,
///     created: NaiveDateTime,
/// }
///
/// impl_unmarshal!(Account {
///     "AccountID" => id,
///     "PlanID" => plan_id,
///     "PlanSegCreateDate" => created @ "2006-01-02 15:04:05",
/// });
///
/// assert_eq!(Account::field_table().len(), 3);
/// ```
#[macro_export]
macro_rules! impl_unmarshal {
    (@hint) => {
        ::core::option::Option::None
    };
    (@hint $hint:literal) => {
        ::core::option::Option::Some($hint)
    };
    ($ty:ty { $($column:literal => $field:ident $(@ $hint:literal)?),* $(,)? }) => {
        impl $crate::Unmarshal for $ty {
            fn field_table() -> &'static $crate::FieldTable<Self> {
                static TABLE: ::std::sync::LazyLock<$crate::FieldTable<$ty>> =
                    ::std::sync::LazyLock::new(|| {
                        $crate::FieldTable::<$ty>::builder()
                            $(
                                .field_hinted(
                                    $column,
                                    |target: &mut $ty| &mut target.$field,
                                    $crate::impl_unmarshal!(@hint $($hint)?),
                                )
                            )*
                            .build()
                    });
                &TABLE
            }
        }
    };
}
