//! Per-type field descriptor tables.

use std::{collections::HashMap, fmt};

use super::value::{FieldKind, FieldSlot, FieldValue};

type Accessor<T> = Box<dyn for<'a> Fn(&'a mut T) -> FieldSlot<'a> + Send + Sync>;

/// Declared name, kind and format hint of one target field, plus the
/// accessor that borrows the field out of an instance.
pub struct FieldDescriptor<T> {
    name: &'static str,
    kind: FieldKind,
    format: Option<&'static str>,
    accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Format hint, if one was declared and is non-empty.
    #[must_use]
    pub fn format(&self) -> Option<&'static str> {
        self.format.filter(|hint| !hint.is_empty())
    }

    /// Borrows this field out of `target`.
    pub fn slot<'a>(&self, target: &'a mut T) -> FieldSlot<'a> {
        (self.accessor)(target)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// The field descriptors of a target type, in declaration order.
///
/// Built once per type (usually inside a `LazyLock`) and shared by every
/// populate call.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use psv_decoder::{FieldKind, FieldTable};
///
/// #[derive(Default)]
/// struct Payment {
///     id: u64,
///     amount: f64,
///     booked: NaiveDateTime,
/// }
///
/// let table = FieldTable::<Payment>::builder()
///     .field("ID", |p: &mut Payment| &mut p.id)
///     .field("Amount", |p: &mut Payment| &mut p.amount)
///     .field_with_format("Booked", |p: &mut Payment| &mut p.booked, "2006-01-02 15:04:05")
///     .build();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.get("Amount").unwrap().kind(), FieldKind::Float64);
/// assert_eq!(table.get("Booked").unwrap().format(), Some("2006-01-02 15:04:05"));
/// ```
pub struct FieldTable<T> {
    fields: Vec<FieldDescriptor<T>>,
    by_name: HashMap<&'static str, usize>,
}

impl<T: 'static> FieldTable<T> {
    /// Starts an empty table.
    #[must_use]
    pub fn builder() -> FieldTableBuilder<T> {
        FieldTableBuilder { table: Self { fields: Vec::new(), by_name: HashMap::new() } }
    }
}

impl<T> FieldTable<T> {
    /// Descriptor with exactly this name (case-sensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.by_name.get(name).and_then(|&index| self.fields.get(index))
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<T>> {
        self.fields.iter()
    }

    /// Declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(FieldDescriptor::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

/// Builder for [`FieldTable`].
///
/// Registering a name twice replaces the earlier descriptor in place.
pub struct FieldTableBuilder<T> {
    table: FieldTable<T>,
}

impl<T: 'static> FieldTableBuilder<T> {
    /// Adds a field without a format hint.
    #[must_use]
    pub fn field<V: FieldValue + 'static>(
        self,
        name: &'static str,
        accessor: fn(&mut T) -> &mut V,
    ) -> Self {
        self.field_hinted(name, accessor, None)
    }

    /// Adds a field with a format hint (used by temporal kinds only).
    #[must_use]
    pub fn field_with_format<V: FieldValue + 'static>(
        self,
        name: &'static str,
        accessor: fn(&mut T) -> &mut V,
        format: &'static str,
    ) -> Self {
        self.field_hinted(name, accessor, Some(format))
    }

    /// Adds a field with an optional format hint.
    #[must_use]
    pub fn field_hinted<V: FieldValue + 'static>(
        mut self,
        name: &'static str,
        accessor: fn(&mut T) -> &mut V,
        format: Option<&'static str>,
    ) -> Self {
        let descriptor = FieldDescriptor {
            name,
            kind: V::KIND,
            format,
            accessor: Box::new(erase(move |target: &mut T| accessor(target).slot())),
        };
        match self.table.by_name.get(name) {
            Some(&index) => self.table.fields[index] = descriptor,
            None => {
                self.table.by_name.insert(name, self.table.fields.len());
                self.table.fields.push(descriptor);
            }
        }
        self
    }

    #[must_use]
    pub fn build(self) -> FieldTable<T> {
        self.table
    }
}

// Pins the closure to a higher-ranked signature so the returned slot
// borrows from the argument.
fn erase<T, F>(f: F) -> F
where
    F: for<'a> Fn(&'a mut T) -> FieldSlot<'a>,
{
    f
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[derive(Default)]
    struct Row {
        name: String,
        count: u32,
        when: NaiveDate,
        flag: bool,
    }

    fn table() -> FieldTable<Row> {
        FieldTable::builder()
            .field("Name", |r: &mut Row| &mut r.name)
            .field("Count", |r: &mut Row| &mut r.count)
            .field_with_format("When", |r: &mut Row| &mut r.when, "2006-01-02")
            .field("Flag", |r: &mut Row| &mut r.flag)
            .build()
    }

    #[test]
    fn kinds_follow_field_types() {
        let table = table();
        let kinds: Vec<_> = table.iter().map(FieldDescriptor::kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::String,
                FieldKind::Uint32,
                FieldKind::Date,
                FieldKind::Unsupported("bool"),
            ]
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = table();
        assert!(table.get("Count").is_some());
        assert!(table.get("count").is_none());
        assert!(table.get("COUNT").is_none());
    }

    #[test]
    fn names_keep_declaration_order() {
        let names: Vec<_> = table().names().collect();
        assert_eq!(names, ["Name", "Count", "When", "Flag"]);
    }

    #[test]
    fn empty_hint_counts_as_missing() {
        let table = FieldTable::<Row>::builder()
            .field_with_format("When", |r: &mut Row| &mut r.when, "")
            .build();
        assert_eq!(table.get("When").unwrap().format(), None);
    }

    #[test]
    fn slot_writes_through() {
        let table = table();
        let mut row = Row::default();
        if let FieldSlot::String(name) = table.get("Name").unwrap().slot(&mut row) {
            name.push_str("abc");
        }
        assert_eq!(row.name, "abc");
    }

    #[test]
    fn duplicate_name_replaces_descriptor() {
        let table = FieldTable::<Row>::builder()
            .field("Value", |r: &mut Row| &mut r.name)
            .field("Other", |r: &mut Row| &mut r.flag)
            .field("Value", |r: &mut Row| &mut r.count)
            .build();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Value").unwrap().kind(), FieldKind::Uint32);
        assert_eq!(table.names().collect::<Vec<_>>(), ["Value", "Other"]);
    }
}
