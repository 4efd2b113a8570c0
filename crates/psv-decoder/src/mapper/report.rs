//! What happened to each field of a record during populate.

use serde::Serialize;

use super::value::FieldKind;

/// Why a field was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The target declares no field with this name.
    UnknownField,
    /// The value does not parse as the declared kind.
    InvalidValue { kind: FieldKind },
    /// A temporal field without a format hint.
    MissingFormat { kind: FieldKind },
    /// The declared type can't be populated.
    Unsupported { kind: FieldKind },
}

/// Outcome for one field of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldOutcome {
    Assigned,
    Skipped(SkipReason),
}

impl FieldOutcome {
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned)
    }
}

/// Per-field outcomes of one populate call, sorted by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PopulateReport {
    fields: Vec<(String, FieldOutcome)>,
}

impl PopulateReport {
    pub(crate) fn push(&mut self, name: &str, outcome: FieldOutcome) {
        self.fields.push((name.to_owned(), outcome));
    }

    pub(crate) fn finish(mut self) -> Self {
        self.fields.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// Outcome for the named record field.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&FieldOutcome> {
        self.fields.iter().find(|(field, _)| field == name).map(|(_, outcome)| outcome)
    }

    /// All outcomes, sorted by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOutcome)> {
        self.fields.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    /// Names of the fields that were assigned.
    pub fn assigned(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, outcome)| outcome.is_assigned()).map(|(name, _)| name)
    }

    /// Fields left untouched, with the reason.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.iter().filter_map(|(name, outcome)| match outcome {
            FieldOutcome::Skipped(reason) => Some((name, reason)),
            FieldOutcome::Assigned => None,
        })
    }

    /// Whether every field of the record reached the target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|(_, outcome)| outcome.is_assigned())
    }
}
