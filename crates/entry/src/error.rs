//! Item-entry error model.
//!
//! `Display` of every user-facing variant is the exact message shown next to the field
//! (or in the transient notice), so UI shells can render `to_string()` directly.

use std::collections::BTreeMap;

use thiserror::Error;

use cataloger_core::DomainError;

use crate::field::Field;

/// The format/length rule a non-blank field broke.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    MaxLength(usize),
    PriceFormat,
    DayRange,
    MonthRange,
    YearDigits,
    SerialFormat,
}

impl core::fmt::Display for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Rule::MaxLength(max) => write!(f, "Max {max} characters"),
            Rule::PriceFormat => f.write_str("Invalid price format"),
            Rule::DayRange => f.write_str("Invalid day"),
            Rule::MonthRange => f.write_str("Invalid month"),
            Rule::YearDigits => f.write_str("Invalid year"),
            Rule::SerialFormat => f.write_str("Invalid serial number"),
        }
    }
}

/// Errors raised by the item-entry form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// A required field was left blank.
    #[error("{}", .0.required_message())]
    FieldRequired(Field),

    /// A field is present but breaks its rule.
    #[error("{1}")]
    FieldFormat(Field, Rule),

    /// Day, month and year are individually valid but name no real date.
    #[error("Invalid date")]
    DateImpossible,

    /// The tag (case-insensitively) is already on the item.
    #[error("This tag has already been added")]
    DuplicateTag(String),

    /// The configured tag cap is reached.
    #[error("No more than {0} tags allowed")]
    TagLimit(usize),

    /// Camera permission denied, capture failed, or the decoder failed.
    #[error("{0}")]
    ScanUnavailable(String),

    /// The host did not supply a required callback.
    #[error("host contract violated: {0} callback missing")]
    HostContractViolation(&'static str),

    /// The draft was already submitted or cancelled.
    #[error("form is closed")]
    DraftClosed,
}

impl EntryError {
    /// The field an inline annotation belongs on, if the error is field-level.
    pub fn field(&self) -> Option<Field> {
        match self {
            EntryError::FieldRequired(field) | EntryError::FieldFormat(field, _) => Some(*field),
            EntryError::DateImpossible => Some(Field::Day),
            _ => None,
        }
    }
}

/// Per-field annotations produced by a rejected submission, in on-screen field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    by_field: BTreeMap<Field, EntryError>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `error` against the field it belongs to. Non-field errors are ignored.
    pub fn insert(&mut self, error: EntryError) {
        if let Some(field) = error.field() {
            self.by_field.insert(field, error);
        }
    }

    pub fn get(&self, field: Field) -> Option<&EntryError> {
        self.by_field.get(&field)
    }

    /// The message shown on `field`, if annotated.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.by_field.contains_key(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<EntryError> {
        self.by_field.remove(&field)
    }

    pub fn clear(&mut self) {
        self.by_field.clear();
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &EntryError)> {
        self.by_field.iter().map(|(f, e)| (*f, e))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.by_field.keys().copied()
    }
}

/// Why `submit()` did not emit an item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more fields were annotated; the form stays open.
    #[error("{} field(s) need attention", .0.len())]
    Rejected(Annotations),

    #[error(transparent)]
    Entry(#[from] EntryError),

    /// Assembled values were refused by the item itself.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SubmitError {
    pub fn annotations(&self) -> Option<&Annotations> {
        match self {
            SubmitError::Rejected(a) => Some(a),
            _ => None,
        }
    }
}
