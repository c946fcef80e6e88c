//! Per-session form state.

use std::collections::BTreeMap;

use cataloger_core::SessionId;

use crate::field::Field;
use crate::scan::{ScanPhase, ScanTicket};
use crate::tags::TagEditor;

/// Trimmed text of every field at one instant. Missing fields read as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<Field, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, text: impl AsRef<str>) -> Self {
        self.set(field, text);
        self
    }

    pub fn set(&mut self, field: Field, text: impl AsRef<str>) {
        self.values.insert(field, text.as_ref().trim().to_string());
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Required fields that are blank, in on-screen order.
    pub fn blank_required(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).is_empty())
    }
}

/// Everything typed into one dialog session that has not been submitted yet.
#[derive(Debug)]
pub(crate) struct Draft {
    pub(crate) session: SessionId,
    raw: BTreeMap<Field, String>,
    pub(crate) tags: TagEditor,
    pub(crate) scanned: Option<String>,
    pub(crate) scan_phase: ScanPhase,
    pub(crate) in_flight: Option<ScanTicket>,
    attempts: u64,
}

impl Draft {
    pub(crate) fn open(max_tags: Option<usize>) -> Self {
        Self {
            session: SessionId::new(),
            raw: BTreeMap::new(),
            tags: TagEditor::new(max_tags),
            scanned: None,
            scan_phase: ScanPhase::Idle,
            in_flight: None,
            attempts: 0,
        }
    }

    pub(crate) fn raw(&self, field: Field) -> &str {
        self.raw.get(&field).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn set_raw(&mut self, field: Field, text: impl Into<String>) {
        self.raw.insert(field, text.into());
    }

    pub(crate) fn values(&self) -> FieldValues {
        self.raw
            .iter()
            .fold(FieldValues::new(), |values, (field, text)| values.with(*field, text))
    }

    pub(crate) fn next_ticket(&mut self) -> ScanTicket {
        self.attempts += 1;
        ScanTicket::new(self.session, self.attempts)
    }
}
