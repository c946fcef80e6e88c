//! The text fields of the item form.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// One text input on the form.
///
/// Declaration order is the on-screen order, which is also the order annotations are
/// reported in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Description,
    Serial,
    Model,
    Make,
    Day,
    Month,
    Year,
    Price,
    Comments,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Description,
        Field::Serial,
        Field::Model,
        Field::Make,
        Field::Day,
        Field::Month,
        Field::Year,
        Field::Price,
        Field::Comments,
    ];

    /// Whether the field must be non-blank for a submission to succeed.
    pub fn is_required(self) -> bool {
        !matches!(self, Field::Serial)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Serial => "serial",
            Field::Model => "model",
            Field::Make => "make",
            Field::Day => "day",
            Field::Month => "month",
            Field::Year => "year",
            Field::Price => "price",
            Field::Comments => "comments",
        }
    }

    /// Message shown when a required field is left blank.
    pub fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Item name required",
            Field::Description => "Item description required",
            Field::Serial => "Serial number required",
            Field::Model => "Item model required",
            Field::Make => "Item make required",
            Field::Day => "Date required",
            Field::Month => "Month required",
            Field::Year => "Year required",
            Field::Price => "Item price required",
            Field::Comments => "Item comments required",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
