//! Form configuration.

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Tunables for an item-entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Field a scanned barcode payload is written into.
    pub scan_target: Field,
    /// Upper bound on tags per item; `None` means unbounded.
    pub max_tags: Option<usize>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            scan_target: Field::Name,
            max_tags: None,
        }
    }
}

impl FormConfig {
    /// Read `CATALOGER_SCAN_TARGET` and `CATALOGER_MAX_TAGS` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Malformed values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let scan_target = lookup("CATALOGER_SCAN_TARGET")
            .map(|raw| {
                raw.parse::<Field>().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "CATALOGER_SCAN_TARGET invalid; using name");
                    defaults.scan_target
                })
            })
            .unwrap_or(defaults.scan_target);

        let max_tags = lookup("CATALOGER_MAX_TAGS").and_then(|raw| match raw.trim().parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(value = %raw, "CATALOGER_MAX_TAGS is not a number; no tag cap");
                None
            }
        });

        Self {
            scan_target,
            max_tags,
        }
    }
}
