//! Item entry: validation and assembly of catalogue items from form input.
//!
//! The form is a plain controller. A UI shell feeds it field text, tag gestures and scan
//! gestures; it answers with per-field annotations, transient notices, and (on a
//! successful submit) an immutable [`Item`](cataloger_inventory::Item) handed to the
//! [`ItemHost`].

pub mod assemble;
pub mod config;
pub mod draft;
pub mod error;
pub mod field;
pub mod form;
pub mod host;
pub mod scan;
pub mod tags;
pub mod validate;

pub use config::FormConfig;
pub use draft::FieldValues;
pub use error::{Annotations, EntryError, Rule, SubmitError};
pub use field::Field;
pub use form::ItemEntryForm;
pub use host::{HostCallbacks, HostCallbacksBuilder, ItemHost, Notice};
pub use scan::{
    BarcodeIngestor, Permission, ScanDelivery, ScanError, ScanOutcome, ScanPhase, ScanPlatform,
    ScanStart, ScanTicket,
};
pub use tags::TagEditor;
