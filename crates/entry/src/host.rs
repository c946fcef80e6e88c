//! Contract between the form and the application hosting it.

use cataloger_inventory::Item;

use crate::error::EntryError;
use crate::field::Field;

/// Transient message for the user (a toast, a status line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DuplicateTag(String),
    TagLimit(usize),
    ScanUnavailable(String),
    NoBarcodeFound,
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Notice::DuplicateTag(_) => f.write_str("This tag has already been added"),
            Notice::TagLimit(max) => write!(f, "No more than {max} tags allowed"),
            Notice::ScanUnavailable(reason) => write!(f, "Failed due to {reason}"),
            Notice::NoBarcodeFound => f.write_str("No barcode found"),
        }
    }
}

/// Receives what the form produces.
///
/// `on_item_ready` and `on_totals_changed` are the required half of the contract; the
/// form calls them back to back, in that order, once per successful submission. The
/// annotation and notice sinks are optional and default to doing nothing, for hosts that
/// poll [`ItemEntryForm::annotations`](crate::ItemEntryForm::annotations) instead.
pub trait ItemHost {
    fn on_item_ready(&mut self, item: Item);

    fn on_totals_changed(&mut self);

    /// Show `error` next to `field`, or clear the field's message when `None`.
    fn annotate(&mut self, _field: Field, _error: Option<&EntryError>) {}

    fn notify(&mut self, _notice: &Notice) {}
}

impl<H: ItemHost + ?Sized> ItemHost for &mut H {
    fn on_item_ready(&mut self, item: Item) {
        (**self).on_item_ready(item)
    }

    fn on_totals_changed(&mut self) {
        (**self).on_totals_changed()
    }

    fn annotate(&mut self, field: Field, error: Option<&EntryError>) {
        (**self).annotate(field, error)
    }

    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice)
    }
}

type ItemCallback = Box<dyn FnMut(Item)>;
type TotalsCallback = Box<dyn FnMut()>;
type NoticeCallback = Box<dyn FnMut(&Notice)>;
type AnnotateCallback = Box<dyn FnMut(Field, Option<&EntryError>)>;

/// A host assembled from closures.
pub struct HostCallbacks {
    item_ready: ItemCallback,
    totals_changed: TotalsCallback,
    notice: Option<NoticeCallback>,
    annotate: Option<AnnotateCallback>,
}

impl HostCallbacks {
    pub fn builder() -> HostCallbacksBuilder {
        HostCallbacksBuilder::default()
    }
}

impl core::fmt::Debug for HostCallbacks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostCallbacks")
            .field("notice", &self.notice.is_some())
            .field("annotate", &self.annotate.is_some())
            .finish_non_exhaustive()
    }
}

impl ItemHost for HostCallbacks {
    fn on_item_ready(&mut self, item: Item) {
        (self.item_ready)(item)
    }

    fn on_totals_changed(&mut self) {
        (self.totals_changed)()
    }

    fn annotate(&mut self, field: Field, error: Option<&EntryError>) {
        if let Some(cb) = self.annotate.as_mut() {
            cb(field, error)
        }
    }

    fn notify(&mut self, notice: &Notice) {
        if let Some(cb) = self.notice.as_mut() {
            cb(notice)
        }
    }
}

#[derive(Default)]
pub struct HostCallbacksBuilder {
    item_ready: Option<ItemCallback>,
    totals_changed: Option<TotalsCallback>,
    notice: Option<NoticeCallback>,
    annotate: Option<AnnotateCallback>,
}

impl HostCallbacksBuilder {
    pub fn on_item_ready(mut self, f: impl FnMut(Item) + 'static) -> Self {
        self.item_ready = Some(Box::new(f));
        self
    }

    pub fn on_totals_changed(mut self, f: impl FnMut() + 'static) -> Self {
        self.totals_changed = Some(Box::new(f));
        self
    }

    pub fn on_notice(mut self, f: impl FnMut(&Notice) + 'static) -> Self {
        self.notice = Some(Box::new(f));
        self
    }

    /// Per-field messages; `None` clears the field's message.
    pub fn on_annotate(mut self, f: impl FnMut(Field, Option<&EntryError>) + 'static) -> Self {
        self.annotate = Some(Box::new(f));
        self
    }

    /// Fails with [`EntryError::HostContractViolation`] unless both required callbacks
    /// were supplied.
    pub fn build(self) -> Result<HostCallbacks, EntryError> {
        let item_ready = self
            .item_ready
            .ok_or(EntryError::HostContractViolation("on_item_ready"))?;
        let totals_changed = self
            .totals_changed
            .ok_or(EntryError::HostContractViolation("on_totals_changed"))?;
        Ok(HostCallbacks {
            item_ready,
            totals_changed,
            notice: self.notice,
            annotate: self.annotate,
        })
    }
}
