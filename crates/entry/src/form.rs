//! The item-entry form controller.

use cataloger_core::SessionId;
use cataloger_inventory::{Item, Tag, TagSet};

use crate::assemble::assemble;
use crate::config::FormConfig;
use crate::draft::Draft;
use crate::error::{Annotations, EntryError, SubmitError};
use crate::field::Field;
use crate::host::{ItemHost, Notice};
use crate::scan::{
    BarcodeIngestor, Permission, ScanDelivery, ScanError, ScanOutcome, ScanPhase, ScanPlatform,
    ScanStart, ScanTicket,
};

/// One "add item" dialog: owns the draft, validates on submit, and hands finished items
/// to the host.
///
/// All methods run on the UI thread. After a successful submit or a cancel the draft is
/// gone; further edits fail with [`EntryError::DraftClosed`] until [`reopen`](Self::reopen).
#[derive(Debug)]
pub struct ItemEntryForm<H: ItemHost> {
    host: H,
    config: FormConfig,
    draft: Option<Draft>,
    annotations: Annotations,
    notices: Vec<Notice>,
}

impl<H: ItemHost> ItemEntryForm<H> {
    /// Open a form with a fresh draft.
    pub fn new(host: H, config: FormConfig) -> Self {
        let draft = Draft::open(config.max_tags);
        tracing::debug!(session = %draft.session, "item form opened");
        Self {
            host,
            config,
            draft: Some(draft),
            annotations: Annotations::new(),
            notices: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), for callers whose host may be absent.
    pub fn attach(host: Option<H>, config: FormConfig) -> Result<Self, EntryError> {
        let host = host.ok_or(EntryError::HostContractViolation("host"))?;
        Ok(Self::new(host, config))
    }

    /// Discard any current draft and start a new session.
    pub fn reopen(&mut self) -> SessionId {
        self.cancel();
        let draft = Draft::open(self.config.max_tags);
        let session = draft.session;
        tracing::debug!(%session, "item form reopened");
        self.draft = Some(draft);
        session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn session(&self) -> Option<SessionId> {
        self.draft.as_ref().map(|d| d.session)
    }

    /// Raw (untrimmed) text currently in `field`.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.draft.as_ref().map(|d| d.raw(field))
    }

    pub fn tags(&self) -> Option<&TagSet> {
        self.draft.as_ref().map(|d| d.tags.tags())
    }

    pub fn scan_phase(&self) -> ScanPhase {
        self.draft.as_ref().map(|d| d.scan_phase).unwrap_or_default()
    }

    /// The most recent payload a scan delivered in this session.
    pub fn scanned_payload(&self) -> Option<&str> {
        self.draft.as_ref().and_then(|d| d.scanned.as_deref())
    }

    /// Annotations from the last rejected submit, minus fields edited since.
    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    /// Drain the transient notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Replace the text of `field`. Clears any annotation on it.
    pub fn set_field(&mut self, field: Field, text: impl Into<String>) -> Result<(), EntryError> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(EntryError::DraftClosed);
        };
        draft.set_raw(field, text);
        self.clear_annotation(field);
        Ok(())
    }

    pub fn add_tag(&mut self, raw: &str) -> Result<Option<Tag>, EntryError> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(EntryError::DraftClosed);
        };
        match draft.tags.add(raw) {
            Ok(added) => {
                if let Some(tag) = &added {
                    tracing::debug!(session = %draft.session, tag = %tag, "tag added");
                }
                Ok(added)
            }
            Err(e) => {
                let notice = match &e {
                    EntryError::DuplicateTag(text) => Some(Notice::DuplicateTag(text.clone())),
                    EntryError::TagLimit(max) => Some(Notice::TagLimit(*max)),
                    _ => None,
                };
                if let Some(notice) = notice {
                    self.raise(notice);
                }
                Err(e)
            }
        }
    }

    /// Remove a tag chip. Returns whether a tag was removed.
    pub fn remove_tag(&mut self, raw: &str) -> Result<bool, EntryError> {
        let draft = self.draft.as_mut().ok_or(EntryError::DraftClosed)?;
        let removed = draft.tags.remove(raw);
        tracing::debug!(session = %draft.session, tag = raw.trim(), removed, "tag removal");
        Ok(removed)
    }

    /// React to the scan gesture.
    ///
    /// Without camera permission the form moves to `AwaitingPermission` and no capture
    /// starts; the caller asks the platform and reports back via
    /// [`permission_resolved`](Self::permission_resolved). A gesture made while still
    /// awaiting that answer probes the permission again.
    pub fn begin_scan(&mut self, permission_granted: bool) -> Result<ScanStart, EntryError> {
        let draft = self.draft.as_mut().ok_or(EntryError::DraftClosed)?;
        if matches!(draft.scan_phase, ScanPhase::Capturing | ScanPhase::Decoding) {
            return Err(EntryError::ScanUnavailable("scan already in progress".into()));
        }
        if !permission_granted {
            draft.scan_phase = ScanPhase::AwaitingPermission;
            tracing::debug!(session = %draft.session, "camera permission required");
            return Ok(ScanStart::PermissionRequired);
        }
        let ticket = draft.next_ticket();
        draft.in_flight = Some(ticket);
        draft.scan_phase = ScanPhase::Capturing;
        tracing::debug!(session = %draft.session, attempt = ticket.attempt(), "scan started");
        Ok(ScanStart::Ready(ticket))
    }

    /// Record the platform's answer to a permission request. Never starts a capture.
    pub fn permission_resolved(&mut self, permission: Permission) {
        let Some(draft) = self.draft.as_mut() else {
            tracing::debug!(?permission, "permission result for closed form dropped");
            return;
        };
        if draft.scan_phase != ScanPhase::AwaitingPermission {
            return;
        }
        draft.scan_phase = ScanPhase::Idle;
        if permission == Permission::Denied {
            tracing::warn!(session = %draft.session, "camera permission denied");
            self.raise(Notice::ScanUnavailable(ScanError::PermissionDenied.to_string()));
        }
    }

    /// Note that capture for `ticket` finished and decoding began.
    pub fn mark_decoding(&mut self, ticket: &ScanTicket) {
        if let Some(draft) = self.draft.as_mut() {
            if draft.in_flight.as_ref() == Some(ticket) {
                draft.scan_phase = ScanPhase::Decoding;
            }
        }
    }

    /// Apply a finished scan.
    ///
    /// Only the attempt currently in flight is applied; anything else (a late result
    /// after cancel, a duplicate delivery) is dropped without touching the form. A payload
    /// replaces the text of the configured target field and nothing else. A payload that is
    /// blank once trimmed counts as no barcode.
    pub fn deliver_scan(&mut self, delivery: ScanDelivery) -> ScanOutcome {
        let target = self.config.scan_target;
        let Some(draft) = self
            .draft
            .as_mut()
            .filter(|d| d.in_flight == Some(delivery.ticket))
        else {
            tracing::debug!(
                session = %delivery.ticket.session(),
                attempt = delivery.ticket.attempt(),
                "stale scan delivery dropped"
            );
            return ScanOutcome::Dropped;
        };
        draft.in_flight = None;
        draft.scan_phase = ScanPhase::Idle;

        let result = delivery
            .result
            .map(|payload| payload.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()));
        match result {
            Ok(Some(payload)) => {
                tracing::info!(session = %draft.session, field = %target, "barcode delivered");
                draft.set_raw(target, payload.clone());
                draft.scanned = Some(payload.clone());
                self.clear_annotation(target);
                ScanOutcome::Delivered(payload)
            }
            Ok(None) => {
                self.raise(Notice::NoBarcodeFound);
                ScanOutcome::Empty
            }
            Err(e) => {
                self.raise(Notice::ScanUnavailable(e.to_string()));
                ScanOutcome::Failed(e)
            }
        }
    }

    /// Run one full scan gesture against `ingestor`.
    pub async fn scan<P: ScanPlatform>(
        &mut self,
        ingestor: &BarcodeIngestor<P>,
    ) -> Result<ScanOutcome, EntryError> {
        match self.begin_scan(ingestor.has_permission())? {
            ScanStart::PermissionRequired => {
                let permission = ingestor.request_permission().await;
                self.permission_resolved(permission);
                Ok(ScanOutcome::PermissionRequested(permission))
            }
            ScanStart::Ready(ticket) => {
                let result = match ingestor.capture().await {
                    Ok(image) => {
                        self.mark_decoding(&ticket);
                        ingestor.decode_first(image).await
                    }
                    Err(e) => Err(e),
                };
                Ok(self.deliver_scan(ScanDelivery { ticket, result }))
            }
        }
    }

    /// Validate the draft and, if it is complete, emit the item.
    ///
    /// On success the host sees `on_item_ready` then `on_totals_changed`, and the draft
    /// is torn down. On rejection every offending field is annotated and the draft stays.
    pub fn submit(&mut self) -> Result<Item, SubmitError> {
        let draft = self.draft.as_ref().ok_or(EntryError::DraftClosed)?;
        let session = draft.session;
        let values = draft.values();
        let tags = draft.tags.snapshot();

        self.clear_annotations();

        match assemble(&values, tags) {
            Ok(item) => {
                tracing::info!(
                    %session,
                    name = item.name(),
                    price = %item.price(),
                    tags = item.tags().len(),
                    "item ready"
                );
                self.host.on_item_ready(item.clone());
                self.host.on_totals_changed();
                self.draft = None;
                Ok(item)
            }
            Err(SubmitError::Rejected(annotations)) => {
                tracing::debug!(%session, fields = annotations.len(), "submission rejected");
                for (field, error) in annotations.iter() {
                    self.host.annotate(field, Some(error));
                }
                self.annotations = annotations.clone();
                Err(SubmitError::Rejected(annotations))
            }
            Err(e) => {
                tracing::error!(%session, error = %e, "validated draft refused by item");
                Err(e)
            }
        }
    }

    /// Dismiss the dialog: the draft and any pending scan result are discarded and the
    /// host hears nothing.
    pub fn cancel(&mut self) {
        if let Some(draft) = self.draft.take() {
            tracing::debug!(
                session = %draft.session,
                scan_pending = draft.in_flight.is_some(),
                "item form cancelled"
            );
        }
        self.annotations.clear();
    }

    fn clear_annotation(&mut self, field: Field) {
        if self.annotations.remove(field).is_some() {
            self.host.annotate(field, None);
        }
    }

    fn clear_annotations(&mut self) {
        let fields: Vec<Field> = self.annotations.fields().collect();
        for field in fields {
            self.clear_annotation(field);
        }
    }

    fn raise(&mut self, notice: Notice) {
        tracing::debug!(notice = %notice, "notice raised");
        self.host.notify(&notice);
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::testing::ScriptedPlatform;

    #[derive(Debug, Default)]
    struct RecordingHost {
        calls: Vec<String>,
        items: Vec<Item>,
        annotated: Vec<(Field, Option<String>)>,
        notices: Vec<Notice>,
    }

    impl ItemHost for RecordingHost {
        fn on_item_ready(&mut self, item: Item) {
            self.calls.push("on_item_ready".into());
            self.items.push(item);
        }

        fn on_totals_changed(&mut self) {
            self.calls.push("on_totals_changed".into());
        }

        fn annotate(&mut self, field: Field, error: Option<&EntryError>) {
            self.annotated.push((field, error.map(ToString::to_string)));
        }

        fn notify(&mut self, notice: &Notice) {
            self.notices.push(notice.clone());
        }
    }

    fn form() -> ItemEntryForm<RecordingHost> {
        ItemEntryForm::new(RecordingHost::default(), FormConfig::default())
    }

    fn fill(form: &mut ItemEntryForm<RecordingHost>) {
        for (field, text) in [
            (Field::Name, "Lamp"),
            (Field::Description, "Desk lamp with LED"),
            (Field::Make, "Acme"),
            (Field::Model, "L-100"),
            (Field::Day, "3"),
            (Field::Month, "7"),
            (Field::Year, "2023"),
            (Field::Price, "29.99"),
            (Field::Comments, "gift"),
        ] {
            form.set_field(field, text).unwrap();
        }
    }

    #[test]
    fn attach_without_host_is_a_contract_violation() {
        let err = ItemEntryForm::<RecordingHost>::attach(None, FormConfig::default()).unwrap_err();
        assert_eq!(err, EntryError::HostContractViolation("host"));
    }

    #[test]
    fn successful_submit_calls_host_in_order_and_closes() {
        let mut form = form();
        fill(&mut form);
        let item = form.submit().unwrap();

        assert_eq!(item.name(), "Lamp");
        assert!(!form.is_open());
        assert_eq!(form.host().calls, vec!["on_item_ready", "on_totals_changed"]);
        assert_eq!(form.host().items, vec![item]);
    }

    #[test]
    fn rejected_submit_annotates_and_stays_open() {
        let mut form = form();
        fill(&mut form);
        form.set_field(Field::Name, "").unwrap();

        let err = form.submit().unwrap_err();
        assert_eq!(
            err.annotations().and_then(|a| a.message(Field::Name)).as_deref(),
            Some("Item name required")
        );
        assert!(form.is_open());
        assert!(form.host().calls.is_empty());
        assert_eq!(
            form.host().annotated,
            vec![(Field::Name, Some("Item name required".to_string()))]
        );
    }

    #[test]
    fn editing_a_field_clears_its_annotation() {
        let mut form = form();
        fill(&mut form);
        form.set_field(Field::Price, "1.").unwrap();
        form.submit().unwrap_err();
        assert!(form.annotations().contains(Field::Price));

        form.set_field(Field::Price, "1.5").unwrap();
        assert!(form.annotations().is_empty());
        assert_eq!(form.host().annotated.last(), Some(&(Field::Price, None)));
        assert!(form.submit().is_ok());
    }

    #[test]
    fn resubmitting_replaces_previous_annotations() {
        let mut form = form();
        fill(&mut form);
        form.set_field(Field::Day, "40").unwrap();
        form.submit().unwrap_err();
        // Fix the day through the draft but break the month instead.
        form.set_field(Field::Day, "4").unwrap();
        form.set_field(Field::Month, "0").unwrap();
        let err = form.submit().unwrap_err();
        let annotations = err.annotations().unwrap();
        assert_eq!(annotations.fields().collect::<Vec<_>>(), vec![Field::Month]);
    }

    #[test]
    fn closed_form_refuses_everything() {
        let mut form = form();
        form.cancel();
        assert_eq!(form.set_field(Field::Name, "x"), Err(EntryError::DraftClosed));
        assert_eq!(form.add_tag("x"), Err(EntryError::DraftClosed));
        assert_eq!(form.remove_tag("x"), Err(EntryError::DraftClosed));
        assert_eq!(form.begin_scan(true), Err(EntryError::DraftClosed));
        assert_eq!(form.submit(), Err(SubmitError::Entry(EntryError::DraftClosed)));
        assert!(form.host().calls.is_empty());
    }

    #[test]
    fn reopen_starts_a_new_session() {
        let mut form = form();
        let first = form.session().unwrap();
        form.set_field(Field::Name, "Lamp").unwrap();
        let second = form.reopen();
        assert_ne!(first, second);
        assert_eq!(form.field(Field::Name), Some(""));
    }

    #[test]
    fn duplicate_tag_raises_notice() {
        let mut form = form();
        form.add_tag("wood").unwrap();
        assert_eq!(form.add_tag("WOOD"), Err(EntryError::DuplicateTag("WOOD".into())));
        assert_eq!(form.take_notices(), vec![Notice::DuplicateTag("WOOD".into())]);
        assert_eq!(form.host().notices.len(), 1);
        assert!(form.take_notices().is_empty());
    }

    #[test]
    fn tag_cap_from_config() {
        let config = FormConfig {
            max_tags: Some(1),
            ..FormConfig::default()
        };
        let mut form = ItemEntryForm::new(RecordingHost::default(), config);
        form.add_tag("a").unwrap();
        assert_eq!(form.add_tag("b"), Err(EntryError::TagLimit(1)));
        assert_eq!(form.take_notices(), vec![Notice::TagLimit(1)]);
    }

    #[test]
    fn scan_payload_goes_to_name_only() {
        let mut form = form();
        fill(&mut form);
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        assert_eq!(form.scan_phase(), ScanPhase::Capturing);
        form.mark_decoding(&ticket);
        assert_eq!(form.scan_phase(), ScanPhase::Decoding);

        let outcome = form.deliver_scan(ScanDelivery {
            ticket,
            result: Ok(Some("XYZ-42".into())),
        });
        assert_eq!(outcome, ScanOutcome::Delivered("XYZ-42".into()));
        assert_eq!(form.field(Field::Name), Some("XYZ-42"));
        assert_eq!(form.field(Field::Make), Some("Acme"));
        assert_eq!(form.scanned_payload(), Some("XYZ-42"));
        assert_eq!(form.scan_phase(), ScanPhase::Idle);
        assert!(form.host().calls.is_empty());
    }

    #[test]
    fn configured_scan_target_is_honoured() {
        let config = FormConfig {
            scan_target: Field::Serial,
            ..FormConfig::default()
        };
        let mut form = ItemEntryForm::new(RecordingHost::default(), config);
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        form.deliver_scan(ScanDelivery {
            ticket,
            result: Ok(Some("998877".into())),
        });
        assert_eq!(form.field(Field::Serial), Some("998877"));
        assert_eq!(form.field(Field::Name), Some(""));
    }

    #[test]
    fn delivery_is_applied_once() {
        let mut form = form();
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        let delivery = ScanDelivery {
            ticket,
            result: Ok(Some("first".into())),
        };
        assert_eq!(form.deliver_scan(delivery.clone()), ScanOutcome::Delivered("first".into()));
        form.set_field(Field::Name, "typed").unwrap();
        assert_eq!(form.deliver_scan(delivery), ScanOutcome::Dropped);
        assert_eq!(form.field(Field::Name), Some("typed"));
    }

    #[test]
    fn second_scan_while_one_is_in_flight_is_refused() {
        let mut form = form();
        form.begin_scan(true).unwrap();
        assert!(matches!(form.begin_scan(true), Err(EntryError::ScanUnavailable(_))));
    }

    #[test]
    fn late_delivery_after_cancel_is_dropped() {
        let mut form = form();
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        form.cancel();
        let outcome = form.deliver_scan(ScanDelivery {
            ticket,
            result: Ok(Some("late".into())),
        });
        assert_eq!(outcome, ScanOutcome::Dropped);
        assert!(form.host().calls.is_empty());

        // A reopened form does not accept the old session's ticket either.
        form.reopen();
        let outcome = form.deliver_scan(ScanDelivery {
            ticket,
            result: Ok(Some("late".into())),
        });
        assert_eq!(outcome, ScanOutcome::Dropped);
        assert_eq!(form.field(Field::Name), Some(""));
    }

    #[test]
    fn failed_and_empty_scans_leave_fields_alone() {
        let mut form = form();
        fill(&mut form);
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        let outcome = form.deliver_scan(ScanDelivery {
            ticket,
            result: Err(ScanError::Decode("blurry".into())),
        });
        assert_eq!(outcome, ScanOutcome::Failed(ScanError::Decode("blurry".into())));

        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        assert_eq!(
            form.deliver_scan(ScanDelivery { ticket, result: Ok(None) }),
            ScanOutcome::Empty
        );

        assert_eq!(form.field(Field::Name), Some("Lamp"));
        assert_eq!(
            form.take_notices(),
            vec![
                Notice::ScanUnavailable("barcode decoding failed: blurry".into()),
                Notice::NoBarcodeFound,
            ]
        );
    }

    #[test]
    fn blank_scan_payload_counts_as_no_barcode() {
        let mut form = form();
        fill(&mut form);
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        let outcome = form.deliver_scan(ScanDelivery {
            ticket,
            result: Ok(Some("   ".into())),
        });

        assert_eq!(outcome, ScanOutcome::Empty);
        assert_eq!(form.field(Field::Name), Some("Lamp"));
        assert_eq!(form.scanned_payload(), None);
        assert_eq!(form.take_notices(), vec![Notice::NoBarcodeFound]);
    }

    #[test]
    fn delivered_payload_is_trimmed() {
        let mut form = form();
        let ScanStart::Ready(ticket) = form.begin_scan(true).unwrap() else {
            panic!("expected capture to start");
        };
        let outcome = form.deliver_scan(ScanDelivery {
            ticket,
            result: Ok(Some("  XYZ-42\n".into())),
        });

        assert_eq!(outcome, ScanOutcome::Delivered("XYZ-42".into()));
        assert_eq!(form.field(Field::Name), Some("XYZ-42"));
    }

    #[test]
    fn unanswered_permission_request_does_not_block_the_next_gesture() {
        let mut form = form();
        assert_eq!(form.begin_scan(false).unwrap(), ScanStart::PermissionRequired);
        assert_eq!(form.scan_phase(), ScanPhase::AwaitingPermission);

        // Still no permission: ask again rather than refuse.
        assert_eq!(form.begin_scan(false).unwrap(), ScanStart::PermissionRequired);

        // Granted in the meantime: capture starts.
        assert!(matches!(form.begin_scan(true).unwrap(), ScanStart::Ready(_)));
        assert_eq!(form.scan_phase(), ScanPhase::Capturing);
        assert!(matches!(form.begin_scan(true), Err(EntryError::ScanUnavailable(_))));
    }

    #[tokio::test]
    async fn missing_permission_requests_it_without_capturing() {
        let mut form = form();
        let ingestor = BarcodeIngestor::new(ScriptedPlatform {
            grant_on_request: true,
            ..ScriptedPlatform::permitted_with(&["XYZ-42"])
        });
        ingestor.platform().permitted.set(false);

        let outcome = form.scan(&ingestor).await.unwrap();
        assert_eq!(outcome, ScanOutcome::PermissionRequested(Permission::Granted));
        assert_eq!(ingestor.platform().captures.get(), 0);
        assert_eq!(form.field(Field::Name), Some(""));
        assert_eq!(form.scan_phase(), ScanPhase::Idle);

        // The next gesture captures.
        let outcome = form.scan(&ingestor).await.unwrap();
        assert_eq!(outcome, ScanOutcome::Delivered("XYZ-42".into()));
        assert_eq!(ingestor.platform().captures.get(), 1);
    }

    #[tokio::test]
    async fn denied_permission_raises_notice() {
        let mut form = form();
        let ingestor = BarcodeIngestor::new(ScriptedPlatform::default());

        let outcome = form.scan(&ingestor).await.unwrap();
        assert_eq!(outcome, ScanOutcome::PermissionRequested(Permission::Denied));
        assert_eq!(
            form.take_notices(),
            vec![Notice::ScanUnavailable("camera permission denied".into())]
        );
        assert_eq!(ingestor.platform().captures.get(), 0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Edit {
            Set(usize, String),
            AddTag(String),
            RemoveTag(String),
        }

        fn edit() -> impl Strategy<Value = Edit> {
            prop_oneof![
                (0..Field::ALL.len(), ".{0,20}").prop_map(|(i, s)| Edit::Set(i, s)),
                "[a-dA-D]{0,3}".prop_map(Edit::AddTag),
                "[a-dA-D]{0,3}".prop_map(Edit::RemoveTag),
            ]
        }

        fn apply(form: &mut ItemEntryForm<RecordingHost>, edits: &[Edit]) {
            for e in edits {
                match e {
                    Edit::Set(i, s) => form.set_field(Field::ALL[*i], s.clone()).unwrap(),
                    Edit::AddTag(t) => {
                        let _ = form.add_tag(t);
                    }
                    Edit::RemoveTag(t) => {
                        form.remove_tag(t).unwrap();
                    }
                }
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: cancel after any edits never reaches the host.
            #[test]
            fn cancel_emits_nothing(edits in prop::collection::vec(edit(), 0..25)) {
                let mut form = form();
                apply(&mut form, &edits);
                form.cancel();
                prop_assert!(form.host().calls.is_empty());
                prop_assert!(form.host().items.is_empty());
            }

            /// Property: blank required fields always block submission and are annotated.
            #[test]
            fn blank_required_fields_block(edits in prop::collection::vec(edit(), 0..25)) {
                let mut form = form();
                apply(&mut form, &edits);
                let blank: Vec<Field> = Field::ALL
                    .into_iter()
                    .filter(|f| f.is_required() && form.field(*f).unwrap_or("").trim().is_empty())
                    .collect();
                prop_assume!(!blank.is_empty());

                let err = form.submit().unwrap_err();
                let annotations = err.annotations().unwrap();
                for field in blank {
                    prop_assert_eq!(annotations.get(field), Some(&EntryError::FieldRequired(field)));
                }
                prop_assert!(form.host().items.is_empty());
            }

            /// Property: emitted items carry exactly the draft's tags, all distinct.
            #[test]
            fn emitted_tags_match_draft(edits in prop::collection::vec("[a-dA-D]{1,3}", 0..15)) {
                let mut form = form();
                fill(&mut form);
                for t in &edits {
                    let _ = form.add_tag(t);
                }
                let draft_tags = form.tags().unwrap().clone();
                let item = form.submit().unwrap();
                prop_assert_eq!(item.tags(), &draft_tags);

                let mut folded: Vec<String> = item.tags().iter().map(|t| t.as_str().to_lowercase()).collect();
                let total = folded.len();
                folded.sort();
                folded.dedup();
                prop_assert_eq!(folded.len(), total);
                prop_assert_eq!(form.host().calls.len(), 2);
            }
        }
    }
}
