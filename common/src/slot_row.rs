//! Per-slot signup state machine.
//!
//! ```text
//! Empty ──submit──▶ Submitting(Create) ──ok──▶ Filled(owned)
//!   ▲                    │ err (inputs kept)
//!   └────────────────────┘
//! Filled(owned) ──edit──▶ Editing ──save──▶ Submitting(Update) ──ok──▶ Filled(owned)
//! Filled(owned) ──delete──▶ ConfirmingDelete ──confirm──▶ Deleting ──ok──▶ Empty
//! ```
//!
//! `Filled { owned_locally: false }` is read-only. Whether a filled slot is
//! owned comes from the [`OwnershipStore`], which is advisory: the backend
//! checks the email again on every update and delete.
//!
//! [`SlotRow::update`] is an Elm-style reducer. Besides mutating the row it
//! writes the ownership store and announces changes on the bus. It may hand
//! back a [`Command`] for the host to run, whose result comes back as
//! another [`RowMsg`]. While a command is in flight the row ignores repeated
//! submits, which is the only duplicate-submission guard.

use crate::client::SignupApi;
use crate::error::SignupError;
use crate::model::signup::SignupRecord;
use crate::model::slot::Slot;
use crate::ownership::OwnershipStore;
use crate::requests::{CreateSignupRequest, UpdateSignupRequest};
use crate::roster::{ChangeKind, RosterBus, RosterChange, RosterEntry, RosterView};

const NO_LOCAL_EMAIL: &str =
    "This device no longer remembers the email used for this signup.";
const NO_RECORD: &str = "This signup is no longer on the roster.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIntent {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Empty,
    Submitting(SubmitIntent),
    Filled { owned_locally: bool },
    Editing,
    ConfirmingDelete,
    Deleting,
}

/// Raw text of the signup (or edit) inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub note: String,
}

/// Whoever currently holds the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub record_id: String,
    pub name: String,
    /// Present only in the admin view.
    pub email: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<&RosterEntry> for Occupant {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            record_id: entry.id.clone(),
            name: entry.name.clone(),
            email: entry.email.clone(),
            note: entry.note.clone(),
            created_at: entry.created_at.clone(),
        }
    }
}

impl Occupant {
    fn from_record(record: &SignupRecord, view: RosterView) -> Self {
        Self {
            record_id: record.id.clone(),
            name: record.name.clone(),
            email: match view {
                RosterView::Admin => Some(record.email.clone()),
                RosterView::Public => None,
            },
            note: record.note.clone(),
            created_at: record.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMsg {
    SetName(String),
    SetEmail(String),
    SetNote(String),
    Submit,
    /// `Ok(None)`: the backend confirmed without echoing the record.
    Created(Result<Option<SignupRecord>, SignupError>),

    StartEdit,
    SetEditName(String),
    SetEditEmail(String),
    CancelEdit,
    SaveEdit,
    Updated(Result<SignupRecord, SignupError>),

    RequestDelete,
    CancelDelete,
    ConfirmDelete,
    Removed(Result<(), SignupError>),

    /// Latest roster state for this slot, after a fetch.
    Hydrate(Option<Occupant>),
}

/// Backend call requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(CreateSignupRequest),
    Update {
        record_id: String,
        request: UpdateSignupRequest,
    },
    Remove {
        record_id: String,
        email: String,
    },
}

impl Command {
    /// Runs the call and wraps its outcome as the completion message.
    pub async fn run(self, api: &dyn SignupApi) -> RowMsg {
        match self {
            Command::Create(request) => RowMsg::Created(api.create(&request).await),
            Command::Update { record_id, request } => {
                RowMsg::Updated(api.update(&record_id, &request).await)
            }
            Command::Remove { record_id, email } => {
                RowMsg::Removed(api.remove(&record_id, &email).await)
            }
        }
    }
}

/// Which affordances the row offers right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowControls {
    pub can_submit: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub busy: bool,
}

pub struct SlotRow {
    event_id: String,
    slot: Slot,
    view: RosterView,
    ownership: OwnershipStore,
    bus: RosterBus,
    state: RowState,
    occupant: Option<Occupant>,
    form: SignupForm,
    edit: SignupForm,
    error: Option<String>,
}

impl SlotRow {
    pub fn new(
        event_id: impl Into<String>,
        slot: Slot,
        view: RosterView,
        ownership: OwnershipStore,
        bus: RosterBus,
    ) -> Self {
        Self {
            event_id: event_id.into(),
            slot,
            view,
            ownership,
            bus,
            state: RowState::Empty,
            occupant: None,
            form: SignupForm::default(),
            edit: SignupForm::default(),
            error: None,
        }
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn edit_form(&self) -> &SignupForm {
        &self.edit
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, RowState::Submitting(_) | RowState::Deleting)
    }

    /// Edit and delete need the record id, so they wait for the occupant.
    pub fn controls(&self) -> RowControls {
        let owned = matches!(self.state, RowState::Filled { owned_locally: true })
            && self.occupant.is_some();
        RowControls {
            can_submit: self.state == RowState::Empty,
            can_edit: owned,
            can_delete: owned,
            busy: self.is_busy(),
        }
    }

    /// Applies `msg`. Returns the backend call to make, if any.
    pub fn update(&mut self, msg: RowMsg) -> Option<Command> {
        let before = self.state;
        let command = self.apply(msg);
        if self.state != before {
            log::debug!("{}: {:?} -> {:?}", self.slot.slot_id, before, self.state);
        }
        command
    }

    fn apply(&mut self, msg: RowMsg) -> Option<Command> {
        match msg {
            RowMsg::SetName(value) => {
                if self.state == RowState::Empty {
                    self.form.name = value;
                }
                None
            }
            RowMsg::SetEmail(value) => {
                if self.state == RowState::Empty {
                    self.form.email = value;
                }
                None
            }
            RowMsg::SetNote(value) => {
                if self.state == RowState::Empty {
                    self.form.note = value;
                }
                None
            }
            RowMsg::Submit => self.submit(),
            RowMsg::Created(result) => {
                self.created(result);
                None
            }

            RowMsg::StartEdit => {
                if self.controls().can_edit {
                    self.edit = SignupForm {
                        name: self
                            .occupant
                            .as_ref()
                            .map(|o| o.name.clone())
                            .unwrap_or_default(),
                        email: self.recall().unwrap_or_default(),
                        note: String::new(),
                    };
                    self.error = None;
                    self.state = RowState::Editing;
                }
                None
            }
            RowMsg::SetEditName(value) => {
                if self.state == RowState::Editing {
                    self.edit.name = value;
                }
                None
            }
            RowMsg::SetEditEmail(value) => {
                if self.state == RowState::Editing {
                    self.edit.email = value;
                }
                None
            }
            RowMsg::CancelEdit => {
                if self.state == RowState::Editing {
                    self.edit = SignupForm::default();
                    self.error = None;
                    self.state = RowState::Filled { owned_locally: true };
                }
                None
            }
            RowMsg::SaveEdit => self.save_edit(),
            RowMsg::Updated(result) => {
                self.updated(result);
                None
            }

            RowMsg::RequestDelete => {
                if self.controls().can_delete {
                    self.error = None;
                    self.state = RowState::ConfirmingDelete;
                }
                None
            }
            RowMsg::CancelDelete => {
                if self.state == RowState::ConfirmingDelete {
                    self.state = RowState::Filled { owned_locally: true };
                }
                None
            }
            RowMsg::ConfirmDelete => self.confirm_delete(),
            RowMsg::Removed(result) => {
                self.removed(result);
                None
            }

            RowMsg::Hydrate(occupant) => {
                self.hydrate(occupant);
                None
            }
        }
    }

    /// Runs `msg` and every command it leads to until the row settles.
    pub async fn dispatch(&mut self, msg: RowMsg, api: &dyn SignupApi) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            if let Some(command) = self.update(msg) {
                next = Some(command.run(api).await);
            }
        }
    }

    // ---- transitions ----

    fn submit(&mut self) -> Option<Command> {
        if self.state != RowState::Empty {
            log::debug!("ignoring submit for {} while {:?}", self.slot.slot_id, self.state);
            return None;
        }
        let request = CreateSignupRequest::new(
            &self.event_id,
            &self.form.name,
            &self.form.email,
            &self.slot.role_name,
            Some(&self.form.note),
        );
        match request {
            Ok(request) => {
                self.error = None;
                self.state = RowState::Submitting(SubmitIntent::Create);
                Some(Command::Create(request))
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    fn created(&mut self, result: Result<Option<SignupRecord>, SignupError>) {
        match result {
            Ok(record) => {
                self.ownership
                    .remember(&self.event_id, &self.slot.role_name, &self.form.email);
                // Without an echo the occupant arrives with the announced refetch.
                self.occupant = record.map(|record| Occupant::from_record(&record, self.view));
                self.form = SignupForm::default();
                self.error = None;
                self.state = RowState::Filled { owned_locally: true };
                self.announce(ChangeKind::Created);
            }
            Err(err) => {
                log::warn!("signup for {} failed: {err}", self.slot.slot_id);
                self.error = Some(err.to_string());
                self.state = RowState::Empty;
            }
        }
    }

    fn save_edit(&mut self) -> Option<Command> {
        if self.state != RowState::Editing {
            return None;
        }
        let Some(record_id) = self.occupant.as_ref().map(|o| o.record_id.clone()) else {
            self.error = Some(NO_RECORD.to_string());
            return None;
        };
        match UpdateSignupRequest::new(&self.edit.name, &self.edit.email) {
            Ok(request) => {
                self.error = None;
                self.state = RowState::Submitting(SubmitIntent::Update);
                Some(Command::Update { record_id, request })
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    fn updated(&mut self, result: Result<SignupRecord, SignupError>) {
        match result {
            Ok(record) => {
                self.ownership
                    .remember(&self.event_id, &self.slot.role_name, &self.edit.email);
                self.occupant = Some(Occupant::from_record(&record, self.view));
                self.edit = SignupForm::default();
                self.error = None;
                self.state = RowState::Filled { owned_locally: true };
                self.announce(ChangeKind::Updated);
            }
            Err(err) => {
                log::warn!("update for {} failed: {err}", self.slot.slot_id);
                self.error = Some(err.to_string());
                self.state = RowState::Editing;
            }
        }
    }

    fn confirm_delete(&mut self) -> Option<Command> {
        if self.state != RowState::ConfirmingDelete {
            return None;
        }
        let record_id = self.occupant.as_ref().map(|o| o.record_id.clone());
        match (record_id, self.recall()) {
            (Some(record_id), Some(email)) => {
                self.error = None;
                self.state = RowState::Deleting;
                Some(Command::Remove { record_id, email })
            }
            _ => {
                self.error = Some(NO_LOCAL_EMAIL.to_string());
                self.state = RowState::Filled {
                    owned_locally: false,
                };
                None
            }
        }
    }

    fn removed(&mut self, result: Result<(), SignupError>) {
        match result {
            Ok(()) => {
                self.ownership.forget(&self.event_id, &self.slot.role_name);
                self.occupant = None;
                self.error = None;
                self.state = RowState::Empty;
                self.announce(ChangeKind::Removed);
            }
            Err(err) => {
                log::warn!("removing signup for {} failed: {err}", self.slot.slot_id);
                self.error = Some(err.to_string());
                self.state = RowState::Filled { owned_locally: true };
            }
        }
    }

    fn hydrate(&mut self, occupant: Option<Occupant>) {
        self.occupant = occupant;
        match (self.state, &self.occupant) {
            // In-flight calls settle the state when they complete.
            (RowState::Submitting(_) | RowState::Deleting, _) => {}
            (RowState::Editing | RowState::ConfirmingDelete, Some(_)) => {}
            (_, Some(occupant)) => {
                let owned_locally = self.ownership.owns(
                    &self.event_id,
                    &self.slot.role_name,
                    occupant.email.as_deref(),
                );
                self.state = RowState::Filled { owned_locally };
            }
            (_, None) => {
                self.edit = SignupForm::default();
                self.state = RowState::Empty;
            }
        }
    }

    fn recall(&self) -> Option<String> {
        self.ownership.recall(&self.event_id, &self.slot.role_name)
    }

    fn announce(&self, kind: ChangeKind) {
        self.bus.publish(RosterChange {
            event_id: self.event_id.clone(),
            role_name: self.slot.role_name.clone(),
            kind,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SlotCatalog;
    use crate::model::signup::PublicSignupRecord;
    use crate::ownership::{KeyValueStore, MemoryStore, StorageError, ownership_key};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const EVENT: &str = "evt";
    const FAST: &str = "Pacers – Fast";

    /// Signup API stub that records calls and answers with canned results.
    #[derive(Default)]
    struct StubApi {
        creates: RefCell<Vec<CreateSignupRequest>>,
        updates: RefCell<Vec<(String, UpdateSignupRequest)>>,
        removes: RefCell<Vec<(String, String)>>,
        fail_with: Option<SignupError>,
        /// Confirm creates without echoing the record.
        silent_create: bool,
    }

    impl StubApi {
        fn failing(err: SignupError) -> Self {
            Self {
                fail_with: Some(err),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.creates.borrow().len() + self.updates.borrow().len() + self.removes.borrow().len()
        }

        fn outcome<T>(&self, ok: T) -> Result<T, SignupError> {
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(ok),
            }
        }
    }

    fn record(name: &str, email: &str, role: &str) -> SignupRecord {
        SignupRecord {
            id: "r1".to_string(),
            event_id: EVENT.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            note: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[async_trait(?Send)]
    impl SignupApi for StubApi {
        async fn create(
            &self,
            request: &CreateSignupRequest,
        ) -> Result<Option<SignupRecord>, SignupError> {
            self.creates.borrow_mut().push(request.clone());
            let echo = (!self.silent_create)
                .then(|| record(&request.name, &request.email, &request.role));
            self.outcome(echo)
        }

        async fn list(&self, _event_id: &str) -> Result<Vec<SignupRecord>, SignupError> {
            Ok(Vec::new())
        }

        async fn list_public(&self, _event_id: &str) -> Result<Vec<PublicSignupRecord>, SignupError> {
            Ok(Vec::new())
        }

        async fn update(
            &self,
            record_id: &str,
            request: &UpdateSignupRequest,
        ) -> Result<SignupRecord, SignupError> {
            self.updates
                .borrow_mut()
                .push((record_id.to_string(), request.clone()));
            self.outcome(record(&request.name, &request.email, FAST))
        }

        async fn remove(&self, record_id: &str, email: &str) -> Result<(), SignupError> {
            self.removes
                .borrow_mut()
                .push((record_id.to_string(), email.to_string()));
            self.outcome(())
        }
    }

    /// Memory store that counts writes.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        sets: Cell<usize>,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.sets.set(self.sets.get() + 1);
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.inner.delete(key)
        }
    }

    struct Harness {
        row: SlotRow,
        store: Rc<CountingStore>,
        ownership: OwnershipStore,
        refreshes: Rc<Cell<usize>>,
        _subscription: crate::roster::Subscription,
    }

    fn harness(slot_id: &str) -> Harness {
        let catalog = SlotCatalog::discovery_5k().unwrap();
        let slot = catalog.describe(slot_id).unwrap().clone();
        let store = Rc::new(CountingStore::default());
        let ownership = OwnershipStore::new(store.clone());
        let bus = RosterBus::new();
        let refreshes = Rc::new(Cell::new(0));
        let counter = refreshes.clone();
        let subscription = bus.subscribe(move |_| counter.set(counter.get() + 1));
        Harness {
            row: SlotRow::new(EVENT, slot, RosterView::Public, ownership.clone(), bus),
            store,
            ownership,
            refreshes,
            _subscription: subscription,
        }
    }

    fn occupant(email: Option<&str>) -> Occupant {
        Occupant {
            record_id: "r1".to_string(),
            name: "Lee".to_string(),
            email: email.map(str::to_string),
            note: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    /// Row already filled and owned by this browser.
    fn owned_row() -> Harness {
        let mut h = harness("pacer.fast");
        h.ownership.remember(EVENT, FAST, "lee@x.com");
        h.row.update(RowMsg::Hydrate(Some(occupant(None))));
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
        h
    }

    // -- signup --------------------------------------------------------------

    #[tokio::test]
    async fn blank_fields_never_reach_the_api() {
        let mut h = harness("pacer.fast");
        let api = StubApi::default();

        h.row.update(RowMsg::SetName("   ".to_string()));
        h.row.update(RowMsg::SetEmail("lee@x.com".to_string()));
        h.row.dispatch(RowMsg::Submit, &api).await;

        assert_eq!(api.calls(), 0);
        assert_eq!(h.row.state(), RowState::Empty);
        assert_eq!(h.row.error(), Some("Please fill in your name and email."));
    }

    #[tokio::test]
    async fn successful_signup_fills_and_claims_the_slot() {
        let mut h = harness("pacer.fast");
        let api = StubApi::default();

        h.row.update(RowMsg::SetName("Lee ".to_string()));
        h.row.update(RowMsg::SetEmail(" Lee@X.com ".to_string()));
        h.row.dispatch(RowMsg::Submit, &api).await;

        let creates = api.creates.borrow();
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].name, "Lee");
        assert_eq!(creates[0].email, "Lee@X.com");
        assert_eq!(creates[0].role, FAST);
        assert_eq!(creates[0].event_id, EVENT);

        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
        assert_eq!(h.store.sets.get(), 1);
        assert_eq!(
            h.store.get(&ownership_key(EVENT, FAST)).unwrap().as_deref(),
            Some("lee@x.com")
        );
        assert_eq!(h.refreshes.get(), 1);
        assert_eq!(h.row.form(), &SignupForm::default());
        assert_eq!(h.row.occupant().map(|o| o.name.as_str()), Some("Lee"));
        assert_eq!(h.row.occupant().and_then(|o| o.email.as_deref()), None);
    }

    #[tokio::test]
    async fn confirmed_signup_without_echo_is_still_claimed() {
        let mut h = harness("pacer.fast");
        let api = StubApi {
            silent_create: true,
            ..Default::default()
        };

        h.row.update(RowMsg::SetName("Lee".to_string()));
        h.row.update(RowMsg::SetEmail("Lee@X.com".to_string()));
        h.row.dispatch(RowMsg::Submit, &api).await;

        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
        assert_eq!(h.row.error(), None);
        assert_eq!(h.ownership.recall(EVENT, FAST).as_deref(), Some("lee@x.com"));
        assert_eq!(h.refreshes.get(), 1);
        assert!(h.row.occupant().is_none());
        assert!(!h.row.controls().can_edit);
        assert_eq!(h.row.update(RowMsg::Submit), None);

        h.row.update(RowMsg::Hydrate(Some(occupant(None))));
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
        assert!(h.row.controls().can_edit);
        assert!(h.row.controls().can_delete);
    }

    #[tokio::test]
    async fn failed_signup_keeps_inputs_and_shows_error() {
        let mut h = harness("water.1");
        let api = StubApi::failing(SignupError::Remote {
            status: 500,
            message: "boom".to_string(),
        });

        h.row.update(RowMsg::SetName("Ana".to_string()));
        h.row.update(RowMsg::SetEmail("ana@example.com".to_string()));
        h.row.dispatch(RowMsg::Submit, &api).await;

        assert_eq!(h.row.state(), RowState::Empty);
        assert_eq!(h.row.error(), Some("boom"));
        assert_eq!(h.row.form().name, "Ana");
        assert_eq!(h.row.form().email, "ana@example.com");
        assert_eq!(h.store.sets.get(), 0);
        assert_eq!(h.refreshes.get(), 0);
    }

    #[test]
    fn repeated_submit_while_in_flight_is_ignored() {
        let mut h = harness("pacer.fast");
        h.row.update(RowMsg::SetName("Lee".to_string()));
        h.row.update(RowMsg::SetEmail("lee@x.com".to_string()));

        assert_matches!(h.row.update(RowMsg::Submit), Some(Command::Create(_)));
        assert_eq!(h.row.state(), RowState::Submitting(SubmitIntent::Create));
        assert!(h.row.controls().busy);
        assert_eq!(h.row.update(RowMsg::Submit), None);
    }

    #[test]
    fn note_is_sent_when_present() {
        let mut h = harness("finish.1");
        h.row.update(RowMsg::SetName("Ana".to_string()));
        h.row.update(RowMsg::SetEmail("ana@example.com".to_string()));
        h.row.update(RowMsg::SetNote(" can stay late ".to_string()));
        let command = h.row.update(RowMsg::Submit);
        assert_matches!(command, Some(Command::Create(request)) if request.notes.as_deref() == Some("can stay late"));
    }

    // -- ownership gate ------------------------------------------------------

    #[test]
    fn filled_slot_without_local_claim_is_read_only() {
        let mut h = harness("pacer.fast");
        h.row.update(RowMsg::Hydrate(Some(occupant(None))));

        assert_eq!(h.row.state(), RowState::Filled { owned_locally: false });
        let controls = h.row.controls();
        assert!(!controls.can_edit);
        assert!(!controls.can_delete);
        assert!(!controls.can_submit);

        assert_eq!(h.row.update(RowMsg::StartEdit), None);
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: false });
    }

    #[test]
    fn filled_slot_with_local_claim_offers_edit_and_delete() {
        let h = owned_row();
        let controls = h.row.controls();
        assert!(controls.can_edit);
        assert!(controls.can_delete);
    }

    #[test]
    fn admin_email_mismatch_is_not_owned() {
        let mut h = harness("pacer.fast");
        h.ownership.remember(EVENT, FAST, "lee@x.com");
        h.row.update(RowMsg::Hydrate(Some(occupant(Some("someone@else.com")))));
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: false });
    }

    #[test]
    fn public_roster_fills_the_matching_row_without_email() {
        let catalog = SlotCatalog::discovery_5k().unwrap();
        let snapshot = crate::roster::RosterSnapshot::from_records(&[PublicSignupRecord {
            id: "r1".to_string(),
            name: "Ana".to_string(),
            role: catalog.role_name_of("water.1").to_string(),
            note: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
        }]);
        let assignment = snapshot
            .join(&catalog, None)
            .into_iter()
            .find(|a| a.slot.slot_id == "water.1")
            .unwrap();

        let mut h = harness("water.1");
        h.row.update(RowMsg::Hydrate(assignment.occupant.map(Occupant::from)));

        assert_eq!(h.row.state(), RowState::Filled { owned_locally: false });
        let occupant = h.row.occupant().unwrap();
        assert_eq!(occupant.name, "Ana");
        assert_eq!(occupant.email, None);
    }

    #[test]
    fn hydrate_with_nobody_empties_the_slot() {
        let mut h = owned_row();
        h.row.update(RowMsg::Hydrate(None));
        assert_eq!(h.row.state(), RowState::Empty);
        assert!(h.row.occupant().is_none());
    }

    // -- edit ----------------------------------------------------------------

    #[tokio::test]
    async fn edit_prefills_from_record_and_local_email() {
        let mut h = owned_row();
        h.row.update(RowMsg::StartEdit);

        assert_eq!(h.row.state(), RowState::Editing);
        assert_eq!(h.row.edit_form().name, "Lee");
        assert_eq!(h.row.edit_form().email, "lee@x.com");
    }

    #[tokio::test]
    async fn successful_edit_re_remembers_the_new_email() {
        let mut h = owned_row();
        let api = StubApi::default();

        h.row.update(RowMsg::StartEdit);
        h.row.update(RowMsg::SetEditName("Lee Park".to_string()));
        h.row.update(RowMsg::SetEditEmail("Lee.Park@X.com".to_string()));
        h.row.dispatch(RowMsg::SaveEdit, &api).await;

        let updates = api.updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, "r1");
        assert_eq!(updates[0].1.email, "Lee.Park@X.com");

        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
        assert_eq!(h.ownership.recall(EVENT, FAST).as_deref(), Some("lee.park@x.com"));
        assert_eq!(h.row.occupant().map(|o| o.name.as_str()), Some("Lee Park"));
        assert_eq!(h.row.edit_form(), &SignupForm::default());
        assert_eq!(h.refreshes.get(), 1);
    }

    #[tokio::test]
    async fn rejected_edit_stays_in_editing() {
        let mut h = owned_row();
        let api = StubApi::failing(SignupError::OwnershipMismatch("Not your signup".to_string()));

        h.row.update(RowMsg::StartEdit);
        h.row.update(RowMsg::SetEditEmail("impostor@x.com".to_string()));
        h.row.dispatch(RowMsg::SaveEdit, &api).await;

        assert_eq!(h.row.state(), RowState::Editing);
        assert_eq!(h.row.error(), Some("Not your signup"));
        assert_eq!(h.row.edit_form().email, "impostor@x.com");
        assert_eq!(h.ownership.recall(EVENT, FAST).as_deref(), Some("lee@x.com"));
    }

    #[test]
    fn blank_edit_is_rejected_locally() {
        let mut h = owned_row();
        h.row.update(RowMsg::StartEdit);
        h.row.update(RowMsg::SetEditName(" ".to_string()));
        assert_eq!(h.row.update(RowMsg::SaveEdit), None);
        assert_eq!(h.row.state(), RowState::Editing);
        assert!(h.row.error().is_some());
    }

    #[test]
    fn cancel_edit_returns_to_filled() {
        let mut h = owned_row();
        h.row.update(RowMsg::StartEdit);
        h.row.update(RowMsg::CancelEdit);
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
    }

    // -- delete --------------------------------------------------------------

    #[test]
    fn delete_requires_confirmation() {
        let mut h = owned_row();

        assert_eq!(h.row.update(RowMsg::RequestDelete), None);
        assert_eq!(h.row.state(), RowState::ConfirmingDelete);

        let command = h.row.update(RowMsg::ConfirmDelete);
        assert_eq!(
            command,
            Some(Command::Remove {
                record_id: "r1".to_string(),
                email: "lee@x.com".to_string()
            })
        );
        assert_eq!(h.row.state(), RowState::Deleting);
    }

    #[test]
    fn confirm_without_request_does_nothing() {
        let mut h = owned_row();
        assert_eq!(h.row.update(RowMsg::ConfirmDelete), None);
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
    }

    #[test]
    fn cancel_delete_returns_to_filled() {
        let mut h = owned_row();
        h.row.update(RowMsg::RequestDelete);
        h.row.update(RowMsg::CancelDelete);
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
    }

    #[tokio::test]
    async fn successful_delete_forgets_and_empties() {
        let mut h = owned_row();
        let api = StubApi::default();

        h.row.update(RowMsg::RequestDelete);
        h.row.dispatch(RowMsg::ConfirmDelete, &api).await;

        assert_eq!(api.removes.borrow().len(), 1);
        assert_eq!(h.row.state(), RowState::Empty);
        assert!(h.ownership.recall(EVENT, FAST).is_none());
        assert!(h.row.occupant().is_none());
        assert_eq!(h.refreshes.get(), 1);
    }

    #[tokio::test]
    async fn failed_delete_returns_to_owned_filled() {
        let mut h = owned_row();
        let api = StubApi::failing(SignupError::Network {
            operation: crate::error::Operation::Remove,
            detail: "offline".to_string(),
        });

        h.row.update(RowMsg::RequestDelete);
        h.row.dispatch(RowMsg::ConfirmDelete, &api).await;

        assert_eq!(h.row.state(), RowState::Filled { owned_locally: true });
        assert_eq!(h.row.error(), Some("Unable to remove your signup right now."));
        assert!(h.ownership.recall(EVENT, FAST).is_some());
        assert_eq!(h.refreshes.get(), 0);
    }

    #[test]
    fn delete_after_local_memory_lost_is_refused() {
        let mut h = owned_row();
        h.row.update(RowMsg::RequestDelete);
        h.ownership.forget(EVENT, FAST);

        assert_eq!(h.row.update(RowMsg::ConfirmDelete), None);
        assert_eq!(h.row.state(), RowState::Filled { owned_locally: false });
        assert!(h.row.error().is_some());
    }
}
