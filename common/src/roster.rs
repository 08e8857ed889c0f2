//! Roster aggregation: fetch every signup for the event and join it against
//! the slot catalog.
//!
//! Refreshing is pull-only. Slot rows announce successful writes on a
//! [`RosterBus`]; whoever owns the roster subscribes and re-fetches.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{FixedOffset, Offset, Utc};

use crate::catalog::SlotCatalog;
use crate::client::SignupApi;
use crate::error::SignupError;
use crate::model::signup::{Signup, parse_timestamp};
use crate::model::slot::{Slot, SlotCategory};

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Removed,
}

/// Published after a slot row's write succeeded on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterChange {
    pub event_id: String,
    pub role_name: String,
    pub kind: ChangeKind,
}

type Listener = Rc<dyn Fn(&RosterChange)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Single-threaded observer list. Clones share the same listeners.
#[derive(Clone, Default)]
pub struct RosterBus {
    inner: Rc<RefCell<BusInner>>,
}

impl PartialEq for RosterBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl RosterBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&RosterChange) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, change: RosterChange) {
        // Snapshot first so a listener may subscribe or unsubscribe re-entrantly.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        log::debug!(
            "roster change {:?} for '{}' -> {} listener(s)",
            change.kind,
            change.role_name,
            listeners.len()
        );
        for listener in listeners {
            listener(&change);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Keeps a bus listener registered; unsubscribes on drop.
pub struct Subscription {
    id: u64,
    bus: std::rc::Weak<RefCell<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Which read endpoint backs the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterView {
    /// `page-hydrate`: no emails.
    Public,
    /// Full records, emails included.
    Admin,
}

/// One signup as the roster displays it, whichever endpoint it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    pub note: Option<String>,
    pub created_at: String,
}

impl RosterEntry {
    pub fn from_signup(record: &impl Signup) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            email: record.email().map(str::to_string),
            role: record.role().to_string(),
            note: record.note().map(str::to_string),
            created_at: record.created_at().to_string(),
        }
    }
}

/// A catalog slot with whoever holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment<'a> {
    pub slot: &'a Slot,
    pub occupant: Option<&'a RosterEntry>,
    /// Further records claiming the same role. Two browsers can race for
    /// an empty slot and both succeed; only the earliest is shown.
    pub duplicate_claims: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFill {
    pub category: SlotCategory,
    pub filled: usize,
    pub total: usize,
}

/// The roster as of the last successful fetch, sorted by `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    entries: Vec<RosterEntry>,
}

impl RosterSnapshot {
    pub fn new(mut entries: Vec<RosterEntry>) -> Self {
        // Unparseable timestamps sort last; ties keep backend order.
        entries.sort_by_key(|entry| {
            parse_timestamp(&entry.created_at).map_or((1, None), |ts| (0, Some(ts)))
        });
        Self { entries }
    }

    pub fn from_records<R: Signup>(records: &[R]) -> Self {
        Self::new(records.iter().map(RosterEntry::from_signup).collect())
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typed per-slot view: every catalog slot (optionally one category) in
    /// catalog order, with at most one occupant each. Records whose role
    /// matches no slot are left out; see [`RosterSnapshot::unmatched`].
    pub fn join<'a>(
        &'a self,
        catalog: &'a SlotCatalog,
        category: Option<SlotCategory>,
    ) -> Vec<SlotAssignment<'a>> {
        let mut by_role: HashMap<&str, Vec<&RosterEntry>> = HashMap::new();
        for entry in &self.entries {
            by_role.entry(entry.role.as_str()).or_default().push(entry);
        }

        catalog
            .list_slots(category)
            .into_iter()
            .map(|slot| {
                let claims = by_role.get(slot.role_name.as_str());
                SlotAssignment {
                    slot,
                    occupant: claims.and_then(|claims| claims.first().copied()),
                    duplicate_claims: claims.map_or(0, |claims| claims.len().saturating_sub(1)),
                }
            })
            .collect()
    }

    /// Records whose role string matches no catalog slot.
    pub fn unmatched<'a>(&'a self, catalog: &SlotCatalog) -> Vec<&'a RosterEntry> {
        self.entries
            .iter()
            .filter(|entry| !catalog.is_valid_role_name(&entry.role))
            .collect()
    }

    pub fn fill(&self, catalog: &SlotCatalog, category: SlotCategory) -> CategoryFill {
        let assignments = self.join(catalog, Some(category));
        CategoryFill {
            category,
            filled: assignments.iter().filter(|a| a.occupant.is_some()).count(),
            total: assignments.len(),
        }
    }

    pub fn summary(&self) -> String {
        match self.entries.len() {
            0 => "No volunteers yet — share the signup link!".to_string(),
            1 => "1 volunteer signed up".to_string(),
            n => format!("{n} volunteers signed up"),
        }
    }
}

/// Formats a backend timestamp like `Nov 12, 7:55 AM` in the viewer's zone,
/// given as minutes east of UTC. Unparseable input renders as `—`.
pub fn format_timestamp(raw: &str, utc_offset_minutes: i32) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return "—".to_string();
    };
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60)
        .unwrap_or_else(|| Utc.fix());
    ts.with_timezone(&offset).format("%b %-d, %-I:%M %p").to_string()
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Tickets for overlapping roster fetches. Responses can arrive out of
/// order; only the one answering the latest ticket may be applied.
#[derive(Debug, Default)]
pub struct FetchSequence {
    issued: u64,
}

impl FetchSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.issued
    }
}

/// Fetches the roster through a [`SignupApi`] for one view.
#[derive(Clone)]
pub struct RosterAggregator {
    api: Rc<dyn SignupApi>,
    view: RosterView,
}

impl RosterAggregator {
    pub fn new(api: Rc<dyn SignupApi>, view: RosterView) -> Self {
        Self { api, view }
    }

    pub fn view(&self) -> RosterView {
        self.view
    }

    pub async fn refresh(&self, event_id: &str) -> Result<RosterSnapshot, SignupError> {
        let snapshot = match self.view {
            RosterView::Public => RosterSnapshot::from_records(&self.api.list_public(event_id).await?),
            RosterView::Admin => RosterSnapshot::from_records(&self.api.list(event_id).await?),
        };
        log::info!("roster for {event_id}: {} signup(s)", snapshot.len());
        Ok(snapshot)
    }

    /// Calls `on_change` for every roster change concerning `event_id`.
    pub fn watch(
        bus: &RosterBus,
        event_id: &str,
        on_change: impl Fn(&RosterChange) + 'static,
    ) -> Subscription {
        let event_id = event_id.to_string();
        bus.subscribe(move |change| {
            if change.event_id == event_id {
                on_change(change);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::signup::{PublicSignupRecord, SignupRecord};
    use crate::requests::{CreateSignupRequest, UpdateSignupRequest};
    use async_trait::async_trait;
    use std::cell::Cell;

    struct FixedRoster {
        records: Vec<SignupRecord>,
    }

    #[async_trait(?Send)]
    impl SignupApi for FixedRoster {
        async fn create(
            &self,
            _request: &CreateSignupRequest,
        ) -> Result<Option<SignupRecord>, SignupError> {
            unreachable!("roster never creates")
        }

        async fn list(&self, _event_id: &str) -> Result<Vec<SignupRecord>, SignupError> {
            Ok(self.records.clone())
        }

        async fn list_public(&self, _event_id: &str) -> Result<Vec<PublicSignupRecord>, SignupError> {
            Ok(self.records.iter().cloned().map(PublicSignupRecord::from).collect())
        }

        async fn update(
            &self,
            _record_id: &str,
            _request: &UpdateSignupRequest,
        ) -> Result<SignupRecord, SignupError> {
            unreachable!("roster never updates")
        }

        async fn remove(&self, _record_id: &str, _email: &str) -> Result<(), SignupError> {
            unreachable!("roster never removes")
        }
    }

    fn record(id: &str, name: &str, role: &str, created_at: &str) -> SignupRecord {
        SignupRecord {
            id: id.to_string(),
            event_id: "evt".to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: role.to_string(),
            note: None,
            created_at: created_at.to_string(),
        }
    }

    fn catalog() -> SlotCatalog {
        SlotCatalog::discovery_5k().unwrap()
    }

    const WATER_1: &str = "Water Stop #1 — Massachusetts → Rhode Island";

    // -- aggregator ----------------------------------------------------------

    #[tokio::test]
    async fn public_view_omits_email_and_admin_view_keeps_it() {
        let api: Rc<dyn SignupApi> = Rc::new(FixedRoster {
            records: vec![record("r1", "Ana", WATER_1, "2025-01-01T00:00:00Z")],
        });
        let catalog = catalog();

        let public = RosterAggregator::new(api.clone(), RosterView::Public)
            .refresh("evt")
            .await
            .unwrap();
        let water = &public.join(&catalog, Some(SlotCategory::Water))[0];
        assert_eq!(water.slot.slot_id, "water.1");
        let occupant = water.occupant.unwrap();
        assert_eq!(occupant.name, "Ana");
        assert_eq!(occupant.email, None);

        let admin = RosterAggregator::new(api, RosterView::Admin)
            .refresh("evt")
            .await
            .unwrap();
        let water = &admin.join(&catalog, Some(SlotCategory::Water))[0];
        assert_eq!(water.occupant.unwrap().email.as_deref(), Some("ana@example.com"));
    }

    // -- fetch ordering --------------------------------------------------------

    #[test]
    fn older_fetch_is_not_latest_once_a_newer_one_starts() {
        let mut sequence = FetchSequence::default();
        let mount = sequence.issue();
        let after_create = sequence.issue();

        assert!(sequence.is_latest(after_create));
        assert!(!sequence.is_latest(mount));
    }

    // -- join ----------------------------------------------------------------

    #[test]
    fn join_covers_every_slot_and_drops_unknown_roles() {
        let snapshot = RosterSnapshot::from_records(&[
            record("r1", "Ana", WATER_1, "2025-01-01T00:00:00Z"),
            record("r2", "Bo", "Setup & Teardown", "2025-01-01T00:00:00Z"),
        ]);
        let catalog = catalog();

        let assignments = snapshot.join(&catalog, None);
        assert_eq!(assignments.len(), 14);
        assert_eq!(assignments.iter().filter(|a| a.occupant.is_some()).count(), 1);

        let unmatched = snapshot.unmatched(&catalog);
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].role, "Setup & Teardown");
        // The generic table still lists both.
        assert_eq!(snapshot.entries().len(), 2);
    }

    #[test]
    fn earliest_claim_wins_and_duplicates_are_counted() {
        let snapshot = RosterSnapshot::from_records(&[
            record("late", "Bo", "Pacers – Fast", "2025-01-02T00:00:00Z"),
            record("early", "Ana", "Pacers – Fast", "2025-01-01T00:00:00Z"),
        ]);
        let catalog = catalog();

        let pacers = snapshot.join(&catalog, Some(SlotCategory::Pacer));
        assert_eq!(pacers[0].occupant.map(|o| o.id.as_str()), Some("early"));
        assert_eq!(pacers[0].duplicate_claims, 1);
        assert_eq!(pacers[1].duplicate_claims, 0);
    }

    #[test]
    fn fill_counts_per_category() {
        let snapshot = RosterSnapshot::from_records(&[
            record("r1", "Ana", "Pacers – Fast", "2025-01-01T00:00:00Z"),
            record("r2", "Bo", "Pacers – Medium", "2025-01-01T00:00:00Z"),
        ]);
        assert_eq!(
            snapshot.fill(&catalog(), SlotCategory::Pacer),
            CategoryFill {
                category: SlotCategory::Pacer,
                filled: 2,
                total: 3
            }
        );
    }

    // -- summary / formatting ------------------------------------------------

    #[test]
    fn summary_pluralizes() {
        assert_eq!(
            RosterSnapshot::default().summary(),
            "No volunteers yet — share the signup link!"
        );
        let one = RosterSnapshot::from_records(&[record("r1", "Ana", WATER_1, "x")]);
        assert_eq!(one.summary(), "1 volunteer signed up");
        let two = RosterSnapshot::from_records(&[
            record("r1", "Ana", WATER_1, "x"),
            record("r2", "Bo", WATER_1, "y"),
        ]);
        assert_eq!(two.summary(), "2 volunteers signed up");
    }

    #[test]
    fn format_timestamp_in_viewer_offset() {
        assert_eq!(format_timestamp("2025-11-12T12:55:00Z", -300), "Nov 12, 7:55 AM");
        assert_eq!(format_timestamp("2025-01-01T00:00:00Z", 0), "Jan 1, 12:00 AM");
        assert_eq!(format_timestamp("garbage", 0), "—");
    }

    // -- bus -----------------------------------------------------------------

    #[test]
    fn bus_delivers_until_subscription_dropped() {
        let bus = RosterBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let subscription = RosterAggregator::watch(&bus, "evt", move |_| counter.set(counter.get() + 1));

        let change = |event_id: &str| RosterChange {
            event_id: event_id.to_string(),
            role_name: WATER_1.to_string(),
            kind: ChangeKind::Created,
        };

        bus.publish(change("evt"));
        bus.publish(change("other-event"));
        assert_eq!(hits.get(), 1);

        drop(subscription);
        assert_eq!(bus.listener_count(), 0);
        bus.publish(change("evt"));
        assert_eq!(hits.get(), 1);
    }
}
