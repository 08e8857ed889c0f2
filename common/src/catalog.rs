//! The fixed catalog of volunteer slots and the slot id ↔ role name mapping.
//!
//! The backend only knows role names. The board only knows slot ids. This
//! module is the single place where one becomes the other. A catalog is built
//! once, validated as a bijection, and never mutated afterwards.
//!
//! Lookups fail closed: an unknown key comes back unchanged with a warning in
//! the log, never a panic.

use std::collections::HashMap;

use crate::model::slot::{Slot, SlotCategory, SlotDetails};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("slot id '{0}' is declared more than once")]
    DuplicateSlotId(String),

    #[error("role name '{0}' is used by more than one slot")]
    DuplicateRoleName(String),
}

/// Number of slots per category plus the overall total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub marshals: usize,
    pub pacers: usize,
    pub water_stations: usize,
    pub finish_line_holders: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
    by_slot_id: HashMap<String, usize>,
    by_role_name: HashMap<String, usize>,
}

impl SlotCatalog {
    /// Builds a catalog, keeping declaration order. Fails when a slot id or a
    /// role name repeats, since either would break the id ↔ name bijection.
    pub fn new(slots: Vec<Slot>) -> Result<Self, CatalogError> {
        let mut by_slot_id = HashMap::with_capacity(slots.len());
        let mut by_role_name = HashMap::with_capacity(slots.len());

        for (index, slot) in slots.iter().enumerate() {
            if by_slot_id.insert(slot.slot_id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSlotId(slot.slot_id.clone()));
            }
            if by_role_name.insert(slot.role_name.clone(), index).is_some() {
                return Err(CatalogError::DuplicateRoleName(slot.role_name.clone()));
            }
        }

        Ok(Self {
            slots,
            by_slot_id,
            by_role_name,
        })
    }

    /// The Discovery 5K volunteer positions.
    pub fn discovery_5k() -> Result<Self, CatalogError> {
        Self::new(DISCOVERY_5K.iter().map(SlotSpec::to_slot).collect())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Slots in declaration order, optionally restricted to one category.
    pub fn list_slots(&self, category: Option<SlotCategory>) -> Vec<&Slot> {
        self.slots
            .iter()
            .filter(|slot| category.is_none_or(|c| slot.category == c))
            .collect()
    }

    pub fn describe(&self, slot_id: &str) -> Option<&Slot> {
        let slot = self.by_slot_id.get(slot_id).map(|&index| &self.slots[index]);
        if slot.is_none() {
            log::warn!("slot id not found: {slot_id}");
        }
        slot
    }

    /// Backend role name for `slot_id`; the input itself when unknown.
    pub fn role_name_of<'a>(&'a self, slot_id: &'a str) -> &'a str {
        match self.by_slot_id.get(slot_id) {
            Some(&index) => &self.slots[index].role_name,
            None => {
                log::warn!("slot id not found: {slot_id}, using as-is");
                slot_id
            }
        }
    }

    /// Slot id for `role_name`; the input itself when unknown.
    pub fn slot_id_of<'a>(&'a self, role_name: &'a str) -> &'a str {
        match self.by_role_name.get(role_name) {
            Some(&index) => &self.slots[index].slot_id,
            None => {
                log::warn!("role name not found: {role_name}, using as-is");
                role_name
            }
        }
    }

    pub fn is_valid_slot_id(&self, slot_id: &str) -> bool {
        self.by_slot_id.contains_key(slot_id)
    }

    pub fn is_valid_role_name(&self, role_name: &str) -> bool {
        self.by_role_name.contains_key(role_name)
    }

    pub fn count(&self, category: SlotCategory) -> usize {
        self.slots.iter().filter(|s| s.category == category).count()
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            marshals: self.count(SlotCategory::Marshal),
            pacers: self.count(SlotCategory::Pacer),
            water_stations: self.count(SlotCategory::Water),
            finish_line_holders: self.count(SlotCategory::Finish),
            total: self.slots.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery 5K slot table
// ---------------------------------------------------------------------------

struct SlotSpec {
    slot_id: &'static str,
    role_name: &'static str,
    category: SlotCategory,
    description: &'static str,
    route_points: Option<&'static str>,
    repositioning: Option<&'static str>,
    mile_markers: Option<&'static str>,
    pace: Option<&'static str>,
    location: Option<&'static str>,
    setup_notes: Option<&'static str>,
}

impl SlotSpec {
    const fn new(
        slot_id: &'static str,
        role_name: &'static str,
        category: SlotCategory,
        description: &'static str,
    ) -> Self {
        Self {
            slot_id,
            role_name,
            category,
            description,
            route_points: None,
            repositioning: None,
            mile_markers: None,
            pace: None,
            location: None,
            setup_notes: None,
        }
    }

    const fn marshal(
        self,
        route_points: &'static str,
        repositioning: &'static str,
        mile_markers: &'static str,
    ) -> Self {
        Self {
            route_points: Some(route_points),
            repositioning: Some(repositioning),
            mile_markers: Some(mile_markers),
            ..self
        }
    }

    const fn pace(self, pace: &'static str) -> Self {
        Self {
            pace: Some(pace),
            ..self
        }
    }

    const fn station(self, location: &'static str, mile_markers: &'static str) -> Self {
        Self {
            location: Some(location),
            mile_markers: Some(mile_markers),
            ..self
        }
    }

    const fn setup(self, setup_notes: &'static str) -> Self {
        Self {
            setup_notes: Some(setup_notes),
            ..self
        }
    }

    fn to_slot(&self) -> Slot {
        let details = SlotDetails {
            route_points: self.route_points.map(str::to_string),
            repositioning: self.repositioning.map(str::to_string),
            mile_markers: self.mile_markers.map(str::to_string),
            pace: self.pace.map(str::to_string),
            location: self.location.map(str::to_string),
            setup_notes: self.setup_notes.map(str::to_string),
        };
        Slot {
            slot_id: self.slot_id.to_string(),
            category: self.category,
            role_name: self.role_name.to_string(),
            description: self.description.to_string(),
            details: (details != SlotDetails::default()).then_some(details),
        }
    }
}

const WATER_DESCRIPTION: &str =
    "Set up water station with cups, keep everyone hydrated. Plan for 16 boys.";
const WATER_SETUP: &str =
    "Fill cups with half Gatorade and half water. Have plenty of cups ready for 16 boys.";
const FINISH_DESCRIPTION: &str =
    "Hold the finish line banner and cheer on every runner as they cross the finish line.";
const FINISH_SETUP: &str = "Can be filled by marshals who finish early";

const DISCOVERY_5K: [SlotSpec; 14] = [
    SlotSpec::new(
        "marshal.1",
        "Starter + Finisher Crew",
        SlotCategory::Marshal,
        "Handle the first turn, then reposition to guide runners to the finish.",
    )
    .marshal(
        "Routes 1 + 13",
        "After pack clears first turn (0.22 mi), return to Discovery for final straight (2.7–3.2 mi).",
        "0.22 mi, 2.7–3.2 mi",
    ),
    SlotSpec::new(
        "marshal.2",
        "Valleywood + John Marshall Crew",
        SlotCategory::Marshal,
        "Cover early Valleywood stretch, then reposition to final turn.",
    )
    .marshal(
        "Routes 2 + 12",
        "Start on Valleywood (0.3–0.7 mi), loop back via Valleywood to cover John Marshall right (2.5 mi).",
        "0.3–0.7 mi, 2.5 mi",
    ),
    SlotSpec::new(
        "marshal.3",
        "Vermont + 35th Street North Crew",
        SlotCategory::Marshal,
        "Guide at Vermont turn, then reposition to 35th Street turn.",
    )
    .marshal(
        "Routes 3 + 11",
        "Park at Vermont (0.75 mi), re-post at 35th left (2.4 mi) when clear.",
        "0.75 mi, 2.4 mi",
    ),
    SlotSpec::new(
        "marshal.4",
        "Massachusetts + Nottingham / 35th Crew",
        SlotCategory::Marshal,
        "Cover Massachusetts turn (watch for traffic), then reposition to Nottingham/35th.",
    )
    .marshal(
        "Routes 4 + 10",
        "Cover Mass left (0.82 mi), reposition via Rockingham to Nottingham/35th (2.3 mi).",
        "0.82 mi, 2.3 mi",
    ),
    SlotSpec::new(
        "marshal.5",
        "Massachusetts / Rhode Island + Rockingham Crew",
        SlotCategory::Marshal,
        "Station at Rhode Island turn, then reposition to Rockingham interchange.",
    )
    .marshal(
        "Routes 5 + 9",
        "Station at Rhode Island right (1.09 mi), reposition via Rockingham to Nottingham interchange (2.1 mi).",
        "1.09 mi, 2.1 mi",
    ),
    SlotSpec::new(
        "marshal.6",
        "Virginia Avenue Entry Crew",
        SlotCategory::Marshal,
        "Cover Virginia Avenue entry and stay in place along early Virginia segment.",
    )
    .marshal(
        "Routes 6 + 7",
        "Stays in place at Rhode Island to Virginia left (≈1.17 mi) along early Virginia segment.",
        "≈1.17 mi, 1.31 mi",
    ),
    SlotSpec::new(
        "marshal.7",
        "Virginia / Nottingham Crew",
        SlotCategory::Marshal,
        "Single post at right turn onto Nottingham, marking final neighborhood stretch.",
    )
    .marshal(
        "Route 8",
        "Single post at Virginia to Nottingham right turn (≈2.0 mi).",
        "≈2.0 mi",
    ),
    SlotSpec::new(
        "pacer.fast",
        "Pacers – Fast",
        SlotCategory::Pacer,
        "Lead the front group and keep the energy high from the first stride.",
    )
    .pace("8-9 min/mile (they will get tired)"),
    SlotSpec::new(
        "pacer.medium",
        "Pacers – Medium",
        SlotCategory::Pacer,
        "Support steady runners and help them hold a comfortable pace.",
    )
    .pace("9-10 min/mile"),
    SlotSpec::new(
        "pacer.slow",
        "Pacers – Finish Crew",
        SlotCategory::Pacer,
        "Stay positive with runners who are focused on finishing strong.",
    )
    .pace("10+ min/mile with lots of stops"),
    SlotSpec::new(
        "water.1",
        "Water Stop #1 — Massachusetts → Rhode Island",
        SlotCategory::Water,
        WATER_DESCRIPTION,
    )
    .station("Massachusetts → Rhode Island", "approx. mile 1.1")
    .setup(WATER_SETUP),
    SlotSpec::new(
        "water.2",
        "Water Stop #2 — Nottingham → 35th",
        SlotCategory::Water,
        WATER_DESCRIPTION,
    )
    .station("Nottingham → 35th", "approx. mile 2.3")
    .setup(WATER_SETUP),
    SlotSpec::new(
        "finish.1",
        "Finish Line Holders 1",
        SlotCategory::Finish,
        FINISH_DESCRIPTION,
    )
    .setup(FINISH_SETUP),
    SlotSpec::new(
        "finish.2",
        "Finish Line Holders 2",
        SlotCategory::Finish,
        FINISH_DESCRIPTION,
    )
    .setup(FINISH_SETUP),
];
