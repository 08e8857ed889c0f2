use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of volunteer position families.
///
/// Slot identifiers are namespaced by category (`marshal.1`, `pacer.fast`,
/// `water.2`, ...), and the signup board groups its rows by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Marshal,
    Pacer,
    Water,
    Finish,
}

impl SlotCategory {
    /// All categories in board display order.
    pub const ALL: [SlotCategory; 4] = [
        SlotCategory::Marshal,
        SlotCategory::Pacer,
        SlotCategory::Water,
        SlotCategory::Finish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::Marshal => "marshal",
            SlotCategory::Pacer => "pacer",
            SlotCategory::Water => "water",
            SlotCategory::Finish => "finish",
        }
    }

    /// Heading shown above the category's rows.
    pub fn label(&self) -> &'static str {
        match self {
            SlotCategory::Marshal => "Course Marshals",
            SlotCategory::Pacer => "Pacers",
            SlotCategory::Water => "Water Stations",
            SlotCategory::Finish => "Finish Line Holders",
        }
    }
}

impl fmt::Display for SlotCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form display metadata attached to a slot. Every field is optional;
/// which ones are set depends on the category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_points: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositioning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mile_markers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_notes: Option<String>,
}

impl SlotDetails {
    /// Labelled `(caption, value)` pairs for the fields that are present,
    /// in a stable order suitable for rendering.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Route points", &self.route_points),
            ("Repositioning", &self.repositioning),
            ("Mile markers", &self.mile_markers),
            ("Pace", &self.pace),
            ("Location", &self.location),
            ("Setup", &self.setup_notes),
        ]
        .into_iter()
        .filter_map(|(caption, value)| value.as_deref().map(|v| (caption, v)))
        .collect()
    }
}

/// A statically defined volunteer position.
///
/// `role_name` is what the backend stores on each signup record; the backend
/// has no notion of `slot_id`, so the catalog translates between the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub slot_id: String,
    pub category: SlotCategory,
    pub role_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<SlotDetails>,
}
