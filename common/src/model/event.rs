use serde::{Deserialize, Serialize};

/// Immutable description of the race the volunteers sign up for.
///
/// Constructed once by the app shell and handed down through context; the
/// `event_id` is the foreign key every signup record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    pub event_id: String,
    pub event_name: String,
    pub event_date: String,
    pub event_time: String,
    pub location: String,
    pub address: String,
    pub route_url: String,
    pub distance: String,
    pub elevation: String,
    pub difficulty: String,
    pub expected_participants: u32,
}

impl EventInfo {
    /// Boys Gotta Run – Discovery 5K.
    pub fn discovery_5k() -> Self {
        Self {
            event_id: "cmht9p0800001p21xn5tjp5nc".to_string(),
            event_name: "Boys Gotta Run – Discovery 5K".to_string(),
            event_date: "2025-11-12".to_string(),
            event_time: "7:55 AM".to_string(),
            location: "Discovery Elementary".to_string(),
            address: "5275 N 36th St, Arlington, VA 22207".to_string(),
            route_url: "https://www.strava.com/routes/3420808564668746102".to_string(),
            distance: "3.2 mi".to_string(),
            elevation: "300 ft".to_string(),
            difficulty: "Easy".to_string(),
            expected_participants: 16,
        }
    }
}
