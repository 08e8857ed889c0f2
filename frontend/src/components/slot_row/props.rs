use std::rc::Rc;

use common::model::slot::Slot;
use common::slot_row::Occupant;
use yew::prelude::*;

use crate::app::AppContext;

#[derive(Properties, PartialEq, Clone)]
pub struct SlotRowProps {
    pub app: Rc<AppContext>,
    pub slot: Slot,
    /// Earliest claimant from the last roster fetch.
    pub occupant: Option<Occupant>,
    /// Other records claiming the same role.
    #[prop_or_default]
    pub duplicate_claims: usize,
    /// Bumped on every fetch so the row re-syncs even when its occupant did
    /// not change.
    pub roster_version: u32,
}
