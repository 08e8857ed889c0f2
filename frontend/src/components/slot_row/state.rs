use common::roster::RosterView;
use common::slot_row::{RowMsg, SlotRow};

use super::props::SlotRowProps;

pub struct SlotRowComponent {
    pub row: SlotRow,
}

impl SlotRowComponent {
    pub fn new(props: &SlotRowProps) -> Self {
        let app = &props.app;
        let mut row = SlotRow::new(
            app.event.event_id.clone(),
            props.slot.clone(),
            RosterView::Public,
            app.ownership.clone(),
            app.bus.clone(),
        );
        row.update(RowMsg::Hydrate(props.occupant.clone()));
        Self { row }
    }
}
