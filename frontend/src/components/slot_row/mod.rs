//! One signup card per catalog slot.
//!
//! The transitions live in [`common::slot_row::SlotRow`]; this component
//! wires them to Yew: `update::update` runs the reducer and spawns any
//! backend call it asks for, `view::view` renders the current state, and a
//! props change (a fresh roster fetch) re-syncs the occupant.

use common::slot_row::RowMsg;
use yew::prelude::*;

mod props;
mod state;
mod update;
mod view;

pub use props::SlotRowProps;
pub use state::SlotRowComponent;

impl Component for SlotRowComponent {
    type Message = RowMsg;
    type Properties = SlotRowProps;

    fn create(ctx: &Context<Self>) -> Self {
        SlotRowComponent::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.roster_version != old_props.roster_version || props.occupant != old_props.occupant {
            self.row.update(RowMsg::Hydrate(props.occupant.clone()));
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
