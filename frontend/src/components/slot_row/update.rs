use common::slot_row::RowMsg;
use yew::prelude::*;

use crate::helpers::{show_toast, SIGNUP_TOAST, SIGNUP_TOAST_MS};

use super::state::SlotRowComponent;

/// Runs the reducer, then hands any backend call to the Yew scheduler. The
/// call's outcome comes back through `send_future` as the next message.
pub fn update(component: &mut SlotRowComponent, ctx: &Context<SlotRowComponent>, msg: RowMsg) -> bool {
    let signed_up = matches!(msg, RowMsg::Created(Ok(_)));

    if let Some(command) = component.row.update(msg) {
        let api = ctx.props().app.api.clone();
        ctx.link()
            .send_future(async move { command.run(api.as_ref()).await });
    }

    if signed_up {
        show_toast(SIGNUP_TOAST, SIGNUP_TOAST_MS);
    }
    true
}
