//! Renders a slot card for each row state.

use common::slot_row::{RowMsg, RowState, SubmitIntent};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::confirm_sheet::ConfirmSheet;

use super::state::SlotRowComponent;

pub fn view(component: &SlotRowComponent, ctx: &Context<SlotRowComponent>) -> Html {
    let link = ctx.link();
    let row = &component.row;
    let state = row.state();
    let filled = !matches!(state, RowState::Empty | RowState::Submitting(SubmitIntent::Create));

    html! {
        <article class={classes!("slot-card", filled.then_some("filled"))}>
            { build_heading(component) }
            {
                match state {
                    RowState::Empty | RowState::Submitting(SubmitIntent::Create) => build_signup_form(component, link),
                    RowState::Editing | RowState::Submitting(SubmitIntent::Update) => build_edit_form(component, link),
                    RowState::Filled { .. } | RowState::ConfirmingDelete | RowState::Deleting => build_occupant(component, ctx),
                }
            }
            {
                if let Some(error) = row.error() {
                    html! { <p class="slot-error" role="alert">{ error }</p> }
                } else {
                    html! {}
                }
            }
            <ConfirmSheet
                open={matches!(state, RowState::ConfirmingDelete | RowState::Deleting)}
                title={"Remove your signup?".to_string()}
                message={format!("You will no longer be listed for {}.", row.slot().role_name)}
                confirm_label={"Remove".to_string()}
                busy={state == RowState::Deleting}
                on_confirm={link.callback(|_| RowMsg::ConfirmDelete)}
                on_cancel={link.callback(|_| RowMsg::CancelDelete)}
            />
        </article>
    }
}

fn build_heading(component: &SlotRowComponent) -> Html {
    let slot = component.row.slot();
    html! {
        <header class="slot-heading">
            <h3>{ &slot.role_name }</h3>
            <p class="slot-description">{ &slot.description }</p>
            {
                match &slot.details {
                    Some(details) => html! {
                        <dl class="slot-details">
                            { for details.entries().into_iter().map(|(label, value)| html! {
                                <>
                                    <dt>{ label }</dt>
                                    <dd>{ value }</dd>
                                </>
                            }) }
                        </dl>
                    },
                    None => html! {},
                }
            }
        </header>
    }
}

fn build_signup_form(component: &SlotRowComponent, link: &Scope<SlotRowComponent>) -> Html {
    let form = component.row.form();
    let busy = component.row.is_busy();
    html! {
        <form class="slot-form" onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            RowMsg::Submit
        })}>
            <input
                type="text"
                placeholder="Your name"
                value={form.name.clone()}
                disabled={busy}
                oninput={link.callback(|e: InputEvent| RowMsg::SetName(e.target_unchecked_into::<HtmlInputElement>().value()))}
            />
            <input
                type="email"
                placeholder="Email"
                value={form.email.clone()}
                disabled={busy}
                oninput={link.callback(|e: InputEvent| RowMsg::SetEmail(e.target_unchecked_into::<HtmlInputElement>().value()))}
            />
            <textarea
                placeholder="Notes (optional)"
                value={form.note.clone()}
                disabled={busy}
                oninput={link.callback(|e: InputEvent| RowMsg::SetNote(e.target_unchecked_into::<HtmlTextAreaElement>().value()))}
            />
            <button type="submit" class="btn btn-primary" disabled={busy}>
                { if busy { "Signing up…" } else { "Sign up" } }
            </button>
        </form>
    }
}

fn build_edit_form(component: &SlotRowComponent, link: &Scope<SlotRowComponent>) -> Html {
    let edit = component.row.edit_form();
    let busy = component.row.is_busy();
    html! {
        <form class="slot-form" onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            RowMsg::SaveEdit
        })}>
            <input
                type="text"
                value={edit.name.clone()}
                disabled={busy}
                oninput={link.callback(|e: InputEvent| RowMsg::SetEditName(e.target_unchecked_into::<HtmlInputElement>().value()))}
            />
            <input
                type="email"
                value={edit.email.clone()}
                disabled={busy}
                oninput={link.callback(|e: InputEvent| RowMsg::SetEditEmail(e.target_unchecked_into::<HtmlInputElement>().value()))}
            />
            <div class="slot-actions">
                <button type="button" class="btn" disabled={busy} onclick={link.callback(|_| RowMsg::CancelEdit)}>
                    { "Cancel" }
                </button>
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    { if busy { "Saving…" } else { "Save" } }
                </button>
            </div>
        </form>
    }
}

fn build_occupant(component: &SlotRowComponent, ctx: &Context<SlotRowComponent>) -> Html {
    let link = ctx.link();
    let row = &component.row;
    let controls = row.controls();
    let Some(occupant) = row.occupant() else {
        // Confirmed without an echoed record; the roster refetch fills this in.
        return html! { <p class="slot-occupant">{ "You’re signed up. Loading the roster…" }</p> };
    };
    let duplicates = ctx.props().duplicate_claims;

    html! {
        <div class="slot-occupant">
            <p>
                <strong>{ &occupant.name }</strong>
                { if controls.can_edit { html! { <span class="badge">{ "You" }</span> } } else { html! {} } }
            </p>
            {
                match &occupant.note {
                    Some(note) => html! { <p class="slot-note">{ note }</p> },
                    None => html! {},
                }
            }
            {
                if duplicates > 0 {
                    html! { <p class="slot-warning">{ format!("{duplicates} more signup(s) also claim this slot.") }</p> }
                } else {
                    html! {}
                }
            }
            {
                if controls.can_edit || controls.can_delete {
                    html! {
                        <div class="slot-actions">
                            <button class="btn" disabled={!controls.can_edit} onclick={link.callback(|_| RowMsg::StartEdit)}>
                                { "Edit" }
                            </button>
                            <button class="btn btn-danger" disabled={!controls.can_delete} onclick={link.callback(|_| RowMsg::RequestDelete)}>
                                { "Remove" }
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
