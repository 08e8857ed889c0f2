//! Top sheet asking the visitor to confirm a destructive action.
//!
//! The sheet cannot be dismissed by clicking outside it; only its own
//! buttons close it. It slides in when `open` carries the `show` class.

use uuid::Uuid;
use yew::{classes, html, Callback, Component, Context, Html, Properties};

pub struct ConfirmSheet {
    id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub open: bool,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

impl Component for ConfirmSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("confirm-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_confirm = props.on_confirm.reform(|_| ());
        let on_cancel = props.on_cancel.reform(|_| ());
        html! {
            <div class={classes!("top-sheet", props.open.then_some("show"))} id={self.id.clone()}
                 role="alertdialog" aria-modal="true" aria-hidden={(!props.open).to_string()}>
                <div class="top-sheet-card">
                    <h3>{ &props.title }</h3>
                    <p>{ &props.message }</p>
                    <div class="top-sheet-actions">
                        <button class="btn" onclick={on_cancel} disabled={props.busy}>
                            { "Cancel" }
                        </button>
                        <button class="btn btn-danger" onclick={on_confirm} disabled={props.busy}>
                            { if props.busy { "Removing…".to_string() } else { props.confirm_label.clone() } }
                        </button>
                    </div>
                </div>
            </div>
        }
    }
}
