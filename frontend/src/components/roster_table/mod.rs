//! Tabular roster of everyone signed up, public or admin.
//!
//! The admin view adds each volunteer's email. Records whose role matches no
//! slot on the board are still listed, flagged as off-board.

use std::rc::Rc;

use common::error::SignupError;
use common::roster::{format_timestamp, FetchSequence, RosterAggregator, RosterEntry, RosterSnapshot, RosterView, Subscription};
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::app::AppContext;
use crate::helpers::local_utc_offset_minutes;

#[derive(Properties, PartialEq, Clone)]
pub struct RosterTableProps {
    pub view: RosterView,
}

pub enum Msg {
    Refresh,
    Loaded(u64, Result<RosterSnapshot, SignupError>),
}

pub struct RosterTable {
    app: Option<Rc<AppContext>>,
    snapshot: Option<RosterSnapshot>,
    fetches: FetchSequence,
    loading: bool,
    error: Option<String>,
    _subscription: Option<Subscription>,
    _context: Option<ContextHandle<Rc<AppContext>>>,
}

impl Component for RosterTable {
    type Message = Msg;
    type Properties = RosterTableProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = match ctx.link().context::<Rc<AppContext>>(Callback::noop()) {
            Some((app, handle)) => (Some(app), Some(handle)),
            None => {
                log::error!("roster table mounted without an app context");
                (None, None)
            }
        };
        let subscription = app.as_ref().map(|app| {
            let link = ctx.link().clone();
            RosterAggregator::watch(&app.bus, &app.event.event_id, move |_| {
                link.send_message(Msg::Refresh)
            })
        });
        ctx.link().send_message(Msg::Refresh);

        Self {
            app,
            snapshot: None,
            fetches: FetchSequence::default(),
            loading: false,
            error: None,
            _subscription: subscription,
            _context: handle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Refresh => {
                let Some(app) = &self.app else {
                    return false;
                };
                self.loading = true;
                let view = ctx.props().view;
                let aggregator = RosterAggregator::new(app.api.clone(), view);
                let event_id = app.event.event_id.clone();
                let ticket = self.fetches.issue();
                ctx.link().send_future(async move {
                    Msg::Loaded(ticket, aggregator.refresh(&event_id).await)
                });
                true
            }
            // Also drops answers for a view the table has switched away from.
            Msg::Loaded(ticket, _) if !self.fetches.is_latest(ticket) => false,
            Msg::Loaded(_, Ok(snapshot)) => {
                self.snapshot = Some(snapshot);
                self.loading = false;
                self.error = None;
                true
            }
            Msg::Loaded(_, Err(err)) => {
                log::warn!("could not load the roster: {err}");
                self.loading = false;
                self.error = Some(err.to_string());
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().view != old_props.view {
            self.snapshot = None;
            ctx.link().send_message(Msg::Refresh);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(app) = &self.app else {
            return html! { <div class="error-banner">{ "The roster is unavailable." }</div> };
        };
        let admin = ctx.props().view == RosterView::Admin;

        html! {
            <section class="roster">
                <div class="board-toolbar">
                    <button class="btn" disabled={self.loading} onclick={ctx.link().callback(|_| Msg::Refresh)}>
                        { if self.loading { "Refreshing…" } else { "Refresh" } }
                    </button>
                    {
                        match &self.error {
                            Some(error) => html! { <span class="slot-error" role="alert">{ error }</span> },
                            None => html! {},
                        }
                    }
                </div>
                {
                    match &self.snapshot {
                        None => html! { <p class="roster-summary">{ "Loading volunteers…" }</p> },
                        Some(snapshot) => build_table(app, snapshot, admin),
                    }
                }
            </section>
        }
    }
}

fn build_table(app: &AppContext, snapshot: &RosterSnapshot, admin: bool) -> Html {
    let offset = local_utc_offset_minutes();
    html! {
        <>
            <p class="roster-summary">{ snapshot.summary() }</p>
            {
                if snapshot.is_empty() {
                    html! {}
                } else {
                    html! {
                        <table class="roster-table">
                            <thead>
                                <tr>
                                    <th>{ "Role" }</th>
                                    <th>{ "Name" }</th>
                                    { if admin { html! { <th>{ "Email" }</th> } } else { html! {} } }
                                    <th>{ "Notes" }</th>
                                    <th>{ "Signed up" }</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for snapshot.entries().iter().map(|entry| build_row(app, entry, admin, offset)) }
                            </tbody>
                        </table>
                    }
                }
            }
        </>
    }
}

fn build_row(app: &AppContext, entry: &RosterEntry, admin: bool, offset: i32) -> Html {
    let on_board = app.catalog.is_valid_role_name(&entry.role);
    html! {
        <tr key={entry.id.clone()} class={classes!((!on_board).then_some("off-board"))}>
            <td>
                { &entry.role }
                { if on_board { html! {} } else { html! { <span class="badge">{ "not on board" }</span> } } }
            </td>
            <td>{ &entry.name }</td>
            { if admin { html! { <td>{ entry.email.clone().unwrap_or_default() }</td> } } else { html! {} } }
            <td>{ entry.note.clone().unwrap_or_default() }</td>
            <td>{ format_timestamp(&entry.created_at, offset) }</td>
        </tr>
    }
}
