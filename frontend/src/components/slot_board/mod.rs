//! The signup board: every catalog slot grouped by category, kept in sync
//! with the public roster.
//!
//! The board fetches once on mount and again whenever a slot row announces a
//! change on the [`RosterBus`](common::roster::RosterBus). Each fetch bumps
//! `version` so every row re-syncs its occupant.

use std::rc::Rc;

use common::error::SignupError;
use common::model::slot::SlotCategory;
use common::roster::{FetchSequence, RosterAggregator, RosterSnapshot, RosterView, Subscription};
use common::slot_row::Occupant;
use yew::context::ContextHandle;
use yew::prelude::*;

use crate::app::AppContext;
use crate::components::slot_row::SlotRowComponent;
use crate::slot_grid::SlotGrid;

pub enum Msg {
    Refresh,
    Loaded(u64, Result<RosterSnapshot, SignupError>),
}

pub struct SlotBoard {
    app: Option<Rc<AppContext>>,
    snapshot: RosterSnapshot,
    fetches: FetchSequence,
    version: u32,
    loading: bool,
    error: Option<String>,
    _subscription: Option<Subscription>,
    _context: Option<ContextHandle<Rc<AppContext>>>,
}

impl Component for SlotBoard {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let (app, handle) = match ctx.link().context::<Rc<AppContext>>(Callback::noop()) {
            Some((app, handle)) => (Some(app), Some(handle)),
            None => {
                log::error!("slot board mounted without an app context");
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
            snapshot: RosterSnapshot::default(),
            fetches: FetchSequence::default(),
            version: 0,
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
                let aggregator = RosterAggregator::new(app.api.clone(), RosterView::Public);
                let event_id = app.event.event_id.clone();
                let ticket = self.fetches.issue();
                ctx.link().send_future(async move {
                    Msg::Loaded(ticket, aggregator.refresh(&event_id).await)
                });
                true
            }
            Msg::Loaded(ticket, _) if !self.fetches.is_latest(ticket) => {
                log::debug!("dropping stale slot board fetch #{ticket}");
                false
            }
            Msg::Loaded(_, Ok(snapshot)) => {
                self.snapshot = snapshot;
                self.version = self.version.wrapping_add(1);
                self.loading = false;
                self.error = None;
                true
            }
            Msg::Loaded(_, Err(err)) => {
                log::warn!("could not refresh the slot board: {err}");
                self.loading = false;
                self.error = Some(err.to_string());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(app) = &self.app else {
            return html! { <div class="error-banner">{ "The volunteer board is unavailable." }</div> };
        };
        html! {
            <section class="slot-board">
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
                { for SlotCategory::ALL.iter().map(|category| self.build_category(app, *category)) }
                { self.build_unmatched(app) }
            </section>
        }
    }
}

impl SlotBoard {
    /// Signups whose role is not on the board, so organizers can spot them.
    fn build_unmatched(&self, app: &Rc<AppContext>) -> Html {
        let unmatched = self.snapshot.unmatched(&app.catalog);
        if unmatched.is_empty() {
            return html! {};
        }
        html! {
            <section class="slot-category unmatched">
                <h2>{ "Other signups" }</h2>
                <ul>
                    { for unmatched.into_iter().map(|entry| html! {
                        <li key={entry.id.clone()}>{ format!("{} ({})", entry.name, entry.role) }</li>
                    }) }
                </ul>
            </section>
        }
    }

    fn build_category(&self, app: &Rc<AppContext>, category: SlotCategory) -> Html {
        let fill = self.snapshot.fill(&app.catalog, category);
        let assignments = self.snapshot.join(&app.catalog, Some(category));
        html! {
            <section class="slot-category">
                <h2>
                    { category.label() }
                    <span class="fill-count">{ format!("{} of {} filled", fill.filled, fill.total) }</span>
                </h2>
                <SlotGrid>
                    { for assignments.into_iter().map(|assignment| html! {
                        <SlotRowComponent
                            key={assignment.slot.slot_id.clone()}
                            app={app.clone()}
                            slot={assignment.slot.clone()}
                            occupant={assignment.occupant.map(Occupant::from)}
                            duplicate_claims={assignment.duplicate_claims}
                            roster_version={self.version}
                        />
                    }) }
                </SlotGrid>
            </section>
        }
    }
}
