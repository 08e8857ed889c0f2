use std::rc::Rc;

use common::catalog::{CatalogError, SlotCatalog};
use common::client::{SignupApi, SignupClient};
use common::config::ApiConfig;
use common::model::event::EventInfo;
use common::ownership::OwnershipStore;
use common::roster::{RosterBus, RosterView};
use yew::{classes, html, Component, Context, ContextProvider, Html};

use crate::components::roster_table::RosterTable;
use crate::components::slot_board::SlotBoard;
use crate::services::http::GlooTransport;
use crate::services::storage::LocalStorageStore;

/// Everything the components share, provided once at the root.
pub struct AppContext {
    pub event: EventInfo,
    pub catalog: SlotCatalog,
    pub api: Rc<dyn SignupApi>,
    pub ownership: OwnershipStore,
    pub bus: RosterBus,
}

impl AppContext {
    fn new(config: ApiConfig, event: EventInfo) -> Result<Self, CatalogError> {
        Ok(Self {
            event,
            catalog: SlotCatalog::discovery_5k()?,
            api: Rc::new(SignupClient::new(config, GlooTransport)),
            ownership: OwnershipStore::new(Rc::new(LocalStorageStore)),
            bus: RosterBus::new(),
        })
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        self.event == other.event && self.bus == other.bus
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Signup,
    Roster,
    Admin,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Tab::Signup => "Sign up",
            Tab::Roster => "Who's volunteering",
            Tab::Admin => "Admin roster",
        }
    }
}

pub enum Msg {
    SetTab(Tab),
}

pub struct App {
    context: Result<Rc<AppContext>, CatalogError>,
    tab: Tab,
    admin: bool,
}

/// The admin roster (with emails) is only linked when the page is opened
/// with `#admin`.
fn admin_requested() -> bool {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .is_some_and(|hash| hash == "#admin")
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let event = EventInfo::discovery_5k();
        log::info!("volunteer board for {} ({})", event.event_name, event.event_id);
        let context = AppContext::new(ApiConfig::from_build_env(), event).map(Rc::new);
        if let Err(err) = &context {
            log::error!("slot catalog rejected: {err}");
        }
        Self {
            context,
            tab: Tab::Signup,
            admin: admin_requested(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SetTab(tab) => {
                let changed = self.tab != tab;
                self.tab = tab;
                changed
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let context = match &self.context {
            Ok(context) => context.clone(),
            Err(err) => {
                return html! {
                    <div class="error-banner">{ format!("The volunteer board is unavailable: {err}") }</div>
                };
            }
        };
        let link = ctx.link();
        let mut tabs = vec![Tab::Signup, Tab::Roster];
        if self.admin {
            tabs.push(Tab::Admin);
        }

        html! {
            <ContextProvider<Rc<AppContext>> context={context.clone()}>
                <main class="volunteer-app">
                    { event_header(&context.event) }
                    <nav class="tab-bar">
                        { for tabs.into_iter().map(|tab| html! {
                            <button
                                class={classes!("tab-btn", (self.tab == tab).then_some("active"))}
                                onclick={link.callback(move |_| Msg::SetTab(tab))}
                            >
                                { tab.label() }
                            </button>
                        }) }
                    </nav>
                    {
                        match self.tab {
                            Tab::Signup => html! { <SlotBoard /> },
                            Tab::Roster => html! { <RosterTable view={RosterView::Public} /> },
                            Tab::Admin => html! { <RosterTable view={RosterView::Admin} /> },
                        }
                    }
                </main>
            </ContextProvider<Rc<AppContext>>>
        }
    }
}

fn event_header(event: &EventInfo) -> Html {
    html! {
        <header class="event-header">
            <h1>{ &event.event_name }</h1>
            <p>{ format!("{} · {}", event.event_date, event.event_time) }</p>
            <p>{ format!("{}, {}", event.location, event.address) }</p>
            <p>
                { format!("{} · {} elevation · {} · ~{} runners · ", event.distance, event.elevation, event.difficulty, event.expected_participants) }
                <a href={event.route_url.clone()} target="_blank" rel="noopener noreferrer">{ "View route" }</a>
            </p>
        </header>
    }
}
