use crate::app::App;

mod app;
mod components;
mod helpers;
mod logging;
mod services;
mod slot_grid;
mod tops_sheet;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
