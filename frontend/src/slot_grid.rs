use yew::{html, Children, Component, Context, Html, Properties};

/// Responsive grid of slot cards: as many columns of at least `min_column_px`
/// as fit the viewport.
#[derive(Properties, PartialEq)]
pub struct SlotGridProps {
    #[prop_or(280)]
    pub min_column_px: u32,
    pub children: Children,
}

pub struct SlotGrid;

impl Component for SlotGrid {
    type Message = ();
    type Properties = SlotGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        SlotGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat(auto-fill, minmax({}px, 1fr));
             gap: 12px;
             width: 100%;",
            props.min_column_px
        );

        html! {
            <div class="slot-grid" style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
