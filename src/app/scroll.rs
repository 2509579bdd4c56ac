use leptos::{html, prelude::*};
use wasm_bindgen::JsCast;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::content::{CardDescriptor, Category};
use crate::hover::{
    scroll::{plan_scroll, CardPosition},
    use_trigger_store,
};

/// Rendered cards under `container`, in document order.
fn card_positions(container: &web_sys::Element) -> Vec<CardPosition> {
    let Ok(nodes) = container.query_selector_all("[data-card-id]") else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .filter_map(|el| {
            let id = el.get_attribute("data-card-id")?;
            let category = Category::from_slug(&el.get_attribute("data-category")?)?;
            Some(CardPosition {
                card: CardDescriptor::new(id, category),
                top: el.get_bounding_client_rect().top(),
            })
        })
        .collect()
}

/// Scrolls to the first card matching a newly activated trigger.
#[component]
pub fn ScrollCoordinator(container: NodeRef<html::Div>) -> impl IntoView {
    let store = use_trigger_store();

    Effect::watch(
        move || store.active_trigger(),
        move |active, _, _| {
            let Some(el) = container.get_untracked() else {
                return;
            };
            let window = window();
            let scroll_y = window.scroll_y().unwrap_or_default();
            let Some(top) = plan_scroll(*active, &card_positions(&el), scroll_y) else {
                return;
            };
            log::debug!("scrolling to {top} for {active:?}");
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        },
        false,
    );
}
