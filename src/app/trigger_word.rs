use leptos::{ev::MouseEvent, prelude::*};
use leptos_router::hooks::use_navigate;

use crate::hover::{
    use_trigger_store,
    viewport::use_viewport_mode,
    EmitterAction, TriggerId,
};
use crate::timer::TimerSlot;

/// A narrative phrase that highlights the cards it refers to.
#[component]
pub fn TriggerWord(
    trigger: TriggerId,
    #[prop(into)] show_underline: Signal<bool>,
    children: Children,
) -> impl IntoView {
    let store = use_trigger_store();
    let mode = use_viewport_mode();
    let navigate = use_navigate();
    let pending = StoredValue::new(TimerSlot::<TimeoutHandle>::default());
    on_cleanup(move || {
        pending.try_update_value(TimerSlot::cancel);
    });

    let on_enter = move |_: MouseEvent| {
        if !mode.get_untracked().is_compact() {
            store.set_active_trigger(Some(trigger));
        }
    };
    let on_leave = move |_: MouseEvent| {
        if !mode.get_untracked().is_compact() {
            store.set_active_trigger(None);
        }
    };
    let on_click = move |_: MouseEvent| match EmitterAction::for_tap(mode.get_untracked(), trigger) {
        EmitterAction::Navigate(route) => navigate(route, Default::default()),
        EmitterAction::Preview { clear_after } => {
            store.set_active_trigger(Some(trigger));
            let clear = move || {
                pending.try_update_value(TimerSlot::fired);
                store.clear_trigger_if(trigger);
            };
            match set_timeout_with_handle(clear, clear_after) {
                Ok(handle) => pending.update_value(|slot| slot.replace(handle)),
                Err(e) => {
                    pending.update_value(TimerSlot::cancel);
                    log::warn!("couldn't schedule trigger clear: {e:?}");
                }
            }
        }
    };

    view! {
        <span
            class="trigger-word font-semibold cursor-pointer inline-block relative"
            data-trigger=trigger.slug()
            on:mouseenter=on_enter
            on:mouseleave=on_leave
            on:click=on_click
        >
            {children()}
            <span class=move || {
                if show_underline.get() {
                    format!("{} underline-visible", trigger.underline_class())
                } else {
                    trigger.underline_class()
                }
            } />
        </span>
    }
}
