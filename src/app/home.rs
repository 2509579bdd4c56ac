use std::time::Duration;

use leptos::{html, prelude::*};
use leptos_meta::Title;

#[cfg(feature = "hydrate")]
use codee::string::JsonSerdeWasmCodec;
#[cfg(feature = "hydrate")]
use leptos_use::storage::use_session_storage;

use super::cards::{fetch_home_cards, CardGrid, GridColumns};
use super::scroll::ScrollCoordinator;
use super::signature::{content_start, split_content_style, Signature};
use super::signup::EmailSignup;
use super::trigger_word::TriggerWord;
use crate::hover::{provide_trigger_store, TriggerId};
use crate::theme::{use_theme, Theme};
use crate::timer::TimerSlot;

/// Session flag set by the first category page visited.
pub const CATEGORY_PAGE_LOADED: &str = "categoryPageLoaded";

const WORD_STAGGER_MS: u64 = 50;
const WORD_FADE_MS: u64 = 400;
const UNDERLINE_PAUSE_MS: u64 = 100;
const GRID_LAG_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Text(&'static str),
    Trigger(TriggerId, &'static str),
    Break,
}

const NARRATIVE: &[Segment] = &[
    Segment::Text("Welcome to my digital nook - I love"),
    Segment::Trigger(TriggerId::Building, "building"),
    Segment::Text(", and am currently working on"),
    Segment::Trigger(TriggerId::Dori, "dori"),
    Segment::Text("full time."),
    Segment::Break,
    Segment::Text("Beyond that, I indulge in"),
    Segment::Trigger(TriggerId::Travel, "traveling"),
    Segment::Text("and"),
    Segment::Trigger(TriggerId::ForagingFrames, "foraging frames"),
    Segment::Text("! I also"),
    Segment::Trigger(TriggerId::Surfing, "ride waves"),
    Segment::Text("and"),
    Segment::Trigger(TriggerId::RockClimbing, "climb rocks"),
    Segment::Text("."),
    Segment::Break,
    Segment::Text("Sometimes I"),
    Segment::Trigger(TriggerId::Write, "write"),
    Segment::Text(", too."),
];

fn word_count() -> usize {
    NARRATIVE
        .iter()
        .map(|segment| match segment {
            Segment::Text(text) => text.split_whitespace().count(),
            Segment::Trigger(..) => 1,
            Segment::Break => 0,
        })
        .sum()
}

/// Underlines fade in once the last word has finished appearing.
fn underline_delay() -> Duration {
    let words = word_count() as u64;
    content_start()
        + Duration::from_millis(
            words.saturating_sub(1) * WORD_STAGGER_MS + WORD_FADE_MS + UNDERLINE_PAUSE_MS,
        )
}

fn reveal_style(after: Duration) -> String {
    format!("animation-delay: {}ms", (content_start() + after).as_millis())
}

fn word_style(index: usize) -> String {
    reveal_style(Duration::from_millis(index as u64 * WORD_STAGGER_MS))
}

fn narrative_view(show_underline: Signal<bool>) -> impl IntoView {
    let mut index = 0;
    NARRATIVE
        .iter()
        .map(|segment| match *segment {
            Segment::Text(text) => text
                .split_whitespace()
                .map(|word| {
                    let style = word_style(index);
                    index += 1;
                    // punctuation hugs the preceding word
                    let lead = if word.starts_with([',', '.', '!']) { "" } else { " " };
                    view! {
                        {lead}
                        <span class="word-in" style=style>
                            {word}
                        </span>
                    }
                    .into_any()
                })
                .collect_view()
                .into_any(),
            Segment::Trigger(trigger, label) => {
                let style = word_style(index);
                index += 1;
                view! {
                    " "
                    <span class="word-in" style=style>
                        <TriggerWord trigger=trigger show_underline=show_underline>
                            {label}
                        </TriggerWord>
                    </span>
                }
                .into_any()
            }
            Segment::Break => view! {
                <br />
                <br />
            }
            .into_any(),
        })
        .collect_view()
}

#[component]
pub fn HomePage() -> impl IntoView {
    let store = provide_trigger_store();
    use_theme(Theme::Default);

    #[cfg(feature = "hydrate")]
    {
        let (_, _, clear_category_flag) =
            use_session_storage::<bool, JsonSerdeWasmCodec>(CATEGORY_PAGE_LOADED);
        Effect::new(move |_| clear_category_flag());
    }

    let show_underline = RwSignal::new(false);
    let underline_timer = StoredValue::new(TimerSlot::<TimeoutHandle>::default());
    on_cleanup(move || {
        underline_timer.try_update_value(TimerSlot::cancel);
    });
    Effect::new(move |_| {
        let reveal = move || {
            underline_timer.try_update_value(TimerSlot::fired);
            show_underline.set(true);
        };
        match set_timeout_with_handle(reveal, underline_delay()) {
            Ok(handle) => underline_timer.update_value(|slot| slot.replace(handle)),
            Err(e) => log::warn!("couldn't schedule underline reveal: {e:?}"),
        }
    });

    let cards = Resource::new(|| (), |_| fetch_home_cards());
    let grid_ref = NodeRef::<html::Div>::new();
    let panel_dimmed = move || store.any_focus();

    view! {
        <Title text="Home" />
        <Signature dimmed=Signal::derive(panel_dimmed) />
        <div class="max-w-7xl mx-auto px-8">
            <div class="intro-split grid grid-cols-1 lg:grid-cols-2" style=split_content_style()>
                <div class="lg:sticky top-0 lg:h-screen flex justify-center relative pt-12 lg:pt-24">
                    <div class=move || {
                        if panel_dimmed() {
                            "intro-panel glass-panel card-dimmed"
                        } else {
                            "intro-panel glass-panel"
                        }
                    }>
                        <div class="fade-in-item" style=reveal_style(Duration::ZERO)>
                            <p class="text-3xl lg:text-5xl">"Hello! I'm Justin."</p>
                            <p class="intro-text text-lg lg:text-2xl max-w-2xl text-left leading-snug">
                                <br />
                                {narrative_view(show_underline.into())}
                            </p>
                        </div>
                        <div class="fade-in-item" style=reveal_style(Duration::ZERO)>
                            <EmailSignup />
                        </div>
                    </div>
                </div>
                <div node_ref=grid_ref class="min-h-screen py-12 lg:py-24 px-6 lg:px-8">
                    <ScrollCoordinator container=grid_ref />
                    <Suspense>
                        {move || Suspend::new(async move {
                            let cards = cards.await;
                            view! {
                                <div
                                    class="fade-in-item delayed w-full"
                                    style=reveal_style(Duration::from_millis(GRID_LAG_MS))
                                >
                                    <CardGrid cards=cards columns=GridColumns::Two />
                                </div>
                            }
                        })}
                    </Suspense>
                </div>
            </div>
        </div>
    }
}
