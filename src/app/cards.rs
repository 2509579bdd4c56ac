use leptos::{ev::MouseEvent, html, prelude::*};
use leptos::server_fn::codec::GetUrl;
use leptos_router::components::A;
use wasm_bindgen::{closure::Closure, JsValue};
use leptos_use::{
    use_intersection_observer_with_options, use_raf_fn_with_options, UseIntersectionObserverOptions,
    UseRafFnOptions,
};

#[cfg(feature = "ssr")]
use crate::content::{get_cards, get_home_cards};
use crate::content::{
    BlogCard as BlogCardData, CardData, CardDescriptor, CardLayout, Category,
    HobbyCard as HobbyCardData, ProjectCard as ProjectCardData, GLOBAL_CARD_CACHE,
};
use crate::hover::{
    focus::{media_should_play, BlobOrigin, CardRect, PointerSample, RemoteSource, Tilt, TiltSamples},
    use_trigger_store,
    viewport::{use_viewport_mode, Visibility, VIDEO_VISIBILITY},
    CardMachine, CardState,
};

const HOME_CACHE_KEY: &str = "home";

#[server(input = GetUrl)]
pub async fn get_cards_server(category: Category) -> Result<Vec<CardData>, ServerFnError> {
    get_cards(category).map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(input = GetUrl)]
pub async fn get_home_cards_server() -> Result<Vec<CardData>, ServerFnError> {
    get_home_cards().map_err(|e| ServerFnError::new(e.to_string()))
}

async fn cached_cards<F>(key: String, fetch: F) -> Vec<CardData>
where
    F: std::future::Future<Output = Result<Vec<CardData>, ServerFnError>>,
{
    let cache = &*GLOBAL_CARD_CACHE;
    if let Some(cards) = cache.get(&key) {
        return (*cards).clone();
    }
    let cards = match fetch.await {
        Ok(cards) => cards,
        Err(e) => {
            log::error!("couldn't load {key} cards: {e}");
            return Vec::new();
        }
    };
    // the server keeps its own cache in the content store
    #[cfg(feature = "hydrate")]
    cache.insert(key, cards.clone());
    cards
}

pub async fn fetch_cards(category: Category) -> Vec<CardData> {
    cached_cards(category.route_segment().to_string(), get_cards_server(category)).await
}

pub async fn fetch_home_cards() -> Vec<CardData> {
    cached_cards(HOME_CACHE_KEY.to_string(), get_home_cards_server()).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumns {
    Two,
    Three,
}

impl GridColumns {
    fn class(self) -> &'static str {
        match self {
            Self::Two => "grid grid-cols-1 lg:grid-cols-2 auto-rows-[280px] gap-6 grid-flow-dense",
            Self::Three => "grid grid-cols-1 lg:grid-cols-3 auto-rows-[280px] gap-6 grid-flow-dense",
        }
    }
}

#[component]
pub fn CardGrid(cards: Vec<CardData>, columns: GridColumns) -> impl IntoView {
    let last = cards.len().saturating_sub(1);
    view! {
        <div class=columns.class()>
            {cards
                .into_iter()
                .enumerate()
                .map(|(i, card)| view! { <CardView card=card last_in_list={i == last} /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn CardView(card: CardData, last_in_list: bool) -> impl IntoView {
    let descriptor = card.descriptor();
    let layout = card.meta().layout;
    let href = card.href();
    match card {
        CardData::Blog(data) => view! {
            <BaseCard card=descriptor layout=layout href=href last_in_list=last_in_list>
                <BlogCardBody data=data />
            </BaseCard>
        }
        .into_any(),
        CardData::Project(data) => view! {
            <BaseCard card=descriptor layout=layout href=href last_in_list=last_in_list>
                <ProjectCardBody data=data />
            </BaseCard>
        }
        .into_any(),
        CardData::Hobby(data) => view! {
            <BaseCard card=descriptor layout=layout href=href last_in_list=last_in_list>
                <HobbyCardBody data=data />
            </BaseCard>
        }
        .into_any(),
    }
}

/// Highlight state shared with the variant body of a card.
#[derive(Debug, Clone, Copy)]
struct CardContext {
    state: Memo<CardState>,
    lit: Signal<bool>,
}

fn random_samples() -> TiltSamples {
    TiltSamples::new(
        js_sys::Math::random(),
        js_sys::Math::random(),
        js_sys::Math::random(),
    )
}

fn card_rect(el: &web_sys::Element) -> CardRect {
    let rect = el.get_bounding_client_rect();
    CardRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

fn sample(ev: &MouseEvent) -> PointerSample {
    PointerSample {
        x: ev.client_x() as f64,
        y: ev.client_y() as f64,
    }
}

const HIGHLIGHT_SHADOW: &str = "0 10px 35px rgba(0, 0, 0, 0.15)";

/// Inline style changes for a frame; `None` removes the property.
fn tilt_properties(tilt: Option<Tilt>) -> [(&'static str, Option<String>); 2] {
    match tilt {
        Some(tilt) => [
            ("transform", Some(tilt.transform())),
            ("box-shadow", Some(HIGHLIGHT_SHADOW.to_string())),
        ],
        None => [("transform", None), ("box-shadow", None)],
    }
}

fn apply_tilt(inner: NodeRef<html::Div>, tilt: Option<Tilt>) {
    let Some(el) = inner.get_untracked() else {
        return;
    };
    // the element-ext `style` setter from the prelude shadows the getter
    let style = web_sys::HtmlElement::style(&el);
    for (name, value) in tilt_properties(tilt) {
        let result = match value {
            Some(value) => style.set_property(name, &value),
            None => style.remove_property(name).map(|_| ()),
        };
        if let Err(e) = result {
            log::warn!("couldn't update card {name}: {e:?}");
            return;
        }
    }
}

/// Shared card shell: highlight blob, tilt, dimming and focus reporting.
#[component]
fn BaseCard(
    card: CardDescriptor,
    layout: CardLayout,
    href: String,
    last_in_list: bool,
    children: Children,
) -> impl IntoView {
    let store = use_trigger_store();
    let mode = use_viewport_mode();
    let card = StoredValue::new(card);
    let card_ref = NodeRef::<html::Div>::new();
    let inner_ref = NodeRef::<html::Div>::new();
    let machine = StoredValue::new(CardMachine::new());
    let blob = RwSignal::new(BlobOrigin::default());
    let hovered = RwSignal::new(false);
    let in_view = RwSignal::new(false);

    let state = Memo::new(move |_| card.with_value(|c| store.card_state(c)));
    let centered = move || mode.get().is_compact() && in_view.get();
    let lit = Signal::derive(move || hovered.get() || state.get().is_highlighted() || centered());
    provide_context(CardContext { state, lit });

    let raf = use_raf_fn_with_options(
        move |_| apply_tilt(inner_ref, machine.try_update_value(CardMachine::frame).flatten()),
        UseRafFnOptions::default().immediate(false),
    );
    let (pause, resume) = (raf.pause, raf.resume);
    let sync_loop = move || {
        if machine.with_value(CardMachine::loop_running) {
            resume();
        } else {
            pause();
            apply_tilt(inner_ref, None);
        }
    };

    let visibility = Visibility::for_card(last_in_list);
    use_intersection_observer_with_options(
        card_ref,
        move |entries, _| {
            if let Some(entry) = entries.first() {
                in_view.set(entry.is_intersecting());
            }
        },
        UseIntersectionObserverOptions::default()
            .thresholds(vec![visibility.threshold])
            .root_margin(visibility.root_margin.to_string()),
    );

    Effect::new({
        let sync_loop = sync_loop.clone();
        move |_| {
            let active = store.active_trigger();
            let source = card.with_value(|c| RemoteSource::for_card(active, c, centered()));
            machine.update_value(|m| m.set_remote_source(source, random_samples));
            sync_loop();
        }
    });

    let on_enter = {
        let sync_loop = sync_loop.clone();
        move |ev: MouseEvent| {
            let Some(el) = card_ref.get_untracked() else {
                return;
            };
            let rect = card_rect(&el);
            if let Some(origin) = machine.try_update_value(|m| m.pointer_enter(sample(&ev), rect)) {
                blob.set(origin);
            }
            hovered.set(true);
            store.set_focused_card(Some(card.with_value(|c| c.id.clone())));
            sync_loop();
        }
    };
    let on_move = move |ev: MouseEvent| {
        machine.update_value(|m| m.pointer_move(sample(&ev)));
    };
    let on_leave = move |_: MouseEvent| {
        machine.update_value(CardMachine::pointer_leave);
        hovered.set(false);
        card.with_value(|c| store.clear_focused_card(&c.id));
        sync_loop();
    };

    let (id, category) = card.with_value(|c| (c.id.clone(), c.category.slug()));
    let outer_class = move || {
        let dim = if state.get().is_dimmed() { " card-dimmed" } else { "" };
        format!("spotlight-card relative {}{dim}", layout.grid_class())
    };

    view! {
        <div
            node_ref=card_ref
            class=outer_class
            data-card-id=id
            data-category=category
            on:mouseenter=on_enter
            on:mousemove=on_move
            on:mouseleave=on_leave
        >
            <A href=href attr:class="block h-full">
                <div
                    node_ref=inner_ref
                    class=format!("card-inner card-{category} relative h-full overflow-hidden rounded-2xl")
                >
                    <div
                        class=move || {
                            if lit.get() { "card-blob card-blob-active" } else { "card-blob" }
                        }
                        style=move || blob.get().style()
                    />
                    {children()}
                </div>
            </A>
        </div>
    }
}

fn use_card_context() -> CardContext {
    expect_context::<CardContext>()
}

#[component]
fn CardImage(src: String, alt: String) -> impl IntoView {
    let ctx = use_card_context();
    view! {
        <img
            src=src
            alt=alt
            class=move || {
                if ctx.lit.get() { "card-image card-image-lit" } else { "card-image" }
            }
        />
    }
}

#[component]
fn BlogCardBody(data: BlogCardData) -> impl IntoView {
    let date = data.date.format("%B %-d, %Y").to_string();
    view! {
        <div class="flex flex-col h-full p-5 gap-3">
            <div class="relative flex-1 overflow-hidden rounded-xl">
                <CardImage src=data.meta.image alt=data.title.clone() />
            </div>
            <div>
                <h3 class="text-xl font-medium">{data.title}</h3>
                <p class="text-xs uppercase tracking-wide text-gray-500">{date}</p>
                <p class="text-sm text-gray-700 line-clamp-2">{data.preview}</p>
            </div>
        </div>
    }
}

#[component]
fn ProjectCardBody(data: ProjectCardData) -> impl IntoView {
    view! {
        <div class="flex flex-col h-full p-5 gap-3">
            <div class="relative flex-1 overflow-hidden rounded-xl">
                <CardImage src=data.meta.image alt=data.title.clone() />
            </div>
            <div>
                <h3 class="text-xl font-medium">{data.title}</h3>
                <p class="text-sm text-gray-700">{data.caption}</p>
            </div>
        </div>
    }
}

fn ignore_rejection(promise: js_sys::Promise) {
    thread_local! {
        static IGNORE: Closure<dyn FnMut(JsValue)> = Closure::new(|_: JsValue| {});
    }
    IGNORE.with(|ignore| {
        let _ = promise.catch(ignore);
    });
}

#[component]
fn HobbyCardBody(data: HobbyCardData) -> impl IntoView {
    let ctx = use_card_context();
    let mode = use_viewport_mode();
    let video_ref = NodeRef::<html::Video>::new();
    let video_in_view = RwSignal::new(false);

    use_intersection_observer_with_options(
        video_ref,
        move |entries, _| {
            if let Some(entry) = entries.first() {
                video_in_view.set(entry.is_intersecting());
            }
        },
        UseIntersectionObserverOptions::default()
            .thresholds(vec![VIDEO_VISIBILITY.threshold])
            .root_margin(VIDEO_VISIBILITY.root_margin.to_string()),
    );

    Effect::new(move |_| {
        let play = media_should_play(ctx.state.get(), mode.get(), video_in_view.get());
        let Some(video) = video_ref.get() else {
            return;
        };
        if play {
            // autoplay may be refused; the poster stays up
            if let Ok(started) = video.play() {
                ignore_rejection(started);
            }
        } else {
            let _ = video.pause();
            video.set_current_time(0.0);
        }
    });

    let media_class = move || {
        if ctx.lit.get() { "hobby-media hobby-media-lit" } else { "hobby-media" }
    };
    let activity = data.activity.clone();
    let media = match data.video {
        Some(src) => view! {
            <video
                node_ref=video_ref
                src=src
                poster=data.meta.image
                class="w-full h-full object-cover"
                muted=true
                loop=true
                playsinline=true
            />
        }
        .into_any(),
        None => view! {
            <img src=data.meta.image alt=activity class="w-full h-full object-cover" />
        }
        .into_any(),
    };

    view! {
        <div class="relative h-full">
            <p class="absolute top-4 left-5 text-lg font-medium">{data.activity}</p>
            <div class=media_class>{media}</div>
        </div>
    }
}
