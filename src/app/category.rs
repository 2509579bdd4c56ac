use std::sync::LazyLock;

use dashmap::DashMap;
use leptos::prelude::*;
use leptos::server_fn::codec::GetUrl;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

#[cfg(feature = "hydrate")]
use codee::string::JsonSerdeWasmCodec;
#[cfg(feature = "hydrate")]
use leptos_use::storage::use_session_storage;

use super::cards::{fetch_cards, CardGrid, GridColumns};
use super::header::SiteHeader;
#[cfg(feature = "hydrate")]
use super::home::CATEGORY_PAGE_LOADED;
use super::not_found::MissingCard;
#[cfg(feature = "ssr")]
use crate::content::{get_detail, ContentError};
use crate::content::{CardData, CardDetail, Category};
use crate::hover::provide_trigger_store;
use crate::theme::use_theme;

static CLIENT_DETAIL_CACHE: LazyLock<DashMap<String, CardDetail>> =
    LazyLock::new(DashMap::new);

/// `Ok(None)` for ids with no detail page.
#[server(input = GetUrl)]
pub async fn get_detail_server(
    category: Category,
    id: String,
) -> Result<Option<CardDetail>, ServerFnError> {
    match get_detail(category, &id) {
        Ok(detail) => Ok(Some(detail)),
        Err(ContentError::NotFound) => Ok(None),
        Err(e) => {
            tracing::error!(error = %e, "couldn't load card detail");
            Err(ServerFnError::new(e.to_string()))
        }
    }
}

async fn fetch_detail(category: Category, id: String) -> Result<Option<CardDetail>, ServerFnError> {
    let key = format!("{}/{id}", category.route_segment());
    let cache = &*CLIENT_DETAIL_CACHE;
    if let Some(detail) = cache.get(&key) {
        return Ok(Some((*detail).clone()));
    }
    let detail = get_detail_server(category, id).await?;
    #[cfg(feature = "hydrate")]
    if let Some(detail) = &detail {
        cache.insert(key, detail.clone());
    }
    Ok(detail)
}

fn header_class(slide_in: bool) -> &'static str {
    if slide_in {
        "sticky top-0 z-50 header-slide-in"
    } else {
        "sticky top-0 z-50"
    }
}

/// Slides the header in on the first category or detail page of a visit and
/// marks the visit so later pages show it in place.
fn use_header_slide_in() -> RwSignal<bool> {
    let slide_in = RwSignal::new(false);
    #[cfg(feature = "hydrate")]
    {
        let (loaded, set_loaded, _) =
            use_session_storage::<bool, JsonSerdeWasmCodec>(CATEGORY_PAGE_LOADED);
        Effect::new(move |_| {
            if !loaded.get_untracked() {
                slide_in.set(true);
                set_loaded.set(true);
            }
        });
    }
    slide_in
}

#[component]
pub fn CategoryPage(category: Category) -> impl IntoView {
    provide_trigger_store();
    use_theme(category.theme());

    let slide_in = use_header_slide_in();
    let cards = Resource::new(move || category, fetch_cards);

    view! {
        <Title text=category.label() />
        <div class=move || header_class(slide_in.get())>
            <SiteHeader active=Some(category) />
        </div>
        <div class="max-w-7xl mx-auto px-8 lg:px-16 py-8 page-content">
            <section class="glass-panel rounded-2xl p-8 mb-8">
                <h1 class="text-4xl lg:text-5xl mb-3">{category.label()}</h1>
                <p class="text-lg text-gray-700">{category.blurb()}</p>
            </section>
            <Transition fallback=move || {
                view! {
                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                        <div class="loading-skeleton h-64 rounded-2xl"></div>
                        <div class="loading-skeleton h-64 rounded-2xl"></div>
                        <div class="loading-skeleton h-64 rounded-2xl"></div>
                    </div>
                }
            }>
                {move || Suspend::new(async move {
                    let cards = cards.await;
                    view! { <CardGrid cards=cards columns=GridColumns::Three /> }
                })}
            </Transition>
        </div>
    }
}

#[component]
pub fn DetailPage(category: Category) -> impl IntoView {
    provide_trigger_store();
    use_theme(category.theme());

    let slide_in = use_header_slide_in();
    let params = use_params_map();
    let card_id = move || params.get().get("id").unwrap_or_default();
    let detail = Resource::new(card_id, move |id| fetch_detail(category, id));

    view! {
        <div class=move || header_class(slide_in.get())>
            <SiteHeader active=Some(category) />
        </div>
        <div class="max-w-4xl mx-auto px-8 py-8 page-content">
            <Suspense fallback=move || {
                view! { <div class="loading-skeleton h-96 rounded-2xl"></div> }
            }>
                {move || Suspend::new(async move {
                    match detail.await {
                        Ok(Some(detail)) => view! { <DetailView detail=detail /> }.into_any(),
                        Ok(None) => view! { <MissingCard category=category /> }.into_any(),
                        Err(e) => {
                            view! {
                                <p class="text-red-600">
                                    {format!("Couldn't load this page: {e}")}
                                </p>
                            }
                                .into_any()
                        }
                    }
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn DetailView(detail: CardDetail) -> impl IntoView {
    let card = detail.card;
    let title = card.title().to_string();
    let date = card.display_date();
    let kind = card.category().kind_label();
    let media = match &card {
        CardData::Hobby(hobby) if hobby.video.is_some() => view! {
            <video
                src=hobby.video.clone()
                poster=hobby.meta.image.clone()
                class="w-full rounded-2xl"
                controls=true
                playsinline=true
            />
        }
        .into_any(),
        _ => view! {
            <img src=card.meta().image.clone() alt=title.clone() class="w-full rounded-2xl" />
        }
        .into_any(),
    };

    view! {
        <Title text=title.clone() />
        <article class="glass-panel rounded-2xl p-8">
            <p class="text-xs uppercase tracking-widest text-gray-500 mb-2">{kind}</p>
            <h1 class="text-4xl lg:text-5xl mb-2">{title}</h1>
            {date.map(|date| view! { <p class="text-sm text-gray-600 mb-6">{date}</p> })}
            <div class="mb-8">{media}</div>
            <div class="card-prose" inner_html=detail.content></div>
        </article>
    }
}
