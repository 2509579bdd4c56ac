use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::content::Category;

fn set_not_found_status() {
    #[cfg(feature = "ssr")]
    if let Some(response) = use_context::<leptos_axum::ResponseOptions>() {
        response.set_status(http::StatusCode::NOT_FOUND);
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    set_not_found_status();
    view! {
        <Title text="Not found" />
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-medium mb-4">"404"</h1>
                <p class="text-xl mb-8">"Page not found"</p>
                <A href="/" attr:class="hover:opacity-60 transition-opacity underline">
                    "Return home"
                </A>
            </div>
        </div>
    }
}

/// Shown in place of a detail page whose id doesn't exist.
#[component]
pub fn MissingCard(category: Category) -> impl IntoView {
    set_not_found_status();
    view! {
        <Title text="Not found" />
        <div class="text-center py-24">
            <h1 class="text-4xl mb-6">{format!("{} not found", category.kind_label())}</h1>
            <A href=category.root_path() attr:class="underline hover:opacity-60 transition-opacity">
                {format!("Back to {}", category.label())}
            </A>
        </div>
    }
}
