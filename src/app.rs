mod cards;
mod category;
mod header;
mod home;
mod not_found;
mod scroll;
mod signature;
mod signup;
mod trigger_word;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path, SsrMode};

use crate::content::Category;
use crate::hover::viewport::provide_viewport_mode;
use crate::theme::Theme;

use category::{CategoryPage, DetailPage};
use home::HomePage;
use not_found::NotFound;

/// Palette of the page being rendered, so the first paint already matches.
fn request_theme() -> Theme {
    #[cfg(feature = "ssr")]
    if let Some(parts) = use_context::<http::request::Parts>() {
        return Theme::for_path(parts.uri.path());
    }
    Theme::Default
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en" style=request_theme().root_style()>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <link rel="shortcut icon" type="image/svg+xml" href="/favicon.svg" />
                <link rel="stylesheet" id="leptos" href="/pkg/nook.css" />
                <MetaTags />
            </head>
            <body class="font-serif bg-theme text-gray-900">
                <div class="grain-overlay" aria-hidden="true"></div>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_viewport_mode();

    view! {
        <Title formatter=|title| format!("Justin He - {title}") />
        <Router>
            <main class="min-h-screen w-full">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=HomePage />
                    <Route
                        path=path!("/projects")
                        view=|| view! { <CategoryPage category=Category::Project /> }
                    />
                    <Route
                        path=path!("/projects/:id")
                        view=|| view! { <DetailPage category=Category::Project /> }
                        ssr=SsrMode::Async
                    />
                    <Route
                        path=path!("/hobbies")
                        view=|| view! { <CategoryPage category=Category::Hobby /> }
                    />
                    <Route
                        path=path!("/hobbies/:id")
                        view=|| view! { <DetailPage category=Category::Hobby /> }
                        ssr=SsrMode::Async
                    />
                    <Route
                        path=path!("/blog")
                        view=|| view! { <CategoryPage category=Category::Blog /> }
                    />
                    <Route
                        path=path!("/blog/:id")
                        view=|| view! { <DetailPage category=Category::Blog /> }
                        ssr=SsrMode::Async
                    />
                </Routes>
            </main>
        </Router>
    }
}
