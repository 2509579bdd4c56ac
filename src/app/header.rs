use leptos::prelude::*;
use leptos_router::components::A;

use crate::content::Category;

const EXTERNAL_LINKS: &[(&str, &str)] = &[
    ("GitHub", "https://github.com/justinhe16"),
    ("LinkedIn", "https://www.linkedin.com/in/justinhe16/"),
    ("Resume", "/justin_he_resume_2026.pdf"),
];

fn active_class(category: Category) -> &'static str {
    match category {
        Category::Project => "text-blue-600 bg-blue-50",
        Category::Hobby => "text-red-600 bg-red-50",
        Category::Blog => "text-yellow-700 bg-yellow-50",
    }
}

#[component]
pub fn SiteHeader(active: Option<Category>) -> impl IntoView {
    view! {
        <header class="px-8 lg:px-16 py-3 lg:py-4">
            <div class="max-w-7xl mx-auto">
                <div class="glass-panel w-full rounded-full flex items-center justify-between px-4 lg:px-8 py-2 lg:py-3 shadow-md">
                    <nav class="flex items-center gap-2 lg:gap-4">
                        <A
                            href="/"
                            attr:class="font-sans text-xs lg:text-sm font-medium text-gray-600 transition-colors hover:text-gray-900"
                        >
                            "Home"
                        </A>
                        {Category::ALL
                            .into_iter()
                            .map(|category| {
                                let class = if active == Some(category) {
                                    active_class(category)
                                } else {
                                    "text-gray-600 hover:text-gray-900"
                                };
                                view! {
                                    <A
                                        href=category.root_path()
                                        attr:class=format!(
                                            "font-sans text-xs lg:text-sm font-medium transition-all duration-200 px-2 lg:px-3 py-1 lg:py-1.5 rounded-md {class}",
                                        )
                                    >
                                        {category.label()}
                                    </A>
                                }
                            })
                            .collect_view()}
                    </nav>
                    <div class="flex items-center gap-2 lg:gap-4">
                        {EXTERNAL_LINKS
                            .iter()
                            .map(|(label, href)| {
                                view! {
                                    <a
                                        href=*href
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="font-sans text-xs lg:text-sm text-gray-600 transition-colors hover:text-gray-900"
                                    >
                                        {*label}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </header>
    }
}
