use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};

use crate::content::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Default,
    Projects,
    Hobbies,
    Blog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_1: &'static str,
    pub bg_2: &'static str,
    pub signature: &'static str,
    pub primary: &'static str,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Self::Default => Palette {
                bg_1: "#ffffff",
                bg_2: "#f5e6d3",
                signature: "#000000",
                primary: "#A0826D",
            },
            Self::Projects => Palette {
                bg_1: "#ffffff",
                bg_2: "#bbdefb",
                signature: "#1565C0",
                primary: "#2196F3",
            },
            Self::Hobbies => Palette {
                bg_1: "#ffffff",
                bg_2: "#ffcdd2",
                signature: "#C62828",
                primary: "#F44336",
            },
            Self::Blog => Palette {
                bg_1: "#ffffff",
                bg_2: "#fff9c4",
                signature: "#F57F17",
                primary: "#FFC107",
            },
        }
    }

    /// CSS custom properties set on the document root.
    pub fn properties(self) -> [(&'static str, &'static str); 4] {
        let p = self.palette();
        [
            ("--theme-bg-1", p.bg_1),
            ("--theme-bg-2", p.bg_2),
            ("--theme-signature", p.signature),
            ("--theme-primary", p.primary),
        ]
    }

    /// Theme of the page served at `path`.
    pub fn for_path(path: &str) -> Self {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .and_then(Category::from_route_segment)
            .map_or(Self::Default, Category::theme)
    }

    /// Inline style form of [`Theme::properties`], used for the server render.
    pub fn root_style(self) -> String {
        self.properties()
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn apply_theme(theme: Theme) -> Result<(), JsValue> {
    let root = document()
        .document_element()
        .ok_or_else(|| JsValue::from_str("document has no root element"))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(JsValue::from)?;
    let style = web_sys::HtmlElement::style(&root);
    for (name, value) in theme.properties() {
        style.set_property(name, value)?;
    }
    Ok(())
}

/// Switches the page theme once the component mounts in the browser.
pub fn use_theme(theme: Theme) {
    Effect::new(move |_| {
        if let Err(e) = apply_theme(theme) {
            log::warn!("couldn't apply theme {theme:?}: {e:?}");
        }
    });
}
