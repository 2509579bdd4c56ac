use leptos::prelude::*;
use leptos_use::use_media_query;

/// Viewports at least this wide get hover and click behaviour.
pub const WIDE_MIN_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
    /// Touch-sized; hover is replaced by taps and scroll position.
    Compact,
    #[default]
    Wide,
}

impl ViewportMode {
    pub fn media_query() -> String {
        format!("(min-width: {WIDE_MIN_WIDTH}px)")
    }

    pub fn is_compact(self) -> bool {
        self == Self::Compact
    }
}

/// Intersection observer settings for "centred in view" detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub threshold: f64,
    pub root_margin: &'static str,
}

/// 60% visible within the middle 40% of the viewport.
pub const CARD_VISIBILITY: Visibility = Visibility {
    threshold: 0.6,
    root_margin: "-30% 0px",
};

/// Last cards can't reach the middle band before the page stops scrolling.
pub const LAST_CARD_VISIBILITY: Visibility = Visibility {
    threshold: 0.3,
    root_margin: "-10% 0px",
};

pub const VIDEO_VISIBILITY: Visibility = Visibility {
    threshold: 0.5,
    root_margin: "-20% 0px",
};

impl Visibility {
    pub fn for_card(last_in_list: bool) -> Self {
        if last_in_list {
            LAST_CARD_VISIBILITY
        } else {
            CARD_VISIBILITY
        }
    }
}

/// Computes the viewport mode once for the whole app.
pub fn provide_viewport_mode() -> Signal<ViewportMode> {
    let is_wide = use_media_query(ViewportMode::media_query());
    let mode = Signal::derive(move || {
        if is_wide.get() {
            ViewportMode::Wide
        } else {
            ViewportMode::Compact
        }
    });
    provide_context(mode);
    mode
}

pub fn use_viewport_mode() -> Signal<ViewportMode> {
    use_context::<Signal<ViewportMode>>().unwrap_or_else(|| Signal::stored(ViewportMode::Wide))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_query() {
        assert_eq!(ViewportMode::media_query(), "(min-width: 1024px)");
    }

    #[test]
    fn test_last_card_is_looser() {
        let general = Visibility::for_card(false);
        let last = Visibility::for_card(true);
        assert_eq!(general, CARD_VISIBILITY);
        assert!(last.threshold < general.threshold);
        assert_eq!(last.root_margin, "-10% 0px");
    }
}
