use std::time::Duration;

use leptos::prelude::*;

const SIGNATURE_PATH: &str = "M1.01923 163.537C0.863525 164.583 1.61345 169.699 4.74114 186.386C5.99165 193.057 5.8411 202.306 26.3983 178.091C46.9555 153.877 87.6847 95.9977 111.346 60.7298C135.008 25.462 140.368 14.5591 143.241 8.41007C146.115 2.26105 146.339 1.19629 145.542 1.0216C142.92 0.446971 132.46 11.3767 116.516 29.2437C108.847 37.8374 103.258 46.5241 98.0422 54.9514C87.9558 71.248 79.4667 86.5 79.4667 99.5781C79.4667 105.445 80.1959 110.041 82.8995 114.331C85.6032 118.622 89.7927 122.449 97.5042 126.707C105.216 130.966 116.322 135.539 130.575 139.243C144.829 142.947 161.892 145.642 178.324 147.117C194.755 148.591 210.039 148.762 223.465 148.209C236.891 147.655 247.998 146.371 256.58 144.822C270.883 141.498 278.72 138.584 281.849 136.407";

/// Home page intro, in milliseconds from first paint.
///
/// The signature draws itself, holds, then slides aside while the split
/// content fades in underneath it.
pub mod timeline {
    pub const DRAW_DELAY: u64 = 300;
    pub const DRAW: u64 = 1800;
    /// The blurred pen tip runs slightly ahead of the stroke.
    pub const TIP_LEAD: u64 = 50;
    pub const TIP_FADE: u64 = 400;
    pub const SETTLE: u64 = 200;
    pub const HOLD: u64 = 2000;
    pub const SLIDE: u64 = 800;
    pub const SPLIT_FADE_DELAY: u64 = 300;
    pub const SPLIT_FADE: u64 = 600;
    pub const CONTENT_DELAY: u64 = 400;

    pub const fn drawn() -> u64 {
        DRAW_DELAY + DRAW
    }

    pub const fn slide_start() -> u64 {
        drawn() + SETTLE + HOLD
    }

    pub const fn split_fade_start() -> u64 {
        slide_start() + SPLIT_FADE_DELAY
    }

    /// When the intro text and card grid start appearing.
    pub const fn content_start() -> u64 {
        slide_start() + CONTENT_DELAY
    }
}

fn animation_style(delay_ms: u64, duration_ms: u64) -> String {
    format!("animation-delay: {delay_ms}ms; animation-duration: {duration_ms}ms")
}

/// The tip draws with the stroke, then fades once drawing ends.
fn tip_style() -> String {
    format!(
        "animation-delay: {}ms, {}ms; animation-duration: {}ms, {}ms",
        timeline::DRAW_DELAY - timeline::TIP_LEAD,
        timeline::drawn(),
        timeline::DRAW,
        timeline::TIP_FADE,
    )
}

/// Style for the split layout that fades in during the slide.
pub fn split_content_style() -> String {
    animation_style(timeline::split_fade_start(), timeline::SPLIT_FADE)
}

pub fn content_start() -> Duration {
    Duration::from_millis(timeline::content_start())
}

/// Hand-drawn signature that plays once when the home page opens.
#[component]
pub fn Signature(#[prop(into)] dimmed: Signal<bool>) -> impl IntoView {
    let stroke = animation_style(timeline::DRAW_DELAY, timeline::DRAW);
    let tip = tip_style();
    let slide = animation_style(timeline::slide_start(), timeline::SLIDE);

    view! {
        <div
            class=move || {
                if dimmed.get() { "signature-stage signature-dimmed" } else { "signature-stage" }
            }
            aria-hidden="true"
        >
            <div class="signature-slide" style=slide>
                <svg
                    width="283"
                    height="195"
                    viewBox="0 0 283 195"
                    fill="none"
                    xmlns="http://www.w3.org/2000/svg"
                    class="w-full max-w-md"
                >
                    <defs>
                        <filter id="tip-blur" x="-50%" y="-50%" width="200%" height="200%">
                            <feGaussianBlur in="SourceGraphic" stdDeviation="2" />
                        </filter>
                    </defs>
                    <path
                        class="signature-tip"
                        style=tip
                        d=SIGNATURE_PATH
                        pathLength="1"
                        stroke="var(--theme-signature)"
                        stroke-width="3"
                        stroke-linecap="round"
                        filter="url(#tip-blur)"
                    />
                    <path
                        class="signature-stroke"
                        style=stroke
                        d=SIGNATURE_PATH
                        pathLength="1"
                        stroke="var(--theme-signature)"
                        stroke-width="2"
                        stroke-linecap="round"
                    />
                </svg>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_order() {
        assert_eq!(timeline::drawn(), 2100);
        assert_eq!(timeline::slide_start(), 4300);
        assert!(timeline::split_fade_start() > timeline::slide_start());
        assert!(timeline::split_fade_start() < timeline::slide_start() + timeline::SLIDE);
        assert!(timeline::content_start() > timeline::split_fade_start());
        assert_eq!(content_start(), Duration::from_millis(4700));
    }

    #[test]
    fn test_tip_runs_ahead_then_fades() {
        assert_eq!(
            tip_style(),
            "animation-delay: 250ms, 2100ms; animation-duration: 1800ms, 400ms"
        );
    }

    #[test]
    fn test_split_content_style() {
        assert_eq!(
            split_content_style(),
            "animation-delay: 4600ms; animation-duration: 600ms"
        );
    }
}
