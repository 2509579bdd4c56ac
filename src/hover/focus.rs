use super::{rules, TriggerId, ViewportMode};
use crate::content::CardDescriptor;

/// Rotation in degrees per pixel of pointer offset from the card centre.
pub const HOVER_TILT_PER_PX: f64 = 0.10;
pub const MAX_HOVER_TILT_DEG: f64 = 12.0;
pub const HIGHLIGHT_SCALE: f64 = 1.05;
const OSCILLATION_STEP: f64 = 0.015;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    /// Under direct pointer hover.
    Focused,
    /// Matched by the active trigger.
    Triggered,
    /// Something else is focused or triggered.
    Dimmed,
}

impl CardState {
    pub fn resolve(is_focused: bool, is_triggered: bool, any_focus: bool, any_trigger: bool) -> Self {
        if is_focused {
            Self::Focused
        } else if is_triggered {
            Self::Triggered
        } else if any_focus || any_trigger {
            Self::Dimmed
        } else {
            Self::Idle
        }
    }

    pub fn is_dimmed(self) -> bool {
        self == Self::Dimmed
    }

    pub fn is_highlighted(self) -> bool {
        matches!(self, Self::Focused | Self::Triggered)
    }
}

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CardRect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Where the pointer sits inside the card, in percent of each side.
    pub fn relative(&self, at: PointerSample) -> BlobOrigin {
        let pct = |offset: f64, size: f64| {
            if size > 0.0 {
                (offset / size * 100.0).clamp(0.0, 100.0)
            } else {
                50.0
            }
        };
        BlobOrigin {
            x: pct(at.x - self.left, self.width),
            y: pct(at.y - self.top, self.height),
        }
    }
}

/// Anchor of the radial highlight overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobOrigin {
    pub x: f64,
    pub y: f64,
}

impl Default for BlobOrigin {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

impl BlobOrigin {
    pub fn style(&self) -> String {
        format!("left: {:.1}%; top: {:.1}%;", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
}

impl Tilt {
    /// Leans the card toward the pointer.
    pub fn toward(at: PointerSample, rect: &CardRect) -> Self {
        let (cx, cy) = rect.center();
        let bound = |deg: f64| deg.clamp(-MAX_HOVER_TILT_DEG, MAX_HOVER_TILT_DEG);
        Tilt {
            rotate_x: bound(-(at.y - cy) * HOVER_TILT_PER_PX),
            rotate_y: bound((at.x - cx) * HOVER_TILT_PER_PX),
            scale: HIGHLIGHT_SCALE,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({:.3}deg) rotateY({:.3}deg) scale3d({s:.4}, {s:.4}, {s:.4})",
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }
}

/// Uniform samples in `[0, 1)` used to pick a remote tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltSamples {
    pub direction: f64,
    pub x: f64,
    pub y: f64,
}

impl TiltSamples {
    pub fn new(direction: f64, x: f64, y: f64) -> Self {
        Self { direction, x, y }
    }

    /// Leans left or right by 4 to 10 degrees, pitched within ±4 degrees.
    pub fn base_tilt(&self) -> Tilt {
        let direction = if self.direction > 0.5 { 1.0 } else { -1.0 };
        Tilt {
            rotate_x: self.x * 8.0 - 4.0,
            rotate_y: direction * (self.y * 6.0 + 4.0),
            scale: HIGHLIGHT_SCALE,
        }
    }
}

/// Why a card is highlighted without being hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteSource {
    Trigger(TriggerId),
    /// Centred in a compact viewport.
    InView,
}

impl RemoteSource {
    /// A matching trigger takes precedence over being centred in view.
    pub fn for_card(
        active: Option<TriggerId>,
        card: &CardDescriptor,
        centered: bool,
    ) -> Option<Self> {
        active
            .filter(|t| rules::matches(*t, card))
            .map(Self::Trigger)
            .or_else(|| centered.then_some(Self::InView))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Remote {
    source: RemoteSource,
    base: Tilt,
    clock: f64,
}

/// Per-card pointer and tilt state.
///
/// The card component drives [`CardMachine::frame`] from an animation-frame
/// loop that runs only while [`CardMachine::loop_running`] holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardMachine {
    tracking: Option<(PointerSample, CardRect)>,
    remote: Option<Remote>,
}

impl CardMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking; the returned origin anchors the highlight blob.
    pub fn pointer_enter(&mut self, at: PointerSample, rect: CardRect) -> BlobOrigin {
        self.tracking = Some((at, rect));
        rect.relative(at)
    }

    pub fn pointer_move(&mut self, at: PointerSample) {
        if let Some((pointer, _)) = self.tracking.as_mut() {
            *pointer = at;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.tracking = None;
    }

    /// Keeps the current tilt while the source is unchanged, picks a fresh one
    /// when it changes, and drops it on `None`.
    pub fn set_remote_source(
        &mut self,
        source: Option<RemoteSource>,
        samples: impl FnOnce() -> TiltSamples,
    ) {
        match (source, self.remote) {
            (None, _) => self.remote = None,
            (Some(s), Some(current)) if current.source == s => {}
            (Some(source), _) => {
                self.remote = Some(Remote {
                    source,
                    base: samples().base_tilt(),
                    clock: 0.0,
                })
            }
        }
    }

    pub fn loop_running(&self) -> bool {
        self.tracking.is_some() || self.remote.is_some()
    }

    /// Transform for the next frame, or `None` once nothing needs animating.
    /// Direct hover takes precedence over a remote highlight.
    pub fn frame(&mut self) -> Option<Tilt> {
        if let Some((at, rect)) = &self.tracking {
            return Some(Tilt::toward(*at, rect));
        }
        let remote = self.remote.as_mut()?;
        remote.clock += OSCILLATION_STEP;
        let t = remote.clock;
        Some(Tilt {
            rotate_x: remote.base.rotate_x + (t * 1.2).sin() * 2.0,
            rotate_y: remote.base.rotate_y + (t * 0.8).cos() * 3.0,
            scale: HIGHLIGHT_SCALE + (t * 0.5).sin() * 0.02,
        })
    }
}

/// Card videos play while highlighted, or on compact screens while scrolled into view.
pub fn media_should_play(state: CardState, mode: ViewportMode, video_in_view: bool) -> bool {
    state.is_highlighted() || (mode.is_compact() && video_in_view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;

    const RECT: CardRect = CardRect {
        left: 100.0,
        top: 200.0,
        width: 200.0,
        height: 100.0,
    };

    fn samples() -> TiltSamples {
        TiltSamples::new(0.75, 0.5, 1.0)
    }

    #[test]
    fn test_resolve_priority() {
        assert_eq!(CardState::resolve(false, false, false, false), CardState::Idle);
        assert_eq!(CardState::resolve(true, true, true, true), CardState::Focused);
        assert_eq!(CardState::resolve(false, true, true, true), CardState::Triggered);
        assert_eq!(CardState::resolve(false, false, true, false), CardState::Dimmed);
        assert_eq!(CardState::resolve(false, false, false, true), CardState::Dimmed);
    }

    #[test]
    fn test_blob_origin_relative_to_card() {
        let mut machine = CardMachine::new();
        let origin = machine.pointer_enter(PointerSample { x: 150.0, y: 275.0 }, RECT);
        assert_eq!(origin, BlobOrigin { x: 25.0, y: 75.0 });
        assert_eq!(origin.style(), "left: 25.0%; top: 75.0%;");
        let outside = RECT.relative(PointerSample { x: 0.0, y: 1000.0 });
        assert_eq!(outside, BlobOrigin { x: 0.0, y: 100.0 });
    }

    #[test]
    fn test_hover_tilt_follows_pointer() {
        let mut machine = CardMachine::new();
        machine.pointer_enter(PointerSample { x: 200.0, y: 250.0 }, RECT);
        assert_eq!(
            machine.frame(),
            Some(Tilt {
                rotate_x: 0.0,
                rotate_y: 0.0,
                scale: HIGHLIGHT_SCALE
            })
        );
        machine.pointer_move(PointerSample { x: 250.0, y: 230.0 });
        let tilt = machine.frame().unwrap();
        assert!((tilt.rotate_y - 5.0).abs() < 1e-9);
        assert!((tilt.rotate_x - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_tilt_is_bounded() {
        let tilt = Tilt::toward(PointerSample { x: 5000.0, y: -5000.0 }, &RECT);
        assert_eq!(tilt.rotate_x, MAX_HOVER_TILT_DEG);
        assert_eq!(tilt.rotate_y, MAX_HOVER_TILT_DEG);
    }

    #[test]
    fn test_leave_stops_loop() {
        let mut machine = CardMachine::new();
        machine.pointer_enter(PointerSample { x: 120.0, y: 210.0 }, RECT);
        assert!(machine.loop_running());
        assert!(machine.frame().is_some());
        machine.pointer_leave();
        assert!(!machine.loop_running());
        assert_eq!(machine.frame(), None);
        machine.pointer_move(PointerSample { x: 150.0, y: 250.0 });
        assert_eq!(machine.frame(), None);
    }

    #[test]
    fn test_leave_keeps_remote_oscillation() {
        let mut machine = CardMachine::new();
        machine.set_remote_source(Some(RemoteSource::Trigger(TriggerId::Write)), samples);
        machine.pointer_enter(PointerSample { x: 120.0, y: 210.0 }, RECT);
        machine.pointer_leave();
        assert!(machine.loop_running());
        assert!(machine.frame().is_some());
    }

    #[test]
    fn test_remote_tilt_picked_once_per_activation() {
        let mut machine = CardMachine::new();
        let source = Some(RemoteSource::Trigger(TriggerId::Surfing));
        machine.set_remote_source(source, samples);
        let first = machine.frame().unwrap();
        let mut picked_again = false;
        machine.set_remote_source(source, || {
            picked_again = true;
            samples()
        });
        assert!(!picked_again);
        let second = machine.frame().unwrap();
        assert_ne!(first, second);

        machine.set_remote_source(Some(RemoteSource::Trigger(TriggerId::Travel)), || {
            picked_again = true;
            samples()
        });
        assert!(picked_again);
    }

    #[test]
    fn test_remote_source_for_card() {
        let surf = CardDescriptor::new("hobby-mentawai-surfing", Category::Hobby);
        let blog = CardDescriptor::new("creating-a-home-on-the-internet", Category::Blog);
        assert_eq!(
            RemoteSource::for_card(Some(TriggerId::Surfing), &surf, true),
            Some(RemoteSource::Trigger(TriggerId::Surfing))
        );
        assert_eq!(
            RemoteSource::for_card(Some(TriggerId::Surfing), &blog, true),
            Some(RemoteSource::InView)
        );
        assert_eq!(RemoteSource::for_card(Some(TriggerId::Surfing), &blog, false), None);
        assert_eq!(RemoteSource::for_card(None, &surf, false), None);
    }

    #[test]
    fn test_trigger_keeps_tilt_when_card_scrolls_into_view() {
        let surf = CardDescriptor::new("hobby-mentawai-surfing", Category::Hobby);
        let mut machine = CardMachine::new();
        let active = Some(TriggerId::Surfing);
        machine.set_remote_source(RemoteSource::for_card(active, &surf, false), samples);
        let mut repicked = false;
        machine.set_remote_source(RemoteSource::for_card(active, &surf, true), || {
            repicked = true;
            samples()
        });
        assert!(!repicked);
    }

    #[test]
    fn test_base_tilt_ranges() {
        let left = TiltSamples::new(0.1, 0.0, 0.0).base_tilt();
        assert_eq!(left.rotate_x, -4.0);
        assert_eq!(left.rotate_y, -4.0);
        let right = TiltSamples::new(0.9, 0.999, 0.999).base_tilt();
        assert!(right.rotate_x < 4.0 && right.rotate_x > 3.9);
        assert!(right.rotate_y < 10.0 && right.rotate_y > 9.9);
    }

    #[test]
    fn test_oscillation_stays_near_base() {
        let mut machine = CardMachine::new();
        machine.set_remote_source(Some(RemoteSource::InView), samples);
        let base = samples().base_tilt();
        for _ in 0..2000 {
            let tilt = machine.frame().unwrap();
            assert!((tilt.rotate_x - base.rotate_x).abs() <= 2.0 + 1e-9);
            assert!((tilt.rotate_y - base.rotate_y).abs() <= 3.0 + 1e-9);
            assert!((tilt.scale - HIGHLIGHT_SCALE).abs() <= 0.02 + 1e-9);
        }
        machine.set_remote_source(None, samples);
        assert_eq!(machine.frame(), None);
    }

    #[test]
    fn test_transform_css() {
        assert_eq!(
            Tilt {
                rotate_x: 0.0,
                rotate_y: 0.0,
                scale: 1.0,
            }
            .transform(),
            "perspective(1000px) rotateX(0.000deg) rotateY(0.000deg) scale3d(1.0000, 1.0000, 1.0000)"
        );
    }

    #[test]
    fn test_media_playback() {
        use ViewportMode::*;
        assert!(media_should_play(CardState::Focused, Wide, false));
        assert!(media_should_play(CardState::Triggered, Wide, false));
        assert!(!media_should_play(CardState::Dimmed, Wide, true));
        assert!(!media_should_play(CardState::Idle, Wide, true));
        assert!(media_should_play(CardState::Idle, Compact, true));
        assert!(!media_should_play(CardState::Idle, Compact, false));
    }
}
