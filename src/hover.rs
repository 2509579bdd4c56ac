//! Hover-trigger coordination between the home page narrative and the card grid.
//!
//! A [`TriggerStore`] is provided per page. Trigger words write to it, cards read
//! from it and resolve their [`CardState`] through the shared rule table in
//! [`rules`], and the scroll coordinator follows trigger changes.

pub mod focus;
pub mod rules;
pub mod scroll;
pub mod trigger;
pub mod viewport;

pub use focus::{CardMachine, CardState};
pub use trigger::{EmitterAction, TriggerId};
pub use viewport::ViewportMode;

use leptos::prelude::*;

use crate::content::CardDescriptor;

#[derive(Debug, Clone, Copy)]
pub struct TriggerStore {
    active: RwSignal<Option<TriggerId>>,
    focused: RwSignal<Option<String>>,
}

impl TriggerStore {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(None),
            focused: RwSignal::new(None),
        }
    }

    pub fn active_trigger(&self) -> Option<TriggerId> {
        self.active.get()
    }

    pub fn active_trigger_untracked(&self) -> Option<TriggerId> {
        self.active.get_untracked()
    }

    /// Last writer wins.
    pub fn set_active_trigger(&self, trigger: Option<TriggerId>) {
        if self.active.get_untracked() != trigger {
            self.active.set(trigger);
        }
    }

    pub fn set_focused_card(&self, id: Option<String>) {
        if self.focused.get_untracked() != id {
            self.focused.set(id);
        }
    }

    /// Clears the focus only if `id` still holds it.
    pub fn clear_focused_card(&self, id: &str) {
        if self.focused.get_untracked().as_deref() == Some(id) {
            self.focused.set(None);
        }
    }

    /// Clears the trigger only if `trigger` still holds it, so a late clear
    /// from one word can't undo a newer word.
    pub fn clear_trigger_if(&self, trigger: TriggerId) {
        if self.active.get_untracked() == Some(trigger) {
            self.active.set(None);
        }
    }

    pub fn any_focus(&self) -> bool {
        self.focused.with(Option::is_some)
    }

    pub fn card_state(&self, card: &CardDescriptor) -> CardState {
        let (is_focused, any_focus) = self
            .focused
            .with(|f| (f.as_deref() == Some(card.id.as_str()), f.is_some()));
        let (is_triggered, any_trigger) = self.active.with(|active| {
            (
                active.is_some_and(|t| rules::matches(t, card)),
                active.is_some(),
            )
        });
        CardState::resolve(is_focused, is_triggered, any_focus, any_trigger)
    }
}

impl Default for TriggerStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the page's store; it is dropped with the page's reactive owner.
pub fn provide_trigger_store() -> TriggerStore {
    let store = TriggerStore::new();
    provide_context(store);
    store
}

pub fn use_trigger_store() -> TriggerStore {
    expect_context::<TriggerStore>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;
    use focus::RemoteSource;
    use leptos::reactive::owner::Owner;

    fn with_owner<T>(f: impl FnOnce() -> T) -> T {
        let owner = Owner::new();
        owner.with(f)
    }

    fn home_cards() -> Vec<CardDescriptor> {
        vec![
            CardDescriptor::new("hobby-angels-landing", Category::Hobby),
            CardDescriptor::new("hobby-coachella", Category::Hobby),
            CardDescriptor::new("hobby-mentawai-surfing", Category::Hobby),
            CardDescriptor::new("creating-a-home-on-the-internet", Category::Blog),
            CardDescriptor::new("project-claude-surf", Category::Project),
            CardDescriptor::new("hobby-palm-trees", Category::Hobby),
            CardDescriptor::new("hobby-rock-climbing-dyno", Category::Hobby),
        ]
    }

    #[test]
    fn test_store_starts_idle() {
        with_owner(|| {
            let store = TriggerStore::new();
            assert_eq!(store.active_trigger_untracked(), None);
            assert_eq!(store.focused.get_untracked(), None);
            for card in home_cards() {
                assert_eq!(store.card_state(&card), CardState::Idle);
            }
        });
    }

    #[test]
    fn test_last_writer_wins() {
        with_owner(|| {
            let store = TriggerStore::new();
            store.set_active_trigger(Some(TriggerId::Surfing));
            store.set_active_trigger(Some(TriggerId::Write));
            assert_eq!(store.active_trigger_untracked(), Some(TriggerId::Write));
            store.set_focused_card(Some("a".to_string()));
            store.set_focused_card(Some("b".to_string()));
            assert_eq!(store.focused.get_untracked().as_deref(), Some("b"));
        });
    }

    #[test]
    fn test_stale_leave_keeps_newer_focus() {
        with_owner(|| {
            let store = TriggerStore::new();
            store.set_focused_card(Some("hobby-coachella".to_string()));
            store.set_focused_card(Some("hobby-palm-trees".to_string()));
            store.clear_focused_card("hobby-coachella");
            assert_eq!(
                store.focused.get_untracked().as_deref(),
                Some("hobby-palm-trees")
            );
            store.clear_focused_card("hobby-palm-trees");
            assert_eq!(store.focused.get_untracked(), None);
        });
    }

    #[test]
    fn test_rock_climbing_dims_everything_else() {
        with_owner(|| {
            let store = TriggerStore::new();
            store.set_active_trigger(Some(TriggerId::RockClimbing));
            for card in home_cards() {
                let state = store.card_state(&card);
                if card.id.contains("rock-climbing") {
                    assert_eq!(state, CardState::Triggered, "{}", card.id);
                } else {
                    assert_eq!(state, CardState::Dimmed, "{}", card.id);
                }
            }
        });
    }

    #[test]
    fn test_write_dims_non_blog_cards() {
        with_owner(|| {
            let store = TriggerStore::new();
            store.set_active_trigger(Some(TriggerId::Write));
            for card in home_cards() {
                assert_eq!(
                    store.card_state(&card).is_dimmed(),
                    card.category != Category::Blog,
                    "{}",
                    card.id
                );
            }
        });
    }

    #[test]
    fn test_focus_dims_other_cards() {
        with_owner(|| {
            let store = TriggerStore::new();
            let cards = home_cards();
            store.set_focused_card(Some(cards[2].id.clone()));
            for (i, card) in cards.iter().enumerate() {
                let expected = if i == 2 {
                    CardState::Focused
                } else {
                    CardState::Dimmed
                };
                assert_eq!(store.card_state(card), expected);
            }
        });
    }

    #[test]
    fn test_dimming_formula() {
        with_owner(|| {
            let store = TriggerStore::new();
            let cards = home_cards();
            let triggers = std::iter::once(None).chain(TriggerId::ALL.into_iter().map(Some));
            for trigger in triggers {
                let focuses = std::iter::once(None).chain(cards.iter().map(|c| Some(c.id.clone())));
                for focus in focuses {
                    store.set_active_trigger(trigger);
                    store.set_focused_card(focus.clone());
                    for card in &cards {
                        let focused = focus.as_deref() == Some(card.id.as_str());
                        let triggered = trigger.is_some_and(|t| rules::matches(t, card));
                        let expected = !(focused || triggered)
                            && (focus.is_some() || trigger.is_some());
                        assert_eq!(store.card_state(card).is_dimmed(), expected);
                    }
                }
            }
        });
    }

    #[test]
    fn test_trigger_round_trip_returns_to_idle() {
        with_owner(|| {
            let store = TriggerStore::new();
            let cards = vec![
                CardDescriptor::new("project-dori", Category::Project),
                CardDescriptor::new("dori-launch-notes", Category::Blog),
                CardDescriptor::new("hobby-coachella", Category::Hobby),
            ];
            let mut machines: Vec<CardMachine> = cards.iter().map(|_| CardMachine::new()).collect();
            let samples = || focus::TiltSamples::new(0.9, 0.5, 0.5);
            let sync = |store: &TriggerStore, machines: &mut Vec<CardMachine>| {
                for (card, machine) in cards.iter().zip(machines.iter_mut()) {
                    let source = RemoteSource::for_card(store.active_trigger_untracked(), card, false);
                    machine.set_remote_source(source, samples);
                }
            };

            store.set_active_trigger(Some(TriggerId::Dori));
            sync(&store, &mut machines);
            assert_eq!(store.card_state(&cards[0]), CardState::Triggered);
            assert_eq!(store.card_state(&cards[1]), CardState::Triggered);
            assert_eq!(store.card_state(&cards[2]), CardState::Dimmed);
            assert!(machines[0].loop_running());
            assert!(machines[1].loop_running());
            assert!(!machines[2].loop_running());

            let mut repicked = false;
            machines[0].set_remote_source(Some(RemoteSource::Trigger(TriggerId::Dori)), || {
                repicked = true;
                samples()
            });
            assert!(!repicked);

            store.set_active_trigger(None);
            sync(&store, &mut machines);
            for (card, machine) in cards.iter().zip(machines.iter_mut()) {
                assert_eq!(store.card_state(card), CardState::Idle);
                assert!(!machine.loop_running());
                assert_eq!(machine.frame(), None);
            }
        });
    }

    #[test]
    fn test_late_clear_keeps_newer_trigger() {
        with_owner(|| {
            let store = TriggerStore::new();
            store.set_active_trigger(Some(TriggerId::Surfing));
            store.set_active_trigger(Some(TriggerId::Travel));
            store.clear_trigger_if(TriggerId::Surfing);
            assert_eq!(store.active_trigger_untracked(), Some(TriggerId::Travel));
            store.clear_trigger_if(TriggerId::Travel);
            assert_eq!(store.active_trigger_untracked(), None);
        });
    }
}
