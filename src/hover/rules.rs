use super::TriggerId;
use crate::content::{CardDescriptor, Category};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Category(Category),
    IdExact(&'static [&'static str]),
    IdContains(&'static [&'static str]),
}

impl Rule {
    fn accepts(&self, card: &CardDescriptor) -> bool {
        match self {
            Self::Category(category) => card.category == *category,
            Self::IdExact(ids) => ids.iter().any(|id| card.id == *id),
            Self::IdContains(parts) => parts.iter().any(|part| card.id.contains(*part)),
        }
    }
}

/// Which cards each trigger highlights. Card dimming and scroll targeting
/// both go through [`matches`]; nothing else decides membership.
pub static RULES: &[(TriggerId, Rule)] = &[
    (TriggerId::Building, Rule::Category(Category::Project)),
    (TriggerId::Dori, Rule::IdContains(&["dori"])),
    (
        TriggerId::Travel,
        Rule::IdExact(&["hobby-coachella", "hobby-angels-landing"]),
    ),
    (TriggerId::ForagingFrames, Rule::IdExact(&["hobby-palm-trees"])),
    (TriggerId::Surfing, Rule::IdContains(&["surfing", "mentawai"])),
    (TriggerId::RockClimbing, Rule::IdContains(&["rock-climbing"])),
    (TriggerId::Write, Rule::Category(Category::Blog)),
];

pub fn matches(trigger: TriggerId, card: &CardDescriptor) -> bool {
    RULES
        .iter()
        .filter(|(t, _)| *t == trigger)
        .any(|(_, rule)| rule.accepts(card))
}
