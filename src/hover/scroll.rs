use super::{rules, TriggerId};
use crate::content::CardDescriptor;

/// Distance kept between the viewport top and the card scrolled to.
pub const SCROLL_OFFSET: f64 = 150.0;

/// A rendered card and the viewport-relative y of its top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPosition {
    pub card: CardDescriptor,
    pub top: f64,
}

/// First card in document order that matches the trigger.
pub fn first_match<'a, I>(trigger: TriggerId, cards: I) -> Option<&'a CardPosition>
where
    I: IntoIterator<Item = &'a CardPosition>,
{
    cards
        .into_iter()
        .find(|position| rules::matches(trigger, &position.card))
}

/// Document scroll position that puts a card's top edge at [`SCROLL_OFFSET`].
pub fn scroll_target(scroll_y: f64, card_top: f64) -> f64 {
    scroll_y + card_top - SCROLL_OFFSET
}

/// Where to scroll for the active trigger, if anywhere.
pub fn plan_scroll(active: Option<TriggerId>, cards: &[CardPosition], scroll_y: f64) -> Option<f64> {
    let trigger = active?;
    first_match(trigger, cards).map(|position| scroll_target(scroll_y, position.top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;

    fn layout() -> Vec<CardPosition> {
        [
            ("hobby-angels-landing", Category::Hobby, -300.0),
            ("hobby-coachella", Category::Hobby, 20.0),
            ("hobby-mentawai-surfing", Category::Hobby, 280.0),
            ("creating-a-home-on-the-internet", Category::Blog, 540.0),
            ("project-claude-surf", Category::Project, 800.0),
            ("later-blog-post", Category::Blog, 1060.0),
        ]
        .into_iter()
        .map(|(id, category, top)| CardPosition {
            card: CardDescriptor::new(id, category),
            top,
        })
        .collect()
    }

    #[test]
    fn test_write_scrolls_to_first_blog_card() {
        let cards = layout();
        let target = plan_scroll(Some(TriggerId::Write), &cards, 400.0);
        assert_eq!(target, Some(400.0 + 540.0 - SCROLL_OFFSET));
    }

    #[test]
    fn test_first_match_in_document_order() {
        let cards = layout();
        let found = first_match(TriggerId::Travel, &cards).unwrap();
        assert_eq!(found.card.id, "hobby-angels-landing");
        assert_eq!(
            plan_scroll(Some(TriggerId::Travel), &cards, 1000.0),
            Some(1000.0 - 300.0 - SCROLL_OFFSET)
        );
    }

    #[test]
    fn test_no_match_is_noop() {
        let cards = layout();
        assert_eq!(plan_scroll(Some(TriggerId::Dori), &cards, 0.0), None);
        assert_eq!(plan_scroll(Some(TriggerId::RockClimbing), &[], 0.0), None);
    }

    #[test]
    fn test_no_trigger_is_noop() {
        assert_eq!(plan_scroll(None, &layout(), 0.0), None);
    }
}
