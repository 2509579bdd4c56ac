use chrono::NaiveDate;
use dashmap::DashMap;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

#[cfg(feature = "ssr")]
use gray_matter::{engine::YAML, Matter};

#[cfg(feature = "ssr")]
use crate::render::render_markdown;
use crate::theme::Theme;

/// Cards shown on the home page, in display order.
pub const HOME_CARD_IDS: &[&str] = &[
    "hobby-angels-landing",
    "hobby-coachella",
    "hobby-mentawai-surfing",
    "creating-a-home-on-the-internet",
    "project-claude-surf",
    "hobby-palm-trees",
    "hobby-rock-climbing-dyno",
];

pub static GLOBAL_CARD_CACHE: LazyLock<DashMap<String, Vec<CardData>>> =
    LazyLock::new(DashMap::new);
/// Only pages that exist are cached; misses are cheap to recompute.
pub static GLOBAL_DETAIL_CACHE: LazyLock<DashMap<String, CardDetail>> =
    LazyLock::new(DashMap::new);

#[derive(Embed)]
#[folder = "content"]
#[cfg_attr(feature = "hydrate", metadata_only = true)]
pub struct Assets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Blog,
    Project,
    Hobby,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Project, Category::Hobby, Category::Blog];

    /// Value of the `data-category` attribute on rendered cards.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Project => "project",
            Self::Hobby => "hobby",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Path segment of the category's listing page, also the content folder.
    pub fn route_segment(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Project => "projects",
            Self::Hobby => "hobbies",
        }
    }

    pub fn from_route_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.route_segment() == segment)
    }

    pub fn root_path(self) -> &'static str {
        match self {
            Self::Blog => "/blog",
            Self::Project => "/projects",
            Self::Hobby => "/hobbies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Blog => "Blog",
            Self::Project => "Projects",
            Self::Hobby => "Hobbies",
        }
    }

    /// Singular name, used for the kind label and "not found" messages.
    pub fn kind_label(self) -> &'static str {
        match self {
            Self::Blog => "Blog post",
            Self::Project => "Project",
            Self::Hobby => "Hobby",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Self::Blog => "Thoughts, notes, and the occasional essay",
            Self::Project => "A collection of things I've built",
            Self::Hobby => "What I get up to away from the keyboard",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Self::Blog => Theme::Blog,
            Self::Project => Theme::Projects,
            Self::Hobby => Theme::Hobbies,
        }
    }
}

/// The static facts about a card that highlight matching depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardDescriptor {
    pub id: String,
    pub category: Category,
}

impl CardDescriptor {
    pub fn new(id: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLayout {
    pub wide: bool,
    pub tall: bool,
}

impl CardLayout {
    pub fn grid_class(self) -> &'static str {
        match (self.wide, self.tall) {
            (false, false) => "col-span-1 row-span-1",
            (true, false) => "col-span-1 lg:col-span-2 row-span-1",
            (false, true) => "col-span-1 row-span-1 lg:row-span-2",
            (true, true) => "col-span-1 lg:col-span-2 row-span-1 lg:row-span-2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardMeta {
    pub id: String,
    pub layout: CardLayout,
    pub image: String,
    pub has_detail_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogCard {
    pub meta: CardMeta,
    pub title: String,
    pub date: NaiveDate,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub meta: CardMeta,
    pub title: String,
    pub caption: String,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HobbyCard {
    pub meta: CardMeta,
    pub activity: String,
    pub video: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum CardData {
    Blog(BlogCard),
    Project(ProjectCard),
    Hobby(HobbyCard),
}

impl CardData {
    pub fn meta(&self) -> &CardMeta {
        match self {
            Self::Blog(c) => &c.meta,
            Self::Project(c) => &c.meta,
            Self::Hobby(c) => &c.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Blog(_) => Category::Blog,
            Self::Project(_) => Category::Project,
            Self::Hobby(_) => Category::Hobby,
        }
    }

    pub fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(self.id(), self.category())
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Blog(c) => &c.title,
            Self::Project(c) => &c.title,
            Self::Hobby(c) => &c.activity,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blog(c) => Some(c.date),
            Self::Project(c) => c.date,
            Self::Hobby(_) => None,
        }
    }

    /// Human readable date; projects only carry a month.
    pub fn display_date(&self) -> Option<String> {
        match self {
            Self::Blog(c) => Some(c.date.format("%B %-d, %Y").to_string()),
            Self::Project(c) => c.date.map(|d| d.format("%B %Y").to_string()),
            Self::Hobby(_) => None,
        }
    }

    /// Cards without a detail page link to their category root.
    pub fn href(&self) -> String {
        let category = self.category();
        if self.meta().has_detail_page {
            format!("{}/{}", category.root_path(), self.id())
        } else {
            category.root_path().to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDetail {
    pub card: CardData,
    pub content: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentError {
    #[error("Card not found")]
    NotFound,
    #[error("Couldn't parse card {0}")]
    Parse(String),
}

/// Newest first; undated cards go last, ties broken by id.
pub fn order_cards(cards: &mut [CardData]) {
    cards.sort_by(|a, b| {
        b.date()
            .cmp(&a.date())
            .then_with(|| a.id().cmp(b.id()))
    });
}

#[cfg(feature = "ssr")]
#[derive(Deserialize, Debug, Default)]
struct FrontMatter {
    title: Option<String>,
    activity: Option<String>,
    caption: Option<String>,
    preview: Option<String>,
    date: Option<NaiveDate>,
    image: String,
    video: Option<String>,
    #[serde(default)]
    wide: bool,
    #[serde(default)]
    tall: bool,
    #[serde(default)]
    detail: bool,
}

#[cfg(feature = "ssr")]
impl FrontMatter {
    fn into_card(self, id: String, category: Category) -> Result<CardData, ContentError> {
        let missing = |field: &str| ContentError::Parse(format!("{id}: missing {field}"));
        let meta = CardMeta {
            id: id.clone(),
            layout: CardLayout {
                wide: self.wide,
                tall: self.tall,
            },
            image: self.image,
            has_detail_page: self.detail,
        };
        let card = match category {
            Category::Blog => CardData::Blog(BlogCard {
                title: self.title.ok_or_else(|| missing("title"))?,
                date: self.date.ok_or_else(|| missing("date"))?,
                preview: self.preview.unwrap_or_default(),
                meta,
            }),
            Category::Project => CardData::Project(ProjectCard {
                title: self.title.ok_or_else(|| missing("title"))?,
                caption: self.caption.ok_or_else(|| missing("caption"))?,
                date: self.date,
                meta,
            }),
            Category::Hobby => CardData::Hobby(HobbyCard {
                activity: self.activity.ok_or_else(|| missing("activity"))?,
                video: self.video,
                meta,
            }),
        };
        Ok(card)
    }
}

/// Parses an embedded file such as `projects/project-claude-surf.md` into its
/// card and markdown body.
#[cfg(feature = "ssr")]
fn parse_card(path: &str, raw: &str) -> Result<(CardData, String), ContentError> {
    let (segment, file) = path
        .split_once('/')
        .ok_or_else(|| ContentError::Parse(path.to_string()))?;
    let category =
        Category::from_route_segment(segment).ok_or_else(|| ContentError::Parse(path.to_string()))?;
    let id = file
        .strip_suffix(".md")
        .ok_or_else(|| ContentError::Parse(path.to_string()))?;
    let matter = Matter::<YAML>::new();
    let parsed = matter
        .parse_with_struct::<FrontMatter>(raw)
        .ok_or_else(|| ContentError::Parse(path.to_string()))?;
    let card = parsed.data.into_card(id.to_string(), category)?;
    Ok((card, parsed.content))
}

#[cfg(feature = "ssr")]
fn read_asset(path: &str) -> Result<String, ContentError> {
    let file = Assets::get(path).ok_or(ContentError::NotFound)?;
    String::from_utf8(file.data.into()).map_err(|_| ContentError::Parse(path.to_string()))
}

#[cfg(feature = "ssr")]
pub fn get_cards(category: Category) -> Result<Vec<CardData>, ContentError> {
    let cache = &*GLOBAL_CARD_CACHE;
    let key = category.route_segment().to_string();
    if let Some(cards) = cache.get(&key) {
        return Ok(cards.clone());
    }
    let prefix = format!("{}/", category.route_segment());
    let mut cards = Assets::iter()
        .filter(|path| path.starts_with(&prefix) && path.ends_with(".md"))
        .map(|path| {
            let raw = read_asset(&path)?;
            parse_card(&path, &raw).map(|(card, _)| card)
        })
        .collect::<Result<Vec<_>, _>>()?;
    order_cards(&mut cards);
    tracing::debug!(category = category.slug(), count = cards.len(), "loaded cards");
    cache.insert(key, cards.clone());
    Ok(cards)
}

#[cfg(feature = "ssr")]
pub fn get_home_cards() -> Result<Vec<CardData>, ContentError> {
    let mut all = Vec::new();
    for category in Category::ALL {
        all.extend(get_cards(category)?);
    }
    Ok(HOME_CARD_IDS
        .iter()
        .filter_map(|id| all.iter().find(|c| c.id() == *id).cloned())
        .collect())
}

#[cfg(feature = "ssr")]
pub fn get_detail(category: Category, id: &str) -> Result<CardDetail, ContentError> {
    let path = format!("{}/{}.md", category.route_segment(), id);
    let cache = &*GLOBAL_DETAIL_CACHE;
    if let Some(detail) = cache.get(&path) {
        return Ok(detail.clone());
    }
    let raw = read_asset(&path)?;
    let (card, body) = parse_card(&path, &raw)?;
    let detail = CardDetail {
        card,
        content: render_markdown(&body),
    };
    cache.insert(path, detail.clone());
    Ok(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hobby(id: &str) -> CardData {
        CardData::Hobby(HobbyCard {
            meta: CardMeta {
                id: id.to_string(),
                layout: CardLayout::default(),
                image: format!("/{id}.jpg"),
                has_detail_page: false,
            },
            activity: id.to_string(),
            video: None,
        })
    }

    fn blog(id: &str, date: NaiveDate) -> CardData {
        CardData::Blog(BlogCard {
            meta: CardMeta {
                id: id.to_string(),
                layout: CardLayout::default(),
                image: "/home.jpg".to_string(),
                has_detail_page: true,
            },
            title: id.to_string(),
            date,
            preview: String::new(),
        })
    }

    #[test]
    fn test_category_routes() {
        for category in Category::ALL {
            assert_eq!(
                Category::from_route_segment(category.route_segment()),
                Some(category)
            );
            assert_eq!(Category::from_slug(category.slug()), Some(category));
            assert_eq!(category.root_path(), format!("/{}", category.route_segment()));
        }
        assert_eq!(Category::from_route_segment("project"), None);
        assert_eq!(Category::from_slug("projects"), None);
    }

    #[test]
    fn test_card_href() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        assert_eq!(blog("hello", date).href(), "/blog/hello");
        assert_eq!(hobby("hobby-palm-trees").href(), "/hobbies");
    }

    #[test]
    fn test_display_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        assert_eq!(
            blog("hello", date).display_date().as_deref(),
            Some("January 10, 2026")
        );
        assert_eq!(hobby("x").display_date(), None);
    }

    #[test]
    fn test_order_cards() {
        let older = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let newer = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let mut cards = vec![
            hobby("b-hobby"),
            blog("old", older),
            hobby("a-hobby"),
            blog("new", newer),
        ];
        order_cards(&mut cards);
        let ids: Vec<&str> = cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["new", "old", "a-hobby", "b-hobby"]);
    }

    #[test]
    fn test_card_data_serde_tag() {
        let json = serde_json::to_value(hobby("hobby-coachella")).unwrap();
        assert_eq!(json["category"], "hobby");
        let back: CardData = serde_json::from_value(json).unwrap();
        assert_eq!(back.descriptor(), CardDescriptor::new("hobby-coachella", Category::Hobby));
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_parse_card_front_matter() {
        let raw = "---\ntitle: Claude Surf\ncaption: An orchestrator\ndate: 2026-01-01\nimage: /claude-surf.png\ndetail: true\n---\n## Overview\n\nBody text.\n";
        let (card, body) = parse_card("projects/project-claude-surf.md", raw).unwrap();
        assert_eq!(card.category(), Category::Project);
        assert_eq!(card.id(), "project-claude-surf");
        assert!(card.meta().has_detail_page);
        assert_eq!(card.display_date().as_deref(), Some("January 2026"));
        assert!(body.contains("Body text."));
        assert!(!body.contains("caption:"));
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_parse_card_missing_field() {
        let raw = "---\nimage: /x.png\n---\nbody\n";
        let err = parse_card("hobbies/hobby-x.md", raw).unwrap_err();
        assert!(matches!(err, ContentError::Parse(msg) if msg.contains("activity")));
        assert!(parse_card("unknown/x.md", raw).is_err());
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_embedded_content_loads() {
        for category in Category::ALL {
            let cards = get_cards(category).unwrap();
            assert!(!cards.is_empty());
            assert!(cards.iter().all(|c| c.category() == category));
        }
        let home = get_home_cards().unwrap();
        let ids: Vec<&str> = home.iter().map(|c| c.id()).collect();
        let expected: Vec<&str> = HOME_CARD_IDS
            .iter()
            .copied()
            .filter(|id| ids.contains(id))
            .collect();
        assert_eq!(ids, expected);
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_get_detail_not_found() {
        assert_eq!(
            get_detail(Category::Project, "does-not-exist"),
            Err(ContentError::NotFound)
        );
        let detail = get_detail(Category::Project, "project-claude-surf").unwrap();
        assert!(detail.content.contains("<h2"));
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn test_missing_details_are_not_cached() {
        for i in 0..50 {
            let id = format!("no-such-page-{i}");
            assert_eq!(get_detail(Category::Blog, &id), Err(ContentError::NotFound));
            assert!(!GLOBAL_DETAIL_CACHE.contains_key(&format!("blog/{id}.md")));
        }
        get_detail(Category::Blog, "creating-a-home-on-the-internet").unwrap();
        assert!(GLOBAL_DETAIL_CACHE.contains_key("blog/creating-a-home-on-the-internet.md"));
    }
}
