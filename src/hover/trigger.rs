use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::ViewportMode;
use crate::content::Category;

/// How long a tapped trigger stays active on touch screens.
pub const PREVIEW_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerId {
    Building,
    Dori,
    Travel,
    ForagingFrames,
    Surfing,
    RockClimbing,
    Write,
}

impl TriggerId {
    pub const ALL: [TriggerId; 7] = [
        TriggerId::Building,
        TriggerId::Dori,
        TriggerId::Travel,
        TriggerId::ForagingFrames,
        TriggerId::Surfing,
        TriggerId::RockClimbing,
        TriggerId::Write,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Dori => "dori",
            Self::Travel => "travel",
            Self::ForagingFrames => "foraging-frames",
            Self::Surfing => "surfing",
            Self::RockClimbing => "rock-climbing",
            Self::Write => "write",
        }
    }

    /// Category page a click on the phrase leads to.
    pub fn target(self) -> Category {
        match self {
            Self::Building | Self::Dori => Category::Project,
            Self::Write => Category::Blog,
            Self::Travel | Self::ForagingFrames | Self::Surfing | Self::RockClimbing => {
                Category::Hobby
            }
        }
    }

    pub fn underline_class(self) -> String {
        format!("trigger-underline underline-{}", self.slug())
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for TriggerId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.slug() == s).ok_or(())
    }
}

/// What a click or tap on a trigger word does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterAction {
    Navigate(&'static str),
    /// Highlight without navigating, then clear after the given delay.
    Preview { clear_after: Duration },
}

impl EmitterAction {
    pub fn for_tap(mode: ViewportMode, trigger: TriggerId) -> Self {
        match mode {
            ViewportMode::Wide => Self::Navigate(trigger.target().root_path()),
            ViewportMode::Compact => Self::Preview {
                clear_after: PREVIEW_DURATION,
            },
        }
    }
}
