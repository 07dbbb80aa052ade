use serde::{Deserialize, Serialize};

/// Category of a logged event (⇔ wire field `type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    Feeding,
    Diaper,
    Growth,
    Vaccine,
    Supplement,
    Note,
    Advice,
}

impl EntryType {
    pub const ALL: [EntryType; 7] = [
        EntryType::Feeding,
        EntryType::Diaper,
        EntryType::Growth,
        EntryType::Vaccine,
        EntryType::Supplement,
        EntryType::Note,
        EntryType::Advice,
    ];

    /// Convert CLI / wire string → enum (case-insensitive)
    pub fn et_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "feeding" | "feed" => Some(Self::Feeding),
            "diaper" => Some(Self::Diaper),
            "growth" => Some(Self::Growth),
            "vaccine" => Some(Self::Vaccine),
            "supplement" => Some(Self::Supplement),
            "note" => Some(Self::Note),
            "advice" => Some(Self::Advice),
            _ => None,
        }
    }

    /// Convert enum → wire string
    pub fn et_as_str(&self) -> &'static str {
        match self {
            EntryType::Feeding => "FEEDING",
            EntryType::Diaper => "DIAPER",
            EntryType::Growth => "GROWTH",
            EntryType::Vaccine => "VACCINE",
            EntryType::Supplement => "SUPPLEMENT",
            EntryType::Note => "NOTE",
            EntryType::Advice => "ADVICE",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EntryType::Feeding => "🍼",
            EntryType::Diaper => "🧷",
            EntryType::Growth => "📏",
            EntryType::Vaccine => "💉",
            EntryType::Supplement => "💊",
            EntryType::Note => "📝",
            EntryType::Advice => "🤖",
        }
    }
}

// Localized values written by older web clients are accepted
// on input through `alias`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedingMethod {
    /// Direct breastfeeding, measured in minutes.
    #[serde(alias = "母乳")]
    Breast,
    /// Expressed breast milk from a bottle, measured in ml.
    #[serde(alias = "瓶喂母乳")]
    Bottle,
    #[serde(alias = "奶粉")]
    Formula,
    #[serde(alias = "辅食")]
    Solid,
}

impl FeedingMethod {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breast" | "b" => Some(Self::Breast),
            "bottle" | "bt" => Some(Self::Bottle),
            "formula" | "f" => Some(Self::Formula),
            "solid" | "s" => Some(Self::Solid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedingMethod::Breast => "breast",
            FeedingMethod::Bottle => "bottle",
            FeedingMethod::Formula => "formula",
            FeedingMethod::Solid => "solid",
        }
    }

    /// Bottle-style feedings are measured by volume.
    pub fn is_bottle(&self) -> bool {
        matches!(self, FeedingMethod::Bottle | FeedingMethod::Formula)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedingSide {
    #[serde(alias = "左")]
    Left,
    #[serde(alias = "右")]
    Right,
    #[serde(alias = "双侧")]
    Both,
}

impl FeedingSide {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Self::Left),
            "right" | "r" => Some(Self::Right),
            "both" | "lr" => Some(Self::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiaperStatus {
    #[serde(alias = "尿尿")]
    Wet,
    #[serde(alias = "便便")]
    Dirty,
    #[serde(alias = "都有")]
    Both,
}

impl DiaperStatus {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wet" | "w" => Some(Self::Wet),
            "dirty" | "d" => Some(Self::Dirty),
            "both" | "wd" => Some(Self::Both),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiaperStatus::Wet => "wet",
            DiaperStatus::Dirty => "dirty",
            DiaperStatus::Both => "both",
        }
    }

    pub fn is_wet(&self) -> bool {
        matches!(self, DiaperStatus::Wet | DiaperStatus::Both)
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, DiaperStatus::Dirty | DiaperStatus::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowthCategory {
    #[serde(alias = "里程碑")]
    Milestone,
    #[serde(alias = "身体发育")]
    Physical,
    #[serde(alias = "牙齿")]
    Teeth,
    #[serde(alias = "健康状态")]
    Health,
    #[serde(alias = "新技能")]
    Skill,
}

impl GrowthCategory {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "milestone" => Some(Self::Milestone),
            "physical" => Some(Self::Physical),
            "teeth" => Some(Self::Teeth),
            "health" => Some(Self::Health),
            "skill" => Some(Self::Skill),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milestone => "MILESTONE",
            Self::Physical => "PHYSICAL",
            Self::Teeth => "TEETH",
            Self::Health => "HEALTH",
            Self::Skill => "SKILL",
        }
    }
}
