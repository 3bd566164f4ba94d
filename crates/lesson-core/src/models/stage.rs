//! Stage content model and the ordered stage collection of a plan.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Planned length of a stage, restricted to the minute values offered by the
/// editor.
///
/// ```rust
/// use lesson_core::models::StageDuration;
///
/// assert_eq!(StageDuration::try_from(15).unwrap().minutes(), 15);
/// assert!(StageDuration::try_from(0).is_err());
/// assert!(StageDuration::try_from(13).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u16", into = "u16")]
pub struct StageDuration(u16);

impl StageDuration {
    /// Minute values accepted for a stage.
    pub const ALLOWED: [u16; 15] = [1, 2, 3, 4, 5, 7, 10, 12, 15, 20, 25, 30, 40, 45, 60];

    /// Length in minutes.
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for StageDuration {
    type Error = String;

    fn try_from(minutes: u16) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(format!(
                "{minutes} is not an offered stage duration (expected one of {:?})",
                Self::ALLOWED
            ))
        }
    }
}

impl From<StageDuration> for u16 {
    fn from(duration: StageDuration) -> Self {
        duration.0
    }
}

impl FromStr for StageDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix("min")
            .or_else(|| trimmed.strip_suffix('m'))
            .unwrap_or(trimmed)
            .trim();
        let minutes = digits
            .parse::<u16>()
            .map_err(|_| format!("Invalid stage duration: {s}"))?;
        Self::try_from(minutes)
    }
}

impl fmt::Display for StageDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Who interacts with whom during a stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionPattern {
    /// Teacher to the whole group
    TeacherLed,

    /// Teacher to a single student
    TeacherToStudent,

    /// Students in pairs
    PairWork,

    /// Students in small groups
    GroupWork,

    /// Students working alone
    Individual,

    /// Open discussion across the class
    WholeClass,
}

impl InteractionPattern {
    /// Every pattern offered by the editor.
    pub const ALL: [InteractionPattern; 6] = [
        InteractionPattern::TeacherLed,
        InteractionPattern::TeacherToStudent,
        InteractionPattern::PairWork,
        InteractionPattern::GroupWork,
        InteractionPattern::Individual,
        InteractionPattern::WholeClass,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionPattern::TeacherLed => "teacher-led",
            InteractionPattern::TeacherToStudent => "teacher-to-student",
            InteractionPattern::PairWork => "pair-work",
            InteractionPattern::GroupWork => "group-work",
            InteractionPattern::Individual => "individual",
            InteractionPattern::WholeClass => "whole-class",
        }
    }

    /// Classroom shorthand used when displaying a stage.
    pub fn notation(&self) -> &'static str {
        match self {
            InteractionPattern::TeacherLed => "T-Ss",
            InteractionPattern::TeacherToStudent => "T-S",
            InteractionPattern::PairWork => "S-S",
            InteractionPattern::GroupWork => "Ss-Ss",
            InteractionPattern::Individual => "S",
            InteractionPattern::WholeClass => "Open class",
        }
    }
}

impl FromStr for InteractionPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|pattern| {
                pattern.as_str() == normalized || pattern.notation().to_lowercase() == normalized
            })
            .ok_or_else(|| format!("Invalid interaction pattern: {s}"))
    }
}

/// Pedagogical content of one stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StageContent {
    /// What the students and teacher do
    #[serde(default)]
    pub activity_description: String,

    /// Instructions given and the checking questions asked
    #[serde(default)]
    pub instructions_and_checks: String,

    /// Planned length; `None` until the teacher picks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<StageDuration>,

    /// Interaction pattern; `None` until the teacher picks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_pattern: Option<InteractionPattern>,

    /// Problems expected in the stage and how to deal with them
    #[serde(default)]
    pub anticipated_problems: String,
}

impl StageContent {
    /// Structurally empty content for a freshly added stage.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any field carries content.
    pub fn is_filled(&self) -> bool {
        !self.activity_description.trim().is_empty()
            || !self.instructions_and_checks.trim().is_empty()
            || self.duration.is_some()
            || self.interaction_pattern.is_some()
            || !self.anticipated_problems.trim().is_empty()
    }
}

/// One keyed stage of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    /// Catalog key of the stage
    pub key: String,

    #[serde(flatten)]
    pub content: StageContent,
}

/// Mapping from stage key to content that keeps insertion order.
///
/// The reconciler always rebuilds it in catalog order, so iteration order is
/// the order the stages are taught in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StageMap(Vec<Stage>);

impl StageMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no stages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|stage| stage.key == key)
    }

    /// Content stored under `key`.
    pub fn get(&self, key: &str) -> Option<&StageContent> {
        self.0
            .iter()
            .find(|stage| stage.key == key)
            .map(|stage| &stage.content)
    }

    /// Mutable content stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut StageContent> {
        self.0
            .iter_mut()
            .find(|stage| stage.key == key)
            .map(|stage| &mut stage.content)
    }

    /// Insert or replace the content for `key`, returning the previous value.
    ///
    /// New keys are appended at the end.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        content: StageContent,
    ) -> Option<StageContent> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(existing) => Some(std::mem::replace(existing, content)),
            None => {
                self.0.push(Stage { key, content });
                None
            }
        }
    }

    /// Remove `key`, returning its content.
    pub fn remove(&mut self, key: &str) -> Option<StageContent> {
        let index = self.0.iter().position(|stage| stage.key == key)?;
        Some(self.0.remove(index).content)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|stage| stage.key.as_str())
    }

    /// Stages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.0.iter()
    }
}

impl FromIterator<(String, StageContent)> for StageMap {
    fn from_iter<I: IntoIterator<Item = (String, StageContent)>>(iter: I) -> Self {
        let mut map = StageMap::new();
        for (key, content) in iter {
            map.insert(key, content);
        }
        map
    }
}

impl IntoIterator for StageMap {
    type Item = Stage;
    type IntoIter = std::vec::IntoIter<Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StageMap {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
