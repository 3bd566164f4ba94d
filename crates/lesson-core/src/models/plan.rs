//! Lesson plan document model.

use jiff::{
    Timestamp,
    civil::{Date, Time},
};
use serde::{Deserialize, Serialize};

use super::{PlanCategory, PlanStatus, StageContent, StageMap};
use crate::catalog;

/// A lesson plan: fixed metadata plus the stages its category mandates.
///
/// The set of keys in [`PlanDocument::stages`] always matches the catalog
/// entry for [`PlanDocument::category`] once a document has passed through
/// the reconciler or the consistency guard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDocument {
    /// Identifier assigned by the store; `None` until first saved
    pub id: Option<u64>,

    /// Class or group the lesson is taught to
    pub class_name: String,

    /// Teacher delivering the lesson
    pub teacher: String,

    /// Lesson type that determines the stage set
    pub category: PlanCategory,

    /// Day of the lesson
    pub date: Option<Date>,

    /// Start time of the lesson
    pub time: Option<Time>,

    /// Main aim of the lesson
    pub main_aim: String,

    /// Subsidiary aim of the lesson
    pub subsidiary_aim: String,

    /// Review state
    #[serde(default)]
    pub status: PlanStatus,

    /// Stage content keyed by catalog stage key, in catalog order
    #[serde(default)]
    pub stages: StageMap,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last saved (UTC)
    pub updated_at: Timestamp,
}

impl PlanDocument {
    /// Create an empty, unsaved plan with one empty stage per catalog entry.
    pub fn new(category: PlanCategory) -> Self {
        let now = Timestamp::now();
        let stages = catalog::stages_for(category)
            .iter()
            .map(|definition| (definition.key.to_string(), StageContent::empty()))
            .collect();

        Self {
            id: None,
            class_name: String::new(),
            teacher: String::new(),
            category,
            date: None,
            time: None,
            main_aim: String::new(),
            subsidiary_aim: String::new(),
            status: PlanStatus::Draft,
            stages,
            created_at: now,
            updated_at: now,
        }
    }

    /// Content of the stage stored under `key`.
    pub fn stage(&self, key: &str) -> Option<&StageContent> {
        self.stages.get(key)
    }

    /// Display title used in lists and headers.
    pub fn title(&self) -> String {
        match (self.class_name.trim(), self.main_aim.trim()) {
            ("", "") => format!("Untitled {} lesson", self.category.display_name()),
            (class, "") => format!("{class}: {} lesson", self.category.display_name()),
            ("", aim) => aim.to_string(),
            (class, aim) => format!("{class}: {aim}"),
        }
    }
}

impl Default for PlanDocument {
    fn default() -> Self {
        Self::new(PlanCategory::default())
    }
}
