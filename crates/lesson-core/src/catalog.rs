//! Static registry of the stages each plan category contains.
//!
//! The catalog is a compile-time table: every [`PlanCategory`] maps to a
//! fixed, non-empty, ordered list of [`StageDefinition`]s. Stage keys are
//! unique within a category. Keys shared between categories (`warmUp`,
//! `feedback`, ...) denote the same stage, and their content carries over
//! when a plan switches category.

use serde::Serialize;

use crate::{error::Result, models::PlanCategory};

/// Presentational hints for rendering a stage. Not interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PresentationHints {
    /// Accent colour name used for the stage header
    pub accent: &'static str,
    /// Stage may be skipped when time runs short
    pub optional: bool,
}

/// A stage as declared in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDefinition {
    /// Key under which the stage content is stored
    pub key: &'static str,
    /// Label shown to teachers
    pub display_name: &'static str,
    pub hints: PresentationHints,
}

const fn stage(
    key: &'static str,
    display_name: &'static str,
    accent: &'static str,
) -> StageDefinition {
    StageDefinition {
        key,
        display_name,
        hints: PresentationHints {
            accent,
            optional: false,
        },
    }
}

const fn optional(
    key: &'static str,
    display_name: &'static str,
    accent: &'static str,
) -> StageDefinition {
    StageDefinition {
        key,
        display_name,
        hints: PresentationHints {
            accent,
            optional: true,
        },
    }
}

const WARM_UP: StageDefinition = stage("warmUp", "Warm-up", "yellow");
const LEAD_IN: StageDefinition = stage("leadIn", "Lead-in", "yellow");
const FEEDBACK: StageDefinition = stage("feedback", "Feedback", "green");
const EXTRA_15: StageDefinition = optional("extra15", "Extra 15 minutes", "grey");
const CUSTOM: StageDefinition = optional("custom", "Custom stage", "grey");

const READING: &[StageDefinition] = &[
    WARM_UP,
    LEAD_IN,
    stage("preTeach", "Pre-teach vocabulary", "blue"),
    stage("prediction", "Prediction", "blue"),
    stage("gistReading", "Reading for gist", "magenta"),
    stage("specificsReading", "Reading for specific information", "magenta"),
    stage("detailsReading", "Reading for detail", "magenta"),
    stage("followUp", "Follow-up", "cyan"),
    FEEDBACK,
    EXTRA_15,
    CUSTOM,
];

const LISTENING: &[StageDefinition] = &[
    WARM_UP,
    LEAD_IN,
    stage("preTeach", "Pre-teach vocabulary", "blue"),
    stage("prediction", "Prediction", "blue"),
    stage("gistListening", "Listening for gist", "magenta"),
    stage("specificsListening", "Listening for specific information", "magenta"),
    stage("detailsListening", "Listening for detail", "magenta"),
    stage("followUp", "Follow-up", "cyan"),
    FEEDBACK,
    EXTRA_15,
    CUSTOM,
];

const GRAMMAR: &[StageDefinition] = &[
    WARM_UP,
    LEAD_IN,
    stage("clarification", "Clarification (meaning, form, pronunciation)", "blue"),
    stage("controlledPractice", "Controlled practice", "magenta"),
    stage("semiControlledPractice", "Semi-controlled practice", "magenta"),
    stage("freerPractice", "Freer practice", "cyan"),
    FEEDBACK,
    EXTRA_15,
    CUSTOM,
];

const LEXIS: &[StageDefinition] = &[
    WARM_UP,
    LEAD_IN,
    stage("contextualisation", "Contextualisation", "blue"),
    stage("clarification", "Clarification (meaning, form, pronunciation)", "blue"),
    stage("controlledPractice", "Controlled practice", "magenta"),
    stage("freerPractice", "Freer practice", "cyan"),
    FEEDBACK,
    EXTRA_15,
    CUSTOM,
];

const MIXED_DRILL: &[StageDefinition] = &[
    WARM_UP,
    LEAD_IN,
    stage("modelling", "Modelling", "blue"),
    stage("choralDrill", "Choral drill", "magenta"),
    stage("individualDrill", "Individual drill", "magenta"),
    stage("substitutionDrill", "Substitution drill", "magenta"),
    stage("freerPractice", "Freer practice", "cyan"),
    FEEDBACK,
    EXTRA_15,
    CUSTOM,
];

/// Ordered stage definitions for `category`.
pub fn stages_for(category: PlanCategory) -> &'static [StageDefinition] {
    match category {
        PlanCategory::Reading => READING,
        PlanCategory::Listening => LISTENING,
        PlanCategory::Grammar => GRAMMAR,
        PlanCategory::Lexis => LEXIS,
        PlanCategory::MixedDrill => MIXED_DRILL,
    }
}

/// Ordered stage definitions for a category given by name.
///
/// # Errors
///
/// Returns `PlannerError::UnknownCategory` for a name outside the catalog.
pub fn stages_for_name(name: &str) -> Result<&'static [StageDefinition]> {
    Ok(stages_for(name.parse()?))
}

/// Ordered stage keys for `category`.
pub fn expected_keys(category: PlanCategory) -> impl Iterator<Item = &'static str> {
    stages_for(category).iter().map(|definition| definition.key)
}

/// Catalog entry for `key` within `category`.
pub fn definition(category: PlanCategory, key: &str) -> Option<&'static StageDefinition> {
    stages_for(category)
        .iter()
        .find(|definition| definition.key == key)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::PlannerError;

    #[test]
    fn test_every_category_has_unique_non_empty_stages() {
        for category in PlanCategory::ALL {
            let keys: Vec<_> = expected_keys(category).collect();
            assert!(!keys.is_empty(), "{category:?} has no stages");

            let unique: HashSet<_> = keys.iter().collect();
            assert_eq!(unique.len(), keys.len(), "{category:?} repeats a key");
        }
    }

    #[test]
    fn test_reading_stage_order() {
        let keys: Vec<_> = expected_keys(PlanCategory::Reading).collect();
        assert_eq!(
            keys,
            [
                "warmUp",
                "leadIn",
                "preTeach",
                "prediction",
                "gistReading",
                "specificsReading",
                "detailsReading",
                "followUp",
                "feedback",
                "extra15",
                "custom",
            ]
        );
    }

    #[test]
    fn test_grammar_stage_order() {
        let keys: Vec<_> = expected_keys(PlanCategory::Grammar).collect();
        assert_eq!(
            keys,
            [
                "warmUp",
                "leadIn",
                "clarification",
                "controlledPractice",
                "semiControlledPractice",
                "freerPractice",
                "feedback",
                "extra15",
                "custom",
            ]
        );
    }

    #[test]
    fn test_stages_for_name_rejects_unknown_category() {
        let err = stages_for_name("phonology").unwrap_err();
        assert!(matches!(err, PlannerError::UnknownCategory { name } if name == "phonology"));
    }

    #[test]
    fn test_stages_for_name_accepts_aliases() {
        assert_eq!(
            stages_for_name("Mixed_Drill").unwrap(),
            stages_for(PlanCategory::MixedDrill)
        );
    }

    #[test]
    fn test_definition_lookup() {
        let def = definition(PlanCategory::Lexis, "contextualisation").unwrap();
        assert_eq!(def.display_name, "Contextualisation");
        assert!(definition(PlanCategory::Grammar, "contextualisation").is_none());
        assert!(definition(PlanCategory::Grammar, "custom").unwrap().hints.optional);
    }
}
