//! Keyed field updates on a plan document.

use jiff::civil::{Date, Time};

use crate::{
    error::{PlannerError, Result},
    models::{
        FieldPath, InteractionPattern, PlanDocument, PlanField, PlanStatus, StageDuration,
        StageField,
    },
};

/// Set the value addressed by `path`, leaving every other field untouched.
///
/// `value` is the textual input from the editor. Empty input clears optional
/// fields (date, time, duration, interaction pattern). Status changes follow
/// [`PlanStatus::can_transition_to`].
///
/// # Errors
///
/// * `PlannerError::StageNotFound` - the stage key is not in the active set
/// * `PlannerError::InvalidInput` - the value does not parse for the field
/// * `PlannerError::InvalidTransition` - the status change skips the workflow
pub fn set_field(doc: &mut PlanDocument, path: &FieldPath, value: &str) -> Result<()> {
    match path {
        FieldPath::Plan(field) => set_plan_field(doc, *field, value),
        FieldPath::Stage { key, field } => {
            let content = doc
                .stages
                .get_mut(key)
                .ok_or_else(|| PlannerError::StageNotFound { key: key.clone() })?;

            match field {
                StageField::ActivityDescription => content.activity_description = value.to_string(),
                StageField::InstructionsAndChecks => {
                    content.instructions_and_checks = value.to_string()
                }
                StageField::AnticipatedProblems => content.anticipated_problems = value.to_string(),
                StageField::Duration => {
                    content.duration = parse_optional(path, value, str::parse::<StageDuration>)?
                }
                StageField::InteractionPattern => {
                    content.interaction_pattern =
                        parse_optional(path, value, str::parse::<InteractionPattern>)?
                }
            }
            Ok(())
        }
    }
}

fn set_plan_field(doc: &mut PlanDocument, field: PlanField, value: &str) -> Result<()> {
    let path = FieldPath::Plan(field);
    match field {
        PlanField::ClassName => doc.class_name = value.to_string(),
        PlanField::Teacher => doc.teacher = value.to_string(),
        PlanField::MainAim => doc.main_aim = value.to_string(),
        PlanField::SubsidiaryAim => doc.subsidiary_aim = value.to_string(),
        PlanField::Date => {
            doc.date = parse_optional(&path, value, |s| {
                s.parse::<Date>().map_err(|e| e.to_string())
            })?
        }
        PlanField::Time => {
            doc.time = parse_optional(&path, value, |s| {
                s.parse::<Time>().map_err(|e| e.to_string())
            })?
        }
        PlanField::Status => {
            let to = value
                .trim()
                .parse::<PlanStatus>()
                .map_err(|reason| {
                    PlannerError::invalid_input(path.to_string()).with_reason(reason)
                })?;
            transition_status(doc, to)?;
        }
    }
    Ok(())
}

/// Move the plan's review status to `to`.
///
/// # Errors
///
/// Returns `PlannerError::InvalidTransition` when `to` is not reachable from
/// the current status.
pub fn transition_status(doc: &mut PlanDocument, to: PlanStatus) -> Result<()> {
    if !doc.status.can_transition_to(to) {
        return Err(PlannerError::InvalidTransition {
            from: doc.status,
            to,
        });
    }
    doc.status = to;
    Ok(())
}

fn parse_optional<T, F>(path: &FieldPath, value: &str, parse: F) -> Result<Option<T>>
where
    F: FnOnce(&str) -> std::result::Result<T, String>,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse(trimmed)
        .map(Some)
        .map_err(|reason| PlannerError::invalid_input(path.to_string()).with_reason(reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlanCategory, StageContent};

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_set_metadata_fields() {
        let mut doc = PlanDocument::new(PlanCategory::Reading);
        set_field(&mut doc, &path("className"), "A2 Morning").unwrap();
        set_field(&mut doc, &path("teacher"), "Ana Souza").unwrap();
        set_field(&mut doc, &path("mainAim"), "Gist and detail reading").unwrap();
        set_field(&mut doc, &path("date"), "2026-03-14").unwrap();
        set_field(&mut doc, &path("time"), "18:30").unwrap();

        assert_eq!(doc.class_name, "A2 Morning");
        assert_eq!(doc.teacher, "Ana Souza");
        assert_eq!(doc.main_aim, "Gist and detail reading");
        assert_eq!(doc.subsidiary_aim, "");
        assert_eq!(doc.date, Some(jiff::civil::date(2026, 3, 14)));
        assert_eq!(doc.time, Some(jiff::civil::time(18, 30, 0, 0)));

        set_field(&mut doc, &path("date"), "").unwrap();
        assert_eq!(doc.date, None);
    }

    #[test]
    fn test_set_stage_field_leaves_other_stages_alone() {
        let mut doc = PlanDocument::new(PlanCategory::Grammar);
        set_field(&mut doc, &path("stages.clarification.duration"), "15").unwrap();
        set_field(
            &mut doc,
            &path("stages.clarification.interactionPattern"),
            "T-Ss",
        )
        .unwrap();
        set_field(
            &mut doc,
            &path("stages.clarification.activityDescription"),
            "Timeline for present perfect",
        )
        .unwrap();

        let content = doc.stage("clarification").unwrap();
        assert_eq!(content.duration.map(StageDuration::minutes), Some(15));
        assert_eq!(content.interaction_pattern, Some(InteractionPattern::TeacherLed));
        assert_eq!(content.activity_description, "Timeline for present perfect");
        assert_eq!(content.anticipated_problems, "");

        assert_eq!(doc.stage("warmUp"), Some(&StageContent::empty()));
    }

    #[test]
    fn test_set_field_on_inactive_stage_is_rejected() {
        let mut doc = PlanDocument::new(PlanCategory::Reading);
        let before = doc.clone();

        let err = set_field(&mut doc, &path("stages.clarification.duration"), "5").unwrap_err();
        assert!(matches!(err, PlannerError::StageNotFound { key } if key == "clarification"));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_invalid_duration_is_rejected_and_clearing_works() {
        let mut doc = PlanDocument::new(PlanCategory::Reading);
        let err = set_field(&mut doc, &path("stages.warmUp.duration"), "13").unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidInput { field, .. } if field == "stages.warmUp.duration"
        ));

        set_field(&mut doc, &path("stages.warmUp.duration"), "10 min").unwrap();
        assert_eq!(
            doc.stage("warmUp").unwrap().duration.map(StageDuration::minutes),
            Some(10)
        );
        set_field(&mut doc, &path("stages.warmUp.duration"), " ").unwrap();
        assert_eq!(doc.stage("warmUp").unwrap().duration, None);
    }

    #[test]
    fn test_status_follows_review_workflow() {
        let mut doc = PlanDocument::new(PlanCategory::Lexis);

        let err = set_field(&mut doc, &path("status"), "approved").unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidTransition {
                from: PlanStatus::Draft,
                to: PlanStatus::Approved
            }
        ));

        set_field(&mut doc, &path("status"), "under_review").unwrap();
        set_field(&mut doc, &path("status"), "draft").unwrap();
        set_field(&mut doc, &path("status"), " under-review\n").unwrap();
        set_field(&mut doc, &path("status"), " approved").unwrap();
        assert_eq!(doc.status, PlanStatus::Approved);

        assert!(transition_status(&mut doc, PlanStatus::Draft).is_err());
        assert!(transition_status(&mut doc, PlanStatus::Approved).is_ok());
    }

    #[test]
    fn test_category_is_not_a_settable_field() {
        let err = "category".parse::<FieldPath>().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { field, .. } if field == "category"));
        assert!(matches!(
            "stages.warmUp.colour".parse::<FieldPath>(),
            Err(PlannerError::UnknownField { .. })
        ));
    }
}
