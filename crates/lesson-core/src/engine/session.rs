//! Editing session binding a plan document to its stage threads.

use log::debug;

use super::{
    annotations::AnnotationStore,
    fields,
    guard::{self, StageDrift},
    reconcile::{ReconcileReport, reconcile_with_report},
};
use crate::{
    catalog::{self, StageDefinition},
    error::{PlannerError, Result},
    models::{Comment, FieldPath, NewComment, PlanCategory, PlanDocument, StageContent},
};

/// A stage as the editor renders it: catalog definition merged with the
/// document's content and the size of its thread.
#[derive(Debug, Clone, PartialEq)]
pub struct StageView<'a> {
    /// Position within the lesson, starting at 1
    pub position: usize,
    pub definition: &'static StageDefinition,
    pub content: &'a StageContent,
    pub comment_count: usize,
}

/// One in-flight edit of a single plan.
///
/// All mutations are synchronous. Every read through [`EditSession::document`]
/// and every category change passes through the consistency guard, so the
/// stage key set always matches the catalog when observed.
#[derive(Debug, Clone)]
pub struct EditSession {
    document: PlanDocument,
    annotations: AnnotationStore,
    /// Comments appended since the last save, with their stage keys
    unsaved_comments: Vec<(String, Comment)>,
}

impl EditSession {
    /// Start editing `document` with no comments.
    pub fn new(document: PlanDocument) -> Self {
        Self::with_annotations(document, AnnotationStore::new())
    }

    /// Start editing `document` with previously loaded threads.
    pub fn with_annotations(mut document: PlanDocument, annotations: AnnotationStore) -> Self {
        guard::ensure_consistent(&mut document);
        Self {
            document,
            annotations,
            unsaved_comments: Vec::new(),
        }
    }

    /// Start a new, unsaved plan of `category`.
    pub fn create(category: PlanCategory) -> Self {
        Self::new(PlanDocument::new(category))
    }

    /// The document, repaired first if anything left it inconsistent.
    pub fn document(&mut self) -> &PlanDocument {
        self.heal();
        &self.document
    }

    /// Raw mutable access for callers outside the engine.
    ///
    /// Structural changes made here are checked on the next guarded read.
    pub fn document_mut(&mut self) -> &mut PlanDocument {
        &mut self.document
    }

    /// Threads of this plan.
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Run the consistency guard now.
    pub fn heal(&mut self) -> Option<StageDrift> {
        guard::ensure_consistent(&mut self.document)
    }

    /// Switch the plan to `category`, carrying over content of shared stages
    /// and discarding the rest.
    pub fn change_category(&mut self, category: PlanCategory) -> ReconcileReport {
        let from = self.document.category;
        let (document, report) =
            reconcile_with_report(std::mem::take(&mut self.document), category);
        self.document = document;

        debug!(
            "Category {} -> {}: kept {:?}, created {:?}, dropped {:?}",
            from.as_str(),
            category.as_str(),
            report.kept,
            report.created,
            report.dropped
        );

        self.heal();
        report
    }

    /// Set one metadata or stage field.
    ///
    /// # Errors
    ///
    /// See [`fields::set_field`].
    pub fn set_field(&mut self, path: &FieldPath, value: &str) -> Result<()> {
        self.heal();
        fields::set_field(&mut self.document, path, value)
    }

    /// Append a comment to the thread of an active stage.
    ///
    /// # Errors
    ///
    /// * `PlannerError::StageNotFound` - `stage_key` is not an active stage
    /// * `PlannerError::InvalidComment` - the message is blank
    pub fn append_comment(&mut self, stage_key: &str, comment: NewComment) -> Result<&Comment> {
        self.heal();
        if !self.document.stages.contains_key(stage_key) {
            return Err(PlannerError::StageNotFound {
                key: stage_key.to_string(),
            });
        }

        let thread = self.annotations.append(stage_key, comment)?;
        let comment = thread.last().ok_or_else(|| PlannerError::InvalidComment {
            reason: "comment was not recorded".to_string(),
        })?;
        self.unsaved_comments
            .push((stage_key.to_string(), comment.clone()));
        Ok(comment)
    }

    /// Comments appended since the session was opened or last saved.
    pub fn unsaved_comments(&self) -> &[(String, Comment)] {
        &self.unsaved_comments
    }

    /// Comments on `stage_key`, oldest first.
    pub fn thread_for(&self, stage_key: &str) -> &[Comment] {
        self.annotations.thread_for(stage_key)
    }

    /// Stages in teaching order, merged with their catalog definitions.
    pub fn stage_views(&mut self) -> Vec<StageView<'_>> {
        self.heal();
        let document = &self.document;
        let annotations = &self.annotations;

        catalog::stages_for(document.category)
            .iter()
            .enumerate()
            .filter_map(|(index, definition)| {
                document.stages.get(definition.key).map(|content| StageView {
                    position: index + 1,
                    definition,
                    content,
                    comment_count: annotations.thread_for(definition.key).len(),
                })
            })
            .collect()
    }

    /// Guarded copy of the document for handing to the store.
    pub fn snapshot(&mut self) -> PlanDocument {
        self.document().clone()
    }

    /// Adopt identity and timestamps assigned by the store after a save.
    ///
    /// Pending comments count as persisted from here on.
    pub(crate) fn mark_saved(&mut self, saved: &PlanDocument) {
        self.document.id = saved.id;
        self.document.created_at = saved.created_at;
        self.document.updated_at = saved.updated_at;
        self.unsaved_comments.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorRole, StageField};

    #[test]
    fn test_reading_to_grammar_scenario() {
        let mut session = EditSession::create(PlanCategory::Reading);
        for key in ["warmUp", "leadIn", "feedback", "extra15", "custom", "gistReading"] {
            session
                .set_field(
                    &FieldPath::stage(key, StageField::ActivityDescription),
                    &format!("{key} activity"),
                )
                .unwrap();
        }

        session.change_category(PlanCategory::Grammar);
        let doc = session.document();

        let keys: Vec<_> = doc.stages.keys().collect();
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
        for key in ["warmUp", "leadIn", "feedback", "extra15", "custom"] {
            assert_eq!(
                doc.stage(key).unwrap().activity_description,
                format!("{key} activity")
            );
        }
        for key in [
            "clarification",
            "controlledPractice",
            "semiControlledPractice",
            "freerPractice",
        ] {
            assert_eq!(doc.stage(key), Some(&StageContent::empty()));
        }
    }

    #[test]
    fn test_guarded_read_repairs_outside_changes() {
        let mut session = EditSession::create(PlanCategory::Grammar);
        session
            .document_mut()
            .stages
            .insert("legacyStage", StageContent::empty());
        session.document_mut().stages.remove("feedback");

        let doc = session.document();
        assert!(doc.stage("legacyStage").is_none());
        assert!(doc.stage("feedback").is_some());
    }

    #[test]
    fn test_comment_on_active_stage() {
        let mut session = EditSession::create(PlanCategory::Grammar);
        let comment = session
            .append_comment(
                "clarification",
                NewComment::new("Coordinator", AuthorRole::Coordinator, "Clarify ICQs"),
            )
            .unwrap()
            .clone();

        assert_eq!(comment.message, "Clarify ICQs");
        assert_eq!(session.thread_for("clarification"), [comment.clone()]);
        assert_eq!(
            session.unsaved_comments(),
            [("clarification".to_string(), comment)]
        );
    }

    #[test]
    fn test_comment_on_inactive_stage_is_rejected() {
        let mut session = EditSession::create(PlanCategory::Reading);
        let err = session
            .append_comment(
                "clarification",
                NewComment::new("Coordinator", AuthorRole::Coordinator, "Clarify ICQs"),
            )
            .unwrap_err();
        assert!(matches!(err, PlannerError::StageNotFound { .. }));
        assert!(session.thread_for("clarification").is_empty());
        assert!(session.unsaved_comments().is_empty());
    }

    #[test]
    fn test_threads_survive_category_change() {
        let mut session = EditSession::create(PlanCategory::Grammar);
        session
            .append_comment(
                "clarification",
                NewComment::new("Ana", AuthorRole::Author, "Using a timeline here"),
            )
            .unwrap();

        session.change_category(PlanCategory::Reading);
        assert_eq!(session.thread_for("clarification").len(), 1);

        session.change_category(PlanCategory::Lexis);
        assert_eq!(session.stage_views()[3].comment_count, 1);
    }

    #[test]
    fn test_stage_views_follow_catalog_order() {
        let mut session = EditSession::create(PlanCategory::MixedDrill);
        let views = session.stage_views();

        let keys: Vec<_> = views.iter().map(|view| view.definition.key).collect();
        let expected: Vec<_> = catalog::expected_keys(PlanCategory::MixedDrill).collect();
        assert_eq!(keys, expected);
        assert_eq!(views[0].position, 1);
        assert_eq!(views[0].definition.display_name, "Warm-up");
        assert!(views.iter().all(|view| view.comment_count == 0));
    }
}
