//! Tests for the planner module.

use tempfile::TempDir;

use super::*;
use crate::{
    PlannerError,
    catalog,
    db::Database,
    engine::EditSession,
    models::{AuthorRole, NewComment, PlanCategory, PlanDocument, PlanStatus, StageContent},
    params::{
        AddComment, ChangeCategory, CreatePlan, DeletePlan, Id, ListPlans, ListStages, SetField,
        ShowThread,
    },
};

/// Helper function to create a test planner
async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

async fn create_plan(planner: &Planner, category: &str) -> u64 {
    planner
        .create_plan(&CreatePlan {
            category: category.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan")
        .id
        .expect("Saved plan has an ID")
}

async fn set(planner: &Planner, id: u64, field: &str, value: &str) -> PlanDocument {
    planner
        .set_field(&SetField {
            id,
            field: field.to_string(),
            value: value.to_string(),
        })
        .await
        .expect("Failed to set field")
}

fn comment(id: u64, stage: &str, role: &str, message: &str) -> AddComment {
    AddComment {
        id,
        stage: stage.to_string(),
        author: "Bea".to_string(),
        role: role.to_string(),
        message: message.to_string(),
    }
}

#[tokio::test]
async fn test_create_plan_with_metadata() {
    let (_temp_dir, planner) = create_test_planner().await;

    let plan = planner
        .create_plan(&CreatePlan {
            category: "listening".to_string(),
            class_name: Some("B2 Weekend".to_string()),
            teacher: Some("Ana Souza".to_string()),
            date: Some("2026-05-02".to_string()),
            time: Some("09:15".to_string()),
            main_aim: Some("Listening for gist".to_string()),
            subsidiary_aim: None,
        })
        .await
        .expect("Failed to create plan");

    assert!(plan.id.is_some());
    assert_eq!(plan.category, PlanCategory::Listening);
    assert_eq!(plan.status, PlanStatus::Draft);
    assert_eq!(plan.date, Some(jiff::civil::date(2026, 5, 2)));
    assert_eq!(plan.time, Some(jiff::civil::time(9, 15, 0, 0)));
    assert_eq!(plan.subsidiary_aim, "");

    let keys: Vec<_> = plan.stages.keys().collect();
    let expected: Vec<_> = catalog::expected_keys(PlanCategory::Listening).collect();
    assert_eq!(keys, expected);

    let loaded = planner
        .show_plan(&Id { id: plan.id.unwrap() })
        .await
        .expect("Failed to load plan")
        .expect("Plan should exist");
    assert_eq!(loaded, plan);
}

#[tokio::test]
async fn test_create_plan_rejects_bad_input() {
    let (_temp_dir, planner) = create_test_planner().await;

    let err = planner
        .create_plan(&CreatePlan {
            category: "speaking".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::UnknownCategory { .. }));

    let err = planner
        .create_plan(&CreatePlan {
            category: "grammar".to_string(),
            date: Some("14/03/2026".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { field, .. } if field == "date"));

    let summaries = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .unwrap();
    assert!(summaries.is_empty());
}

#[tokio::test]
async fn test_set_field_persists_single_field() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "grammar").await;

    set(&planner, id, "stages.clarification.duration", "15").await;
    let plan = set(&planner, id, "stages.clarification.interactionPattern", "T-Ss").await;

    let clarification = plan.stage("clarification").unwrap();
    assert_eq!(clarification.duration.map(|d| d.minutes()), Some(15));
    assert_eq!(plan.stage("warmUp"), Some(&StageContent::empty()));

    let err = planner
        .set_field(&SetField {
            id,
            field: "stages.gistReading.duration".to_string(),
            value: "10".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::StageNotFound { key } if key == "gistReading"));

    let err = planner
        .set_field(&SetField {
            id: 999,
            field: "teacher".to_string(),
            value: "Ana".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::PlanNotFound { id: 999 }));
}

#[tokio::test]
async fn test_status_workflow_through_planner() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "lexis").await;

    let err = planner
        .set_field(&SetField {
            id,
            field: "status".to_string(),
            value: "approved".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidTransition { .. }));

    set(&planner, id, "status", "under_review").await;
    let plan = set(&planner, id, "status", "approved").await;
    assert_eq!(plan.status, PlanStatus::Approved);
}

#[tokio::test]
async fn test_reading_to_grammar_keeps_shared_stage_content() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "reading").await;

    for key in ["warmUp", "leadIn", "gistReading", "feedback", "extra15", "custom"] {
        set(
            &planner,
            id,
            &format!("stages.{key}.activityDescription"),
            &format!("{key} activity"),
        )
        .await;
    }

    let change = planner
        .change_category(&ChangeCategory {
            id,
            category: "grammar".to_string(),
        })
        .await
        .expect("Failed to change category");

    assert_eq!(change.from, PlanCategory::Reading);
    assert!(change.report.dropped.contains(&"gistReading".to_string()));
    assert!(change.report.created.contains(&"clarification".to_string()));

    let plan = planner.load_plan(id).await.unwrap().unwrap();
    assert_eq!(plan.category, PlanCategory::Grammar);
    let keys: Vec<_> = plan.stages.keys().collect();
    let expected: Vec<_> = catalog::expected_keys(PlanCategory::Grammar).collect();
    assert_eq!(keys, expected);

    for key in ["warmUp", "leadIn", "feedback", "extra15", "custom"] {
        assert_eq!(
            plan.stage(key).unwrap().activity_description,
            format!("{key} activity")
        );
    }
    for key in ["clarification", "controlledPractice", "semiControlledPractice", "freerPractice"] {
        assert_eq!(plan.stage(key), Some(&StageContent::empty()));
    }
}

#[tokio::test]
async fn test_first_comment_on_clarification() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "grammar").await;

    let before = planner
        .show_thread(&ShowThread {
            id,
            stage: "clarification".to_string(),
        })
        .await
        .unwrap();
    assert!(before.comments.is_empty());

    let added = planner
        .add_comment(&comment(id, "clarification", "coordinator", "Clarify ICQs"))
        .await
        .expect("Failed to add comment");
    assert_eq!(added.author_role, AuthorRole::Coordinator);

    let thread = planner
        .show_thread(&ShowThread {
            id,
            stage: "clarification".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(thread.comments.as_slice(), [added]);

    let summaries = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .unwrap();
    assert_eq!(summaries.0[0].comment_count, 1);
}

#[tokio::test]
async fn test_comment_validation() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "reading").await;

    let err = planner
        .add_comment(&comment(id, "warmUp", "author", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidComment { .. }));

    let err = planner
        .add_comment(&comment(id, "clarification", "author", "Not in reading"))
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::StageNotFound { .. }));

    let err = planner
        .add_comment(&comment(id, "warmUp", "student", "Hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { field, .. } if field == "role"));

    let added = planner
        .add_comment(&comment(id, "warmUp", "", "Default role"))
        .await
        .unwrap();
    assert_eq!(added.author_role, AuthorRole::Author);

    let err = planner
        .show_thread(&ShowThread {
            id: 404,
            stage: "warmUp".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::PlanNotFound { id: 404 }));
}

#[tokio::test]
async fn test_threads_are_scoped_to_their_plan() {
    let (_temp_dir, planner) = create_test_planner().await;
    let first = create_plan(&planner, "grammar").await;
    let second = create_plan(&planner, "grammar").await;

    planner
        .add_comment(&comment(first, "clarification", "coordinator", "First plan"))
        .await
        .unwrap();

    let session = planner.open_session(second).await.unwrap();
    assert!(session.thread_for("clarification").is_empty());

    let session = planner.open_session(first).await.unwrap();
    assert_eq!(session.thread_for("clarification").len(), 1);
}

#[tokio::test]
async fn test_threads_survive_category_round_trip() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "grammar").await;

    planner
        .add_comment(&comment(id, "clarification", "coordinator", "Use a timeline"))
        .await
        .unwrap();

    for category in ["reading", "lexis"] {
        planner
            .change_category(&ChangeCategory {
                id,
                category: category.to_string(),
            })
            .await
            .unwrap();
    }

    let mut session = planner.open_session(id).await.unwrap();
    assert_eq!(session.document().category, PlanCategory::Lexis);
    assert_eq!(session.thread_for("clarification").len(), 1);
}

#[tokio::test]
async fn test_saving_drifted_document_drops_stray_stage() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "grammar").await;

    let mut plan = planner.load_plan(id).await.unwrap().unwrap();
    plan.stages.insert(
        "legacyStage",
        StageContent {
            activity_description: "From an older editor".to_string(),
            ..StageContent::empty()
        },
    );
    plan.stages.remove("feedback");

    let saved = planner.save_plan(&plan).await.expect("Failed to save plan");
    assert!(saved.stage("legacyStage").is_none());
    assert_eq!(saved.stage("feedback"), Some(&StageContent::empty()));

    // The stored rows match the catalog as well
    let db = Database::new(&planner.db_path).unwrap();
    let stored = db.get_plan(id).unwrap().unwrap();
    let keys: Vec<_> = stored.stages.keys().collect();
    let expected: Vec<_> = catalog::expected_keys(PlanCategory::Grammar).collect();
    assert_eq!(keys, expected);
}

#[tokio::test]
async fn test_loading_drifted_rows_repairs_document() {
    let (_temp_dir, planner) = create_test_planner().await;

    // Rows written by something that bypassed the guard
    let mut drifted = PlanDocument::new(PlanCategory::Reading);
    drifted.stages.insert("legacyStage", StageContent::empty());
    drifted.stages.remove("prediction");
    let id = {
        let mut db = Database::new(&planner.db_path).unwrap();
        db.save_plan_with_comments(&drifted, &[]).unwrap().id.unwrap()
    };

    let plan = planner.load_plan(id).await.unwrap().unwrap();
    assert!(plan.stage("legacyStage").is_none());
    assert_eq!(plan.stage("prediction"), Some(&StageContent::empty()));

    let mut session = planner.open_session(id).await.unwrap();
    assert_eq!(session.document(), &plan);
}

#[tokio::test]
async fn test_save_session_persists_new_comments_once() {
    let (_temp_dir, planner) = create_test_planner().await;

    let mut session = EditSession::create(PlanCategory::MixedDrill);
    session
        .append_comment(
            "choralDrill",
            NewComment::new("Bea", AuthorRole::Coordinator, "Back-chain the long ones"),
        )
        .unwrap();

    let saved = planner.save_session(&mut session).await.unwrap();
    let id = saved.id.unwrap();
    assert!(session.unsaved_comments().is_empty());
    assert_eq!(session.document().id, Some(id));

    // A second save has nothing new to store
    planner.save_session(&mut session).await.unwrap();

    let threads = planner.load_threads(id).await.unwrap();
    assert_eq!(threads.comment_count(), 1);
    assert_eq!(threads.thread_for("choralDrill")[0].message, "Back-chain the long ones");
}

#[tokio::test]
async fn test_failed_save_leaves_session_unchanged() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "grammar").await;

    let mut session = planner.open_session(id).await.unwrap();
    session
        .set_field(&"mainAim".parse().unwrap(), "Second conditional")
        .unwrap();
    session
        .append_comment(
            "clarification",
            NewComment::new("Bea", AuthorRole::Coordinator, "Check the form"),
        )
        .unwrap();
    let before = session.document().clone();

    planner.delete_plan_by_id(id).await.unwrap();

    let err = planner.save_session(&mut session).await.unwrap_err();
    assert!(matches!(err, PlannerError::PlanNotFound { .. }));
    assert_eq!(session.document(), &before);
    assert_eq!(session.unsaved_comments().len(), 1);
}

#[tokio::test]
async fn test_failed_comment_write_stores_no_plan() {
    let (_temp_dir, planner) = create_test_planner().await;

    let conn = rusqlite::Connection::open(&planner.db_path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_comments BEFORE INSERT ON stage_comments
         BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
    )
    .unwrap();

    let mut session = EditSession::create(PlanCategory::Grammar);
    session
        .append_comment(
            "clarification",
            NewComment::new("Bea", AuthorRole::Coordinator, "Check the form"),
        )
        .unwrap();

    for _ in 0..2 {
        let err = planner.save_session(&mut session).await.unwrap_err();
        assert!(matches!(err, PlannerError::Database { .. }));
        assert_eq!(session.document().id, None);
        assert_eq!(session.unsaved_comments().len(), 1);
    }

    let plans = planner.list_plans(None).await.unwrap();
    assert!(plans.is_empty());

    // Once comments can be written again the retry stores everything
    conn.execute_batch("DROP TRIGGER reject_comments;").unwrap();
    let saved = planner.save_session(&mut session).await.unwrap();
    let threads = planner.load_threads(saved.id.unwrap()).await.unwrap();
    assert_eq!(threads.comment_count(), 1);
    assert_eq!(planner.list_plans(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_plans_summary_filters() {
    let (_temp_dir, planner) = create_test_planner().await;
    let grammar = create_plan(&planner, "grammar").await;
    create_plan(&planner, "reading").await;
    set(&planner, grammar, "teacher", "Ana Souza").await;
    set(&planner, grammar, "stages.warmUp.duration", "5").await;

    let all = planner
        .list_plans_summary(&ListPlans::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = planner
        .list_plans_summary(&ListPlans {
            category: Some("grammar".to_string()),
            teacher: Some("SOUZA".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.0[0].id, grammar);
    assert_eq!(filtered.0[0].filled_stages, 1);
    assert_eq!(filtered.0[0].total_stages, 9);

    let err = planner
        .list_plans_summary(&ListPlans {
            status: Some("archived".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_delete_plan_requires_confirmation() {
    let (_temp_dir, planner) = create_test_planner().await;
    let id = create_plan(&planner, "lexis").await;
    planner
        .add_comment(&comment(id, "warmUp", "author", "Note"))
        .await
        .unwrap();

    let err = planner
        .delete_plan(&DeletePlan {
            id,
            confirmed: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { field, .. } if field == "confirmed"));
    assert!(planner.load_plan(id).await.unwrap().is_some());

    let deleted = planner
        .delete_plan(&DeletePlan { id, confirmed: true })
        .await
        .unwrap();
    assert_eq!(deleted.and_then(|plan| plan.id), Some(id));
    assert!(planner.load_plan(id).await.unwrap().is_none());
    assert_eq!(planner.load_threads(id).await.unwrap().comment_count(), 0);

    let missing = planner
        .delete_plan(&DeletePlan { id, confirmed: true })
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_list_stages() {
    let (_temp_dir, planner) = create_test_planner().await;

    let listing = planner
        .list_stages(&ListStages {
            category: "mixed-drill".to_string(),
        })
        .unwrap();
    assert_eq!(listing.category, PlanCategory::MixedDrill);
    assert_eq!(listing.stages[2].key, "modelling");

    assert!(matches!(
        planner.list_stages(&ListStages {
            category: "speaking".to_string()
        }),
        Err(PlannerError::UnknownCategory { .. })
    ));
}
