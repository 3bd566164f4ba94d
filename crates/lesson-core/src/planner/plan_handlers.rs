//! Plan handler operations that take interface parameters and return
//! formatted wrapper types for the Planner.

use log::info;

use super::Planner;
use crate::{
    catalog,
    display::{CategoryChange, PlanSummaries, StageListing},
    engine::EditSession,
    error::{PlannerError, Result},
    models::{FieldPath, PlanCategory, PlanDocument, PlanField, PlanFilter},
    params::{ChangeCategory, CreatePlan, DeletePlan, Id, ListPlans, ListStages, SetField},
};

impl Planner {
    /// Handle creating a new plan.
    ///
    /// The category decides the stage set; optional metadata is validated the
    /// same way [`Planner::set_field`] validates it.
    ///
    /// # Errors
    ///
    /// * `PlannerError::UnknownCategory` - the category name is not known
    /// * `PlannerError::InvalidInput` - date or time do not parse
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lesson_core::{params::CreatePlan, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let plan = planner
    ///     .create_plan(&CreatePlan {
    ///         category: "grammar".to_string(),
    ///         teacher: Some("Ana Souza".to_string()),
    ///         date: Some("2026-03-14".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// # Result::<(), lesson_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<PlanDocument> {
        let category = params.category.parse::<PlanCategory>()?;
        let mut session = EditSession::create(category);

        let metadata = [
            (PlanField::ClassName, &params.class_name),
            (PlanField::Teacher, &params.teacher),
            (PlanField::Date, &params.date),
            (PlanField::Time, &params.time),
            (PlanField::MainAim, &params.main_aim),
            (PlanField::SubsidiaryAim, &params.subsidiary_aim),
        ];
        for (field, value) in metadata {
            if let Some(value) = value {
                session.set_field(&FieldPath::Plan(field), value)?;
            }
        }

        let plan = self.save_session(&mut session).await?;
        info!(
            "Created {} plan {:?}",
            category.as_str(),
            plan.id.unwrap_or_default()
        );
        Ok(plan)
    }

    /// Handle showing a complete plan with all its stages.
    ///
    /// Returns `None` if the plan doesn't exist.
    pub async fn show_plan(&self, params: &Id) -> Result<Option<PlanDocument>> {
        self.load_plan(params.id).await
    }

    /// Handle setting one metadata or stage field and saving the plan.
    ///
    /// # Errors
    ///
    /// * `PlannerError::PlanNotFound` - no plan has this ID
    /// * `PlannerError::UnknownField` - the field path is not recognised
    /// * `PlannerError::StageNotFound` - the stage is not part of the plan's
    ///   category
    /// * `PlannerError::InvalidInput` - the value does not parse, or the path
    ///   names the category
    /// * `PlannerError::InvalidTransition` - the status change skips a step of
    ///   the review workflow
    pub async fn set_field(&self, params: &SetField) -> Result<PlanDocument> {
        let path = params.field.parse::<FieldPath>()?;
        let mut session = self.open_session(params.id).await?;

        session.set_field(&path, &params.value)?;
        self.save_session(&mut session).await
    }

    /// Handle changing a plan's category.
    ///
    /// Stages shared by both categories keep their content, new stages start
    /// empty and the rest are discarded. Threads are kept for every stage.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lesson_core::{params::ChangeCategory, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let change = planner
    ///     .change_category(&ChangeCategory {
    ///         id: 1,
    ///         category: "grammar".to_string(),
    ///     })
    ///     .await?;
    /// println!("dropped: {:?}", change.report.dropped);
    /// # Result::<(), lesson_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn change_category(&self, params: &ChangeCategory) -> Result<CategoryChange> {
        let category = params.category.parse::<PlanCategory>()?;
        let mut session = self.open_session(params.id).await?;
        let from = session.document().category;

        let report = session.change_category(category);
        let plan = self.save_session(&mut session).await?;

        if !report.dropped.is_empty() {
            info!(
                "Plan {} moved from {} to {}, discarding {:?}",
                params.id,
                from.as_str(),
                category.as_str(),
                report.dropped
            );
        }

        Ok(CategoryChange { from, plan, report })
    }

    /// Handle listing plans as summaries with stage and comment counts.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::UnknownCategory` or `PlannerError::InvalidInput`
    /// when the category or status filter does not parse.
    pub async fn list_plans_summary(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let filter = PlanFilter::try_from(params)?;
        let summaries = self.list_summaries(Some(filter)).await?;
        Ok(PlanSummaries(summaries))
    }

    /// Handle permanently deleting a plan with confirmation.
    ///
    /// Removes the plan, its stages and every comment thread. Returns the
    /// deleted plan, or `None` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `confirmed` is false.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<PlanDocument>> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to permanently delete the plan and its comments.",
            ));
        }

        let plan = self.load_plan(params.id).await?;
        if plan.is_some() {
            self.delete_plan_by_id(params.id).await?;
            info!("Deleted plan {}", params.id);
        }

        Ok(plan)
    }

    /// Handle listing the stage catalog of a category.
    pub fn list_stages(&self, params: &ListStages) -> Result<StageListing> {
        let category = params.category.parse::<PlanCategory>()?;
        Ok(StageListing {
            category,
            stages: catalog::stages_for(category),
        })
    }
}
