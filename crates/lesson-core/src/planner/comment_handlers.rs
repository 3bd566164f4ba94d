//! Comment handler operations for the Planner.

use super::Planner;
use crate::{
    display::Thread,
    error::{PlannerError, Result},
    models::{AuthorRole, Comment, NewComment},
    params::{AddComment, ShowThread},
};

impl Planner {
    /// Handle appending a comment to a stage of a stored plan.
    ///
    /// An empty role means [`AuthorRole::Author`].
    ///
    /// # Errors
    ///
    /// * `PlannerError::PlanNotFound` - no plan has this ID
    /// * `PlannerError::StageNotFound` - the stage is not part of the plan's
    ///   category
    /// * `PlannerError::InvalidComment` - the message is blank
    /// * `PlannerError::InvalidInput` - the role is not recognised
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use lesson_core::{params::AddComment, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let comment = planner
    ///     .add_comment(&AddComment {
    ///         id: 1,
    ///         stage: "clarification".to_string(),
    ///         author: "Coordinator".to_string(),
    ///         role: "coordinator".to_string(),
    ///         message: "Clarify ICQs".to_string(),
    ///     })
    ///     .await?;
    /// # Result::<(), lesson_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn add_comment(&self, params: &AddComment) -> Result<Comment> {
        let role = if params.role.trim().is_empty() {
            AuthorRole::Author
        } else {
            params
                .role
                .parse::<AuthorRole>()
                .map_err(|reason| PlannerError::invalid_input("role").with_reason(reason))?
        };

        let mut session = self.open_session(params.id).await?;
        let comment = session
            .append_comment(
                &params.stage,
                NewComment::new(params.author.as_str(), role, params.message.as_str()),
            )?
            .clone();

        self.save_comment(params.id, &params.stage, &comment).await?;
        Ok(comment)
    }

    /// Handle showing the thread of one stage.
    ///
    /// Threads of stages the plan's category no longer has are still shown.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` when no plan has this ID.
    pub async fn show_thread(&self, params: &ShowThread) -> Result<Thread> {
        if self.load_plan(params.id).await?.is_none() {
            return Err(PlannerError::PlanNotFound { id: params.id });
        }

        let comments = self.get_thread(params.id, &params.stage).await?;
        Ok(Thread {
            plan_id: params.id,
            stage_key: params.stage.clone(),
            comments,
        })
    }
}
