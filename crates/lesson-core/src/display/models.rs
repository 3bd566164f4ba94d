//! Display implementations for domain models.
//!
//! Kept apart from the model definitions. Output is markdown for the
//! terminal renderer and MCP tool results.

use std::fmt;

use super::datetime::{LessonSchedule, LocalDateTime};
use crate::{
    catalog,
    models::{
        AuthorRole, Comment, InteractionPattern, PlanCategory, PlanDocument, PlanStatus,
        PlanSummary, Stage,
    },
};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for InteractionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl fmt::Display for PlanDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => writeln!(f, "# {id}. {}", self.title())?,
            None => writeln!(f, "# {}", self.title())?,
        }
        writeln!(f)?;

        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        if !self.class_name.is_empty() {
            writeln!(f, "- Class: {}", self.class_name)?;
        }
        if !self.teacher.is_empty() {
            writeln!(f, "- Teacher: {}", self.teacher)?;
        }
        if self.date.is_some() || self.time.is_some() {
            writeln!(f, "- Scheduled: {}", LessonSchedule(self.date, self.time))?;
        }
        if !self.main_aim.is_empty() {
            writeln!(f, "- Main aim: {}", self.main_aim)?;
        }
        if !self.subsidiary_aim.is_empty() {
            writeln!(f, "- Subsidiary aim: {}", self.subsidiary_aim)?;
        }
        if self.id.is_some() {
            writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
            writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        }

        writeln!(f, "\n## Stages")?;
        writeln!(f)?;
        for (index, stage) in self.stages.iter().enumerate() {
            self.fmt_stage(f, index + 1, stage)?;
        }

        Ok(())
    }
}

impl PlanDocument {
    fn fmt_stage(&self, f: &mut fmt::Formatter<'_>, position: usize, stage: &Stage) -> fmt::Result {
        let definition = catalog::definition(self.category, &stage.key);
        let name = definition.map_or(stage.key.as_str(), |d| d.display_name);
        let optional = definition.is_some_and(|d| d.hints.optional);
        let content = &stage.content;

        write!(f, "### {position}. {name}")?;
        if optional {
            write!(f, " (optional)")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if !content.is_filled() {
            writeln!(f, "_Not planned yet._")?;
            writeln!(f)?;
            return Ok(());
        }

        match (content.duration, content.interaction_pattern) {
            (Some(duration), Some(pattern)) => writeln!(f, "*{duration} · {pattern}*")?,
            (Some(duration), None) => writeln!(f, "*{duration}*")?,
            (None, Some(pattern)) => writeln!(f, "*{pattern}*")?,
            (None, None) => {}
        }
        if content.duration.is_some() || content.interaction_pattern.is_some() {
            writeln!(f)?;
        }

        if !content.activity_description.is_empty() {
            writeln!(f, "{}", content.activity_description)?;
            writeln!(f)?;
        }

        if !content.instructions_and_checks.is_empty() {
            writeln!(f, "#### Instructions and checks")?;
            writeln!(f)?;
            writeln!(f, "{}", content.instructions_and_checks)?;
            writeln!(f)?;
        }

        if !content.anticipated_problems.is_empty() {
            writeln!(f, "#### Anticipated problems")?;
            writeln!(f)?;
            writeln!(f, "{}", content.anticipated_problems)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "**{}** ({}, {})",
            self.author,
            self.author_role,
            LocalDateTime(&self.timestamp)
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.message)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({}/{} stages)",
            self.title, self.id, self.filled_stages, self.total_stages
        )?;
        writeln!(f)?;

        writeln!(f, "- **Category**: {}", self.category)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        if !self.teacher.is_empty() {
            writeln!(f, "- **Teacher**: {}", self.teacher)?;
        }
        if let Some(date) = self.date {
            writeln!(f, "- **Date**: {date}")?;
        }
        if self.comment_count > 0 {
            writeln!(f, "- **Comments**: {}", self.comment_count)?;
        }
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?;

        Ok(())
    }
}
