//! Stage reconciliation against the catalog.

use serde::Serialize;

use crate::{
    catalog,
    models::{PlanCategory, PlanDocument, StageContent, StageMap},
};

/// What a reconciliation did to the stage collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Keys whose content was carried over
    pub kept: Vec<String>,
    /// Keys inserted with empty content
    pub created: Vec<String>,
    /// Keys removed together with their content
    pub dropped: Vec<String>,
}

impl ReconcileReport {
    /// Whether the stage key set changed.
    pub fn changed_keys(&self) -> bool {
        !self.created.is_empty() || !self.dropped.is_empty()
    }
}

/// Bring `doc` into agreement with the catalog entry for `new_category`.
///
/// Stages whose key is in the target list keep their content; missing keys
/// get [`StageContent::empty`]; every other key is dropped with its content.
/// The result stores stages in catalog order and has `category` set to
/// `new_category`.
pub fn reconcile(doc: PlanDocument, new_category: PlanCategory) -> PlanDocument {
    reconcile_with_report(doc, new_category).0
}

/// [`reconcile`], also reporting which keys were kept, created and dropped.
pub fn reconcile_with_report(
    mut doc: PlanDocument,
    new_category: PlanCategory,
) -> (PlanDocument, ReconcileReport) {
    let mut previous = std::mem::take(&mut doc.stages);
    let mut report = ReconcileReport::default();

    let stages: StageMap = catalog::expected_keys(new_category)
        .map(|key| {
            let content = match previous.remove(key) {
                Some(content) => {
                    report.kept.push(key.to_string());
                    content
                }
                None => {
                    report.created.push(key.to_string());
                    StageContent::empty()
                }
            };
            (key.to_string(), content)
        })
        .collect();

    report.dropped = previous.keys().map(String::from).collect();

    doc.stages = stages;
    doc.category = new_category;
    (doc, report)
}
