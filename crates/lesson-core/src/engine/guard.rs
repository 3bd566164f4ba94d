//! Drift detection and self-healing for plan documents.

use std::collections::HashSet;

use log::{debug, warn};

use super::reconcile::reconcile_with_report;
use crate::{catalog, models::PlanDocument};

/// Difference between a document's stage keys and its category's catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageDrift {
    /// Catalog keys absent from the document
    pub missing: Vec<String>,
    /// Document keys the catalog does not list (their content is lost on repair)
    pub extra: Vec<String>,
    /// Keys are the right set but not in catalog order, or repeated
    pub misordered: bool,
}

/// Compare the document's stage keys with the catalog for its category.
///
/// Returns `None` when the document is consistent.
pub fn detect_drift(doc: &PlanDocument) -> Option<StageDrift> {
    let expected: Vec<&str> = catalog::expected_keys(doc.category).collect();
    let actual: Vec<&str> = doc.stages.keys().collect();

    if actual == expected {
        return None;
    }

    let expected_set: HashSet<&str> = expected.iter().copied().collect();
    let actual_set: HashSet<&str> = actual.iter().copied().collect();

    let missing = expected
        .iter()
        .filter(|key| !actual_set.contains(*key))
        .map(|key| key.to_string())
        .collect::<Vec<_>>();
    let mut extra = Vec::new();
    for key in actual.iter().filter(|key| !expected_set.contains(*key)) {
        if !extra.iter().any(|seen: &String| seen == key) {
            extra.push(key.to_string());
        }
    }
    let misordered = missing.is_empty() && extra.is_empty();

    Some(StageDrift {
        missing,
        extra,
        misordered,
    })
}

/// Repair `doc` in place if its stages drifted from its category.
///
/// Reconciles against `doc.category`, so content of every catalog key that
/// is present survives. Stray keys are dropped; each repair that loses data
/// is logged at warn level. Returns the drift that was repaired.
pub fn ensure_consistent(doc: &mut PlanDocument) -> Option<StageDrift> {
    let drift = detect_drift(doc)?;

    let category = doc.category;
    let (repaired, _) = reconcile_with_report(std::mem::take(doc), category);
    *doc = repaired;

    if drift.extra.is_empty() {
        debug!(
            "Repaired stage drift on plan {:?}: missing {:?}",
            doc.id,
            drift.missing
        );
    } else {
        warn!(
            "Discarded stray stages {:?} from plan {:?} ({} category)",
            drift.extra,
            doc.id,
            category.as_str()
        );
    }

    Some(drift)
}
