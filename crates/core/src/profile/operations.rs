//! Pure decisions the repositories take while applying an update.

use super::types::CorrectionProfileResult;

/// Selects the stored profile result that a user update deletes when the
/// update replaces the user's collection.
///
/// Only the first stored profile result is deleted, whatever the new
/// collection contains. The remaining ones are detached from the user but
/// kept. Returns `None` when the user has no profile results.
pub fn profile_result_evicted_by_replacement(
    stored: &[CorrectionProfileResult],
) -> Option<i64> {
    stored.first().map(|profile| profile.id)
}
