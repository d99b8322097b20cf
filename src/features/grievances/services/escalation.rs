use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::officers::models::Officer;
use crate::features::officers::OfficerRepository;

/// Pick the officer a grievance against `original` is escalated to.
///
/// Walks up the rank ladder one step at a time and takes the first rank that
/// has an active, approved officer, preferring the complaint's department.
pub async fn find_escalation_target(
    officers: &dyn OfficerRepository,
    original: &Officer,
    department_id: Uuid,
) -> Result<Officer> {
    if original.rank.next().is_none() {
        return Err(AppError::Conflict(format!(
            "The complaint was handled by a {}; there is no higher rank to escalate to",
            original.rank
        )));
    }

    for rank in original.rank.higher_ranks() {
        if let Some(officer) = officers
            .find_escalation_candidate(rank, department_id)
            .await?
        {
            tracing::debug!(
                "Escalating from officer {} ({}) to officer {} ({})",
                original.id,
                original.rank,
                officer.id,
                rank
            );
            return Ok(officer);
        }
    }

    Err(AppError::Conflict(
        "No higher-ranked officer is available to review this grievance".to_string(),
    ))
}
