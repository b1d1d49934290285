//! Field-level reconciliation of an edited record against the current one.
//!
//! Part of the functional core: `plan_changes` decides which store writes a
//! submitted edit needs, without performing any of them.

use serde::Serialize;

use super::types::{PlayerField, PlayerRecord};

/// Store writes needed to apply a submitted edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncPlan {
    /// Candidate matches the current record; nothing to write.
    Unchanged,
    /// Candidate belongs to another user id; write it as a full row.
    Create(PlayerRecord),
    /// Same user id; only the fields that differ are present.
    Update {
        initials: Option<String>,
        high_score: Option<i64>,
    },
}

impl SyncPlan {
    /// Fields touched by a partial update, in write order.
    pub fn fields(&self) -> Vec<PlayerField> {
        match self {
            SyncPlan::Update {
                initials,
                high_score,
            } => {
                let mut fields = Vec::with_capacity(2);
                if initials.is_some() {
                    fields.push(PlayerField::Initials);
                }
                if high_score.is_some() {
                    fields.push(PlayerField::HighScore);
                }
                fields
            }
            SyncPlan::Unchanged | SyncPlan::Create(_) => Vec::new(),
        }
    }
}

/// Decides how to persist `candidate` given the `current` record.
///
/// A different user id always means a full upsert of the candidate; the
/// current record is never its target. With the same user id each field is
/// compared on its own and only the differing ones are written.
pub fn plan_changes(current: &PlayerRecord, candidate: &PlayerRecord) -> SyncPlan {
    if candidate.user_id != current.user_id {
        return SyncPlan::Create(candidate.clone());
    }

    let initials = (candidate.initials != current.initials).then(|| candidate.initials.clone());
    let high_score = (candidate.high_score != current.high_score).then_some(candidate.high_score);

    if initials.is_none() && high_score.is_none() {
        SyncPlan::Unchanged
    } else {
        SyncPlan::Update {
            initials,
            high_score,
        }
    }
}

/// What a reconciliation ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    Unchanged,
    Updated { fields: Vec<PlayerField> },
    Created { user_id: String },
}
