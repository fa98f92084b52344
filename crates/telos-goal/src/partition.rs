// partition.rs — Split a mixed goal collection into dashboard buckets.
//
// "Mine" is ownership by user id. "My team's" is one level of the reporting
// tree only: the owner's direct manager must be the actor. Second-level
// reports never appear, and goals owned by unrelated employees are dropped.

use serde::Serialize;

use crate::gate::Actor;
use crate::goal::{Goal, GoalStatus};

/// A goal collection partitioned for the team/dashboard views.
///
/// Team goals are further split so the pending-approval bucket can be
/// rendered with the approve action attached and the rest read-only.
#[derive(Debug, Default, Serialize)]
pub struct TeamView {
    /// Goals owned by the actor.
    pub mine: Vec<Goal>,
    /// Direct reports' goals waiting for the actor's approval.
    pub team_pending_approval: Vec<Goal>,
    /// Direct reports' goals in any other status (read-only).
    pub team_other: Vec<Goal>,
}

impl TeamView {
    /// Partition `goals` relative to `actor`.
    pub fn partition(goals: Vec<Goal>, actor: &Actor) -> Self {
        let mut view = TeamView::default();
        let dropped = goals.len();

        for goal in goals {
            if goal.employee.user.id == actor.user_id {
                view.mine.push(goal);
            } else if actor.employee_id.is_some() && goal.employee.manager == actor.employee_id {
                if goal.status == GoalStatus::PendingApproval {
                    view.team_pending_approval.push(goal);
                } else {
                    view.team_other.push(goal);
                }
            }
            // Anything else (second-level reports, unrelated employees) is
            // not this actor's to see in these views.
        }

        let kept = view.mine.len() + view.team_pending_approval.len() + view.team_other.len();
        tracing::debug!(
            mine = view.mine.len(),
            pending = view.team_pending_approval.len(),
            other = view.team_other.len(),
            dropped = dropped - kept,
            "partitioned goal collection"
        );
        view
    }
}
