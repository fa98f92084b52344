// gate.rs — The goal lifecycle gate: one pure decision table.
//
// Every view-level question of the form "may this person do this to this
// goal right now?" is answered here and nowhere else. The checks run in a
// fixed order: status first, then identity. The remote backend remains the
// final arbiter — a server-side denial overrides whatever this table said.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::employee::Role;
use crate::error::GoalError;
use crate::goal::{Goal, GoalStatus};

/// Approving a pending goal starts it immediately rather than parking it at
/// `approved`. Named policy: the `approved` status stays valid on the wire,
/// but approval advances straight to `in_progress`.
pub const APPROVAL_TARGET: GoalStatus = GoalStatus::InProgress;

/// Completing an in-progress goal parks it for the assessment pipeline.
/// The `pending_assessment → completed` hop is not a client action.
pub const COMPLETION_TARGET: GoalStatus = GoalStatus::PendingAssessment;

/// The transition actions a client can trigger on a goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Edit,
    Delete,
    Submit,
    Approve,
    AddProgress,
    Complete,
}

impl Action {
    /// All actions, used to enumerate the decision table.
    pub const ALL: [Action; 6] = [
        Action::Edit,
        Action::Delete,
        Action::Submit,
        Action::Approve,
        Action::AddProgress,
        Action::Complete,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Edit => write!(f, "edit"),
            Action::Delete => write!(f, "delete"),
            Action::Submit => write!(f, "submit"),
            Action::Approve => write!(f, "approve"),
            Action::AddProgress => write!(f, "add_progress"),
            Action::Complete => write!(f, "complete"),
        }
    }
}

/// The identity invoking a lifecycle action, reduced to the facts the guard
/// predicates need: the account id, the employee profile id (if any), and
/// the role/manager flags derived from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub employee_id: Option<i64>,
    pub is_manager: bool,
    pub role: Role,
}

impl Actor {
    /// True when this actor is the owner of `goal`.
    fn owns(&self, goal: &Goal) -> bool {
        goal.employee.user.id == self.user_id
    }

    /// True when this actor is the direct manager of the goal's owner.
    ///
    /// Any-manager approval is deliberately not enough: the owner's
    /// `manager` reference must point at this actor's employee profile.
    fn manages_owner_of(&self, goal: &Goal) -> bool {
        match (goal.employee.manager, self.employee_id) {
            (Some(manager_id), Some(employee_id)) => manager_id == employee_id,
            _ => false,
        }
    }
}

/// Check whether `actor` may perform `action` on `goal` right now.
///
/// Status is checked before identity so a caller probing a terminal goal
/// learns "wrong moment" rather than anything about ownership.
pub fn check(goal: &Goal, actor: &Actor, action: Action) -> Result<(), GoalError> {
    let status = goal.status;
    match action {
        Action::Edit | Action::Delete => {
            if status != GoalStatus::Draft {
                return Err(GoalError::WrongStatus { action, status });
            }
            if !actor.owns(goal) {
                return Err(GoalError::NotOwner { action });
            }
        }
        Action::Submit => {
            if status != GoalStatus::Draft {
                return Err(GoalError::WrongStatus { action, status });
            }
            if !actor.owns(goal) {
                return Err(GoalError::NotOwner { action });
            }
            // Nobody to submit to — the backend rejects this too.
            if goal.employee.manager.is_none() {
                return Err(GoalError::NoManager);
            }
        }
        Action::Approve => {
            if status != GoalStatus::PendingApproval {
                return Err(GoalError::WrongStatus { action, status });
            }
            if !actor.is_manager || !actor.manages_owner_of(goal) {
                return Err(GoalError::NotApprover);
            }
        }
        Action::AddProgress | Action::Complete => {
            if status != GoalStatus::InProgress {
                return Err(GoalError::WrongStatus { action, status });
            }
            if !actor.owns(goal) {
                return Err(GoalError::NotOwner { action });
            }
        }
    }
    Ok(())
}

/// The set of actions currently legal for `actor` on `goal`.
///
/// This is what list and detail views render from; anything not in the set
/// is simply not offered.
pub fn allowed_actions(goal: &Goal, actor: &Actor) -> BTreeSet<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| check(goal, actor, *action).is_ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::{Employee, User};
    use chrono::{NaiveDate, Utc};

    const OWNER_USER: i64 = 3;
    const OWNER_EMPLOYEE: i64 = 7;
    const MANAGER_USER: i64 = 4;
    const MANAGER_EMPLOYEE: i64 = 2;

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
        }
    }

    fn goal_in(status: GoalStatus) -> Goal {
        let now = Utc::now();
        Goal {
            id: 42,
            title: "Improve onboarding docs".to_string(),
            description: "Rewrite the onboarding guide".to_string(),
            expected_results: "New guide published".to_string(),
            start_period: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_period: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            status,
            employee: Employee {
                id: OWNER_EMPLOYEE,
                user: user(OWNER_USER, Role::Employee),
                hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
                position: "Engineer".to_string(),
                manager: Some(MANAGER_EMPLOYEE),
                manager_name: None,
                is_manager: false,
                subordinates: None,
            },
            created_at: now,
            updated_at: now,
            progress_entries: Vec::new(),
        }
    }

    fn owner() -> Actor {
        Actor {
            user_id: OWNER_USER,
            employee_id: Some(OWNER_EMPLOYEE),
            is_manager: false,
            role: Role::Employee,
        }
    }

    fn direct_manager() -> Actor {
        Actor {
            user_id: MANAGER_USER,
            employee_id: Some(MANAGER_EMPLOYEE),
            is_manager: true,
            role: Role::Employee,
        }
    }

    fn unrelated_manager() -> Actor {
        Actor {
            user_id: 50,
            employee_id: Some(51),
            is_manager: true,
            role: Role::Employee,
        }
    }

    fn bystander() -> Actor {
        Actor {
            user_id: 60,
            employee_id: Some(61),
            is_manager: false,
            role: Role::ExpertiseLeader,
        }
    }

    #[test]
    fn draft_owner_may_edit_delete_submit() {
        let goal = goal_in(GoalStatus::Draft);
        let allowed = allowed_actions(&goal, &owner());
        assert_eq!(
            allowed,
            BTreeSet::from([Action::Edit, Action::Delete, Action::Submit])
        );
    }

    #[test]
    fn submit_requires_a_manager() {
        let mut goal = goal_in(GoalStatus::Draft);
        goal.employee.manager = None;
        assert_eq!(
            check(&goal, &owner(), Action::Submit),
            Err(GoalError::NoManager)
        );
        // Edit and delete are unaffected.
        assert!(check(&goal, &owner(), Action::Edit).is_ok());
    }

    #[test]
    fn pending_approval_only_direct_manager_may_approve() {
        let goal = goal_in(GoalStatus::PendingApproval);
        assert!(check(&goal, &direct_manager(), Action::Approve).is_ok());
        assert_eq!(
            check(&goal, &unrelated_manager(), Action::Approve),
            Err(GoalError::NotApprover)
        );
        assert_eq!(
            check(&goal, &owner(), Action::Approve),
            Err(GoalError::NotApprover)
        );
    }

    #[test]
    fn approve_requires_manager_flag_even_for_right_employee_id() {
        let goal = goal_in(GoalStatus::PendingApproval);
        let mut demoted = direct_manager();
        demoted.is_manager = false;
        assert_eq!(
            check(&goal, &demoted, Action::Approve),
            Err(GoalError::NotApprover)
        );
    }

    #[test]
    fn add_progress_denied_everywhere_except_in_progress_owner() {
        // Property sweep: every (status, actor) pair except
        // (in_progress, owner) must deny add_progress.
        let actors = [owner(), direct_manager(), unrelated_manager(), bystander()];
        for status in GoalStatus::ALL {
            for actor in &actors {
                let goal = goal_in(status);
                let permitted = check(&goal, actor, Action::AddProgress).is_ok();
                let expected = status == GoalStatus::InProgress && *actor == owner();
                assert_eq!(
                    permitted, expected,
                    "add_progress in {status} for actor {:?}",
                    actor.user_id
                );
            }
        }
    }

    #[test]
    fn submit_not_offered_once_status_leaves_draft() {
        for status in GoalStatus::ALL {
            if status == GoalStatus::Draft {
                continue;
            }
            let goal = goal_in(status);
            assert_eq!(
                check(&goal, &owner(), Action::Submit),
                Err(GoalError::WrongStatus {
                    action: Action::Submit,
                    status
                })
            );
        }
    }

    #[test]
    fn terminal_statuses_offer_nothing_to_anyone() {
        let actors = [owner(), direct_manager(), unrelated_manager(), bystander()];
        for status in [GoalStatus::Completed, GoalStatus::Cancelled] {
            for actor in &actors {
                let goal = goal_in(status);
                assert!(
                    allowed_actions(&goal, actor).is_empty(),
                    "{status} must be absorbing for actor {}",
                    actor.user_id
                );
            }
        }
    }

    #[test]
    fn pending_assessment_offers_nothing() {
        let goal = goal_in(GoalStatus::PendingAssessment);
        assert!(allowed_actions(&goal, &owner()).is_empty());
        assert!(allowed_actions(&goal, &direct_manager()).is_empty());
    }

    #[test]
    fn in_progress_owner_may_log_progress_and_complete() {
        let goal = goal_in(GoalStatus::InProgress);
        assert_eq!(
            allowed_actions(&goal, &owner()),
            BTreeSet::from([Action::AddProgress, Action::Complete])
        );
        assert!(allowed_actions(&goal, &direct_manager()).is_empty());
    }

    #[test]
    fn approved_status_offers_nothing_until_started() {
        // With APPROVAL_TARGET == in_progress the approved status is never
        // produced by this client, but it remains valid on the wire and the
        // guard table must stay closed there.
        let goal = goal_in(GoalStatus::Approved);
        assert!(allowed_actions(&goal, &owner()).is_empty());
    }

    #[test]
    fn policy_targets_are_valid_transitions() {
        assert!(GoalStatus::PendingApproval.can_transition_to(&APPROVAL_TARGET));
        assert!(GoalStatus::InProgress.can_transition_to(&COMPLETION_TARGET));
        assert_eq!(APPROVAL_TARGET, GoalStatus::InProgress);
        assert_eq!(COMPLETION_TARGET, GoalStatus::PendingAssessment);
    }
}
