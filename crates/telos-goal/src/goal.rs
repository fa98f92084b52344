// goal.rs — Goal: the aggregate the whole system revolves around.
//
// A goal belongs to exactly one employee (immutable after creation), carries
// a review period and an append-only progress log, and moves through a
// strictly forward status enumeration. `cancelled` is the one exception:
// a terminal absorbing state reachable from any non-terminal status, but
// never produced by a client action.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::error::GoalError;

/// The lifecycle status of a goal.
///
/// Forward path: draft → pending_approval → (approved →) in_progress
/// → pending_assessment → completed. Whether approval parks a goal at
/// `approved` or starts it immediately is a named policy constant,
/// [`crate::gate::APPROVAL_TARGET`] — both hops are valid on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Freshly created, editable, visible only to its owner.
    Draft,

    /// Submitted — waiting for the owner's direct manager.
    PendingApproval,

    /// Approved but not yet started.
    Approved,

    /// Actively worked on; the owner logs progress here.
    InProgress,

    /// Work finished — parked for the assessment pipeline.
    PendingAssessment,

    /// Assessed and closed. Terminal.
    Completed,

    /// Administratively cancelled. Terminal, absorbing.
    Cancelled,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::Draft => write!(f, "draft"),
            GoalStatus::PendingApproval => write!(f, "pending_approval"),
            GoalStatus::Approved => write!(f, "approved"),
            GoalStatus::InProgress => write!(f, "in_progress"),
            GoalStatus::PendingAssessment => write!(f, "pending_assessment"),
            GoalStatus::Completed => write!(f, "completed"),
            GoalStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl GoalStatus {
    /// All statuses, in lifecycle order. Used by the guard-table tests to
    /// sweep every (status, actor) pair.
    pub const ALL: [GoalStatus; 7] = [
        GoalStatus::Draft,
        GoalStatus::PendingApproval,
        GoalStatus::Approved,
        GoalStatus::InProgress,
        GoalStatus::PendingAssessment,
        GoalStatus::Completed,
        GoalStatus::Cancelled,
    ];

    /// Terminal statuses have no outgoing transitions, for any role.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GoalStatus::Completed | GoalStatus::Cancelled)
    }

    /// Check whether transitioning from this status to `next` is valid.
    ///
    /// This is the wire-level validity table: it accepts every hop the
    /// backend can produce, including the administrative cancellation of
    /// any non-terminal goal. Which hops a given actor may *trigger* is a
    /// separate question answered by [`crate::gate`].
    pub fn can_transition_to(&self, next: &GoalStatus) -> bool {
        // Cancellation is allowed from any non-terminal status.
        if *next == GoalStatus::Cancelled {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (GoalStatus::Draft, GoalStatus::PendingApproval)
                | (GoalStatus::PendingApproval, GoalStatus::Approved)
                | (GoalStatus::PendingApproval, GoalStatus::InProgress)
                | (GoalStatus::Approved, GoalStatus::InProgress)
                | (GoalStatus::InProgress, GoalStatus::PendingAssessment)
                | (GoalStatus::InProgress, GoalStatus::Completed)
                | (GoalStatus::PendingAssessment, GoalStatus::Completed)
        )
    }
}

/// One immutable entry of a goal's progress log. Entries are appended by the
/// owner while the goal is in progress and are never edited or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub id: i64,
    pub goal: i64,
    pub description: String,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
}

/// A goal: one employee's objective for a review period.
///
/// Ownership (`employee`) is immutable after creation. The canonical progress
/// field is `progress_entries`; the legacy duplicate `progress_updates` wire
/// field is deliberately not modeled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub expected_results: String,
    pub start_period: NaiveDate,
    pub end_period: NaiveDate,
    pub status: GoalStatus,
    pub employee: Employee,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_dttm")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub progress_entries: Vec<Progress>,
}

impl Goal {
    /// Move the goal to a new status, enforcing the validity table.
    ///
    /// The remote repository is the source of truth for status changes; this
    /// exists so local fixtures and mocks cannot drift into hops the backend
    /// would never produce.
    pub fn transition(&mut self, new_status: GoalStatus) -> Result<(), GoalError> {
        if !self.status.can_transition_to(&new_status) {
            return Err(GoalError::InvalidTransition {
                goal_id: self.id,
                from: self.status,
                to: new_status,
            });
        }
        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }
}
