// goals.rs — Goal repository operations.
//
// Plain typed wrappers over the REST surface. Lifecycle transitions
// (submit/approve/complete/progress) should normally be driven through
// the GoalGate in gate.rs, which adds the local guard and the re-fetch.

use chrono::NaiveDate;
use serde::Serialize;

use telos_goal::{Goal, Progress};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Payload for creating a goal. The server assigns id, owner, status
/// (always `draft`), and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub expected_results: String,
    pub start_period: NaiveDate,
    pub end_period: NaiveDate,
}

/// Partial update for a draft goal. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_period: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_period: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct NewProgress<'a> {
    description: &'a str,
}

impl ApiClient {
    /// `GET /goals/` — every goal the caller may see, per server-side rules.
    pub async fn goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json("/goals/").await
    }

    /// `GET /goals/my_goals/`
    pub async fn my_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json("/goals/my_goals/").await
    }

    /// `GET /goals/pending_approval/` — goals waiting on the caller.
    pub async fn pending_approval_goals(&self) -> Result<Vec<Goal>, ApiError> {
        self.get_json("/goals/pending_approval/").await
    }

    /// `GET /goals/employee/{id}/` — one direct report's goals.
    pub async fn employee_goals(&self, employee_id: i64) -> Result<Vec<Goal>, ApiError> {
        self.get_json(&format!("/goals/employee/{employee_id}/")).await
    }

    /// `GET /goals/{id}/`
    pub async fn goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.get_json(&format!("/goals/{id}/")).await
    }

    /// `POST /goals/` — create a new draft.
    pub async fn create_goal(&self, draft: &GoalDraft) -> Result<Goal, ApiError> {
        self.post_json("/goals/", draft).await
    }

    /// `PATCH /goals/{id}/` — update a draft.
    pub async fn update_goal(&self, id: i64, update: &GoalUpdate) -> Result<Goal, ApiError> {
        self.patch_json(&format!("/goals/{id}/"), update).await
    }

    /// `DELETE /goals/{id}/` — delete a draft.
    pub async fn delete_goal(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/goals/{id}/")).await
    }

    /// `POST /goals/{id}/submit/`
    pub async fn submit_goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.post_action(&format!("/goals/{id}/submit/")).await
    }

    /// `POST /goals/{id}/approve/`
    pub async fn approve_goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.post_action(&format!("/goals/{id}/approve/")).await
    }

    /// `POST /goals/{id}/complete/`
    pub async fn complete_goal(&self, id: i64) -> Result<Goal, ApiError> {
        self.post_action(&format!("/goals/{id}/complete/")).await
    }

    /// `GET /goals/{id}/progress/` — the append-only progress log.
    pub async fn progress(&self, goal_id: i64) -> Result<Vec<Progress>, ApiError> {
        self.get_json(&format!("/goals/{goal_id}/progress/")).await
    }

    /// `POST /goals/{id}/progress/` — append one immutable entry.
    pub async fn add_progress(&self, goal_id: i64, description: &str) -> Result<Progress, ApiError> {
        self.post_json(
            &format!("/goals/{goal_id}/progress/"),
            &NewProgress { description },
        )
        .await
    }
}
