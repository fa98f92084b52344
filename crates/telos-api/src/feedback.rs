// feedback.rs — Thin typed wrappers over the feedback service.
//
// The feedback workflow itself (who may rate what, when) is server-side
// and out of scope for this client core; these are plain call-response
// bindings so consumers get typed payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use telos_goal::{Employee, Goal};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackRequestStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfAssessment {
    pub id: i64,
    pub goal: i64,
    pub rating: i32,
    pub comments: String,
    pub areas_to_improve: String,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSelfAssessment {
    pub rating: i32,
    pub comments: String,
    pub areas_to_improve: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub id: i64,
    pub goal: i64,
    pub reviewer: i64,
    pub requested_by: i64,
    pub message: String,
    pub status: FeedbackRequestStatus,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
}

/// Expanded form returned by the list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequestDetail {
    pub id: i64,
    pub goal: Goal,
    pub reviewer: Employee,
    pub requested_by: Employee,
    pub message: String,
    pub status: FeedbackRequestStatus,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFeedbackRequest {
    pub goal: i64,
    pub reviewer: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerFeedback {
    pub id: i64,
    pub feedback_request: i64,
    pub rating: i32,
    pub comments: String,
    pub areas_to_improve: String,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPeerFeedback {
    pub rating: i32,
    pub comments: String,
    pub areas_to_improve: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertEvaluation {
    pub id: i64,
    pub goal: i64,
    pub expert: i64,
    pub final_rating: i32,
    pub comments: String,
    pub areas_to_improve: String,
    #[serde(rename = "created_dttm")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewExpertEvaluation {
    pub final_rating: i32,
    pub comments: String,
    pub areas_to_improve: String,
}

impl ApiClient {
    pub async fn self_assessment(&self, goal_id: i64) -> Result<SelfAssessment, ApiError> {
        self.get_json(&format!("/feedback/goals/{goal_id}/self-assessment/"))
            .await
    }

    pub async fn add_self_assessment(
        &self,
        goal_id: i64,
        assessment: &NewSelfAssessment,
    ) -> Result<SelfAssessment, ApiError> {
        self.post_json(&format!("/feedback/goals/{goal_id}/self-assessment/"), assessment)
            .await
    }

    pub async fn create_feedback_request(
        &self,
        request: &NewFeedbackRequest,
    ) -> Result<FeedbackRequest, ApiError> {
        self.post_json("/feedback/requests/", request).await
    }

    pub async fn my_feedback_requests(&self) -> Result<Vec<FeedbackRequestDetail>, ApiError> {
        self.get_json("/feedback/requests/my-requests/").await
    }

    pub async fn pending_feedback_requests(&self) -> Result<Vec<FeedbackRequestDetail>, ApiError> {
        self.get_json("/feedback/requests/pending/").await
    }

    pub async fn submit_peer_feedback(
        &self,
        request_id: i64,
        feedback: &NewPeerFeedback,
    ) -> Result<PeerFeedback, ApiError> {
        self.post_json(&format!("/feedback/requests/{request_id}/feedback/"), feedback)
            .await
    }

    pub async fn peer_feedbacks(&self, goal_id: i64) -> Result<Vec<PeerFeedback>, ApiError> {
        self.get_json(&format!("/feedback/goals/{goal_id}/peer-feedbacks/"))
            .await
    }

    pub async fn expert_evaluation(&self, goal_id: i64) -> Result<ExpertEvaluation, ApiError> {
        self.get_json(&format!("/feedback/goals/{goal_id}/expert-evaluation/"))
            .await
    }

    pub async fn submit_expert_evaluation(
        &self,
        goal_id: i64,
        evaluation: &NewExpertEvaluation,
    ) -> Result<ExpertEvaluation, ApiError> {
        self.post_json(&format!("/feedback/goals/{goal_id}/expert-evaluation/"), evaluation)
            .await
    }

    /// Goal ids awaiting expert evaluation (expertise leaders).
    pub async fn goals_pending_expert_evaluation(&self) -> Result<Vec<i64>, ApiError> {
        self.get_json("/feedback/goals/pending-expert-evaluation/")
            .await
    }
}
