// gate.rs — The executing side of the goal lifecycle gate.
//
// Each transition: local guard first (responsive UI, no traffic for an
// impossible action), then the remote mutation, then a full re-fetch of
// the goal. On remote failure the local goal is untouched and the error
// surfaces to the caller; there is no automatic retry and no optimistic
// patching.

use std::collections::BTreeSet;

use telos_goal::{allowed_actions, check, Action, Actor, Goal};

use crate::client::ApiClient;
use crate::error::{ApiError, AuthError};
use crate::goals::GoalUpdate;

/// Guards and executes goal transitions on behalf of the current session.
pub struct GoalGate<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn gate(&self) -> GoalGate<'_> {
        GoalGate { api: self }
    }
}

impl GoalGate<'_> {
    fn actor(&self) -> Result<Actor, ApiError> {
        self.api
            .session()
            .actor()
            .ok_or(ApiError::Auth(AuthError::SessionExpired))
    }

    /// The actions the current session may take on `goal` right now.
    /// Empty when the identity is not loaded — render nothing rather than
    /// guessing.
    pub fn allowed(&self, goal: &Goal) -> BTreeSet<Action> {
        match self.api.session().actor() {
            Some(actor) => allowed_actions(goal, &actor),
            None => BTreeSet::new(),
        }
    }

    fn guard(&self, goal: &Goal, action: Action) -> Result<(), ApiError> {
        let actor = self.actor()?;
        check(goal, &actor, action)?;
        Ok(())
    }

    /// Submit a draft for approval. Returns the re-fetched goal.
    pub async fn submit(&self, goal: &Goal) -> Result<Goal, ApiError> {
        self.guard(goal, Action::Submit)?;
        self.api.submit_goal(goal.id).await?;
        self.api.goal(goal.id).await
    }

    /// Approve a pending goal as the owner's direct manager.
    pub async fn approve(&self, goal: &Goal) -> Result<Goal, ApiError> {
        self.guard(goal, Action::Approve)?;
        self.api.approve_goal(goal.id).await?;
        self.api.goal(goal.id).await
    }

    /// Complete an in-progress goal.
    pub async fn complete(&self, goal: &Goal) -> Result<Goal, ApiError> {
        self.guard(goal, Action::Complete)?;
        self.api.complete_goal(goal.id).await?;
        self.api.goal(goal.id).await
    }

    /// Append one progress entry and return the re-fetched goal.
    pub async fn add_progress(&self, goal: &Goal, description: &str) -> Result<Goal, ApiError> {
        self.guard(goal, Action::AddProgress)?;
        self.api.add_progress(goal.id, description).await?;
        self.api.goal(goal.id).await
    }

    /// Edit a draft. Returns the re-fetched goal.
    pub async fn update(&self, goal: &Goal, update: &GoalUpdate) -> Result<Goal, ApiError> {
        self.guard(goal, Action::Edit)?;
        self.api.update_goal(goal.id, update).await?;
        self.api.goal(goal.id).await
    }

    /// Delete a draft.
    pub async fn delete(&self, goal: &Goal) -> Result<(), ApiError> {
        self.guard(goal, Action::Delete)?;
        self.api.delete_goal(goal.id).await
    }
}
