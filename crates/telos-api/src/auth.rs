// auth.rs — Auth and identity service operations.
//
// Login and refresh are the two unauthenticated endpoints; everything else
// rides the authorized dispatch path in client.rs.

use reqwest::StatusCode;

use telos_goal::{Employee, User};
use telos_session::{EmployeeProfile, Identity, LoginResponse, Session};

use crate::client::{check_status, ApiClient};
use crate::error::{ApiError, AuthError};

/// Username/password pair for the token-issue endpoint.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl ApiClient {
    /// Authenticate and commit the whole session in one step.
    ///
    /// The token-issue payload carries identity and the employee-profile
    /// summary, so there is no window where the session is authenticated
    /// but the role flags are unknown.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, ApiError> {
        let response = self
            .http()
            .post(self.url("/auth/token/"))
            .json(credentials)
            .send()
            .await
            .map_err(ApiError::from)?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Auth(AuthError::InvalidCredentials));
        }
        let response = check_status(response).await?;
        let payload: LoginResponse = response.json().await.map_err(ApiError::from)?;
        Ok(self.session().complete_login(payload)?)
    }

    /// Drop credentials and session state. Purely local and idempotent —
    /// the backend holds no server-side session to end.
    pub fn logout(&self) -> Result<(), ApiError> {
        Ok(self.session().clear()?)
    }

    /// If authenticated but the identity is not loaded yet (tokens restored
    /// from disk), fetch the current user and employee profile and commit
    /// them together.
    ///
    /// A missing employee profile is tolerated — not every identity has
    /// one — but an authentication failure during the fetch propagates.
    pub async fn ensure_identity_loaded(&self) -> Result<Session, ApiError> {
        if !self.session().needs_identity() {
            return Ok(self.session().snapshot());
        }

        let user = self.current_user().await?;
        let profile = match self.my_profile().await {
            Ok(employee) => Some(EmployeeProfile::from(employee)),
            Err(ApiError::Auth(err)) => return Err(ApiError::Auth(err)),
            Err(err) => {
                tracing::warn!(error = %err, "no employee profile loaded for session");
                None
            }
        };
        Ok(self.session().set_identity(Identity::from(user), profile))
    }

    /// `GET /users/me/`
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/users/me/").await
    }

    /// `GET /employees/my_profile/`
    pub async fn my_profile(&self) -> Result<Employee, ApiError> {
        self.get_json("/employees/my_profile/").await
    }

    /// `GET /employees/my_team/` — the caller's direct reports.
    pub async fn my_team(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json("/employees/my_team/").await
    }
}
