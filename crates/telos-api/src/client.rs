// client.rs — ApiClient: the one HTTP chokepoint.
//
// Every authorized request flows through `dispatch`, which attaches the
// bearer token and implements the refresh contract: at most one refresh
// attempt per failed request, and a request that already retried once
// after refreshing must not retry again. Refresh failure is hard session
// expiry — the store is cleared before the error surfaces.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use telos_session::SessionStore;

use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError};

#[derive(Debug, Serialize)]
struct RefreshRequest {
    refresh: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Typed client for the review backend.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client with the configured base URL and request timeout.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::from)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session store this client authenticates from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // -- authorized request helpers -------------------------------------

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.get(self.url(path))).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.http.post(self.url(path))).await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(self.http.patch(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.dispatch(self.http.delete(self.url(path))).await?;
        check_status(response).await.map(|_| ())
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(builder).await?;
        decode(response).await
    }

    /// Send an authorized request, refreshing the access token at most once.
    ///
    /// The builder is cloned *before* the bearer header is attached so the
    /// retry can carry the fresh token instead of the stale one.
    async fn dispatch(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let retry = builder.try_clone();
        let authorized = match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = authorized.send().await.map_err(ApiError::from)?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(retry) = retry else {
            // Streaming bodies can't be replayed; treat as expiry.
            self.session.clear()?;
            return Err(ApiError::Auth(AuthError::SessionExpired));
        };

        tracing::debug!("request unauthorized, attempting token refresh");
        let access = self.refresh_access_token().await?;
        let retried = retry.bearer_auth(access).send().await.map_err(ApiError::from)?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            // Refreshed and still rejected — do not loop, end the session.
            tracing::warn!("request rejected again after refresh, clearing session");
            self.session.clear()?;
            return Err(ApiError::Auth(AuthError::SessionExpired));
        }
        Ok(retried)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Any failure here — missing refresh token, rejection, network — is
    /// hard session expiry: the session is cleared and the caller must
    /// re-authenticate.
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let Some(refresh) = self.session.refresh_token() else {
            self.session.clear()?;
            return Err(ApiError::Auth(AuthError::SessionExpired));
        };

        match self.exchange_refresh(refresh).await {
            Ok(access) => {
                self.session.set_access_token(access.clone())?;
                Ok(access)
            }
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed, clearing session");
                self.session.clear()?;
                Err(ApiError::Auth(AuthError::SessionExpired))
            }
        }
    }

    async fn exchange_refresh(&self, refresh: String) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.url("/auth/token/refresh/"))
            .json(&RefreshRequest { refresh })
            .send()
            .await
            .map_err(ApiError::from)?;
        let payload: RefreshResponse = decode(response).await?;
        Ok(payload.access)
    }
}

/// Map a non-success status onto the error taxonomy, extracting the
/// server's `detail` message when the body carries one.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = error_detail(response).await;
    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation { detail },
        StatusCode::UNAUTHORIZED => ApiError::Auth(AuthError::SessionExpired),
        StatusCode::FORBIDDEN => ApiError::Permission { detail },
        StatusCode::NOT_FOUND => ApiError::NotFound { detail },
        s if s.is_server_error() => ApiError::Transient {
            detail: format!("server error {}: {detail}", s.as_u16()),
        },
        s => ApiError::Unexpected {
            status: s.as_u16(),
            detail,
        },
    })
}

pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response.json().await.map_err(ApiError::from)
}

async fn error_detail(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(|d| d.as_str())
                .map(str::to_string)
        })
        .unwrap_or(text)
}
