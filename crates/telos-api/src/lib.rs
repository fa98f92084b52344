//! # telos-api
//!
//! Typed REST client for the Telos review backend.
//!
//! Everything talks to the backend through one [`ApiClient`]: it owns the
//! base URL, a bounded per-request timeout, bearer injection from the
//! [`telos_session::SessionStore`], and the token-refresh interceptor —
//! a request that comes back 401 triggers at most one refresh and one
//! retry; a second 401 ends the session.
//!
//! Goal mutations go through the executing [`GoalGate`], which checks the
//! pure guard table locally (so an impossible action fails without network
//! traffic), invokes the remote mutation, and re-fetches the goal. The
//! remote stays the single source of truth: there is no optimistic
//! patching, and a server-side denial overrides the local guard.
//!
//! All request futures are cancel-on-drop: a caller that goes away before
//! the response arrives aborts the in-flight request and can never apply a
//! stale result.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod feedback;
pub mod gate;
pub mod goals;

pub use auth::LoginCredentials;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, AuthError};
pub use gate::GoalGate;
pub use goals::{GoalDraft, GoalUpdate};
