//! # telos-session
//!
//! Single source of truth for "who is acting and with what authority".
//!
//! Tokens, identity, and the role flags live in one explicit [`Session`]
//! aggregate behind a [`SessionStore`], with the derived flags computed as
//! pure functions over the aggregate. Authentication state and identity
//! state can therefore never drift apart: every mutation happens under one
//! write lock, and login/logout commit all fields in a single step.
//!
//! The two credential strings are the only state that survives a process
//! restart. They are persisted through the [`TokenStore`] trait — a JSON
//! file in production, an in-memory store in tests — and are always written
//! and cleared together.

pub mod error;
pub mod session;
pub mod token_store;

pub use error::SessionError;
pub use session::{EmployeeProfile, Identity, LoginResponse, Session, SessionStore};
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};
