// session.rs — The Session aggregate and its store.
//
// Invariant: identity and employee profile are set together and cleared
// together. A session with a token but no identity is a transient state
// that exists only between process start (tokens restored from disk) and
// the identity fetch — never a resting state.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use telos_goal::{Actor, Employee, Role};

use crate::error::SessionError;
use crate::token_store::{StoredTokens, TokenStore};

/// The authenticated account, as the session sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<telos_goal::User> for Identity {
    fn from(user: telos_goal::User) -> Self {
        Identity {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
        }
    }
}

/// The slice of the employee profile the session needs for authority
/// decisions. The full [`Employee`] record stays with the goals that
/// embed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeProfile {
    pub id: i64,
    pub position: String,
    pub is_manager: bool,
    pub manager_id: Option<i64>,
}

impl From<Employee> for EmployeeProfile {
    fn from(employee: Employee) -> Self {
        EmployeeProfile {
            id: employee.id,
            position: employee.position,
            is_manager: employee.is_manager,
            manager_id: employee.manager,
        }
    }
}

/// The token-issue payload from the auth service. Carries enough identity
/// to complete a login in one step, without a second round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub full_name: String,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub position: Option<String>,
    pub has_employee_profile: bool,
    pub is_manager: bool,
}

/// The session aggregate. Derived flags are methods, never stored fields,
/// so they cannot drift out of sync with the data they derive from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub identity: Option<Identity>,
    pub employee_profile: Option<EmployeeProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_manager(&self) -> bool {
        self.employee_profile
            .as_ref()
            .is_some_and(|p| p.is_manager)
    }

    pub fn is_expertise_leader(&self) -> bool {
        self.identity
            .as_ref()
            .is_some_and(|i| i.role == Role::ExpertiseLeader)
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|i| i.role == Role::Admin)
    }

    /// The actor this session puts behind goal-lifecycle actions.
    /// `None` until the identity is loaded.
    pub fn actor(&self) -> Option<Actor> {
        let identity = self.identity.as_ref()?;
        Some(Actor {
            user_id: identity.id,
            employee_id: self.employee_profile.as_ref().map(|p| p.id),
            is_manager: self.is_manager(),
            role: identity.role,
        })
    }
}

/// Thread-safe owner of the one [`Session`] in the process.
///
/// All mutations go through this store and commit under a single write
/// lock; no other component writes session fields. Observers take
/// [`snapshot`](SessionStore::snapshot)s and therefore always see a
/// consistent aggregate.
pub struct SessionStore {
    inner: RwLock<Session>,
    tokens: Box<dyn TokenStore>,
}

impl SessionStore {
    /// A fresh store with an empty session.
    pub fn new(tokens: Box<dyn TokenStore>) -> Self {
        Self {
            inner: RwLock::new(Session::default()),
            tokens,
        }
    }

    /// Reconstruct a session from the persisted credential pair, if any.
    /// Identity is left empty — the caller is expected to run the
    /// identity fetch next.
    pub fn restore(tokens: Box<dyn TokenStore>) -> Result<Self, SessionError> {
        let persisted = tokens.load()?;
        let session = match persisted {
            Some(StoredTokens { access, refresh }) => Session {
                access_token: Some(access),
                refresh_token: Some(refresh),
                identity: None,
                employee_profile: None,
            },
            None => Session::default(),
        };
        Ok(Self {
            inner: RwLock::new(session),
            tokens,
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// A consistent copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Authenticated but identity not yet loaded — the transient window
    /// that must trigger an identity fetch.
    pub fn needs_identity(&self) -> bool {
        let session = self.read();
        session.is_authenticated() && session.identity.is_none()
    }

    pub fn actor(&self) -> Option<Actor> {
        self.read().actor()
    }

    /// Commit a successful login: persist both tokens and set identity plus
    /// employee profile from the token-issue payload, all in one step.
    pub fn complete_login(&self, response: LoginResponse) -> Result<Session, SessionError> {
        self.tokens.store(&StoredTokens {
            access: response.access.clone(),
            refresh: response.refresh.clone(),
        })?;

        let (first_name, last_name) = split_full_name(&response.full_name);
        let identity = Identity {
            id: response.user_id,
            username: response.username,
            email: response.email,
            first_name,
            last_name,
            role: response.role,
        };
        let profile = match (response.has_employee_profile, response.employee_id) {
            (true, Some(id)) => Some(EmployeeProfile {
                id,
                position: response.position.unwrap_or_default(),
                is_manager: response.is_manager,
                // The issue payload does not carry the manager reference;
                // the identity fetch fills it in.
                manager_id: None,
            }),
            _ => None,
        };

        let mut session = self.write();
        session.access_token = Some(response.access);
        session.refresh_token = Some(response.refresh);
        session.identity = Some(identity);
        session.employee_profile = profile;
        tracing::info!(user = %session.identity.as_ref().map(|i| i.username.as_str()).unwrap_or(""), "login committed");
        Ok(session.clone())
    }

    /// Set identity and employee profile together (the identity-fetch path).
    pub fn set_identity(&self, identity: Identity, profile: Option<EmployeeProfile>) -> Session {
        let mut session = self.write();
        session.identity = Some(identity);
        session.employee_profile = profile;
        session.clone()
    }

    /// Replace the access token after a refresh, re-persisting the pair.
    pub fn set_access_token(&self, access: String) -> Result<(), SessionError> {
        let mut session = self.write();
        if let Some(refresh) = session.refresh_token.clone() {
            self.tokens.store(&StoredTokens {
                access: access.clone(),
                refresh,
            })?;
        }
        session.access_token = Some(access);
        Ok(())
    }

    /// Clear credentials and every session field atomically. Idempotent.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.tokens.clear()?;
        let mut session = self.write();
        *session = Session::default();
        tracing::info!("session cleared");
        Ok(())
    }
}

/// Split a display name into (first, last) at the first whitespace.
/// The identity fetch later replaces this with the server-side split.
fn split_full_name(full_name: &str) -> (String, String) {
    match full_name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (full_name.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;

    fn login_response(is_manager: bool) -> LoginResponse {
        LoginResponse {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
            user_id: 3,
            username: "ivan".to_string(),
            email: "ivan@example.com".to_string(),
            role: Role::Employee,
            full_name: "Ivan Petrov".to_string(),
            employee_id: Some(7),
            position: Some("Engineer".to_string()),
            has_employee_profile: true,
            is_manager,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Box::new(MemoryTokenStore::new()))
    }

    #[test]
    fn login_commits_everything_in_one_snapshot() {
        let store = store();
        store.complete_login(login_response(true)).unwrap();

        // One snapshot: authentication, identity, and derived flags must
        // all be consistent together.
        let session = store.snapshot();
        assert!(session.is_authenticated());
        assert!(session.identity.is_some());
        assert!(session.is_manager());
        assert!(!session.is_admin());
        assert_eq!(session.identity.as_ref().unwrap().first_name, "Ivan");
        assert_eq!(session.identity.as_ref().unwrap().last_name, "Petrov");
        assert_eq!(session.employee_profile.as_ref().unwrap().id, 7);
    }

    #[test]
    fn is_manager_reflects_profile_flag() {
        let store = store();
        store.complete_login(login_response(false)).unwrap();
        assert!(!store.snapshot().is_manager());
    }

    #[test]
    fn login_without_profile_leaves_profile_empty() {
        let store = store();
        let mut response = login_response(false);
        response.has_employee_profile = false;
        response.employee_id = None;
        let session = store.complete_login(response).unwrap();
        assert!(session.is_authenticated());
        assert!(session.employee_profile.is_none());
        // No profile, but still a usable actor for own-goal checks.
        let actor = session.actor().unwrap();
        assert_eq!(actor.employee_id, None);
        assert!(!actor.is_manager);
    }

    #[test]
    fn clear_resets_all_fields_and_is_idempotent() {
        let store = store();
        store.complete_login(login_response(true)).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();

        let session = store.snapshot();
        assert_eq!(session, Session::default());
        assert!(!session.is_authenticated());
        assert!(!session.is_manager());
    }

    #[test]
    fn restore_reconstructs_authentication_without_identity() {
        let tokens = Box::new(MemoryTokenStore::new());
        tokens
            .store(&StoredTokens {
                access: "persisted-access".to_string(),
                refresh: "persisted-refresh".to_string(),
            })
            .unwrap();

        let store = SessionStore::restore(tokens).unwrap();
        assert!(store.is_authenticated());
        assert!(store.needs_identity());
        assert!(store.actor().is_none());
    }

    #[test]
    fn restore_with_no_persisted_tokens_is_logged_out() {
        let store = SessionStore::restore(Box::new(MemoryTokenStore::new())).unwrap();
        assert!(!store.is_authenticated());
        assert!(!store.needs_identity());
    }

    #[test]
    fn set_access_token_keeps_refresh_token() {
        let store = store();
        store.complete_login(login_response(true)).unwrap();
        store.set_access_token("access-2".to_string()).unwrap();

        let session = store.snapshot();
        assert_eq!(session.access_token.as_deref(), Some("access-2"));
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
    }

    #[test]
    fn set_identity_fills_manager_reference() {
        let store = store();
        store.complete_login(login_response(true)).unwrap();

        let identity = Identity {
            id: 3,
            username: "ivan".to_string(),
            email: "ivan@example.com".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Petrov".to_string(),
            role: Role::Employee,
        };
        let profile = EmployeeProfile {
            id: 7,
            position: "Engineer".to_string(),
            is_manager: true,
            manager_id: Some(2),
        };
        let session = store.set_identity(identity, Some(profile));
        assert_eq!(session.employee_profile.as_ref().unwrap().manager_id, Some(2));
        let actor = session.actor().unwrap();
        assert_eq!(actor.user_id, 3);
        assert_eq!(actor.employee_id, Some(7));
        assert!(actor.is_manager);
    }

    #[test]
    fn single_word_full_name_has_empty_last_name() {
        assert_eq!(
            split_full_name("Madonna"),
            ("Madonna".to_string(), String::new())
        );
        assert_eq!(
            split_full_name("Anna Maria Schmidt"),
            ("Anna".to_string(), "Maria Schmidt".to_string())
        );
    }
}
