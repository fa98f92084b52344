// Shared fixtures for the wiremock-based integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use telos_api::{ApiClient, ClientConfig};
use telos_session::{LoginResponse, MemoryTokenStore, SessionStore};

pub const OWNER_USER: i64 = 3;
pub const OWNER_EMPLOYEE: i64 = 7;
pub const MANAGER_USER: i64 = 4;
pub const MANAGER_EMPLOYEE: i64 = 2;

pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    }
}

/// A client with an empty (logged-out) session.
pub fn fresh_client(base_url: &str) -> ApiClient {
    let session = Arc::new(SessionStore::new(Box::new(MemoryTokenStore::new())));
    ApiClient::new(&config(base_url), session).expect("client builds")
}

/// A client whose session is already committed from the given token-issue
/// payload, without any network traffic.
pub fn client_with_session(base_url: &str, login: Value) -> ApiClient {
    let session = Arc::new(SessionStore::new(Box::new(MemoryTokenStore::new())));
    let payload: LoginResponse = serde_json::from_value(login).expect("valid login payload");
    session.complete_login(payload).expect("login commits");
    ApiClient::new(&config(base_url), session).expect("client builds")
}

pub fn owner_login_json() -> Value {
    json!({
        "access": "owner-access",
        "refresh": "owner-refresh",
        "user_id": OWNER_USER,
        "username": "ivan",
        "email": "ivan@example.com",
        "role": "employee",
        "full_name": "Ivan Petrov",
        "employee_id": OWNER_EMPLOYEE,
        "position": "Engineer",
        "has_employee_profile": true,
        "is_manager": false
    })
}

pub fn manager_login_json() -> Value {
    json!({
        "access": "manager-access",
        "refresh": "manager-refresh",
        "user_id": MANAGER_USER,
        "username": "olga",
        "email": "olga@example.com",
        "role": "employee",
        "full_name": "Olga Ivanova",
        "employee_id": MANAGER_EMPLOYEE,
        "position": "Engineering Manager",
        "has_employee_profile": true,
        "is_manager": true
    })
}

pub fn user_json() -> Value {
    json!({
        "id": OWNER_USER,
        "username": "ivan",
        "email": "ivan@example.com",
        "first_name": "Ivan",
        "last_name": "Petrov",
        "role": "employee"
    })
}

/// A goal owned by the standard owner fixture, whose direct manager is the
/// standard manager fixture.
pub fn goal_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Improve onboarding docs",
        "description": "Rewrite the onboarding guide",
        "expected_results": "New guide published",
        "start_period": "2025-01-01",
        "end_period": "2025-06-30",
        "status": status,
        "employee": {
            "id": OWNER_EMPLOYEE,
            "user": user_json(),
            "hire_dt": "2022-03-01",
            "position": "Engineer",
            "manager": MANAGER_EMPLOYEE
        },
        "created_dttm": "2025-01-02T10:00:00Z",
        "updated_dttm": "2025-01-02T10:00:00Z",
        "progress_entries": []
    })
}
