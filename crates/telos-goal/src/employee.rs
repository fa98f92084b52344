// employee.rs — User identities and the employee reporting tree.
//
// A User is an account; an Employee is its HR-side profile. The manager
// reference is self-referential and defines a tree — an employee's
// subordinates are direct reports only, never transitive.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Account-level role. `is_manager` is *not* a role — it is derived from the
/// employee profile (someone with direct reports), so it lives on [`Employee`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    ExpertiseLeader,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Employee => write!(f, "employee"),
            Role::ExpertiseLeader => write!(f, "expertise_leader"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A user account as returned by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// An employee profile: the subject of goals and the node of the reporting tree.
///
/// `manager` is the id of the direct manager, if any. The backend guarantees
/// the manager chain never forms a cycle; this client treats it as a tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub user: User,
    #[serde(rename = "hire_dt")]
    pub hire_date: NaiveDate,
    pub position: String,
    pub manager: Option<i64>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub is_manager: bool,
    /// Direct reports only — present on `my_team` responses, absent elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subordinates: Option<Vec<Employee>>,
}
