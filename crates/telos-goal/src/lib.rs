//! # telos-goal
//!
//! Goal domain model and the role-gated lifecycle decision table for Telos.
//!
//! A [`Goal`] moves through a fixed set of statuses from draft to completion.
//! Which transition is available at any moment depends on the goal's current
//! [`GoalStatus`] and on who is asking — the [`Actor`]. That decision is made
//! in exactly one place, the [`gate`] module, so every consumer (CLI, tests,
//! future UIs) sees the same rules.
//!
//! ## Key components
//!
//! - [`Goal`] / [`Progress`] — the goal aggregate and its append-only
//!   progress log
//! - [`GoalStatus`] — the lifecycle state machine (draft → pending_approval
//!   → in_progress → pending_assessment → completed, with cancelled as a
//!   terminal absorbing state)
//! - [`gate::allowed_actions`] — the single pure decision function mapping
//!   (goal, actor) to the set of currently legal [`Action`]s
//! - [`TeamView`] — partitions a mixed goal collection into "mine" and
//!   "my direct reports'" buckets for dashboard-style consumers

pub mod employee;
pub mod error;
pub mod gate;
pub mod goal;
pub mod partition;

pub use employee::{Employee, Role, User};
pub use error::GoalError;
pub use gate::{allowed_actions, check, Action, Actor, APPROVAL_TARGET, COMPLETION_TARGET};
pub use goal::{Goal, GoalStatus, Progress};
pub use partition::TeamView;
