//! # woundcare-auth
//!
//! Authentication and authorization for WoundCare.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing (patient access passwords) and account password policy
//! - `session`: Sign-in/sign-up flows and the per-request [`SessionContext`]
//! - `rbac`: Role hierarchy checks

pub mod password;
pub mod rbac;
pub mod session;

pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RbacEnforcer;
pub use session::{SessionContext, SessionManager};
