//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod case;
pub mod case_history;
pub mod case_type;
pub mod client_profile;
pub mod document;
pub mod employee_profile;
pub mod user;
