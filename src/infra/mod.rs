//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Local file storage for uploaded documents
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{CaseRepository, CaseStore, UserRepository, UserStore};
pub use storage::{BlobStorage, FileStore, StoredFile};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockCaseRepository, MockUserRepository};
