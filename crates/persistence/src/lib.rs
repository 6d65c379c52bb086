// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the parkstack allocation engine.
//!
//! This crate stores projects, structures, pallet slots, parties, and
//! parking requests in `SQLite` through Diesel, and implements every store
//! trait the engine depends on.
//!
//! ## Atomicity
//!
//! Slot claims, inventory generation, and request transitions are single
//! conditional updates run inside immediate transactions. The schema backs
//! them with its own guards:
//!
//! - `inventory_generations` has one row per generated structure
//! - `slots` carries a partial unique index on `car_id` for assigned slots
//! - `slots` checks that status and car binding agree
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] opens a uniquely named shared-cache
//! in-memory database per call, so tests never observe each other.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use parkstack_domain::{
    ApprovalStatus, Car, Customer, CustomerId, Operator, OperatorId, Project, Scope, User, UserId,
    UserRole,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias for the `SQLite` adapter.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
///
/// Implements [`parkstack::StructureRepository`], [`parkstack::SlotStore`],
/// [`parkstack::PartyDirectory`], and [`parkstack::RequestStore`]. Callers
/// sharing one adapter across tasks must serialize access to it.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Unique shared-cache name per call keeps tests isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        info!(path = path_str, "Opened parkstack database");
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Provisioning
    // ========================================================================

    /// Creates the first administrator if no user exists yet.
    ///
    /// Returns `Ok(None)` if the system already has users.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn bootstrap_admin(&mut self, username: &str) -> Result<Option<User>, PersistenceError> {
        mutations::parties::bootstrap_admin(&mut self.conn, username)
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_project(&mut self, name: &str) -> Result<Project, PersistenceError> {
        mutations::structures::create_project(&mut self.conn, name)
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the username is
    /// taken.
    pub fn create_user(&mut self, username: &str, role: UserRole) -> Result<User, PersistenceError> {
        mutations::parties::create_user(&mut self.conn, username, role)
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, PersistenceError> {
        queries::parties::get_user_by_username(&mut self.conn, username)
    }

    /// Registers a car for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn create_car(
        &mut self,
        owner_user_id: UserId,
        plate: &str,
        model: Option<&str>,
    ) -> Result<Car, PersistenceError> {
        mutations::parties::create_car(&mut self.conn, owner_user_id, plate, model)
    }

    /// Creates a `pending` customer profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the user already
    /// has one.
    pub fn create_customer(
        &mut self,
        user_id: UserId,
        scope: Scope,
    ) -> Result<Customer, PersistenceError> {
        mutations::parties::create_customer(&mut self.conn, user_id, scope)
    }

    /// Creates a `pending` operator profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConstraintViolation` if the user already
    /// has one.
    pub fn create_operator(
        &mut self,
        user_id: UserId,
        scope: Scope,
    ) -> Result<Operator, PersistenceError> {
        mutations::parties::create_operator(&mut self.conn, user_id, scope)
    }

    /// Sets a customer's approval status.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn set_customer_status(
        &mut self,
        customer_id: CustomerId,
        status: ApprovalStatus,
    ) -> Result<Option<Customer>, PersistenceError> {
        mutations::parties::set_customer_status(&mut self.conn, customer_id, status)
    }

    /// Sets an operator's approval status.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn set_operator_status(
        &mut self,
        operator_id: OperatorId,
        status: ApprovalStatus,
    ) -> Result<Option<Operator>, PersistenceError> {
        mutations::parties::set_operator_status(&mut self.conn, operator_id, status)
    }
}
