// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User, car, and profile queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack_domain::{
    ApprovalStatus, Car, CarId, Customer, CustomerId, Operator, OperatorId, Scope, User, UserId,
};
use tracing::debug;

use crate::data_models::{CarRow, CustomerRow, OperatorRow, UserRow};
use crate::diesel_schema::{cars, customers, operators, users};
use crate::error::PersistenceError;

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Option<User>, PersistenceError> {
    users::table
        .find(user_id.value())
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user: {e}")))?
        .map(User::try_from)
        .transpose()
}

/// Retrieves a user by exact username.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, PersistenceError> {
    debug!(username, "Looking up user by username");

    users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_by_username: {e}")))?
        .map(User::try_from)
        .transpose()
}

/// Counts all users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    users::table
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_users: {e}")))
}

/// Retrieves a car by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_car(conn: &mut SqliteConnection, car_id: CarId) -> Result<Option<Car>, PersistenceError> {
    cars::table
        .find(car_id.value())
        .select(CarRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_car: {e}")))?
        .map(Car::try_from)
        .transpose()
}

/// Returns a user's earliest registered car.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn earliest_car_for_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Option<Car>, PersistenceError> {
    cars::table
        .filter(cars::owner_user_id.eq(user_id.value()))
        .order((cars::created_at.asc(), cars::car_id.asc()))
        .select(CarRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("earliest_car_for_user: {e}")))?
        .map(Car::try_from)
        .transpose()
}

/// Retrieves a customer profile by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_customer(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Option<Customer>, PersistenceError> {
    customers::table
        .find(customer_id.value())
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_customer: {e}")))?
        .map(Customer::try_from)
        .transpose()
}

/// Retrieves the customer profile of a user.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_customer_by_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Option<Customer>, PersistenceError> {
    customers::table
        .filter(customers::user_id.eq(user_id.value()))
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_customer_by_user: {e}")))?
        .map(Customer::try_from)
        .transpose()
}

/// Retrieves an operator profile by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_operator(
    conn: &mut SqliteConnection,
    operator_id: OperatorId,
) -> Result<Option<Operator>, PersistenceError> {
    operators::table
        .find(operator_id.value())
        .select(OperatorRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_operator: {e}")))?
        .map(Operator::try_from)
        .transpose()
}

/// Retrieves the operator profile of a user.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_operator_by_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Option<Operator>, PersistenceError> {
    operators::table
        .filter(operators::user_id.eq(user_id.value()))
        .select(OperatorRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_operator_by_user: {e}")))?
        .map(Operator::try_from)
        .transpose()
}

/// Returns the earliest created approved operator serving `scope`.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn approved_operator_for_scope(
    conn: &mut SqliteConnection,
    scope: Scope,
) -> Result<Option<Operator>, PersistenceError> {
    debug!(
        project_id = %scope.project_id,
        structure_id = %scope.structure_id,
        "Resolving operator for scope"
    );

    operators::table
        .filter(operators::project_id.eq(scope.project_id.value()))
        .filter(operators::structure_id.eq(scope.structure_id.value()))
        .filter(operators::status.eq(ApprovalStatus::Approved.as_str()))
        .order(operators::operator_id.asc())
        .select(OperatorRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("approved_operator_for_scope: {e}")))?
        .map(Operator::try_from)
        .transpose()
}
