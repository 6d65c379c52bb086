// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User, car, and customer/operator profile mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack_domain::{
    ApprovalStatus, Car, CarId, Customer, CustomerId, Operator, OperatorId, Scope, User, UserId,
    UserRole,
};
use tracing::{info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{CustomerRow, OperatorRow, now_timestamp};
use crate::diesel_schema::{cars, customers, operators, users};
use crate::error::PersistenceError;
use crate::queries::parties::{count_users, get_car, get_customer, get_operator, get_user};

/// Creates a user.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the username is
/// taken, or another error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    role: UserRole,
) -> Result<User, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::role.eq(role.as_str()),
            users::created_at.eq(&now),
        ))
        .execute(conn)?;

    let user_id: UserId = UserId::new(conn.get_last_insert_rowid()?);
    info!(user_id = %user_id, username, role = %role, "Created user");

    get_user(conn, user_id)?.ok_or_else(|| PersistenceError::NotFound(format!("user {user_id}")))
}

/// Creates the first administrator.
///
/// Returns `Ok(None)` without writing if any user already exists.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn bootstrap_admin(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let existing: i64 = count_users(conn)?;
        if existing > 0 {
            warn!(existing, "Refusing bootstrap: users already exist");
            return Ok(None);
        }
        create_user(conn, username, UserRole::Admin).map(Some)
    })
}

/// Registers a car for a user.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_car(
    conn: &mut SqliteConnection,
    owner_user_id: UserId,
    plate: &str,
    model: Option<&str>,
) -> Result<Car, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(cars::table)
        .values((
            cars::owner_user_id.eq(owner_user_id.value()),
            cars::plate.eq(plate),
            cars::model.eq(model),
            cars::created_at.eq(&now),
        ))
        .execute(conn)?;

    let car_id: CarId = CarId::new(conn.get_last_insert_rowid()?);
    info!(car_id = %car_id, owner_user_id = %owner_user_id, plate, "Registered car");

    get_car(conn, car_id)?.ok_or_else(|| PersistenceError::NotFound(format!("car {car_id}")))
}

/// Creates a `pending` customer profile.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the user already has
/// a customer profile, or another error if the insert fails.
pub fn create_customer(
    conn: &mut SqliteConnection,
    user_id: UserId,
    scope: Scope,
) -> Result<Customer, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(customers::table)
        .values((
            customers::user_id.eq(user_id.value()),
            customers::project_id.eq(scope.project_id.value()),
            customers::structure_id.eq(scope.structure_id.value()),
            customers::status.eq(ApprovalStatus::Pending.as_str()),
            customers::created_at.eq(&now),
        ))
        .execute(conn)?;

    let customer_id: CustomerId = CustomerId::new(conn.get_last_insert_rowid()?);
    info!(
        customer_id = %customer_id,
        user_id = %user_id,
        structure_id = %scope.structure_id,
        "Created customer profile"
    );

    get_customer(conn, customer_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("customer {customer_id}")))
}

/// Creates a `pending` operator profile.
///
/// # Errors
///
/// Returns `PersistenceError::ConstraintViolation` if the user already has
/// an operator profile, or another error if the insert fails.
pub fn create_operator(
    conn: &mut SqliteConnection,
    user_id: UserId,
    scope: Scope,
) -> Result<Operator, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(operators::table)
        .values((
            operators::user_id.eq(user_id.value()),
            operators::project_id.eq(scope.project_id.value()),
            operators::structure_id.eq(scope.structure_id.value()),
            operators::status.eq(ApprovalStatus::Pending.as_str()),
            operators::created_at.eq(&now),
        ))
        .execute(conn)?;

    let operator_id: OperatorId = OperatorId::new(conn.get_last_insert_rowid()?);
    info!(
        operator_id = %operator_id,
        user_id = %user_id,
        structure_id = %scope.structure_id,
        "Created operator profile"
    );

    get_operator(conn, operator_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("operator {operator_id}")))
}

/// Sets a customer's approval status. Returns `Ok(None)` if there is no
/// such customer.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_customer_status(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
    status: ApprovalStatus,
) -> Result<Option<Customer>, PersistenceError> {
    let updated: Option<CustomerRow> = diesel::update(customers::table.find(customer_id.value()))
        .set(customers::status.eq(status.as_str()))
        .returning(CustomerRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("set_customer_status: {e}")))?;

    if updated.is_some() {
        info!(customer_id = %customer_id, status = %status, "Customer status set");
    }
    updated.map(Customer::try_from).transpose()
}

/// Sets an operator's approval status. Returns `Ok(None)` if there is no
/// such operator.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_operator_status(
    conn: &mut SqliteConnection,
    operator_id: OperatorId,
    status: ApprovalStatus,
) -> Result<Option<Operator>, PersistenceError> {
    let updated: Option<OperatorRow> = diesel::update(operators::table.find(operator_id.value()))
        .set(operators::status.eq(status.as_str()))
        .returning(OperatorRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("set_operator_status: {e}")))?;

    if updated.is_some() {
        info!(operator_id = %operator_id, status = %status, "Operator status set");
    }
    updated.map(Operator::try_from).transpose()
}
