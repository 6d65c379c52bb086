// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack_domain::{OperatorId, ParkingRequest, RequestId, UserId};

use crate::data_models::{RequestRow, convert_rows};
use crate::diesel_schema::parking_requests;
use crate::error::PersistenceError;

/// Retrieves a request by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
) -> Result<Option<ParkingRequest>, PersistenceError> {
    parking_requests::table
        .find(request_id.value())
        .select(RequestRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_request: {e}")))?
        .map(ParkingRequest::try_from)
        .transpose()
}

/// Requests routed to an operator, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_requests_for_operator(
    conn: &mut SqliteConnection,
    operator_id: OperatorId,
) -> Result<Vec<ParkingRequest>, PersistenceError> {
    let rows: Vec<RequestRow> = parking_requests::table
        .filter(parking_requests::operator_id.eq(operator_id.value()))
        .order((
            parking_requests::created_at.desc(),
            parking_requests::request_id.desc(),
        ))
        .select(RequestRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_requests_for_operator: {e}")))?;

    convert_rows(rows)
}

/// Requests submitted by a user, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is corrupt.
pub fn list_requests_for_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Vec<ParkingRequest>, PersistenceError> {
    let rows: Vec<RequestRow> = parking_requests::table
        .filter(parking_requests::user_id.eq(user_id.value()))
        .order((
            parking_requests::created_at.desc(),
            parking_requests::request_id.desc(),
        ))
        .select(RequestRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_requests_for_user: {e}")))?;

    convert_rows(rows)
}
