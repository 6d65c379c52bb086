// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use parkstack::TransitionOutcome;
use parkstack_domain::{CarId, OperatorId, ParkingRequest, RequestId, RequestStatus, UserId};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{RequestRow, now_timestamp};
use crate::diesel_schema::parking_requests;
use crate::error::PersistenceError;
use crate::queries::requests::get_request;

/// Inserts a `pending` request.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_request(
    conn: &mut SqliteConnection,
    user_id: UserId,
    operator_id: OperatorId,
    car_id: CarId,
) -> Result<ParkingRequest, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(parking_requests::table)
        .values((
            parking_requests::user_id.eq(user_id.value()),
            parking_requests::operator_id.eq(operator_id.value()),
            parking_requests::car_id.eq(car_id.value()),
            parking_requests::status.eq(RequestStatus::Pending.as_str()),
            parking_requests::created_at.eq(&now),
            parking_requests::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let request_id: RequestId = RequestId::new(conn.get_last_insert_rowid()?);
    info!(
        request_id = %request_id,
        user_id = %user_id,
        operator_id = %operator_id,
        "Created parking request"
    );

    get_request(conn, request_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("parking request {request_id}")))
}

/// Moves a request to `to` iff it is routed to `operator_id` and its
/// current status is one of `allowed_from`.
///
/// When nothing is updated the request is re-read in the same transaction
/// to report whether it is missing or in a disallowed status.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn transition_request(
    conn: &mut SqliteConnection,
    request_id: RequestId,
    operator_id: OperatorId,
    allowed_from: &[RequestStatus],
    to: RequestStatus,
) -> Result<TransitionOutcome, PersistenceError> {
    let sources: Vec<&'static str> = allowed_from.iter().map(RequestStatus::as_str).collect();

    conn.immediate_transaction(|conn| {
        let now: String = now_timestamp()?;
        let updated: Option<RequestRow> = diesel::update(
            parking_requests::table
                .filter(parking_requests::request_id.eq(request_id.value()))
                .filter(parking_requests::operator_id.eq(operator_id.value()))
                .filter(parking_requests::status.eq_any(sources)),
        )
        .set((
            parking_requests::status.eq(to.as_str()),
            parking_requests::updated_at.eq(&now),
        ))
        .returning(RequestRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("transition_request: {e}")))?;

        if let Some(row) = updated {
            let request: ParkingRequest = ParkingRequest::try_from(row)?;
            info!(request_id = %request_id, status = %to, "Parking request updated");
            return Ok(TransitionOutcome::Updated(request));
        }

        match get_request(conn, request_id)? {
            Some(current) if current.operator_id == operator_id => {
                debug!(
                    request_id = %request_id,
                    current = %current.status,
                    requested = %to,
                    "Transition refused"
                );
                Ok(TransitionOutcome::Rejected {
                    current: current.status,
                })
            }
            _ => Ok(TransitionOutcome::NotFound),
        }
    })
}
