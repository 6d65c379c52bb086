// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parking request lifecycle.
//!
//! Customers create requests; each request is routed to the approved
//! operator serving the customer's scope and from then on only that
//! operator may move it. See [`RequestStatus`] for the transition table.

use crate::error::CoreError;
use crate::store::{PartyDirectory, RequestStore, TransitionOutcome};
use parkstack_domain::{
    Car, CarId, Customer, DomainError, Operator, ParkingRequest, RequestId, RequestStatus, UserId,
};
use tracing::{debug, info};

/// A newly created request and the operator it was routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRequest {
    pub request: ParkingRequest,
    pub operator: Operator,
}

/// Creates a `pending` request for one of the customer's cars.
///
/// # Errors
///
/// Returns an error if:
/// - The car does not exist or is not owned by the user
/// - The user has no customer profile
/// - No approved operator serves the customer's scope
/// - The store fails
pub fn create_request<S: PartyDirectory + RequestStore>(
    store: &mut S,
    customer_user_id: UserId,
    car_id: CarId,
) -> Result<CreatedRequest, CoreError> {
    let car: Car = store
        .car_by_id(car_id)?
        .filter(|car| car.owner_user_id == customer_user_id)
        .ok_or(DomainError::CarNotFound {
            car_id,
            user_id: customer_user_id,
        })?;

    let customer: Customer = store
        .customer_by_user(customer_user_id)?
        .ok_or(DomainError::CustomerProfileNotFound {
            user_id: customer_user_id,
        })?;

    let operator: Operator = store
        .approved_operator_for_scope(customer.scope)?
        .ok_or(DomainError::NoOperatorForScope {
            project_id: customer.scope.project_id,
            structure_id: customer.scope.structure_id,
        })?;

    let request: ParkingRequest = store.insert_request(customer_user_id, operator.id, car.id)?;

    info!(
        request_id = %request.id,
        user_id = %customer_user_id,
        operator_id = %operator.id,
        car_id = %car.id,
        "Created parking request"
    );

    Ok(CreatedRequest { request, operator })
}

/// Lists the requests routed to an operator, newest first.
///
/// # Errors
///
/// Returns an error if the user has no operator profile or the store fails.
pub fn list_for_operator<S: PartyDirectory + RequestStore>(
    store: &mut S,
    operator_user_id: UserId,
) -> Result<Vec<ParkingRequest>, CoreError> {
    let operator: Operator = store
        .operator_by_user(operator_user_id)?
        .ok_or(DomainError::OperatorProfileNotFound {
            user_id: operator_user_id,
        })?;

    Ok(store.requests_for_operator(operator.id)?)
}

/// Lists the requests a customer has submitted, newest first.
///
/// # Errors
///
/// Returns an error if the user has no customer profile or the store fails.
pub fn list_for_customer<S: PartyDirectory + RequestStore>(
    store: &mut S,
    customer_user_id: UserId,
) -> Result<Vec<ParkingRequest>, CoreError> {
    let customer: Customer = store
        .customer_by_user(customer_user_id)?
        .ok_or(DomainError::CustomerProfileNotFound {
            user_id: customer_user_id,
        })?;

    Ok(store.requests_for_user(customer.user_id)?)
}

/// Moves a request to `new_status`.
///
/// The move is one conditional update guarded by the operator and the set
/// of statuses `new_status` may be reached from, so of several concurrent
/// conflicting moves exactly one succeeds.
///
/// # Errors
///
/// Returns an error if:
/// - The user has no operator profile
/// - The request does not exist or is routed to another operator
/// - The transition is not allowed from the request's current status
/// - The store fails
pub fn update_status<S: PartyDirectory + RequestStore>(
    store: &mut S,
    operator_user_id: UserId,
    request_id: RequestId,
    new_status: RequestStatus,
) -> Result<ParkingRequest, CoreError> {
    let operator: Operator = store
        .operator_by_user(operator_user_id)?
        .ok_or(DomainError::OperatorProfileNotFound {
            user_id: operator_user_id,
        })?;

    let allowed_from: Vec<RequestStatus> = RequestStatus::allowed_sources(new_status);
    debug!(
        request_id = %request_id,
        operator_id = %operator.id,
        to = %new_status,
        allowed_from = ?allowed_from,
        "Transitioning parking request"
    );

    match store.transition_request(request_id, operator.id, &allowed_from, new_status)? {
        TransitionOutcome::Updated(request) => {
            info!(
                request_id = %request.id,
                operator_id = %operator.id,
                status = %request.status,
                "Updated parking request status"
            );
            Ok(request)
        }
        TransitionOutcome::NotFound => Err(DomainError::RequestNotFound(request_id).into()),
        TransitionOutcome::Rejected { current } => Err(DomainError::InvalidStatusTransition {
            from: current,
            to: new_status,
        }
        .into()),
    }
}
