// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Binding slots to cars.
//!
//! Every precondition is checked up front so callers get a precise error,
//! but the store's conditional claim and release are what actually enforce
//! slot exclusivity and one active slot per car. A check that passes here
//! and then loses a race is reported from the store's outcome instead.

use crate::error::CoreError;
use crate::store::{
    ClaimOutcome, PartyDirectory, ReleaseOutcome, SlotStore, StoreError, StructureRepository,
};
use parkstack_domain::{
    Car, CarId, Customer, CustomerId, DomainError, Operator, Project, Slot, SlotId, SlotStatus,
    Structure, UserId,
};
use tracing::{debug, info};

/// The car bound to a slot and the customer who owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOccupant {
    pub car: Car,
    /// `None` if the car's owner has no customer profile.
    pub customer: Option<Customer>,
}

/// A slot together with its structure, project, and occupant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDetail {
    pub slot: Slot,
    pub structure: Structure,
    pub project: Project,
    /// After an assignment, the new occupant. After a release, the
    /// occupant that was removed.
    pub occupant: Option<SlotOccupant>,
}

/// Binds a released slot to a customer's car.
///
/// When `car_id` is omitted the customer's earliest registered car is used.
///
/// # Errors
///
/// Returns an error if:
/// - The operator profile, slot, customer, or car cannot be found
/// - The slot is already assigned
/// - The slot belongs to a project other than the operator's or the customer's
/// - The customer is not approved
/// - The car belongs to someone else, or the customer has no car
/// - The car already occupies another slot
/// - The store fails
pub fn assign_slot<S: StructureRepository + SlotStore + PartyDirectory>(
    store: &mut S,
    operator_user_id: UserId,
    slot_id: SlotId,
    customer_id: CustomerId,
    car_id: Option<CarId>,
) -> Result<SlotDetail, CoreError> {
    let operator: Operator = resolve_operator(store, operator_user_id)?;
    let (slot, structure, project) = resolve_slot(store, slot_id)?;

    if slot.status() == SlotStatus::Assigned {
        return Err(DomainError::SlotAlreadyAssigned(slot_id).into());
    }

    if operator.scope.project_id != project.id {
        return Err(DomainError::ScopeViolation {
            actor_project: operator.scope.project_id,
            resource_project: project.id,
        }
        .into());
    }

    let customer: Customer = store
        .customer_by_id(customer_id)?
        .ok_or(DomainError::CustomerNotFound(customer_id))?;

    if !customer.status.is_approved() {
        return Err(DomainError::CustomerNotApproved {
            customer_id,
            status: customer.status,
        }
        .into());
    }

    if customer.scope.project_id != project.id {
        return Err(DomainError::ScopeViolation {
            actor_project: customer.scope.project_id,
            resource_project: project.id,
        }
        .into());
    }

    let car: Car = match car_id {
        Some(car_id) => store
            .car_by_id(car_id)?
            .filter(|car| car.owner_user_id == customer.user_id)
            .ok_or(DomainError::CarNotOwnedByCustomer {
                car_id,
                customer_id,
            })?,
        None => store
            .earliest_car_for_user(customer.user_id)?
            .ok_or(DomainError::CustomerHasNoCars(customer_id))?,
    };

    if let Some(bound) = store.assigned_slot_for_car(car.id)? {
        return Err(DomainError::CarAlreadyAssigned {
            car_id: car.id,
            slot_id: bound.id,
        }
        .into());
    }

    debug!(slot_id = %slot_id, car_id = %car.id, "Claiming slot");

    let slot: Slot = match store.claim(slot_id, car.id)? {
        ClaimOutcome::Claimed(slot) => slot,
        ClaimOutcome::SlotMissing => return Err(DomainError::SlotNotFound(slot_id).into()),
        ClaimOutcome::SlotNotReleased => {
            return Err(DomainError::SlotAlreadyAssigned(slot_id).into());
        }
        ClaimOutcome::CarAlreadyBound { slot_id: bound } => {
            return Err(DomainError::CarAlreadyAssigned {
                car_id: car.id,
                slot_id: bound,
            }
            .into());
        }
    };

    info!(
        slot_id = %slot.id,
        display_number = slot.display_number,
        car_id = %car.id,
        customer_id = %customer.id,
        operator_id = %operator.id,
        "Assigned slot"
    );

    Ok(SlotDetail {
        slot,
        structure,
        project,
        occupant: Some(SlotOccupant {
            car,
            customer: Some(customer),
        }),
    })
}

/// Releases an assigned slot.
///
/// The returned detail carries the occupant that was removed so the
/// caller can tell the customer.
///
/// # Errors
///
/// Returns an error if:
/// - The operator profile or slot cannot be found
/// - The slot belongs to a project other than the operator's
/// - The slot is not assigned
/// - The store fails
pub fn release_slot<S: StructureRepository + SlotStore + PartyDirectory>(
    store: &mut S,
    operator_user_id: UserId,
    slot_id: SlotId,
) -> Result<SlotDetail, CoreError> {
    let operator: Operator = resolve_operator(store, operator_user_id)?;
    let (slot, structure, project) = resolve_slot(store, slot_id)?;

    if operator.scope.project_id != project.id {
        return Err(DomainError::ScopeViolation {
            actor_project: operator.scope.project_id,
            resource_project: project.id,
        }
        .into());
    }

    if slot.status() == SlotStatus::Released {
        return Err(DomainError::SlotNotAssigned(slot_id).into());
    }

    let (slot, car_id) = match store.release(slot_id)? {
        ReleaseOutcome::Released { slot, car_id } => (slot, car_id),
        ReleaseOutcome::SlotMissing => return Err(DomainError::SlotNotFound(slot_id).into()),
        ReleaseOutcome::SlotNotAssigned => {
            return Err(DomainError::SlotNotAssigned(slot_id).into());
        }
    };

    let occupant: SlotOccupant = occupant_of(store, car_id)?;

    info!(
        slot_id = %slot.id,
        car_id = %car_id,
        operator_id = %operator.id,
        "Released slot"
    );

    Ok(SlotDetail {
        slot,
        structure,
        project,
        occupant: Some(occupant),
    })
}

/// Loads the car bound to a slot and its owner's customer profile.
pub(crate) fn occupant_of<S: PartyDirectory>(
    store: &mut S,
    car_id: CarId,
) -> Result<SlotOccupant, CoreError> {
    let car: Car = store
        .car_by_id(car_id)?
        .ok_or_else(|| StoreError::new(format!("slot references missing car {car_id}")))?;
    let customer: Option<Customer> = store.customer_by_user(car.owner_user_id)?;

    Ok(SlotOccupant { car, customer })
}

fn resolve_operator<S: PartyDirectory>(
    store: &mut S,
    user_id: UserId,
) -> Result<Operator, CoreError> {
    Ok(store
        .operator_by_user(user_id)?
        .ok_or(DomainError::OperatorProfileNotFound { user_id })?)
}

fn resolve_slot<S: StructureRepository + SlotStore>(
    store: &mut S,
    slot_id: SlotId,
) -> Result<(Slot, Structure, Project), CoreError> {
    let slot: Slot = store
        .slot_by_id(slot_id)?
        .ok_or(DomainError::SlotNotFound(slot_id))?;
    let structure: Structure = store
        .structure_by_id(slot.structure_id)?
        .ok_or(DomainError::StructureNotFound(slot.structure_id))?;
    let project: Project = store
        .project_by_id(structure.project_id)?
        .ok_or(DomainError::ProjectNotFound(structure.project_id))?;

    Ok((slot, structure, project))
}
