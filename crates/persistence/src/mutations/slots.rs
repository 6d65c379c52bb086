// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional slot binding updates.
//!
//! These are the only writers of `slots.status` and `slots.car_id`.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use parkstack::{ClaimOutcome, ReleaseOutcome};
use parkstack_domain::{CarId, Slot, SlotId, SlotStatus};
use tracing::{debug, info};

use crate::data_models::{SlotRow, now_timestamp};
use crate::diesel_schema::slots;
use crate::error::PersistenceError;
use crate::queries::slots::{assigned_slot_for_car, get_slot};

/// Binds `car_id` to `slot_id` iff the slot is released and the car holds
/// no other assigned slot.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn claim_slot(
    conn: &mut SqliteConnection,
    slot_id: SlotId,
    car_id: CarId,
) -> Result<ClaimOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        if let Some(bound) = assigned_slot_for_car(conn, car_id)? {
            debug!(car_id = %car_id, bound_slot = %bound.id, "Car already bound");
            return Ok(ClaimOutcome::CarAlreadyBound { slot_id: bound.id });
        }

        let now: String = now_timestamp()?;
        let updated: Result<Option<SlotRow>, DieselError> = diesel::update(
            slots::table
                .filter(slots::slot_id.eq(slot_id.value()))
                .filter(slots::status.eq(SlotStatus::Released.as_str())),
        )
        .set((
            slots::status.eq(SlotStatus::Assigned.as_str()),
            slots::car_id.eq(Some(car_id.value())),
            slots::updated_at.eq(&now),
        ))
        .returning(SlotRow::as_returning())
        .get_result(conn)
        .optional();

        match updated {
            Ok(Some(row)) => {
                let slot: Slot = Slot::try_from(row)?;
                info!(slot_id = %slot_id, car_id = %car_id, "Slot assigned");
                Ok(ClaimOutcome::Claimed(slot))
            }
            Ok(None) => {
                if get_slot(conn, slot_id)?.is_some() {
                    Ok(ClaimOutcome::SlotNotReleased)
                } else {
                    Ok(ClaimOutcome::SlotMissing)
                }
            }
            // The partial unique index on assigned car_id.
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
                match assigned_slot_for_car(conn, car_id)? {
                    Some(bound) => Ok(ClaimOutcome::CarAlreadyBound { slot_id: bound.id }),
                    None => Err(PersistenceError::ConstraintViolation(
                        info.message().to_string(),
                    )),
                }
            }
            Err(e) => Err(PersistenceError::QueryFailed(format!("claim_slot: {e}"))),
        }
    })
}

/// Clears the binding of `slot_id` iff it is assigned.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn release_slot(
    conn: &mut SqliteConnection,
    slot_id: SlotId,
) -> Result<ReleaseOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let Some(current) = get_slot(conn, slot_id)? else {
            return Ok(ReleaseOutcome::SlotMissing);
        };
        let Some(car_id) = current.car_id() else {
            return Ok(ReleaseOutcome::SlotNotAssigned);
        };

        let now: String = now_timestamp()?;
        let updated: Option<SlotRow> = diesel::update(
            slots::table
                .filter(slots::slot_id.eq(slot_id.value()))
                .filter(slots::status.eq(SlotStatus::Assigned.as_str())),
        )
        .set((
            slots::status.eq(SlotStatus::Released.as_str()),
            slots::car_id.eq(None::<i64>),
            slots::updated_at.eq(&now),
        ))
        .returning(SlotRow::as_returning())
        .get_result(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("release_slot: {e}")))?;

        match updated {
            Some(row) => {
                info!(slot_id = %slot_id, car_id = %car_id, "Slot released");
                Ok(ReleaseOutcome::Released {
                    slot: Slot::try_from(row)?,
                    car_id,
                })
            }
            None => Ok(ReleaseOutcome::SlotNotAssigned),
        }
    })
}
