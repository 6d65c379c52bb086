// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod geometry;
mod ids;
mod party;
mod request;
mod slot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::{DomainError, ErrorKind};
pub use geometry::{Geometry, SlotPosition, StructureKind};
pub use ids::{CarId, CustomerId, OperatorId, ProjectId, RequestId, SlotId, StructureId, UserId};
pub use party::{ApprovalStatus, Car, Customer, Operator, User, UserRole};
pub use request::{ParkingRequest, RequestStatus};
pub use slot::{NewSlot, Slot, SlotBinding, SlotStatus};
pub use types::{MotionProfile, Project, Scope, Structure};
pub use validation::{
    MAX_NAME_LENGTH, MAX_PLATE_LENGTH, MAX_TOTAL_SLOTS, display_number_range, validate_name, validate_plate,
    validate_starting_number,
};
