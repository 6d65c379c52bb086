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
    clippy::all
)]

//! Notifications emitted after successful state changes.
//!
//! The engine itself emits nothing. Callers build a [`Notification`] for
//! each state change they complete and hand it to whatever delivers them.
//! Delivery is best-effort: a notification that cannot be delivered is
//! dropped and never affects the state change that produced it.

#[cfg(test)]
mod tests;

use parkstack_domain::{
    CarId, OperatorId, ParkingRequest, RequestId, RequestStatus, SlotId, SlotStatus, StructureId,
    UserId,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    RequestCreated,
    RequestAccepted,
    RequestCompleted,
    SlotAssigned,
    SlotReleased,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequestCreated => "request-created",
            Self::RequestAccepted => "request-accepted",
            Self::RequestCompleted => "request-completed",
            Self::SlotAssigned => "slot-assigned",
            Self::SlotReleased => "slot-released",
        }
    }

    /// The kind announcing that a request reached `status`.
    ///
    /// Returns `None` for `pending`, which is announced on creation.
    #[must_use]
    pub const fn for_request_status(status: RequestStatus) -> Option<Self> {
        match status {
            RequestStatus::Pending => None,
            RequestStatus::Accepted => Some(Self::RequestAccepted),
            RequestStatus::Completed => Some(Self::RequestCompleted),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Public fields of a parking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    pub request_id: RequestId,
    pub user_id: UserId,
    pub operator_id: OperatorId,
    pub car_id: CarId,
    pub status: RequestStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&ParkingRequest> for RequestSummary {
    fn from(request: &ParkingRequest) -> Self {
        Self {
            request_id: request.id,
            user_id: request.user_id,
            operator_id: request.operator_id,
            car_id: request.car_id,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

/// Public fields of a slot and the car it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub slot_id: SlotId,
    pub structure_id: StructureId,
    pub structure_name: String,
    pub project_name: String,
    pub display_number: u32,
    pub level: Option<u32>,
    pub below_ground_level: Option<u32>,
    pub column: u32,
    pub status: SlotStatus,
    /// The car assigned, or for a release the car that left.
    pub car_id: CarId,
    pub plate: String,
}

/// The entity a notification is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum NotificationPayload {
    Request(RequestSummary),
    Slot(SlotSummary),
}

/// One notification for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub payload: NotificationPayload,
}

impl Notification {
    /// Tells the routed operator about a new request.
    #[must_use]
    pub fn request_created(operator_user_id: UserId, request: &ParkingRequest) -> Self {
        Self {
            recipient: operator_user_id,
            kind: NotificationKind::RequestCreated,
            payload: NotificationPayload::Request(request.into()),
        }
    }

    /// Tells the requesting customer that their request moved on.
    ///
    /// Returns `None` if the request is `pending`.
    #[must_use]
    pub fn request_status_changed(request: &ParkingRequest) -> Option<Self> {
        NotificationKind::for_request_status(request.status).map(|kind| Self {
            recipient: request.user_id,
            kind,
            payload: NotificationPayload::Request(request.into()),
        })
    }

    /// Tells a customer their car was bound to a slot.
    #[must_use]
    pub const fn slot_assigned(customer_user_id: UserId, slot: SlotSummary) -> Self {
        Self {
            recipient: customer_user_id,
            kind: NotificationKind::SlotAssigned,
            payload: NotificationPayload::Slot(slot),
        }
    }

    /// Tells a customer their car's slot was released.
    #[must_use]
    pub const fn slot_released(customer_user_id: UserId, slot: SlotSummary) -> Self {
        Self {
            recipient: customer_user_id,
            kind: NotificationKind::SlotReleased,
            payload: NotificationPayload::Slot(slot),
        }
    }
}
