// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion into domain values.
//!
//! Integer columns are stored as `BIGINT`; counts and coordinates are
//! narrowed back to `u32` on the way out, and a value that does not fit is
//! reported as a corrupt row rather than truncated.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use parkstack_domain::{
    ApprovalStatus, Car, CarId, Customer, CustomerId, Geometry, MotionProfile, Operator,
    OperatorId, ParkingRequest, Project, ProjectId, RequestId, RequestStatus, Scope, Slot,
    SlotBinding, SlotId, SlotPosition, SlotStatus, Structure, StructureId, StructureKind, User,
    UserId, UserRole,
};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::diesel_schema::{
    cars, customers, operators, parking_requests, projects, slots, structures, users,
};
use crate::error::PersistenceError;

/// Fixed-width UTC timestamp layout. It is valid RFC 3339 and sorts
/// lexicographically in time order.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::QueryFailed(format!("format_timestamp: {e}")))
}

/// The current time, formatted for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRow` if the value is not in the
/// storage layout.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| PersistenceError::CorruptRow(format!("timestamp {value:?}: {e}")))
}

fn narrow(field: &str, value: i64) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| PersistenceError::CorruptRow(format!("{field} out of range: {value}")))
}

fn narrow_opt(field: &str, value: Option<i64>) -> Result<Option<u32>, PersistenceError> {
    value.map(|v| narrow(field, v)).transpose()
}

fn parse_column<T: FromStr>(field: &str, value: &str) -> Result<T, PersistenceError>
where
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| PersistenceError::CorruptRow(format!("{field}: {e}")))
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProjectRow {
    pub project_id: i64,
    pub name: String,
    pub created_at: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = PersistenceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::new(row.project_id),
            name: row.name,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub role: String,
    pub created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.user_id),
            username: row.username,
            role: parse_column::<UserRole>("users.role", &row.role)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CarRow {
    pub car_id: i64,
    pub owner_user_id: i64,
    pub plate: String,
    pub model: Option<String>,
    pub created_at: String,
}

impl TryFrom<CarRow> for Car {
    type Error = PersistenceError;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CarId::new(row.car_id),
            owner_user_id: UserId::new(row.owner_user_id),
            plate: row.plate,
            model: row.model,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = structures)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StructureRow {
    pub structure_id: i64,
    pub project_id: i64,
    pub name: String,
    pub kind: String,
    pub levels_above_ground: i64,
    pub column_count: i64,
    pub levels_below_ground: Option<i64>,
    pub total_slots: Option<i64>,
    pub seconds_per_level: Option<i64>,
    pub seconds_per_horizontal_move: Option<i64>,
    pub buffer_seconds: Option<i64>,
    pub created_at: String,
}

impl TryFrom<StructureRow> for Structure {
    type Error = PersistenceError;

    fn try_from(row: StructureRow) -> Result<Self, Self::Error> {
        let kind: StructureKind = parse_column("structures.kind", &row.kind)?;
        let geometry: Geometry = Geometry::new(
            kind,
            narrow("structures.levels_above_ground", row.levels_above_ground)?,
            narrow("structures.column_count", row.column_count)?,
            narrow_opt("structures.levels_below_ground", row.levels_below_ground)?,
        )
        .map_err(|e| {
            PersistenceError::CorruptRow(format!("structure {}: {e}", row.structure_id))
        })?;

        Ok(Self {
            id: StructureId::new(row.structure_id),
            project_id: ProjectId::new(row.project_id),
            name: row.name,
            geometry,
            total_slots: narrow_opt("structures.total_slots", row.total_slots)?,
            motion: MotionProfile {
                seconds_per_level: narrow_opt("structures.seconds_per_level", row.seconds_per_level)?,
                seconds_per_horizontal_move: narrow_opt(
                    "structures.seconds_per_horizontal_move",
                    row.seconds_per_horizontal_move,
                )?,
                buffer_seconds: narrow_opt("structures.buffer_seconds", row.buffer_seconds)?,
            },
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerRow {
    pub customer_id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub structure_id: i64,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = PersistenceError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(row.customer_id),
            user_id: UserId::new(row.user_id),
            scope: Scope {
                project_id: ProjectId::new(row.project_id),
                structure_id: StructureId::new(row.structure_id),
            },
            status: parse_column::<ApprovalStatus>("customers.status", &row.status)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = operators)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OperatorRow {
    pub operator_id: i64,
    pub user_id: i64,
    pub project_id: i64,
    pub structure_id: i64,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<OperatorRow> for Operator {
    type Error = PersistenceError;

    fn try_from(row: OperatorRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OperatorId::new(row.operator_id),
            user_id: UserId::new(row.user_id),
            scope: Scope {
                project_id: ProjectId::new(row.project_id),
                structure_id: StructureId::new(row.structure_id),
            },
            status: parse_column::<ApprovalStatus>("operators.status", &row.status)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = slots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SlotRow {
    pub slot_id: i64,
    pub structure_id: i64,
    pub level: Option<i64>,
    pub below_ground_level: Option<i64>,
    pub column_number: i64,
    pub display_number: i64,
    pub status: String,
    pub car_id: Option<i64>,
    pub updated_at: String,
}

impl TryFrom<SlotRow> for Slot {
    type Error = PersistenceError;

    fn try_from(row: SlotRow) -> Result<Self, Self::Error> {
        let slot_id: SlotId = SlotId::new(row.slot_id);
        let position: SlotPosition = SlotPosition::from_columns(
            narrow_opt("slots.level", row.level)?,
            narrow_opt("slots.below_ground_level", row.below_ground_level)?,
            narrow("slots.column_number", row.column_number)?,
        )
        .map_err(|e| PersistenceError::CorruptRow(format!("slot {slot_id}: {e}")))?;
        let status: SlotStatus = parse_column("slots.status", &row.status)?;
        let binding: SlotBinding =
            SlotBinding::from_columns(slot_id, status, row.car_id.map(CarId::new))
                .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?;

        Ok(Self {
            id: slot_id,
            structure_id: StructureId::new(row.structure_id),
            position,
            display_number: narrow("slots.display_number", row.display_number)?,
            binding,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// A slot row ready for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = slots)]
pub struct NewSlotRow<'a> {
    pub structure_id: i64,
    pub level: Option<i64>,
    pub below_ground_level: Option<i64>,
    pub column_number: i64,
    pub display_number: i64,
    pub status: &'a str,
    pub updated_at: &'a str,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = parking_requests)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RequestRow {
    pub request_id: i64,
    pub user_id: i64,
    pub operator_id: i64,
    pub car_id: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<RequestRow> for ParkingRequest {
    type Error = PersistenceError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RequestId::new(row.request_id),
            user_id: UserId::new(row.user_id),
            operator_id: OperatorId::new(row.operator_id),
            car_id: CarId::new(row.car_id),
            status: parse_column::<RequestStatus>("parking_requests.status", &row.status)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Converts a batch of rows, failing on the first corrupt one.
///
/// # Errors
///
/// Returns the first conversion error.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, PersistenceError>
where
    T: TryFrom<R, Error = PersistenceError>,
{
    rows.into_iter().map(T::try_from).collect()
}
