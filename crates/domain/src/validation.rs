// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Longest accepted project, structure, or user name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Largest slot inventory one structure may have.
///
/// Inventory generation holds every slot in memory and inserts them in one
/// transaction, so geometries beyond this are rejected up front.
pub const MAX_TOTAL_SLOTS: u32 = 100_000;

/// Longest accepted licence plate.
pub const MAX_PLATE_LENGTH: usize = 20;

/// Validates the first display number of an inventory.
///
/// # Errors
///
/// Returns `DomainError::InvalidStartingNumber` unless `value` is a positive
/// integer that fits the display number range.
pub fn validate_starting_number(value: i64) -> Result<u32, DomainError> {
    if value < 1 {
        return Err(DomainError::InvalidStartingNumber { value });
    }

    u32::try_from(value).map_err(|_| DomainError::InvalidStartingNumber { value })
}

/// Computes the inclusive display number range for `count` slots.
///
/// # Errors
///
/// Returns `DomainError::DisplayNumberOverflow` if the last number would not
/// fit, or if there is nothing to number.
pub fn display_number_range(start: u32, count: u32) -> Result<(u32, u32), DomainError> {
    count
        .checked_sub(1)
        .and_then(|offset| start.checked_add(offset))
        .map(|end| (start, end))
        .ok_or(DomainError::DisplayNumberOverflow { start, count })
}

/// Validates and normalizes a display name.
///
/// Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the trimmed value is empty or longer
/// than [`MAX_NAME_LENGTH`] characters.
pub fn validate_name(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidName {
            field,
            reason: String::from("cannot be empty"),
        });
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName {
            field,
            reason: format!("cannot exceed {MAX_NAME_LENGTH} characters"),
        });
    }

    Ok(trimmed.to_string())
}

/// Validates and normalizes a licence plate.
///
/// Plates are trimmed and upper-cased.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the plate is empty, too long, or
/// contains characters other than letters, digits, spaces and dashes.
pub fn validate_plate(value: &str) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();

    if trimmed.is_empty() {
        return Err(DomainError::InvalidName {
            field: "plate",
            reason: String::from("cannot be empty"),
        });
    }

    if trimmed.chars().count() > MAX_PLATE_LENGTH {
        return Err(DomainError::InvalidName {
            field: "plate",
            reason: format!("cannot exceed {MAX_PLATE_LENGTH} characters"),
        });
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(DomainError::InvalidName {
            field: "plate",
            reason: String::from("may only contain letters, digits, spaces and dashes"),
        });
    }

    Ok(trimmed.to_uppercase())
}
