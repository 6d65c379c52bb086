// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use parkstack::CoreError;
use parkstack_domain::DomainError;
use parkstack_persistence::PersistenceError;
use thiserror::Error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The acting user could not be resolved.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The acting user's role does not permit the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Malformed request fields caught before any lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Identifiers are positive integers.
    #[error("{field} must be a positive identifier, got {value}")]
    NonPositiveId { field: &'static str, value: i64 },

    /// Optional text fields may be omitted but not blank.
    #[error("{field} cannot be blank when provided")]
    BlankOptional { field: &'static str },

    /// Optional text fields share the name length limit.
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Profiles can only be attached to users of the matching role.
    #[error("User {user_id} has role '{actual}', expected '{expected}'")]
    RoleMismatch {
        user_id: i64,
        expected: &'static str,
        actual: String,
    },
}

impl InputError {
    const fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId { field, .. }
            | Self::BlankOptional { field }
            | Self::TooLong { field, .. } => field,
            Self::RoleMismatch { .. } => "user_id",
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The operation would break an invariant that already holds.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found or is outside the actor's scope.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The requested status change is not permitted.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Conflict { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::InvalidTransition { message, .. } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: err.to_string(),
    }
}

fn conflict(rule: &str, err: &DomainError) -> ApiError {
    ApiError::Conflict {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidGeometry { field, .. } | DomainError::InvalidName { field, .. } => {
            invalid(field, &err)
        }
        DomainError::MissingBelowGroundLevels | DomainError::UnexpectedBelowGroundLevels => {
            invalid("levels_below_ground", &err)
        }
        DomainError::InvalidStartingNumber { .. } | DomainError::DisplayNumberOverflow { .. } => {
            invalid("starting_number", &err)
        }
        DomainError::InvalidStructureKind(_) => invalid("kind", &err),
        DomainError::InvalidSlotStatus(_)
        | DomainError::InvalidRequestStatus(_)
        | DomainError::InvalidApprovalStatus(_) => invalid("status", &err),
        DomainError::InvalidUserRole(_) => invalid("role", &err),
        DomainError::ScopeStructureMismatch { .. } => invalid("structure_id", &err),
        // Stored rows that fail domain checks are not the caller's fault.
        DomainError::InvalidSlotCoordinates { .. }
        | DomainError::InconsistentSlotBinding { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::ProjectNotFound(_) => not_found("Project", &err),
        DomainError::StructureNotFound(_) => not_found("Structure", &err),
        DomainError::SlotNotFound(_) | DomainError::ScopeViolation { .. } => {
            not_found("Slot", &err)
        }
        DomainError::UserNotFound(_) => not_found("User", &err),
        DomainError::CustomerNotFound(_) | DomainError::CustomerProfileNotFound { .. } => {
            not_found("Customer", &err)
        }
        DomainError::OperatorNotFound(_)
        | DomainError::OperatorProfileNotFound { .. }
        | DomainError::NoOperatorForScope { .. } => not_found("Operator", &err),
        DomainError::CarNotFound { .. }
        | DomainError::CarNotOwnedByCustomer { .. }
        | DomainError::CustomerHasNoCars(_) => not_found("Car", &err),
        DomainError::RequestNotFound(_) => not_found("Parking request", &err),
        DomainError::InventoryAlreadyGenerated(_) => conflict("single_inventory", &err),
        DomainError::SlotAlreadyAssigned(_) => conflict("slot_available", &err),
        DomainError::SlotNotAssigned(_) => conflict("slot_assigned", &err),
        DomainError::CarAlreadyAssigned { .. } => conflict("one_slot_per_car", &err),
        DomainError::CustomerNotApproved { .. } => conflict("approved_customer", &err),
        DomainError::DuplicateUsername(_) => conflict("unique_username", &err),
        DomainError::AlreadyBootstrapped => conflict("bootstrap_once", &err),
        DomainError::InvalidStatusTransition { from, to } => ApiError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(store_err) => ApiError::Internal {
            message: format!("Store failure: {store_err}"),
        },
    }
}

/// Wraps an unexpected persistence failure.
#[must_use]
pub fn translate_persistence_error(context: &str, err: &PersistenceError) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to {context}: {err}"),
    }
}
