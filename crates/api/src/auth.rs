// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor resolution and role-based authorization.
//!
//! Requests name the acting user directly. The user must exist; its stored
//! role decides which operations it may invoke. Profile and scope checks
//! happen afterwards in the engine.

use parkstack::PartyDirectory;
use parkstack_domain::{User, UserId, UserRole};
use parkstack_persistence::SqlitePersistence;
use tracing::debug;

use crate::error::AuthError;

/// A stored user acting on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The stored user record.
    pub user: User,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self { user }
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id
    }

    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.user.role
    }
}

/// Resolves the acting user.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Looks up the acting user by id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the id is not positive,
    /// the user does not exist, or the lookup fails.
    pub fn authenticate(
        persistence: &mut SqlitePersistence,
        actor_user_id: i64,
    ) -> Result<AuthenticatedActor, AuthError> {
        if actor_user_id <= 0 {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid actor user id {actor_user_id}"),
            });
        }

        let user: Option<User> = persistence
            .user_by_id(UserId::new(actor_user_id))
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to resolve actor: {e}"),
            })?;

        let Some(user) = user else {
            debug!(actor_user_id, "Unknown actor");
            return Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown actor user {actor_user_id}"),
            });
        };

        Ok(AuthenticatedActor::new(user))
    }
}

/// Role checks, one per operation family.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require(
        actor: &AuthenticatedActor,
        allowed: &[UserRole],
        action: &str,
    ) -> Result<(), AuthError> {
        if allowed.contains(&actor.role()) {
            return Ok(());
        }

        let required_role: String = allowed
            .iter()
            .map(UserRole::as_str)
            .collect::<Vec<&str>>()
            .join(" or ");
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role,
        })
    }

    /// Projects, users, cars and profiles are provisioned by admins.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_provisioning(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, &[UserRole::Admin], action)
    }

    /// Only admins define structures.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_define_structure(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(actor, &[UserRole::Admin], "define_structure")
    }

    /// Only admins generate inventory.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_generate_inventory(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(actor, &[UserRole::Admin], "generate_inventory")
    }

    /// Admins and operators may view a structure's slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a customer.
    pub fn authorize_list_slots(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(
            actor,
            &[UserRole::Admin, UserRole::Operator],
            "list_structure_slots",
        )
    }

    /// Assigning and releasing slots is operator work.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an operator.
    pub fn authorize_slot_allocation(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, &[UserRole::Operator], action)
    }

    /// Working the request queue is operator work.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an operator.
    pub fn authorize_request_handling(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, &[UserRole::Operator], action)
    }

    /// Customers raise and list their own requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a customer.
    pub fn authorize_customer_request(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, &[UserRole::Customer], action)
    }
}
