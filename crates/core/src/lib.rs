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

mod allocation;
mod error;
mod inventory;
mod store;
mod structure;
mod workflow;

#[cfg(test)]
mod tests;

pub use allocation::{SlotDetail, SlotOccupant, assign_slot, release_slot};
pub use error::CoreError;
pub use inventory::{
    GeneratedInventory, SlotGroup, SlotListing, StructureSlots, generate_inventory,
    list_structure_slots,
};
pub use store::{
    ClaimOutcome, InventoryInsert, PartyDirectory, ReleaseOutcome, RequestStore, SlotStore,
    StoreError, StructureRepository, TransitionOutcome,
};
pub use structure::{StructureDefinition, define_structure};
pub use workflow::{
    CreatedRequest, create_request, list_for_customer, list_for_operator, update_status,
};
