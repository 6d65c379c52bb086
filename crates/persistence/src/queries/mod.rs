// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `structures`: Projects and structures
//! - `slots`: Pallet slots and inventory state
//! - `parties`: Users, cars, customer and operator profiles
//! - `requests`: Parking requests
//!
//! Lookups return `Ok(None)` for absent rows. Every row is converted into
//! its domain type before leaving this module.

pub mod parties;
pub mod requests;
pub mod slots;
pub mod structures;
