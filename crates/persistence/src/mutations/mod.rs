// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `structures`: Projects, structures, and one-time inventory generation
//! - `slots`: Conditional slot claim and release
//! - `parties`: Users, cars, and customer/operator profiles
//! - `requests`: Request creation and conditional status transitions
//!
//! Every mutation that reads before it writes runs inside an immediate
//! transaction and reports the losing side of a race through the core
//! outcome enums rather than an error.

pub mod parties;
pub mod requests;
pub mod slots;
pub mod structures;
