// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! All queries use Diesel DSL.
//!
//! ## Module Organization
//!
//! - `setlists`: Setlist documents, their version history, and listings
//! - `catalog`: Bands and songs owned by the surrounding application

pub mod catalog;
pub mod setlists;
