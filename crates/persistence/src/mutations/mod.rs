// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `setlists`: Setlist creation and compare-and-swap transition commits
//! - `catalog`: Band and song upserts for the surrounding application

pub mod catalog;
pub mod setlists;
