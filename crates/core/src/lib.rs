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

mod apply;
mod command;
mod create;
mod description;
mod error;
mod state;
mod version;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use create::{NewSetlist, create_setlist};
pub use description::describe;
pub use error::CoreError;
pub use state::TransitionResult;
pub use version::commit;
