//! `epi-core` — foundational types for the network epidemic engine.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and minimal external ones (`rand`, `rand_distr` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `AgeGroupId`                               |
//! | [`time`]        | `Day`, `DayWindow`                                    |
//! | [`rng`]         | `SimRng` (the single engine-owned generator)          |
//! | [`error`]       | `EpiError`, `EpiResult`, probability validation       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{check_non_negative, check_probability, EpiError, EpiResult};
pub use ids::{AgeGroupId, AgentId};
pub use rng::SimRng;
pub use time::{Day, DayWindow};
