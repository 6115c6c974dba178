//! `epi-agent` — agent records and population storage.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`agent`]       | `Agent` with the `infect` / `progress` contract           |
//! | [`population`]  | `Population` (id-indexed agents, per-state counts)        |
//! | [`age`]         | `AgeGroup`, `AgeStructure` (weights, susceptibility, contacts) |
//! | [`builder`]     | `PopulationBuilder` (fluent construction)                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Agent` and `AgeGroup`. |

pub mod age;
pub mod agent;
pub mod builder;
pub mod population;


pub use age::{AgeGroup, AgeStructure};
pub use agent::Agent;
pub use builder::PopulationBuilder;
pub use population::Population;
