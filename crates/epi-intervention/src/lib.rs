//! `epi-intervention` — policies that perturb the daily dynamics.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`intervention`] | `Intervention` trait, `NoIntervention`, `InterventionManager` |
//! | [`context`]      | `InterventionContext<'a>`, `ContactRates`                  |
//! | [`policies`]     | `Lockdown`, `Masks`, `Vaccination`                         |
//! | [`config`]       | `InterventionConfig` (serde, tagged by `kind`)             |
//! | [`error`]        | `InterventionError`, `InterventionResult<T>`               |
//!
//! # Where interventions run
//!
//! The engine calls [`InterventionManager::apply_all`] first thing every
//! day, before the termination check and before any exposure is computed.
//! Interventions may only write the fields the context exposes: today's
//! contact counts, per-agent mask efficacy and the immune flag.

pub mod config;
pub mod context;
pub mod error;
pub mod intervention;
pub mod policies;

#[cfg(test)]
mod tests;

pub use config::InterventionConfig;
pub use context::{ContactRates, InterventionContext};
pub use error::{InterventionError, InterventionResult};
pub use intervention::{Intervention, InterventionManager, NoIntervention};
pub use policies::{Lockdown, Masks, Vaccination};
