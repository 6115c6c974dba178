//! `epi-sim` — the daily simulation engine.
//!
//! # Day pipeline
//!
//! ```text
//! for day in 0..days:
//!   ⓪ Interventions — every policy, registration order; later writes win.
//!   ⓪·⑤ Terminate   — nobody exposed or infectious ⇒ finished, record nothing.
//!   ① Scan          — infectious agents sample neighbours with replacement;
//!                     read-only, so today's infections cannot spread today.
//!   ② Apply         — infect candidates; duplicates are no-ops.
//!   ③ Progress      — count down timers, except those armed in ②.
//!   ④ Record        — per-state counts (must sum to N) into History.
//! ```
//!
//! # Quick-start
//!
//! ```rust
//! use epi_sim::{SimBuilder, SimConfig};
//!
//! let config = SimConfig {
//!     population: 200,
//!     initial_infected: 5,
//!     seed: Some(7),
//!     ..SimConfig::default()
//! };
//! let mut sim = SimBuilder::new(config).build().unwrap();
//! sim.run(60);
//!
//! let last = sim.history().last().unwrap();
//! assert_eq!(last.total(), 200);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod history;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use config::{AgeGroupsConfig, Mortality, NetworkConfig, SimConfig};
pub use error::{SimError, SimResult};
pub use history::{DailyRecord, History};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
