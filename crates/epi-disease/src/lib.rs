//! `epi-disease` — disease-model descriptors.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`compartment`] | `Compartment` (S, E, I, IA, IS, R, D) and their codes      |
//! | [`model`]       | `ModelKind`, `DiseaseModel`, `Transition`, `Expiry`        |
//! | [`params`]      | `DiseaseParams`, `Period`, `Transmission`                  |
//! | [`error`]       | `DiseaseError`, `DiseaseResult<T>`                         |

pub mod compartment;
pub mod error;
pub mod model;
pub mod params;


pub use compartment::Compartment;
pub use error::{DiseaseError, DiseaseResult};
pub use model::{DiseaseModel, Expiry, ModelKind, Transition};
pub use params::{DiseaseParams, Period, Transmission};
