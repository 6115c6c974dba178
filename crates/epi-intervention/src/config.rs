//! Serde form of the built-in policies.

use serde::{Deserialize, Serialize};

use crate::{Intervention, InterventionResult, Lockdown, Masks, Vaccination};

/// One entry of the configuration's `interventions` list.
///
/// ```json
/// { "kind": "lockdown", "start_day": 5, "end_day": 10, "reduction_factor": 0.5 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum InterventionConfig {
    Lockdown {
        start_day:        u32,
        end_day:          u32,
        reduction_factor: f64,
    },
    Masks {
        start_day:  u32,
        end_day:    u32,
        compliance: f64,
        efficacy:   f64,
    },
    Vaccination {
        start_day:  u32,
        end_day:    u32,
        daily_rate: f64,
        compliance: f64,
        efficacy:   f64,
    },
}

impl InterventionConfig {
    /// Validate and build the policy.
    pub fn build(&self) -> InterventionResult<Box<dyn Intervention>> {
        Ok(match *self {
            InterventionConfig::Lockdown { start_day, end_day, reduction_factor } => {
                Box::new(Lockdown::new(start_day, end_day, reduction_factor)?)
            }
            InterventionConfig::Masks { start_day, end_day, compliance, efficacy } => {
                Box::new(Masks::new(start_day, end_day, compliance, efficacy)?)
            }
            InterventionConfig::Vaccination { start_day, end_day, daily_rate, compliance, efficacy } => {
                Box::new(Vaccination::new(start_day, end_day, daily_rate, compliance, efficacy)?)
            }
        })
    }
}
