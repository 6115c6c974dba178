//! Built-in policies.
//!
//! | Policy        | Window        | Inside the window                        | Outside          |
//! |---------------|---------------|------------------------------------------|------------------|
//! | `Lockdown`    | `[start, end]`| contacts = floor(base × factor)          | contacts = base  |
//! | `Masks`       | `[start, end]`| per-agent daily compliance draw          | efficacy = 0     |
//! | `Vaccination` | `[start, end)`| eligible → compliant → effective ⇒ immune| nothing          |

use epi_core::{check_probability, DayWindow};

use crate::{Intervention, InterventionContext, InterventionError, InterventionResult};

fn window(policy: &'static str, start: u32, end: u32) -> InterventionResult<DayWindow> {
    let w = DayWindow::new(start, end);
    if w.is_ordered() {
        Ok(w)
    } else {
        Err(InterventionError::InvalidWindow { policy, start, end })
    }
}

// ── Lockdown ──────────────────────────────────────────────────────────────────

/// Scales every age group's contact count while active.
#[derive(Clone, Debug, PartialEq)]
pub struct Lockdown {
    pub window:           DayWindow,
    pub reduction_factor: f64,
}

impl Lockdown {
    pub fn new(start_day: u32, end_day: u32, reduction_factor: f64) -> InterventionResult<Self> {
        Ok(Self {
            window:           window("lockdown", start_day, end_day)?,
            reduction_factor: check_probability("lockdown.reduction_factor", reduction_factor)?,
        })
    }
}

impl Intervention for Lockdown {
    fn name(&self) -> &str {
        "lockdown"
    }

    fn apply(&self, ctx: &mut InterventionContext<'_>) {
        if self.window.contains(ctx.day) {
            ctx.contacts.scale_from_base(self.reduction_factor);
        } else {
            ctx.contacts.reset();
        }
    }
}

// ── Masks ─────────────────────────────────────────────────────────────────────

/// Re-draws every agent's mask each day while active.  Compliance is not
/// sticky across days.
#[derive(Clone, Debug, PartialEq)]
pub struct Masks {
    pub window:     DayWindow,
    pub compliance: f64,
    pub efficacy:   f64,
}

impl Masks {
    pub fn new(start_day: u32, end_day: u32, compliance: f64, efficacy: f64) -> InterventionResult<Self> {
        Ok(Self {
            window:     window("masks", start_day, end_day)?,
            compliance: check_probability("masks.compliance", compliance)?,
            efficacy:   check_probability("masks.efficacy", efficacy)?,
        })
    }
}

impl Intervention for Masks {
    fn name(&self) -> &str {
        "masks"
    }

    fn apply(&self, ctx: &mut InterventionContext<'_>) {
        if !self.window.contains(ctx.day) {
            for agent in ctx.population.iter_mut() {
                agent.mask_efficacy = 0.0;
            }
            return;
        }
        for agent in ctx.population.iter_mut() {
            agent.mask_efficacy = if ctx.rng.gen_bool(self.compliance) { self.efficacy } else { 0.0 };
        }
    }
}

// ── Vaccination ───────────────────────────────────────────────────────────────

/// Moves susceptible agents straight to immune, bypassing infection.
///
/// The window is half-open: no doses are given on `end_day`.
#[derive(Clone, Debug, PartialEq)]
pub struct Vaccination {
    pub window:     DayWindow,
    pub daily_rate: f64,
    pub compliance: f64,
    pub efficacy:   f64,
}

impl Vaccination {
    pub fn new(
        start_day:  u32,
        end_day:    u32,
        daily_rate: f64,
        compliance: f64,
        efficacy:   f64,
    ) -> InterventionResult<Self> {
        Ok(Self {
            window:     window("vaccination", start_day, end_day)?,
            daily_rate: check_probability("vaccination.daily_rate", daily_rate)?,
            compliance: check_probability("vaccination.compliance", compliance)?,
            efficacy:   check_probability("vaccination.efficacy", efficacy)?,
        })
    }
}

impl Intervention for Vaccination {
    fn name(&self) -> &str {
        "vaccination"
    }

    fn apply(&self, ctx: &mut InterventionContext<'_>) {
        if !self.window.contains_exclusive(ctx.day) {
            return;
        }
        let model = ctx.model;
        for agent in ctx.population.iter_mut() {
            if !agent.is_exposable(model) {
                continue;
            }
            // Each draw only happens if the previous one succeeded.
            if ctx.rng.gen_bool(self.daily_rate)
                && ctx.rng.gen_bool(self.compliance)
                && ctx.rng.gen_bool(self.efficacy)
            {
                agent.immune = true;
            }
        }
    }
}
