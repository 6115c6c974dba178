//! The `Intervention` trait and the ordered manager that runs them.

use log::trace;

use crate::InterventionContext;

// ── Trait ─────────────────────────────────────────────────────────────────────

/// A policy applied once at the start of every simulated day.
///
/// `apply` is called on every day, inside or outside the policy's own
/// window; each policy decides what "outside the window" means (the
/// built-ins restore a neutral value, or do nothing).
///
/// # Contract
///
/// - Must draw randomness only from `ctx.rng`.
/// - Must not block or perform I/O.
///
/// # Example
///
/// ```rust
/// use epi_intervention::{Intervention, InterventionContext};
///
/// /// Everyone stays home on weekends.
/// struct Weekends;
///
/// impl Intervention for Weekends {
///     fn name(&self) -> &str { "weekends" }
///
///     fn apply(&self, ctx: &mut InterventionContext<'_>) {
///         if ctx.day.0 % 7 >= 5 {
///             ctx.contacts.scale_from_base(0.0);
///         } else {
///             ctx.contacts.reset();
///         }
///     }
/// }
/// ```
pub trait Intervention {
    fn name(&self) -> &str;

    fn apply(&self, ctx: &mut InterventionContext<'_>);
}

// ── No-op ─────────────────────────────────────────────────────────────────────

/// An intervention that never changes anything.
pub struct NoIntervention;

impl Intervention for NoIntervention {
    fn name(&self) -> &str {
        "none"
    }

    #[inline]
    fn apply(&self, _ctx: &mut InterventionContext<'_>) {}
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Registered interventions, applied in registration order.
///
/// A later intervention that writes the same field as an earlier one on the
/// same day wins; nothing is combined.
#[derive(Default)]
pub struct InterventionManager {
    interventions: Vec<Box<dyn Intervention>>,
}

impl InterventionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intervention: Box<dyn Intervention>) {
        self.interventions.push(intervention);
    }

    pub fn len(&self) -> usize {
        self.interventions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interventions.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.interventions.iter().map(|i| i.name()).collect()
    }

    pub fn apply_all(&self, ctx: &mut InterventionContext<'_>) {
        for intervention in &self.interventions {
            trace!("{}: applying {}", ctx.day, intervention.name());
            intervention.apply(ctx);
        }
    }
}

impl FromIterator<Box<dyn Intervention>> for InterventionManager {
    fn from_iter<I: IntoIterator<Item = Box<dyn Intervention>>>(iter: I) -> Self {
        Self { interventions: iter.into_iter().collect() }
    }
}
