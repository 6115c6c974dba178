//! Disease compartments shared by every model variant.

use std::fmt;

/// One disease state.  A model uses an ordered subset of these.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compartment {
    Susceptible,
    Exposed,
    /// The single infectious state of models without a symptomatic split.
    Infectious,
    Asymptomatic,
    Symptomatic,
    Recovered,
    Dead,
}

impl Compartment {
    /// Number of variants; sizes the per-compartment lookup tables.
    pub const COUNT: usize = 7;

    pub const ALL: [Compartment; Self::COUNT] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infectious,
        Compartment::Asymptomatic,
        Compartment::Symptomatic,
        Compartment::Recovered,
        Compartment::Dead,
    ];

    /// Dense table index.
    #[inline(always)]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Short code used in history columns and CSV headers.
    pub fn code(self) -> &'static str {
        match self {
            Compartment::Susceptible  => "S",
            Compartment::Exposed      => "E",
            Compartment::Infectious   => "I",
            Compartment::Asymptomatic => "IA",
            Compartment::Symptomatic  => "IS",
            Compartment::Recovered    => "R",
            Compartment::Dead         => "D",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Compartment::Susceptible  => "susceptible",
            Compartment::Exposed      => "exposed",
            Compartment::Infectious   => "infectious",
            Compartment::Asymptomatic => "asymptomatic",
            Compartment::Symptomatic  => "symptomatic",
            Compartment::Recovered    => "recovered",
            Compartment::Dead         => "dead",
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: &str) -> Option<Compartment> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
