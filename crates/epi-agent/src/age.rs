//! Age-group table: assignment weights, susceptibility and contact counts.

use rand_distr::WeightedIndex;

use epi_core::{check_non_negative, AgeGroupId, EpiError, EpiResult, SimRng};

/// One row of the age table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgeGroup {
    pub name:             String,
    /// Relative share of the population (need not sum to 1).
    pub weight:           f64,
    /// Multiplier applied to the transmission probability when an agent of
    /// this group is the target.
    pub susceptibility:   f64,
    /// Base number of contacts per day for a source of this group.
    pub contacts_per_day: u32,
}

/// Validated, ordered list of age groups.  `AgeGroupId(i)` is row `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct AgeStructure {
    groups: Vec<AgeGroup>,
}

impl AgeStructure {
    /// Largest supported number of groups; `AgeGroupId::INVALID` is reserved.
    pub const MAX_GROUPS: usize = AgeGroupId::INVALID.0 as usize;

    /// A single group `"all"` with weight 1 and susceptibility 1.
    pub fn single(contacts_per_day: u32) -> Self {
        Self {
            groups: vec![AgeGroup {
                name: "all".to_owned(),
                weight: 1.0,
                susceptibility: 1.0,
                contacts_per_day,
            }],
        }
    }

    pub fn new(groups: Vec<AgeGroup>) -> EpiResult<Self> {
        if groups.is_empty() {
            return Err(EpiError::Config("at least one age group is required".into()));
        }
        if groups.len() > Self::MAX_GROUPS {
            return Err(EpiError::Config(format!(
                "{} age groups exceed the maximum of {}",
                groups.len(),
                Self::MAX_GROUPS
            )));
        }
        for (i, g) in groups.iter().enumerate() {
            if groups[..i].iter().any(|other| other.name == g.name) {
                return Err(EpiError::Config(format!("duplicate age group {:?}", g.name)));
            }
            check_non_negative(&format!("age_groups.distribution.{}", g.name), g.weight)?;
            check_non_negative(&format!("age_groups.susceptibility.{}", g.name), g.susceptibility)?;
        }
        if groups.iter().map(|g| g.weight).sum::<f64>() <= 0.0 {
            return Err(EpiError::Config("age-group weights must have a positive sum".into()));
        }
        Ok(Self { groups })
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[AgeGroup] {
        &self.groups
    }

    pub fn get(&self, id: AgeGroupId) -> Option<&AgeGroup> {
        self.groups.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<AgeGroupId> {
        self.groups
            .iter()
            .position(|g| g.name == name)
            .map(|i| AgeGroupId(i as u8))
    }

    pub fn name(&self, id: AgeGroupId) -> &str {
        self.get(id).map_or("?", |g| g.name.as_str())
    }

    #[inline]
    pub fn susceptibility(&self, id: AgeGroupId) -> f64 {
        self.get(id).map_or(0.0, |g| g.susceptibility)
    }

    /// Base contacts per day, indexed by `AgeGroupId`.
    pub fn base_contacts(&self) -> Vec<u32> {
        self.groups.iter().map(|g| g.contacts_per_day).collect()
    }

    /// Draw an age group for each of `count` agents.
    ///
    /// A single-group table consumes no randomness.
    pub fn assign(&self, count: usize, rng: &mut SimRng) -> EpiResult<Vec<AgeGroupId>> {
        if self.groups.len() == 1 {
            return Ok(vec![AgeGroupId(0); count]);
        }
        let dist = WeightedIndex::new(self.groups.iter().map(|g| g.weight))
            .map_err(|e| EpiError::Config(format!("age-group weights: {e}")))?;
        Ok((0..count).map(|_| AgeGroupId(rng.sample(&dist) as u8)).collect())
    }
}
