//! Unit tests for epi-intervention.

#[cfg(test)]
mod support {
    use epi_agent::{AgeStructure, Population, PopulationBuilder};
    use epi_core::SimRng;
    use epi_disease::{DiseaseModel, DiseaseParams, ModelKind};

    pub struct World {
        pub contacts:   crate::ContactRates,
        pub population: Population,
        pub model:      DiseaseModel,
        pub rng:        SimRng,
    }

    impl World {
        pub fn new(agents: usize, base: Vec<u32>) -> Self {
            let mut rng = SimRng::new(17);
            let population = PopulationBuilder::new(agents)
                .build(&AgeStructure::single(base[0]), &mut rng)
                .unwrap();
            Self {
                contacts: crate::ContactRates::new(base),
                population,
                model: DiseaseModel::new(ModelKind::Seiard, &DiseaseParams::default()).unwrap(),
                rng,
            }
        }

        pub fn apply(&mut self, day: u32, what: &dyn crate::Intervention) {
            let mut ctx = crate::InterventionContext {
                day:        epi_core::Day(day),
                contacts:   &mut self.contacts,
                population: &mut self.population,
                model:      &self.model,
                rng:        &mut self.rng,
            };
            what.apply(&mut ctx);
        }

        pub fn run(&mut self, day: u32, manager: &crate::InterventionManager) {
            let mut ctx = crate::InterventionContext {
                day:        epi_core::Day(day),
                contacts:   &mut self.contacts,
                population: &mut self.population,
                model:      &self.model,
                rng:        &mut self.rng,
            };
            manager.apply_all(&mut ctx);
        }
    }
}

#[cfg(test)]
mod contact_rates {
    use epi_core::AgeGroupId;

    use crate::ContactRates;

    #[test]
    fn scale_floors_and_reset_restores() {
        let mut c = ContactRates::new(vec![10, 7, 3]);
        c.scale_from_base(0.5);
        assert_eq!(c.current(), &[5, 3, 1]);
        c.scale_from_base(0.5);
        assert_eq!(c.current(), &[5, 3, 1], "scaling always starts from base");
        c.reset();
        assert_eq!(c.current(), c.base());
    }

    #[test]
    fn set_and_get() {
        let mut c = ContactRates::new(vec![10, 10]);
        c.set(AgeGroupId(1), 2);
        assert_eq!(c.get(AgeGroupId(1)), 2);
        assert_eq!(c.get(AgeGroupId(0)), 10);
        assert_eq!(c.get(AgeGroupId(9)), 0);
    }
}

#[cfg(test)]
mod lockdown {
    use super::support::World;
    use crate::{InterventionError, Lockdown};

    #[test]
    fn boundary_days_inclusive() {
        let lockdown = Lockdown::new(5, 10, 0.5).unwrap();
        let mut w = World::new(1, vec![10]);
        for day in 0..20 {
            w.apply(day, &lockdown);
            let expected = if (5..=10).contains(&day) { 5 } else { 10 };
            assert_eq!(w.contacts.current()[0], expected, "day {day}");
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            Lockdown::new(10, 5, 0.5).unwrap_err(),
            InterventionError::InvalidWindow { policy: "lockdown", start: 10, end: 5 }
        );
        assert!(matches!(Lockdown::new(0, 5, 1.5), Err(InterventionError::Core(_))));
    }
}

#[cfg(test)]
mod masks {
    use super::support::World;
    use crate::Masks;

    #[test]
    fn full_compliance_inside_zero_outside() {
        let masks = Masks::new(2, 4, 1.0, 0.7).unwrap();
        let mut w = World::new(20, vec![10]);
        w.apply(3, &masks);
        assert!(w.population.iter().all(|a| a.mask_efficacy == 0.7));
        w.apply(5, &masks);
        assert!(w.population.iter().all(|a| a.mask_efficacy == 0.0));
    }

    #[test]
    fn partial_compliance_is_redrawn_daily() {
        let masks = Masks::new(0, 100, 0.5, 1.0).unwrap();
        let mut w = World::new(200, vec![10]);
        w.apply(0, &masks);
        let first: Vec<f64> = w.population.iter().map(|a| a.mask_efficacy).collect();
        w.apply(1, &masks);
        let second: Vec<f64> = w.population.iter().map(|a| a.mask_efficacy).collect();
        assert_ne!(first, second);
        let masked = second.iter().filter(|&&e| e == 1.0).count();
        assert!((60..140).contains(&masked), "got {masked}");
    }
}

#[cfg(test)]
mod vaccination {
    use epi_core::AgentId;
    use epi_disease::Compartment;

    use super::support::World;
    use crate::Vaccination;

    #[test]
    fn certain_vaccination_immunises_susceptibles_only() {
        let vax = Vaccination::new(0, 3, 1.0, 1.0, 1.0).unwrap();
        let mut w = World::new(10, vec![10]);
        w.population[AgentId(0)].state = Compartment::Symptomatic;
        w.apply(0, &vax);
        assert!(!w.population[AgentId(0)].immune);
        assert!(w.population.iter().skip(1).all(|a| a.immune));
        assert!(w.population.iter().skip(1).all(|a| a.state == Compartment::Susceptible));
    }

    #[test]
    fn end_day_is_exclusive() {
        let vax = Vaccination::new(2, 4, 1.0, 1.0, 1.0).unwrap();
        let mut w = World::new(5, vec![10]);
        w.apply(1, &vax);
        w.apply(4, &vax);
        assert!(w.population.iter().all(|a| !a.immune));
        w.apply(3, &vax);
        assert!(w.population.iter().all(|a| a.immune));
    }

    #[test]
    fn zero_efficacy_never_immunises() {
        let vax = Vaccination::new(0, 50, 1.0, 1.0, 0.0).unwrap();
        let mut w = World::new(50, vec![10]);
        for day in 0..50 {
            w.apply(day, &vax);
        }
        assert_eq!(w.population.immune_count(), 0);
    }
}

#[cfg(test)]
mod manager {
    use super::support::World;
    use crate::{
        Intervention, InterventionConfig, InterventionManager, Lockdown, NoIntervention,
    };

    #[test]
    fn later_registration_overrides_earlier() {
        // Two overlapping lockdowns: the second one's write is what sticks,
        // including its "restore base" outside its own window.
        let manager: InterventionManager = [
            Box::new(Lockdown::new(0, 10, 0.5).unwrap()) as Box<dyn Intervention>,
            Box::new(Lockdown::new(5, 6, 0.2).unwrap()),
        ]
        .into_iter()
        .collect();
        let mut w = World::new(1, vec![10]);

        w.run(2, &manager);
        assert_eq!(w.contacts.current()[0], 10);
        w.run(5, &manager);
        assert_eq!(w.contacts.current()[0], 2);
        w.run(8, &manager);
        assert_eq!(w.contacts.current()[0], 10);
    }

    #[test]
    fn names_in_registration_order() {
        let mut manager = InterventionManager::new();
        assert!(manager.is_empty());
        manager.push(Box::new(NoIntervention));
        manager.push(Box::new(Lockdown::new(0, 1, 0.5).unwrap()));
        assert_eq!(manager.names(), vec!["none", "lockdown"]);
    }

    #[test]
    fn config_builds_policies() {
        let json = r#"[
            {"kind": "lockdown", "start_day": 5, "end_day": 10, "reduction_factor": 0.5},
            {"kind": "masks", "start_day": 0, "end_day": 30, "compliance": 0.8, "efficacy": 0.5},
            {"kind": "vaccination", "start_day": 10, "end_day": 40, "daily_rate": 0.01,
             "compliance": 0.9, "efficacy": 0.95}
        ]"#;
        let configs: Vec<InterventionConfig> = serde_json::from_str(json).unwrap();
        let manager: InterventionManager =
            configs.iter().map(|c| c.build().unwrap()).collect();
        assert_eq!(manager.names(), vec!["lockdown", "masks", "vaccination"]);
    }

    #[test]
    fn config_validation_errors() {
        let bad = InterventionConfig::Masks { start_day: 0, end_day: 5, compliance: 2.0, efficacy: 0.5 };
        assert!(bad.build().is_err());
        let bad = InterventionConfig::Vaccination {
            start_day: 9, end_day: 3, daily_rate: 0.1, compliance: 1.0, efficacy: 1.0,
        };
        assert!(bad.build().is_err());
    }
}
