mod assignment;
mod conflicts;
mod strategy;
mod types;
mod util;

pub use assignment::fill_calendar;
pub use strategy::{DeadlineOrdered, FillStrategy, Greedy, RoundRobin};
pub use types::{FillOptions, FillReport, SchedError, StrategyKind, Violation, ViolationKind};

use crate::model::{Calendar, Employee, Roster};
use rand::Rng;

/// Scheduler : encapsule le Roster d'une exécution.
///
/// Chaque exécution doit posséder sa propre copie : cloner le roster avant
/// de le confier à un second scheduler.
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn fill<R>(
        &mut self,
        kind: StrategyKind,
        rng: &mut R,
        opts: FillOptions,
    ) -> Result<FillReport, SchedError>
    where
        R: Rng + ?Sized,
    {
        let mut strategy = kind.build(&opts);
        self.fill_with(strategy.as_mut(), rng, opts)
    }

    pub fn fill_with<R>(
        &mut self,
        strategy: &mut dyn FillStrategy,
        rng: &mut R,
        opts: FillOptions,
    ) -> Result<FillReport, SchedError>
    where
        R: Rng + ?Sized,
    {
        let Roster {
            employees,
            calendar,
        } = &mut self.roster;
        fill_calendar(calendar, employees, strategy, rng, opts)
    }

    pub fn detect_violations(&self) -> Vec<Violation> {
        detect_violations(&self.roster.calendar, &self.roster.employees)
    }
}

/// Contrôle a posteriori des invariants d'un calendrier rempli.
pub fn detect_violations(calendar: &Calendar, employees: &[Employee]) -> Vec<Violation> {
    conflicts::detect_violations(calendar, employees)
}
