use super::strategy::{DeadlineOrdered, FillStrategy, Greedy, RoundRobin};
use crate::model::{ModelError, Shift, ShiftId};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Options de remplissage
#[derive(Debug, Clone, Copy)]
pub struct FillOptions {
    /// Mélange l'ensemble éligible avant sélection (sinon : ordre du roster).
    pub shuffle: bool,
    /// Index de départ de la rotation (round-robin uniquement).
    pub rotation_start: usize,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            shuffle: true,
            rotation_start: 0,
        }
    }
}

/// Stratégies disponibles, dans l'ordre de comparaison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Greedy,
    RoundRobin,
    Deadline,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Greedy,
        StrategyKind::RoundRobin,
        StrategyKind::Deadline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Greedy => "greedy",
            StrategyKind::RoundRobin => "round-robin",
            StrategyKind::Deadline => "deadline",
        }
    }

    pub fn build(self, opts: &FillOptions) -> Box<dyn FillStrategy> {
        match self {
            StrategyKind::Greedy => Box::new(Greedy),
            StrategyKind::RoundRobin => Box::new(RoundRobin::starting_at(opts.rotation_start)),
            StrategyKind::Deadline => Box::new(DeadlineOrdered),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(StrategyKind::Greedy),
            "round-robin" | "round_robin" | "roundrobin" | "rr" => Ok(StrategyKind::RoundRobin),
            "deadline" | "edf" => Ok(StrategyKind::Deadline),
            other => Err(SchedError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Bilan d'un remplissage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub strategy: &'static str,
    pub shifts: usize,
    pub urgent_shifts: usize,
    /// Somme des places non pourvues.
    pub missing_headcount: u64,
    pub assignments: u64,
}

impl FillReport {
    pub(super) fn new(strategy: &'static str) -> Self {
        Self {
            strategy,
            shifts: 0,
            urgent_shifts: 0,
            missing_headcount: 0,
            assignments: 0,
        }
    }

    pub(super) fn record(&mut self, shift: &Shift) {
        self.shifts += 1;
        self.assignments += shift.assigned.len() as u64;
        if shift.urgent {
            self.urgent_shifts += 1;
            self.missing_headcount += u64::from(shift.missing());
        }
    }

    pub fn is_complete(&self) -> bool {
        self.urgent_shifts == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// même employé deux fois sur un même (jour, type)
    DoubleBooking,
    OverStaffed,
    UrgencyMismatch,
    UnknownEmployee,
    CounterMismatch,
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub shift: Option<ShiftId>,
    pub employee: Option<String>,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("unknown strategy: {0} (expected greedy, round-robin or deadline)")]
    UnknownStrategy(String),
}
