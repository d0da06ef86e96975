#![forbid(unsafe_code)]
//! Roulement — remplissage de calendriers de quarts et comparaison d'heuristiques.
//!
//! - Calendrier semaines → jours → {matin, nuit}, effectif requis par quart.
//! - Trois stratégies interchangeables : greedy, round-robin, échéance.
//! - Hasard injecté (générateur seedable) : résultats reproductibles.
//! - Stockage fichiers (JSON/CSV) derrière la feature `serde`.

pub mod display;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod scenario;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{
    Calendar, DaySlot, Employee, ModelError, Roster, Shift, ShiftId, ShiftKind, URGENT_MARKER,
};
pub use scenario::{compare, generate_roster, Comparison, ScenarioConfig, StrategyRun};
pub use scheduler::{
    fill_calendar, DeadlineOrdered, FillOptions, FillReport, FillStrategy, Greedy, RoundRobin,
    SchedError, Scheduler, StrategyKind, Violation, ViolationKind,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
