//! Génération de scénarios aléatoires et comparaison des stratégies.
//!
//! Chaque exécution reçoit un clone indépendant du roster initial : aucune
//! stratégie ne voit les mutations d'une autre.

use crate::model::{Calendar, DaySlot, Employee, ModelError, Roster, ShiftKind};
use crate::scheduler::{FillOptions, FillReport, SchedError, Scheduler, StrategyKind};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Paramètres de génération.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    pub weeks: u16,
    pub days_per_week: u8,
    /// Effectif requis par quart (min, max).
    pub headcount_range: (u32, u32),
    /// Nombre de jours disponibles pour un temps plein (min, max).
    pub full_time_days: (u8, u8),
    /// Nombre de jours disponibles pour un temps partiel (min, max).
    pub part_time_days: (u8, u8),
    /// Probabilité qu'un employé soit à temps plein.
    pub full_time_ratio: f64,
    pub start: Option<NaiveDate>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            weeks: 1,
            days_per_week: 7,
            headcount_range: (3, 6),
            full_time_days: (5, 7),
            part_time_days: (1, 4),
            full_time_ratio: 0.5,
            start: None,
        }
    }
}

/// Noms par défaut façon colonnes de tableur : A..Z, AA, AB, ...
pub fn default_names(count: usize) -> Vec<String> {
    (0..count).map(column_name).collect()
}

fn column_name(mut n: usize) -> String {
    let mut out = Vec::new();
    loop {
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Un jour tiré par date, un type de quart tiré par jour.
pub fn generate_employees<R, S>(
    names: &[S],
    config: &ScenarioConfig,
    rng: &mut R,
) -> Result<Vec<Employee>, ModelError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    if config.days_per_week == 0 {
        return Err(ModelError::InvalidDaysPerWeek);
    }
    let week_len = usize::from(config.days_per_week);

    names
        .iter()
        .map(|name| {
            let full_time = rng.gen_bool(config.full_time_ratio.clamp(0.0, 1.0));
            let (lo, hi) = if full_time {
                config.full_time_days
            } else {
                config.part_time_days
            };
            let count = pick(rng, usize::from(lo), usize::from(hi)).min(week_len);

            let slots: Vec<DaySlot> = index::sample(rng, week_len, count)
                .into_iter()
                .map(|i| {
                    let kind = ShiftKind::ALL[rng.gen_range(0..ShiftKind::ALL.len())];
                    // i < week_len <= u8::MAX
                    DaySlot::new(i as u8 + 1, kind)
                })
                .collect();
            Employee::new(name.as_ref(), full_time, slots)
        })
        .collect()
}

pub fn generate_calendar<R>(config: &ScenarioConfig, rng: &mut R) -> Result<Calendar, ModelError>
where
    R: Rng + ?Sized,
{
    let (lo, hi) = config.headcount_range;
    let calendar = Calendar::new(config.weeks, config.days_per_week, |_| {
        pick(rng, lo as usize, hi as usize) as i64
    })?;
    Ok(match config.start {
        Some(start) => calendar.with_start(start),
        None => calendar,
    })
}

/// Construit un roster neuf : employés puis calendrier, depuis le même générateur.
pub fn generate_roster<R, S>(
    names: &[S],
    config: &ScenarioConfig,
    rng: &mut R,
) -> Result<Roster, ModelError>
where
    R: Rng + ?Sized,
    S: AsRef<str>,
{
    let employees = generate_employees(names, config, rng)?;
    let calendar = generate_calendar(config, rng)?;
    debug!(
        employees = employees.len(),
        shifts = calendar.shift_count(),
        "scenario generated"
    );
    Ok(Roster::new(employees, calendar))
}

fn pick<R: Rng + ?Sized>(rng: &mut R, lo: usize, hi: usize) -> usize {
    if hi <= lo {
        lo
    } else {
        rng.gen_range(lo..=hi)
    }
}

/// Résultat d'une stratégie sur sa propre copie du roster.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub kind: StrategyKind,
    pub report: FillReport,
    pub roster: Roster,
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub runs: Vec<StrategyRun>,
}

impl Comparison {
    pub fn run(&self, kind: StrategyKind) -> Option<&StrategyRun> {
        self.runs.iter().find(|r| r.kind == kind)
    }

    /// Nombre de quarts par employé, une colonne par exécution.
    pub fn shift_counts(&self) -> Vec<(String, Vec<u32>)> {
        let Some(first) = self.runs.first() else {
            return Vec::new();
        };
        first
            .roster
            .employees
            .iter()
            .map(|e| {
                let counts = self
                    .runs
                    .iter()
                    .map(|r| {
                        r.roster
                            .find_employee(&e.name)
                            .map_or(0, |x| x.assigned_shifts)
                    })
                    .collect();
                (e.name.clone(), counts)
            })
            .collect()
    }
}

/// Exécute chaque stratégie de `StrategyKind::ALL` sur un clone de `initial`,
/// avec un générateur réinitialisé sur `seed` à chaque fois.
pub fn compare(initial: &Roster, seed: u64, opts: FillOptions) -> Result<Comparison, SchedError> {
    let mut runs = Vec::with_capacity(StrategyKind::ALL.len());
    for kind in StrategyKind::ALL {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut scheduler = Scheduler::new(initial.clone());
        let report = scheduler.fill(kind, &mut rng, opts)?;
        runs.push(StrategyRun {
            kind,
            report,
            roster: scheduler.into_roster(),
        });
    }
    Ok(Comparison { runs })
}
