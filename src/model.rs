use chrono::{Duration, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Marqueur rendu à la suite d'un quart en sous-effectif.
///
/// Réservé : aucun employé ne peut porter ce nom (insensible à la casse).
pub const URGENT_MARKER: &str = "urgent";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid headcount {needed} for {shift}: must be >= 0")]
    InvalidHeadcount { shift: ShiftId, needed: i64 },
    #[error("duplicate availability ({slot}) for employee {name}")]
    DuplicateAvailability { name: String, slot: DaySlot },
    #[error("employee {name}: availability day {day} outside 1..={days_per_week}")]
    AvailabilityOutOfRange {
        name: String,
        day: u8,
        days_per_week: u8,
    },
    #[error("day {day} outside 1..={days_per_week}")]
    DayOutOfRange { day: u8, days_per_week: u8 },
    #[error("days per week must be at least 1")]
    InvalidDaysPerWeek,
    #[error("employee name cannot be empty")]
    EmptyName,
    #[error("employee name {0:?} is reserved")]
    ReservedName(String),
    #[error("duplicate employee name: {0}")]
    DuplicateEmployee(String),
    #[error("unknown shift kind: {0}")]
    UnknownShiftKind(String),
    #[error("shift defined twice: {0}")]
    DuplicateShift(ShiftId),
    #[error("week {found} found where week {expected} was expected")]
    WeekOutOfOrder { expected: usize, found: u16 },
    #[error("week {week}: day {found} found where day {expected} was expected")]
    DayOutOfOrder {
        week: u16,
        expected: usize,
        found: u8,
    },
    #[error("week {week} has {days} day(s), expected {days_per_week}")]
    WeekLength {
        week: u16,
        days: usize,
        days_per_week: u8,
    },
    #[error("{shift} holds a {found} shift")]
    ShiftKindMismatch { shift: ShiftId, found: ShiftKind },
}

/// Type de quart, dans l'ordre de parcours (matin puis nuit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ShiftKind {
    Morning,
    Night,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 2] = [ShiftKind::Morning, ShiftKind::Night];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Night => "night",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" | "m" | "matin" => Ok(ShiftKind::Morning),
            "night" | "n" | "nuit" => Ok(ShiftKind::Night),
            other => Err(ModelError::UnknownShiftKind(other.to_string())),
        }
    }
}

/// Entrée de disponibilité : un jour de la semaine (base 1) et un type de quart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DaySlot {
    pub day: u8,
    pub kind: ShiftKind,
}

impl DaySlot {
    pub fn new(day: u8, kind: ShiftKind) -> Self {
        Self { day, kind }
    }
}

impl fmt::Display for DaySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {}", self.day, self.kind)
    }
}

/// Identifiant structuré d'un quart du calendrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShiftId {
    pub week: u16,
    pub day: u8,
    pub kind: ShiftKind,
}

impl ShiftId {
    pub fn new(week: u16, day: u8, kind: ShiftKind) -> Self {
        Self { week, day, kind }
    }

    pub fn slot(&self) -> DaySlot {
        DaySlot::new(self.day, self.kind)
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} / day {} / {}", self.week, self.day, self.kind)
    }
}

/// Employé : disponibilités restantes et compteur de quarts attribués.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "EmployeeRecord", into = "EmployeeRecord")
)]
pub struct Employee {
    pub name: String,
    /// Informatif : n'influe pas sur l'éligibilité.
    pub full_time: bool,
    pub availability: BTreeSet<DaySlot>,
    pub assigned_shifts: u32,
}

impl Employee {
    /// Crée un employé en refusant les disponibilités en double.
    pub fn new<N, I>(name: N, full_time: bool, availability: I) -> Result<Self, ModelError>
    where
        N: Into<String>,
        I: IntoIterator<Item = DaySlot>,
    {
        let name = name.into();
        check_name(&name)?;
        let mut set = BTreeSet::new();
        for slot in availability {
            if !set.insert(slot) {
                return Err(ModelError::DuplicateAvailability { name, slot });
            }
        }
        Ok(Self {
            name,
            full_time,
            availability: set,
            assigned_shifts: 0,
        })
    }

    pub fn is_available(&self, slot: DaySlot) -> bool {
        self.availability.contains(&slot)
    }

    /// Consomme `slot` : retire la disponibilité et incrémente le compteur.
    ///
    /// Retourne `false` (sans effet) si le créneau n'était plus disponible.
    pub fn book(&mut self, slot: DaySlot) -> bool {
        if self.availability.remove(&slot) {
            self.assigned_shifts += 1;
            true
        } else {
            false
        }
    }
}

fn check_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::EmptyName);
    }
    if name.trim().eq_ignore_ascii_case(URGENT_MARKER) {
        return Err(ModelError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Forme sérialisée d'un employé (liste, pour détecter les doublons au chargement).
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct EmployeeRecord {
    name: String,
    #[serde(default = "default_full_time")]
    full_time: bool,
    #[serde(default)]
    availability: Vec<DaySlot>,
    #[serde(default)]
    assigned_shifts: u32,
}

#[cfg(feature = "serde")]
fn default_full_time() -> bool {
    true
}

#[cfg(feature = "serde")]
impl TryFrom<EmployeeRecord> for Employee {
    type Error = ModelError;

    fn try_from(rec: EmployeeRecord) -> Result<Self, Self::Error> {
        let mut employee = Employee::new(rec.name, rec.full_time, rec.availability)?;
        employee.assigned_shifts = rec.assigned_shifts;
        Ok(employee)
    }
}

#[cfg(feature = "serde")]
impl From<Employee> for EmployeeRecord {
    fn from(e: Employee) -> Self {
        Self {
            name: e.name,
            full_time: e.full_time,
            availability: e.availability.into_iter().collect(),
            assigned_shifts: e.assigned_shifts,
        }
    }
}

/// Quart : effectif requis et liste ordonnée des personnes retenues.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shift {
    pub kind: ShiftKind,
    pub needed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub assigned: Vec<String>,
    /// Posé après remplissage si `assigned.len() < needed`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub urgent: bool,
}

impl Shift {
    pub fn new(kind: ShiftKind, needed: u32) -> Self {
        Self {
            kind,
            needed,
            assigned: Vec::new(),
            urgent: false,
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.assigned.iter().any(|n| n == name)
    }

    pub fn is_full(&self) -> bool {
        self.assigned.len() >= self.needed as usize
    }

    /// Places restant à pourvoir.
    pub fn missing(&self) -> u32 {
        let filled = u32::try_from(self.assigned.len()).unwrap_or(u32::MAX);
        self.needed.saturating_sub(filled)
    }

    /// Liste affichable : noms puis marqueur d'urgence éventuel.
    pub fn entries(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.assigned.iter().map(String::as_str).collect();
        if self.urgent {
            out.push(URGENT_MARKER);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Day {
    pub index: u8,
    pub morning: Shift,
    pub night: Shift,
}

impl Day {
    fn new(index: u8, morning: u32, night: u32) -> Self {
        Self {
            index,
            morning: Shift::new(ShiftKind::Morning, morning),
            night: Shift::new(ShiftKind::Night, night),
        }
    }

    pub fn shift(&self, kind: ShiftKind) -> &Shift {
        match kind {
            ShiftKind::Morning => &self.morning,
            ShiftKind::Night => &self.night,
        }
    }

    pub fn shift_mut(&mut self, kind: ShiftKind) -> &mut Shift {
        match kind {
            ShiftKind::Morning => &mut self.morning,
            ShiftKind::Night => &mut self.night,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Week {
    pub index: u16,
    pub days: Vec<Day>,
}

/// Calendrier semaines → jours → {matin, nuit}.
///
/// La structure et les effectifs sont figés à la création ; seuls
/// `assigned` et `urgent` évoluent pendant le remplissage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "CalendarRecord", into = "CalendarRecord")
)]
pub struct Calendar {
    pub days_per_week: u8,
    /// Date du jour 1 de la semaine 1, pour l'affichage uniquement.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub start: Option<NaiveDate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weeks: Vec<Week>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            days_per_week: 7,
            start: None,
            weeks: Vec::new(),
        }
    }
}

impl Calendar {
    /// Construit `weeks` semaines de `days_per_week` jours ; `needed` fournit
    /// l'effectif de chaque quart dans l'ordre de parcours.
    pub fn new<F>(weeks: u16, days_per_week: u8, mut needed: F) -> Result<Self, ModelError>
    where
        F: FnMut(ShiftId) -> i64,
    {
        if days_per_week == 0 {
            return Err(ModelError::InvalidDaysPerWeek);
        }
        let mut out = Vec::with_capacity(usize::from(weeks));
        for week in 1..=weeks {
            let mut days = Vec::with_capacity(usize::from(days_per_week));
            for day in 1..=days_per_week {
                let morning = headcount(ShiftId::new(week, day, ShiftKind::Morning), &mut needed)?;
                let night = headcount(ShiftId::new(week, day, ShiftKind::Night), &mut needed)?;
                days.push(Day::new(day, morning, night));
            }
            out.push(Week { index: week, days });
        }
        Ok(Self {
            days_per_week,
            start: None,
            weeks: out,
        })
    }

    /// Même effectif pour tous les quarts.
    pub fn uniform(weeks: u16, days_per_week: u8, needed: u32) -> Result<Self, ModelError> {
        Self::new(weeks, days_per_week, |_| i64::from(needed))
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self
    }

    /// Vérifie la forme du calendrier : semaines et jours numérotés 1..N dans
    /// l'ordre, `days_per_week` jours par semaine, un matin et une nuit par jour.
    pub fn check_structure(&self) -> Result<(), ModelError> {
        if self.days_per_week == 0 {
            return Err(ModelError::InvalidDaysPerWeek);
        }
        for (i, week) in self.weeks.iter().enumerate() {
            if usize::from(week.index) != i + 1 {
                return Err(ModelError::WeekOutOfOrder {
                    expected: i + 1,
                    found: week.index,
                });
            }
            for (j, day) in week.days.iter().enumerate() {
                self.check_day(day.index)?;
                if usize::from(day.index) != j + 1 {
                    return Err(ModelError::DayOutOfOrder {
                        week: week.index,
                        expected: j + 1,
                        found: day.index,
                    });
                }
                for kind in ShiftKind::ALL {
                    let found = day.shift(kind).kind;
                    if found != kind {
                        return Err(ModelError::ShiftKindMismatch {
                            shift: ShiftId::new(week.index, day.index, kind),
                            found,
                        });
                    }
                }
            }
            if week.days.len() != usize::from(self.days_per_week) {
                return Err(ModelError::WeekLength {
                    week: week.index,
                    days: week.days.len(),
                    days_per_week: self.days_per_week,
                });
            }
        }
        Ok(())
    }

    pub fn check_day(&self, day: u8) -> Result<(), ModelError> {
        if day == 0 || day > self.days_per_week {
            return Err(ModelError::DayOutOfRange {
                day,
                days_per_week: self.days_per_week,
            });
        }
        Ok(())
    }

    /// Date réelle d'un jour, si le calendrier est ancré.
    pub fn date_of(&self, week: u16, day: u8) -> Option<NaiveDate> {
        let start = self.start?;
        if week == 0 || day == 0 {
            return None;
        }
        let offset = i64::from(week - 1) * i64::from(self.days_per_week) + i64::from(day - 1);
        start.checked_add_signed(Duration::days(offset))
    }

    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.weeks
            .iter()
            .find(|w| w.index == id.week)
            .and_then(|w| w.days.iter().find(|d| d.index == id.day))
            .map(|d| d.shift(id.kind))
    }

    /// Tous les quarts dans l'ordre de parcours.
    pub fn shifts(&self) -> impl Iterator<Item = (ShiftId, &Shift)> + '_ {
        self.weeks.iter().flat_map(|w| {
            w.days.iter().flat_map(move |d| {
                ShiftKind::ALL
                    .into_iter()
                    .map(move |kind| (ShiftId::new(w.index, d.index, kind), d.shift(kind)))
            })
        })
    }

    pub fn shift_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len() * ShiftKind::ALL.len()).sum()
    }
}

/// Forme sérialisée d'un calendrier, contrôlée au chargement.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct CalendarRecord {
    days_per_week: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<NaiveDate>,
    #[serde(default)]
    weeks: Vec<Week>,
}

#[cfg(feature = "serde")]
impl TryFrom<CalendarRecord> for Calendar {
    type Error = ModelError;

    fn try_from(rec: CalendarRecord) -> Result<Self, Self::Error> {
        let calendar = Calendar {
            days_per_week: rec.days_per_week,
            start: rec.start,
            weeks: rec.weeks,
        };
        calendar.check_structure()?;
        Ok(calendar)
    }
}

#[cfg(feature = "serde")]
impl From<Calendar> for CalendarRecord {
    fn from(c: Calendar) -> Self {
        Self {
            days_per_week: c.days_per_week,
            start: c.start,
            weeks: c.weeks,
        }
    }
}

fn headcount<F>(id: ShiftId, needed: &mut F) -> Result<u32, ModelError>
where
    F: FnMut(ShiftId) -> i64,
{
    let n = needed(id);
    u32::try_from(n).map_err(|_| ModelError::InvalidHeadcount { shift: id, needed: n })
}

/// Vérifie qu'un ensemble d'employés est utilisable avec `calendar` :
/// calendrier bien formé, noms uniques et non réservés, jours de
/// disponibilité dans la semaine.
pub fn validate(calendar: &Calendar, employees: &[Employee]) -> Result<(), ModelError> {
    calendar.check_structure()?;
    let mut seen = HashSet::with_capacity(employees.len());
    for e in employees {
        check_name(&e.name)?;
        if !seen.insert(e.name.as_str()) {
            return Err(ModelError::DuplicateEmployee(e.name.clone()));
        }
        if let Some(slot) = e
            .availability
            .iter()
            .find(|s| calendar.check_day(s.day).is_err())
        {
            return Err(ModelError::AvailabilityOutOfRange {
                name: e.name.clone(),
                day: slot.day,
                days_per_week: calendar.days_per_week,
            });
        }
    }
    Ok(())
}

/// Roster complet : l'unité copiée avant chaque stratégie et persistée.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Roster {
    #[cfg_attr(feature = "serde", serde(default))]
    pub employees: Vec<Employee>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: Calendar,
}

impl Roster {
    pub fn new(employees: Vec<Employee>, calendar: Calendar) -> Self {
        Self {
            employees,
            calendar,
        }
    }

    pub fn find_employee<'a>(&'a self, name: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.name == name)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate(&self.calendar, &self.employees)
    }
}
