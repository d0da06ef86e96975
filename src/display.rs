//! Rendu texte des calendriers et des compteurs (la lib n'écrit jamais sur stdout).

use crate::model::{Calendar, Employee, ShiftKind};
use crate::scenario::Comparison;
use std::fmt;

const RULE: usize = 40;

pub struct DisplayableCalendar<'a>(pub &'a Calendar);

impl fmt::Display for DisplayableCalendar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let calendar = self.0;
        writeln!(f, "Shift Schedule")?;
        writeln!(f, "{}", "=".repeat(RULE))?;

        for week in &calendar.weeks {
            writeln!(f, "\nWeek {}", week.index)?;
            writeln!(f, "{}", "-".repeat(RULE))?;

            for day in &week.days {
                match calendar.date_of(week.index, day.index) {
                    Some(date) => writeln!(f, "\n  Day {} ({})", day.index, date)?,
                    None => writeln!(f, "\n  Day {}", day.index)?,
                }
                writeln!(f, "    Shift     | Needed | Assigned Employees")?;
                writeln!(f, "    ----------|--------|-------------------")?;
                for kind in ShiftKind::ALL {
                    let shift = day.shift(kind);
                    let entries = shift.entries();
                    let assigned = if entries.is_empty() {
                        "None".to_string()
                    } else {
                        entries.join(", ")
                    };
                    writeln!(
                        f,
                        "    {:<10}| {:<6} | {}",
                        label(kind),
                        shift.needed,
                        assigned
                    )?;
                }
            }
            writeln!(f, "{}", "-".repeat(RULE))?;
        }
        Ok(())
    }
}

fn label(kind: ShiftKind) -> &'static str {
    match kind {
        ShiftKind::Morning => "Morning",
        ShiftKind::Night => "Night",
    }
}

/// Une ligne par employé : contrat, disponibilités restantes, quarts attribués.
pub struct DisplayableEmployees<'a>(pub &'a [Employee]);

impl fmt::Display for DisplayableEmployees<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in self.0 {
            let remaining: Vec<String> = e.availability.iter().map(ToString::to_string).collect();
            writeln!(
                f,
                "{} ({}) - remaining: [{}] - shifts: {}",
                e.name,
                if e.full_time { "Full-time" } else { "Part-time" },
                remaining.join(", "),
                e.assigned_shifts
            )?;
        }
        Ok(())
    }
}

/// Tableau comparatif : quarts par employé puis bilan d'urgence par stratégie.
pub struct DisplayableComparison<'a>(pub &'a Comparison);

impl fmt::Display for DisplayableComparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = self.0;
        let counts = comparison.shift_counts();
        let width = counts
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max("Employee".len());

        write!(f, "{:<width$}", "Employee")?;
        for run in &comparison.runs {
            write!(f, " | {:>11}", run.kind.as_str())?;
        }
        writeln!(f)?;

        for (name, row) in &counts {
            write!(f, "{:<width$}", name)?;
            for c in row {
                write!(f, " | {:>11}", c)?;
            }
            writeln!(f)?;
        }

        write!(f, "{:<width$}", "urgent")?;
        for run in &comparison.runs {
            let cell = format!("{}/{}", run.report.urgent_shifts, run.report.shifts);
            write!(f, " | {:>11}", cell)?;
        }
        writeln!(f)
    }
}

pub fn render_calendar(calendar: &Calendar) -> String {
    DisplayableCalendar(calendar).to_string()
}

pub fn render_employees(employees: &[Employee]) -> String {
    DisplayableEmployees(employees).to_string()
}

pub fn render_comparison(comparison: &Comparison) -> String {
    DisplayableComparison(comparison).to_string()
}
