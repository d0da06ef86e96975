use crate::model::{Calendar, DaySlot, Employee, ModelError, Roster, ShiftId, ShiftKind};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Import d'employés depuis CSV: header `name,full_time,availability`
///
/// `availability` : `jour:type` séparés par `;` (ex. `1:morning;3:night`).
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row (empty name)");
        }
        let full_time = match rec.get(1).map(str::trim) {
            Some(flag) if !flag.is_empty() => parse_bool(flag)
                .with_context(|| format!("invalid full_time value for {name}"))?,
            _ => true,
        };
        let slots = match rec.get(2).map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_availability(raw)
                .with_context(|| format!("invalid availability for {name}"))?,
            _ => Vec::new(),
        };
        out.push(Employee::new(name, full_time, slots)?);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" | "full" | "full-time" => Ok(true),
        "false" | "0" | "no" | "n" | "non" | "part" | "part-time" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Parse `1:morning;3:night` (doublons conservés : c'est `Employee::new` qui les refuse).
pub fn parse_availability(raw: &str) -> anyhow::Result<Vec<DaySlot>> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(parse_slot)
        .collect()
}

fn parse_slot(chunk: &str) -> anyhow::Result<DaySlot> {
    let (day, kind) = chunk
        .split_once(':')
        .with_context(|| format!("expected day:kind, got {chunk:?}"))?;
    let day: u8 = day
        .trim()
        .parse()
        .with_context(|| format!("invalid day in {chunk:?}"))?;
    let kind: ShiftKind = kind.parse()?;
    Ok(DaySlot::new(day, kind))
}

/// Import d'un calendrier: header `week,day,kind,needed`
///
/// Le nombre de semaines est la plus grande semaine lue ; un quart absent
/// demande 0 personne.
pub fn import_calendar_csv<P: AsRef<Path>>(
    path: P,
    days_per_week: u8,
    start: Option<NaiveDate>,
) -> anyhow::Result<Calendar> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut needed: HashMap<ShiftId, i64> = HashMap::new();
    let mut weeks = 0u16;

    for rec in rdr.records() {
        let rec = rec?;
        let week: u16 = rec
            .get(0)
            .context("missing week")?
            .trim()
            .parse()
            .context("week must be a positive integer")?;
        if week == 0 {
            bail!("week numbers start at 1");
        }
        let day: u8 = rec
            .get(1)
            .context("missing day")?
            .trim()
            .parse()
            .context("day must be a positive integer")?;
        if day == 0 || day > days_per_week {
            return Err(ModelError::DayOutOfRange { day, days_per_week }.into());
        }
        let kind: ShiftKind = rec.get(2).context("missing kind")?.parse()?;
        let count: i64 = rec
            .get(3)
            .context("missing needed")?
            .trim()
            .parse()
            .context("needed must be an integer")?;

        let id = ShiftId::new(week, day, kind);
        if needed.insert(id, count).is_some() {
            return Err(ModelError::DuplicateShift(id).into());
        }
        weeks = weeks.max(week);
    }

    let calendar = Calendar::new(weeks, days_per_week, |id| {
        needed.get(&id).copied().unwrap_or(0)
    })?;
    Ok(match start {
        Some(date) => calendar.with_start(date),
        None => calendar,
    })
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des quarts: header `week,day,date,kind,needed,assigned,urgent`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, calendar: &Calendar) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "day", "date", "kind", "needed", "assigned", "urgent"])?;
    for (id, shift) in calendar.shifts() {
        let date = calendar
            .date_of(id.week, id.day)
            .map(|d| d.to_string())
            .unwrap_or_default();
        w.write_record([
            id.week.to_string().as_str(),
            id.day.to_string().as_str(),
            date.as_str(),
            id.kind.as_str(),
            shift.needed.to_string().as_str(),
            shift.assigned.join(";").as_str(),
            if shift.urgent { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}
