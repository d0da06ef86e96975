use super::{Violation, ViolationKind};
use crate::model::{Calendar, DaySlot, Employee, ShiftId};
use std::collections::{HashMap, HashSet};

pub(super) fn detect_violations(calendar: &Calendar, employees: &[Employee]) -> Vec<Violation> {
    let mut out = Vec::new();
    let known: HashSet<&str> = employees.iter().map(|e| e.name.as_str()).collect();
    let mut booked: HashMap<(&str, DaySlot), ShiftId> = HashMap::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for (id, shift) in calendar.shifts() {
        let filled = shift.assigned.len();
        if filled > shift.needed as usize {
            out.push(violation(ViolationKind::OverStaffed, id, None));
        }
        if shift.urgent != (filled < shift.needed as usize) {
            out.push(violation(ViolationKind::UrgencyMismatch, id, None));
        }

        for name in &shift.assigned {
            if !known.contains(name.as_str()) {
                out.push(violation(ViolationKind::UnknownEmployee, id, Some(name)));
                continue;
            }
            *counts.entry(name.as_str()).or_default() += 1;
            if booked.insert((name.as_str(), id.slot()), id).is_some() {
                out.push(violation(ViolationKind::DoubleBooking, id, Some(name)));
            }
        }
    }

    for e in employees {
        let seen = counts.get(e.name.as_str()).copied().unwrap_or(0);
        if seen != e.assigned_shifts {
            out.push(Violation {
                kind: ViolationKind::CounterMismatch,
                shift: None,
                employee: Some(e.name.clone()),
            });
        }
    }

    out
}

fn violation(kind: ViolationKind, shift: ShiftId, employee: Option<&String>) -> Violation {
    Violation {
        kind,
        shift: Some(shift),
        employee: employee.cloned(),
    }
}
