use crate::model::{DaySlot, Employee, Shift};

/// Indices des employés disponibles sur `slot` et absents de `shift`.
pub(super) fn eligible(shift: &Shift, slot: DaySlot, employees: &[Employee]) -> Vec<usize> {
    employees
        .iter()
        .enumerate()
        .filter(|(_, e)| still_eligible(shift, slot, e))
        .map(|(idx, _)| idx)
        .collect()
}

/// L'éligibilité peut changer pendant le remplissage d'un même quart.
pub(super) fn still_eligible(shift: &Shift, slot: DaySlot, employee: &Employee) -> bool {
    employee.is_available(slot) && !shift.has(&employee.name)
}

pub(super) fn assign(shift: &mut Shift, slot: DaySlot, employee: &mut Employee) {
    if employee.book(slot) {
        shift.assigned.push(employee.name.clone());
    }
}

pub(super) fn mark_urgency(shift: &mut Shift) {
    shift.urgent = shift.assigned.len() < shift.needed as usize;
}
