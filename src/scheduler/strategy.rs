use super::util;
use crate::model::{DaySlot, Employee, Shift};

/// Politique de sélection appliquée à un quart.
///
/// `eligible` contient des indices dans `employees`, déjà mélangés par
/// l'appelant. Une stratégie ne fait qu'assigner ; le marquage d'urgence
/// est commun et fait après coup.
pub trait FillStrategy {
    fn name(&self) -> &'static str;

    fn staff(
        &mut self,
        shift: &mut Shift,
        slot: DaySlot,
        eligible: &[usize],
        employees: &mut [Employee],
    );
}

/// Prend les premiers éligibles jusqu'à l'effectif requis.
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl FillStrategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn staff(
        &mut self,
        shift: &mut Shift,
        slot: DaySlot,
        eligible: &[usize],
        employees: &mut [Employee],
    ) {
        let take = shift.missing() as usize;
        for &idx in eligible.iter().take(take) {
            util::assign(shift, slot, &mut employees[idx]);
        }
    }
}

/// Parcourt les éligibles dans l'ordre et s'arrête une fois l'effectif atteint.
///
/// Même règle de sélection que [`Greedy`] : aucun ordre d'échéance n'est
/// calculé au-delà du quart courant.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeadlineOrdered;

impl FillStrategy for DeadlineOrdered {
    fn name(&self) -> &'static str {
        "deadline"
    }

    fn staff(
        &mut self,
        shift: &mut Shift,
        slot: DaySlot,
        eligible: &[usize],
        employees: &mut [Employee],
    ) {
        for &idx in eligible {
            if shift.is_full() {
                break;
            }
            let employee = &mut employees[idx];
            if !shift.has(&employee.name) {
                util::assign(shift, slot, employee);
            }
        }
    }
}

/// Rotation sur l'ensemble éligible à partir de `start` ; un tour complet
/// sans atteindre l'effectif suffit pour abandonner.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobin {
    start: usize,
}

impl RoundRobin {
    pub fn starting_at(start: usize) -> Self {
        Self { start }
    }
}

impl FillStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn staff(
        &mut self,
        shift: &mut Shift,
        slot: DaySlot,
        eligible: &[usize],
        employees: &mut [Employee],
    ) {
        let total = eligible.len();
        if total == 0 {
            return;
        }
        let mut cursor = self.start % total;

        for _ in 0..total {
            if shift.is_full() {
                break;
            }
            let idx = eligible[cursor];
            cursor = (cursor + 1) % total;

            if util::still_eligible(shift, slot, &employees[idx]) {
                util::assign(shift, slot, &mut employees[idx]);
            }
        }
    }
}
