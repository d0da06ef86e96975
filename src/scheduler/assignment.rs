use super::{util, FillOptions, FillReport, FillStrategy, SchedError};
use crate::model::{self, Calendar, DaySlot, Employee, ShiftId, ShiftKind};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

/// Remplit `calendar` sur place avec `strategy`.
///
/// Parcours : semaines, jours, puis matin avant nuit. Pour chaque quart,
/// l'ensemble éligible est mélangé avec `rng` (si `opts.shuffle`) puis confié
/// à la stratégie ; le quart est marqué urgent s'il reste en sous-effectif.
/// Les entrées sont validées avant toute mutation.
pub fn fill_calendar<R>(
    calendar: &mut Calendar,
    employees: &mut [Employee],
    strategy: &mut dyn FillStrategy,
    rng: &mut R,
    opts: FillOptions,
) -> Result<FillReport, SchedError>
where
    R: Rng + ?Sized,
{
    model::validate(calendar, employees)?;

    let mut report = FillReport::new(strategy.name());

    for week in calendar.weeks.iter_mut() {
        for day in week.days.iter_mut() {
            for kind in ShiftKind::ALL {
                let id = ShiftId::new(week.index, day.index, kind);
                let slot = DaySlot::new(day.index, kind);
                let shift = day.shift_mut(kind);

                let mut eligible = util::eligible(shift, slot, employees);
                if opts.shuffle {
                    eligible.shuffle(rng);
                }

                strategy.staff(shift, slot, &eligible, employees);
                util::mark_urgency(shift);
                report.record(shift);

                if shift.urgent {
                    warn!(
                        shift = %id,
                        needed = shift.needed,
                        assigned = shift.assigned.len(),
                        "shift understaffed"
                    );
                } else {
                    debug!(shift = %id, eligible = eligible.len(), "shift filled");
                }
            }
        }
    }

    info!(
        strategy = report.strategy,
        shifts = report.shifts,
        urgent = report.urgent_shifts,
        missing = report.missing_headcount,
        "calendar filled"
    );
    Ok(report)
}
