#![forbid(unsafe_code)]
use rand::rngs::StdRng;
use rand::SeedableRng;
use roulement::{
    Calendar, DaySlot, Employee, FillOptions, ModelError, Roster, SchedError, Scheduler, ShiftId,
    ShiftKind, StrategyKind, URGENT_MARKER,
};

fn morning(day: u8) -> DaySlot {
    DaySlot::new(day, ShiftKind::Morning)
}

/// Une semaine d'un jour : seul le matin demande du monde.
fn single_shift(needed: i64) -> Calendar {
    Calendar::new(1, 1, |id| if id.kind == ShiftKind::Morning { needed } else { 0 }).unwrap()
}

fn morning_id() -> ShiftId {
    ShiftId::new(1, 1, ShiftKind::Morning)
}

#[test]
fn two_of_three_available_fill_exactly() {
    for kind in StrategyKind::ALL {
        let employees = vec![
            Employee::new("A", true, [morning(1)]).unwrap(),
            Employee::new("B", false, [morning(1)]).unwrap(),
            Employee::new("C", true, [DaySlot::new(1, ShiftKind::Night)]).unwrap(),
        ];
        let mut s = Scheduler::new(Roster::new(employees, single_shift(2)));
        let mut rng = StdRng::seed_from_u64(7);
        let report = s.fill(kind, &mut rng, FillOptions::default()).unwrap();

        let shift = s.roster().calendar.shift(morning_id()).unwrap();
        let mut names = shift.assigned.clone();
        names.sort();
        assert_eq!(names, vec!["A", "B"], "{kind}");
        assert!(!shift.urgent);
        assert!(report.is_complete());
        assert_eq!(s.roster().find_employee("C").unwrap().assigned_shifts, 0);
    }
}

#[test]
fn lone_employee_leaves_shift_urgent() {
    for kind in StrategyKind::ALL {
        let employees = vec![Employee::new("solo", true, [morning(1)]).unwrap()];
        let mut s = Scheduler::new(Roster::new(employees, single_shift(3)));
        let mut rng = StdRng::seed_from_u64(1);
        let report = s.fill(kind, &mut rng, FillOptions::default()).unwrap();

        let shift = s.roster().calendar.shift(morning_id()).unwrap();
        assert_eq!(shift.entries(), vec!["solo", URGENT_MARKER]);
        assert_eq!(report.urgent_shifts, 1);
        assert_eq!(report.missing_headcount, 2);
    }
}

#[test]
fn nobody_eligible_marks_urgent_only() {
    for kind in StrategyKind::ALL {
        let employees = vec![Employee::new("A", true, [DaySlot::new(1, ShiftKind::Night)]).unwrap()];
        let mut s = Scheduler::new(Roster::new(employees, single_shift(1)));
        let mut rng = StdRng::seed_from_u64(3);
        s.fill(kind, &mut rng, FillOptions::default()).unwrap();

        let shift = s.roster().calendar.shift(morning_id()).unwrap();
        assert_eq!(shift.entries(), vec![URGENT_MARKER]);
    }
}

#[test]
fn zero_headcount_is_never_urgent() {
    let employees = vec![Employee::new("A", true, [morning(1)]).unwrap()];
    let mut s = Scheduler::new(Roster::new(employees, single_shift(0)));
    let mut rng = StdRng::seed_from_u64(0);
    let report = s
        .fill(StrategyKind::Greedy, &mut rng, FillOptions::default())
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(s.roster().employees[0].assigned_shifts, 0);
}

#[test]
fn availability_is_consumed_across_weeks() {
    // même (jour, type) sur deux semaines : un seul quart possible
    let employees = vec![Employee::new("A", true, [morning(1)]).unwrap()];
    let calendar = Calendar::uniform(2, 1, 1).unwrap();
    let mut s = Scheduler::new(Roster::new(employees, calendar));
    let mut rng = StdRng::seed_from_u64(0);
    s.fill(StrategyKind::Deadline, &mut rng, FillOptions::default())
        .unwrap();

    let cal = &s.roster().calendar;
    assert_eq!(cal.shift(ShiftId::new(1, 1, ShiftKind::Morning)).unwrap().assigned, vec!["A"]);
    assert!(cal.shift(ShiftId::new(2, 1, ShiftKind::Morning)).unwrap().urgent);
    let a = s.roster().find_employee("A").unwrap();
    assert_eq!(a.assigned_shifts, 1);
    assert!(a.availability.is_empty());
    assert!(s.detect_violations().is_empty());
}

#[test]
fn invalid_input_is_rejected_before_mutation() {
    let employees = vec![
        Employee::new("A", true, [morning(1)]).unwrap(),
        Employee::new("B", true, [morning(9)]).unwrap(),
    ];
    let roster = Roster::new(employees, Calendar::uniform(1, 7, 2).unwrap());
    let mut s = Scheduler::new(roster.clone());
    let mut rng = StdRng::seed_from_u64(0);
    let err = s
        .fill(StrategyKind::Greedy, &mut rng, FillOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SchedError::Model(ModelError::AvailabilityOutOfRange { day: 9, .. })
    ));
    assert_eq!(s.roster(), &roster);
}

#[test]
fn huge_headcounts_are_reported_without_overflow() {
    let mut s = Scheduler::new(Roster::new(Vec::new(), Calendar::uniform(1, 1, u32::MAX).unwrap()));
    let mut rng = StdRng::seed_from_u64(0);
    let report = s
        .fill(StrategyKind::Greedy, &mut rng, FillOptions::default())
        .unwrap();
    assert_eq!(report.urgent_shifts, 2);
    assert_eq!(report.missing_headcount, 2 * u64::from(u32::MAX));
    assert_eq!(report.assignments, 0);
}

#[test]
fn malformed_calendar_is_rejected_before_mutation() {
    let employees = vec![Employee::new("A", true, [morning(1)]).unwrap()];
    let mut calendar = Calendar::uniform(1, 3, 1).unwrap();
    calendar.weeks[0].days[1].index = 9;
    let roster = Roster::new(employees, calendar);
    let mut s = Scheduler::new(roster.clone());
    let mut rng = StdRng::seed_from_u64(0);
    let err = s
        .fill(StrategyKind::Greedy, &mut rng, FillOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        SchedError::Model(ModelError::DayOutOfRange { day: 9, .. })
    ));
    assert_eq!(s.roster(), &roster);
}

#[test]
fn calendar_structure_is_checked() {
    let base = Calendar::uniform(2, 3, 1).unwrap();
    assert!(base.check_structure().is_ok());

    let mut repeated_day = base.clone();
    repeated_day.weeks[0].days[2].index = 2;
    assert!(matches!(
        repeated_day.check_structure(),
        Err(ModelError::DayOutOfOrder { week: 1, expected: 3, found: 2 })
    ));

    let mut repeated_week = base.clone();
    repeated_week.weeks[1].index = 1;
    assert!(matches!(
        repeated_week.check_structure(),
        Err(ModelError::WeekOutOfOrder { expected: 2, found: 1 })
    ));

    let mut short_week = base.clone();
    short_week.weeks[1].days.pop();
    assert!(matches!(
        short_week.check_structure(),
        Err(ModelError::WeekLength { week: 2, days: 2, days_per_week: 3 })
    ));

    let mut swapped = base;
    swapped.weeks[0].days[0].morning.kind = ShiftKind::Night;
    assert!(matches!(
        swapped.check_structure(),
        Err(ModelError::ShiftKindMismatch { found: ShiftKind::Night, .. })
    ));
}

#[test]
fn duplicate_names_are_rejected() {
    let employees = vec![
        Employee::new("A", true, [morning(1)]).unwrap(),
        Employee::new("A", false, [morning(2)]).unwrap(),
    ];
    let mut s = Scheduler::new(Roster::new(employees, Calendar::uniform(1, 7, 1).unwrap()));
    let mut rng = StdRng::seed_from_u64(0);
    let err = s
        .fill(StrategyKind::RoundRobin, &mut rng, FillOptions::default())
        .unwrap_err();
    assert!(matches!(err, SchedError::Model(ModelError::DuplicateEmployee(_))));
}

#[test]
fn model_constructors_validate() {
    let dup = Employee::new("A", true, [morning(1), morning(1)]);
    assert!(matches!(dup, Err(ModelError::DuplicateAvailability { .. })));

    assert!(matches!(
        Employee::new("Urgent", true, [morning(1)]),
        Err(ModelError::ReservedName(_))
    ));
    assert!(matches!(
        Employee::new("  ", true, Vec::<DaySlot>::new()),
        Err(ModelError::EmptyName)
    ));

    let negative = Calendar::new(1, 2, |id| if id.day == 2 { -1 } else { 3 });
    assert!(matches!(
        negative,
        Err(ModelError::InvalidHeadcount { needed: -1, .. })
    ));
    assert!(matches!(
        Calendar::uniform(1, 0, 1),
        Err(ModelError::InvalidDaysPerWeek)
    ));
}

#[test]
fn calendar_dates_follow_start() {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
    let cal = Calendar::uniform(2, 5, 1).unwrap().with_start(start);
    assert_eq!(cal.date_of(1, 1), Some(start));
    assert_eq!(
        cal.date_of(2, 3),
        chrono::NaiveDate::from_ymd_opt(2025, 10, 13)
    );
    assert_eq!(cal.shift_count(), 20);
    assert!(cal.check_day(6).is_err());
}

#[test]
fn strategy_names_parse() {
    assert_eq!("greedy".parse::<StrategyKind>().unwrap(), StrategyKind::Greedy);
    assert_eq!("RR".parse::<StrategyKind>().unwrap(), StrategyKind::RoundRobin);
    assert_eq!("edf".parse::<StrategyKind>().unwrap(), StrategyKind::Deadline);
    assert!("fifo".parse::<StrategyKind>().is_err());
}
